pub mod form_tab;
pub mod ingredients_tab;
pub mod recipe_tab_viewer;
pub mod recipe_tabs_data;
pub mod recipes_tab;

use std::sync::mpsc::Sender;

use tracing::warn;

use crate::state::app_state::RecipeAction;

fn send_action(action_tx: &Sender<RecipeAction>, action: RecipeAction) {
    if action_tx.send(action).is_err() {
        warn!(?action, "Action dropped, the window is gone");
    }
}
