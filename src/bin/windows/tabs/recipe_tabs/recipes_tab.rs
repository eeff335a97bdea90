use std::sync::mpsc::Sender;

use egui::{Grid, RichText, ScrollArea, Ui};

use crate::{database::models::recipe::RecipeSummary, state::app_state::RecipeAction};

use super::send_action;

pub struct RecipesTab {
    action_tx: Sender<RecipeAction>,
}

impl RecipesTab {
    pub fn new(action_tx: Sender<RecipeAction>) -> Self {
        Self { action_tx }
    }

    /// `added_id` is the last recipe added from the form, shown in bold.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        recipes: &[RecipeSummary],
        selected_id: Option<i32>,
        added_id: Option<i32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(format!("{} recipes", recipes.len()));
            if ui.button("Reload").clicked() {
                send_action(&self.action_tx, RecipeAction::Reload);
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Grid::new("recipes list")
                    .num_columns(3)
                    .striped(true)
                    .min_col_width(80f32)
                    .show(ui, |ui| {
                        ui.strong("ID");
                        ui.strong("Name");
                        ui.strong("Skill");
                        ui.end_row();

                        recipes.iter().for_each(|recipe| {
                            let selected = selected_id == Some(recipe.id);
                            let skill_level = recipe.skill_level.as_deref().unwrap_or_default();
                            let name = RichText::new(recipe.name.as_str());
                            let name = if added_id == Some(recipe.id) {
                                name.strong()
                            } else {
                                name
                            };

                            // A click anywhere on the row selects it
                            let clicked = [
                                ui.selectable_label(selected, recipe.id.to_string()),
                                ui.selectable_label(selected, name),
                                ui.selectable_label(selected, skill_level),
                            ]
                            .iter()
                            .any(|response| response.clicked());

                            if clicked && !selected {
                                send_action(&self.action_tx, RecipeAction::Select(recipe.id));
                            }
                            ui.end_row();
                        });
                    });
            });
    }
}
