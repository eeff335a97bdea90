use egui::Ui;
use egui_dock::TabViewer;

use crate::{database::repository::RecipeRepository, state::app_state::AppState};

use super::recipe_tabs_data::RecipeTabsData;

pub struct RecipeTabsViewer<'a, R> {
    state: &'a mut AppState<R>,
}

impl<'a, R> RecipeTabsViewer<'a, R> {
    pub fn new(state: &'a mut AppState<R>) -> Self {
        Self { state }
    }
}

impl<'a, R: RecipeRepository> TabViewer for RecipeTabsViewer<'a, R> {
    type Tab = RecipeTabsData;

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            RecipeTabsData::Form(tab) => {
                let flow = self.state.flow();
                tab.show(ui, self.state.form_mut(), flow)
            }
            RecipeTabsData::Recipes(tab) => tab.show(
                ui,
                self.state.recipes(),
                self.state.form().selected_id(),
                self.state.last_inserted_id(),
            ),
            RecipeTabsData::Ingredients(tab) => tab.show(ui, self.state.ingredients()),
        }
    }

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match tab {
            RecipeTabsData::Form(_) => "Recipe Form".into(),
            RecipeTabsData::Recipes(_) => "Recipes".into(),
            RecipeTabsData::Ingredients(_) => "Ingredients Used in Recipe".into(),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}
