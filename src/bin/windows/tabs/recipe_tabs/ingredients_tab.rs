use egui::{Grid, ScrollArea, Ui};

use crate::database::models::recipe_ingredient::IngredientUsage;

pub struct IngredientsTab;

impl IngredientsTab {
    pub fn new() -> Self {
        Self {}
    }

    pub fn show(&mut self, ui: &mut Ui, ingredients: &[IngredientUsage]) {
        if ingredients.is_empty() {
            ui.weak("No ingredients to show.");
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Grid::new("ingredients list")
                    .num_columns(3)
                    .striped(true)
                    .min_col_width(80f32)
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("Qty");
                        ui.strong("Unit");
                        ui.end_row();

                        ingredients.iter().for_each(|ingredient| {
                            ui.label(ingredient.ingredient_name.as_str());
                            ui.label(ingredient.quantity_label());
                            ui.label(ingredient.unit_label());
                            ui.end_row();
                        });
                    });
            });
    }
}
