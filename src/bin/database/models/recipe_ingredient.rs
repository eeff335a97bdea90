use diesel::prelude::*;
use lombok::AllArgsConstructor;

#[derive(Queryable, Selectable, Insertable, AllArgsConstructor, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::database::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub quantity_used: Option<f64>,
    pub unit: Option<String>,
}

// One line of the ingredients list: Ingredients.Name joined with the link row
#[derive(Queryable, AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct IngredientUsage {
    pub ingredient_name: String,
    pub quantity_used: Option<f64>,
    pub unit: Option<String>,
}

impl IngredientUsage {
    pub fn quantity_label(&self) -> String {
        self.quantity_used
            .map(|quantity| quantity.to_string())
            .unwrap_or_default()
    }

    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or_default()
    }
}
