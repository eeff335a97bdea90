use lombok::AllArgsConstructor;

use crate::database::models::{ingredient::NewIngredient, recipe::RecipeFields};

/// Everything one import adds to the database.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecipeBook {
    pub ingredients: Vec<NewIngredient>,
    pub recipes: Vec<BookRecipe>,
}

#[derive(AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct BookRecipe {
    pub fields: RecipeFields,
    pub ingredients: Vec<BookIngredientUsage>,
}

// Ingredients are referenced by name, ids are only known once inserted
#[derive(AllArgsConstructor, Debug, Clone, PartialEq)]
pub struct BookIngredientUsage {
    pub ingredient_name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}
