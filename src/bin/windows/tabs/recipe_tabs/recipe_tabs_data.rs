use super::{form_tab::FormTab, ingredients_tab::IngredientsTab, recipes_tab::RecipesTab};

pub enum RecipeTabsData {
    Form(FormTab),
    Recipes(RecipesTab),
    Ingredients(IngredientsTab),
}
