use super::{error::ImportError, recipe_book::RecipeBook};

pub trait DataLoader {
    fn load_recipe_book(&self) -> Result<RecipeBook, ImportError>;
}
