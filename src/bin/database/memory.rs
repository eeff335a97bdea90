use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use diesel::ConnectionError;

use crate::database::{
    error::RepositoryError,
    models::{
        ingredient::Ingredient,
        recipe::{Recipe, RecipeFields, RecipeSummary},
        recipe_ingredient::{IngredientUsage, RecipeIngredient},
    },
    repository::RecipeRepository,
};

/// Tables kept in memory, with cascading deletes like sql/schema.sql.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: RefCell<BTreeMap<i32, Recipe>>,
    ingredients: RefCell<BTreeMap<i32, Ingredient>>,
    links: RefCell<Vec<RecipeIngredient>>,
    next_id: Cell<i32>,
    offline: Cell<bool>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call fail like an unreachable database.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn add_ingredient(&self, name: &str) -> i32 {
        let id = self.next_id();
        self.ingredients
            .borrow_mut()
            .insert(id, Ingredient::new(id, name.to_owned()));
        id
    }

    pub fn link(&self, recipe_id: i32, ingredient_id: i32, quantity: f64, unit: &str) {
        self.links.borrow_mut().push(RecipeIngredient::new(
            recipe_id,
            ingredient_id,
            Some(quantity),
            Some(unit.to_owned()),
        ));
    }

    fn next_id(&self) -> i32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn connect(&self) -> Result<(), RepositoryError> {
        if self.offline.get() {
            return Err(ConnectionError::BadConnection("connection refused".to_owned()).into());
        }

        Ok(())
    }

    fn to_recipe(id: i32, fields: &RecipeFields) -> Recipe {
        Recipe::new(
            id,
            fields.name.clone(),
            Some(fields.serving_quantity.clone()),
            Some(fields.preparing_time.clone()),
            Some(fields.skill_level.clone()),
            Some(fields.instructions.clone()),
            Some(fields.notes.clone()),
        )
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn list_recipes(&self) -> Result<Vec<RecipeSummary>, RepositoryError> {
        self.connect()?;

        Ok(self
            .recipes
            .borrow()
            .values()
            .map(|recipe| {
                RecipeSummary::new(recipe.id, recipe.name.clone(), recipe.skill_level.clone())
            })
            .collect())
    }

    fn get_recipe(&self, id: i32) -> Result<Option<Recipe>, RepositoryError> {
        self.connect()?;
        Ok(self.recipes.borrow().get(&id).cloned())
    }

    fn insert_recipe(&self, fields: &RecipeFields) -> Result<i32, RepositoryError> {
        fields.validate()?;
        self.connect()?;

        let id = self.next_id();
        self.recipes
            .borrow_mut()
            .insert(id, Self::to_recipe(id, fields));
        Ok(id)
    }

    fn update_recipe(&self, id: i32, fields: &RecipeFields) -> Result<usize, RepositoryError> {
        self.connect()?;

        let mut recipes = self.recipes.borrow_mut();
        match recipes.get_mut(&id) {
            Some(recipe) => {
                *recipe = Self::to_recipe(id, fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_recipe(&self, id: i32) -> Result<usize, RepositoryError> {
        self.connect()?;

        let removed = self.recipes.borrow_mut().remove(&id);
        if removed.is_some() {
            self.links.borrow_mut().retain(|link| link.recipe_id != id);
        }

        Ok(removed.map_or(0, |_| 1))
    }

    fn list_ingredients_for_recipe(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<IngredientUsage>, RepositoryError> {
        self.connect()?;

        let ingredients = self.ingredients.borrow();
        Ok(self
            .links
            .borrow()
            .iter()
            .filter(|link| link.recipe_id == recipe_id)
            .filter_map(|link| {
                ingredients.get(&link.ingredient_id).map(|ingredient| {
                    IngredientUsage::new(
                        ingredient.name.clone(),
                        link.quantity_used,
                        link.unit.clone(),
                    )
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pancakes() -> RecipeFields {
        RecipeFields {
            name: "Pancakes".to_owned(),
            serving_quantity: "4".to_owned(),
            preparing_time: "15".to_owned(),
            skill_level: "Easy".to_owned(),
            instructions: "Mix and fry".to_owned(),
            notes: String::new(),
        }
    }

    #[test]
    fn pancakes_scenario() {
        let repository = InMemoryRecipeRepository::new();

        let id = repository.insert_recipe(&pancakes()).unwrap();

        assert_eq!(
            repository.list_recipes().unwrap(),
            vec![RecipeSummary::new(
                id,
                "Pancakes".to_owned(),
                Some("Easy".to_owned())
            )]
        );
        let stored = repository.get_recipe(id).unwrap().unwrap();
        assert_eq!(RecipeFields::from(&stored), pancakes());
    }

    #[test]
    fn delete_cascades_to_links() {
        let repository = InMemoryRecipeRepository::new();
        let id = repository.insert_recipe(&pancakes()).unwrap();
        let flour = repository.add_ingredient("Flour");
        repository.link(id, flour, 250.0, "g");

        assert_eq!(repository.list_ingredients_for_recipe(id).unwrap().len(), 1);
        assert_eq!(repository.delete_recipe(id).unwrap(), 1);
        assert!(repository.list_ingredients_for_recipe(id).unwrap().is_empty());
        assert_eq!(repository.delete_recipe(id).unwrap(), 0);
    }
}
