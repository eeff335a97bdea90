use diesel::prelude::*;
use tracing::{debug, trace_span, warn};

use crate::database::{
    connection::ConnectionFactory,
    error::RepositoryError,
    models::{
        recipe::{Recipe, RecipeFields, RecipeSummary},
        recipe_ingredient::IngredientUsage,
    },
};

/// Every operation is a single statement committed on its own.
#[cfg_attr(test, mockall::automock)]
pub trait RecipeRepository {
    fn list_recipes(&self) -> Result<Vec<RecipeSummary>, RepositoryError>;

    fn get_recipe(&self, id: i32) -> Result<Option<Recipe>, RepositoryError>;

    /// Rejects an empty name before touching the database.
    fn insert_recipe(&self, fields: &RecipeFields) -> Result<i32, RepositoryError>;

    /// Returns the number of rows changed, zero when the id does not exist.
    fn update_recipe(&self, id: i32, fields: &RecipeFields) -> Result<usize, RepositoryError>;

    /// Returns the number of rows removed, zero when the id does not exist.
    fn delete_recipe(&self, id: i32) -> Result<usize, RepositoryError>;

    fn list_ingredients_for_recipe(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<IngredientUsage>, RepositoryError>;
}

pub struct DieselRecipeRepository {
    factory: ConnectionFactory,
}

impl DieselRecipeRepository {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }
}

impl RecipeRepository for DieselRecipeRepository {
    fn list_recipes(&self) -> Result<Vec<RecipeSummary>, RepositoryError> {
        use crate::database::schema::recipe;

        let span = trace_span!("list_recipes");
        let _guard = span.enter();

        let mut connection = self.factory.open()?;

        let recipes = recipe::table
            .select(RecipeSummary::as_select())
            .order(recipe::id.asc())
            .load(&mut *connection)?;

        debug!(count = recipes.len(), "Loaded recipes");
        Ok(recipes)
    }

    fn get_recipe(&self, id: i32) -> Result<Option<Recipe>, RepositoryError> {
        use crate::database::schema::recipe;

        let span = trace_span!("get_recipe", id);
        let _guard = span.enter();

        let mut connection = self.factory.open()?;

        let recipe = recipe::table
            .find(id)
            .select(Recipe::as_select())
            .first(&mut *connection)
            .optional()?;

        Ok(recipe)
    }

    fn insert_recipe(&self, fields: &RecipeFields) -> Result<i32, RepositoryError> {
        use crate::database::schema::recipe;

        let span = trace_span!("insert_recipe");
        let _guard = span.enter();

        fields.validate()?;

        let mut connection = self.factory.open()?;

        let id = diesel::insert_into(recipe::table)
            .values(fields)
            .returning(recipe::id)
            .get_result::<i32>(&mut *connection)?;

        debug!(id, name = %fields.name, "Inserted recipe");
        Ok(id)
    }

    fn update_recipe(&self, id: i32, fields: &RecipeFields) -> Result<usize, RepositoryError> {
        use crate::database::schema::recipe;

        let span = trace_span!("update_recipe", id);
        let _guard = span.enter();

        let mut connection = self.factory.open()?;

        let updated = diesel::update(recipe::table.find(id))
            .set(fields)
            .execute(&mut *connection)?;

        if updated == 0 {
            warn!(id, "Update matched no recipe");
        }

        Ok(updated)
    }

    fn delete_recipe(&self, id: i32) -> Result<usize, RepositoryError> {
        use crate::database::schema::recipe;

        let span = trace_span!("delete_recipe", id);
        let _guard = span.enter();

        let mut connection = self.factory.open()?;

        let deleted = diesel::delete(recipe::table.find(id)).execute(&mut *connection)?;

        if deleted == 0 {
            warn!(id, "Delete matched no recipe");
        }

        Ok(deleted)
    }

    fn list_ingredients_for_recipe(
        &self,
        recipe_id: i32,
    ) -> Result<Vec<IngredientUsage>, RepositoryError> {
        use crate::database::schema::{ingredients, recipe_ingredients};

        let span = trace_span!("list_ingredients_for_recipe", recipe_id);
        let _guard = span.enter();

        let mut connection = self.factory.open()?;

        let usages = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq(recipe_id))
            .select((
                ingredients::name,
                recipe_ingredients::quantity_used,
                recipe_ingredients::unit,
            ))
            .load::<IngredientUsage>(&mut *connection)?;

        Ok(usages)
    }
}
