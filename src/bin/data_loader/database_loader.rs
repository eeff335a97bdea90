use std::collections::HashMap;

use diesel::{insert_into, prelude::*, PgConnection};
use itertools::Itertools;
use lombok::AllArgsConstructor;
use tracing::{info, trace_span};

use crate::database::models::{
    ingredient::{Ingredient, NewIngredient},
    recipe_ingredient::RecipeIngredient,
};

use super::{
    error::ImportError,
    recipe_book::{BookRecipe, RecipeBook},
};

#[derive(AllArgsConstructor, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub ingredients: usize,
    pub recipes: usize,
    pub links: usize,
}

/// Writes a whole recipe book in one transaction, nothing is kept on failure.
pub fn store_recipe_book(
    connection: &mut PgConnection,
    book: &RecipeBook,
) -> Result<ImportSummary, ImportError> {
    let span = trace_span!("store_recipe_book");
    let _guard = span.enter();

    connection
        .build_transaction()
        .run(|connection| {
            let (ingredient_ids, inserted_ingredients) = fill_ingredients(connection, book)?;

            let mut summary = ImportSummary::new(inserted_ingredients, 0, 0);
            for book_recipe in &book.recipes {
                summary.links += fill_recipe(connection, book_recipe, &ingredient_ids)?;
                summary.recipes += 1;
            }

            Ok(summary)
        })
}

// Ingredient names already in the table are reused instead of duplicated
fn fill_ingredients(
    connection: &mut PgConnection,
    book: &RecipeBook,
) -> Result<(HashMap<String, i32>, usize), ImportError> {
    use crate::database::schema::ingredients;

    let mut ingredient_ids: HashMap<String, i32> = ingredients::table
        .select(Ingredient::as_select())
        .load(connection)?
        .into_iter()
        .map(|ingredient| (ingredient.name, ingredient.id))
        .collect();

    let missing = book
        .ingredients
        .iter()
        .map(|ingredient| ingredient.name.clone())
        .unique()
        .filter(|name| !ingredient_ids.contains_key(name))
        .map(NewIngredient::new)
        .collect_vec();

    if missing.is_empty() {
        return Ok((ingredient_ids, 0));
    }

    let ids = insert_into(ingredients::table)
        .values(&missing)
        .returning(ingredients::id)
        .get_results::<i32>(connection)?;

    info!(count = ids.len(), "Inserted ingredients");
    let inserted = ids.len();
    ingredient_ids.extend(missing.into_iter().map(|ingredient| ingredient.name).zip(ids));

    Ok((ingredient_ids, inserted))
}

fn fill_recipe(
    connection: &mut PgConnection,
    book_recipe: &BookRecipe,
    ingredient_ids: &HashMap<String, i32>,
) -> Result<usize, ImportError> {
    use crate::database::schema::{recipe, recipe_ingredients};

    book_recipe.fields.validate().map_err(|e| {
        ImportError::shape(format!("recipe {:?}", book_recipe.fields.name), e.to_string())
    })?;

    let recipe_id = insert_into(recipe::table)
        .values(&book_recipe.fields)
        .returning(recipe::id)
        .get_result::<i32>(connection)?;

    let links = recipe_links(recipe_id, book_recipe, ingredient_ids)?;

    if links.is_empty() {
        return Ok(0);
    }

    Ok(insert_into(recipe_ingredients::table)
        .values(&links)
        .execute(connection)?)
}

// An ingredient listed twice in one recipe keeps its first quantity
fn recipe_links(
    recipe_id: i32,
    book_recipe: &BookRecipe,
    ingredient_ids: &HashMap<String, i32>,
) -> Result<Vec<RecipeIngredient>, ImportError> {
    book_recipe
        .ingredients
        .iter()
        .unique_by(|usage| usage.ingredient_name.clone())
        .map(|usage| {
            let ingredient_id = ingredient_ids.get(&usage.ingredient_name).ok_or_else(|| {
                ImportError::UnknownIngredient {
                    recipe: book_recipe.fields.name.clone(),
                    ingredient: usage.ingredient_name.clone(),
                }
            })?;

            Ok(RecipeIngredient::new(
                recipe_id,
                *ingredient_id,
                usage.quantity,
                usage.unit.clone(),
            ))
        })
        .collect()
}
