use std::{fs, path::PathBuf};

use lombok::AllArgsConstructor;
use serde_json::{from_str, Map, Value};
use tracing::{debug, trace_span};

use crate::database::models::{ingredient::NewIngredient, recipe::RecipeFields};

use super::{
    data_loader::DataLoader,
    error::ImportError,
    recipe_book::{BookIngredientUsage, BookRecipe, RecipeBook},
};

#[derive(AllArgsConstructor)]
pub struct JsonLoader {
    path: PathBuf,
}

impl DataLoader for JsonLoader {
    fn load_recipe_book(&self) -> Result<RecipeBook, ImportError> {
        let span = trace_span!("load_recipe_book", path = %self.path.display());
        let _guard = span.enter();

        let text = fs::read_to_string(&self.path).map_err(|source| ImportError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_recipe_book(&text)
    }
}

pub fn parse_recipe_book(text: &str) -> Result<RecipeBook, ImportError> {
    let root: Value = from_str(text)?;
    let root = root
        .as_object()
        .ok_or_else(|| ImportError::shape("root", "expected an object"))?;

    let ingredients = array(root, "ingredients", "root")?
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let location = format!("ingredients[{index}]");
            let ingredient = object(value, &location)?;
            let name = required_text(ingredient, "name", &location)?;
            Ok(NewIngredient::new(name))
        })
        .collect::<Result<Vec<_>, ImportError>>()?;

    let recipes = array(root, "recipes", "root")?
        .iter()
        .enumerate()
        .map(|(index, value)| parse_recipe(value, &format!("recipes[{index}]")))
        .collect::<Result<Vec<_>, ImportError>>()?;

    debug!(
        ingredients = ingredients.len(),
        recipes = recipes.len(),
        "Parsed recipe book"
    );

    Ok(RecipeBook {
        ingredients,
        recipes,
    })
}

fn parse_recipe(value: &Value, location: &str) -> Result<BookRecipe, ImportError> {
    let recipe = object(value, location)?;

    let fields = RecipeFields {
        name: required_text(recipe, "name", location)?,
        serving_quantity: text(recipe, "serving_quantity", location)?,
        preparing_time: text(recipe, "preparing_time", location)?,
        skill_level: text(recipe, "skill_level", location)?,
        instructions: text(recipe, "instructions", location)?,
        notes: text(recipe, "notes", location)?,
    };

    let usages = array(recipe, "ingredients", location)?
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let location = format!("{location}.ingredients[{index}]");
            let usage = object(value, &location)?;

            let quantity = match usage.get("quantity") {
                None | Some(Value::Null) => None,
                Some(Value::Number(number)) => number.as_f64(),
                Some(_) => return Err(ImportError::shape(location, "quantity must be a number")),
            };
            let unit = Some(text(usage, "unit", &location)?).filter(|unit| !unit.is_empty());

            Ok(BookIngredientUsage::new(
                required_text(usage, "name", &location)?,
                quantity,
                unit,
            ))
        })
        .collect::<Result<Vec<_>, ImportError>>()?;

    Ok(BookRecipe::new(fields, usages))
}

fn object<'a>(value: &'a Value, location: &str) -> Result<&'a Map<String, Value>, ImportError> {
    value
        .as_object()
        .ok_or_else(|| ImportError::shape(location, "expected an object"))
}

// A missing list is an empty list
fn array<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    location: &str,
) -> Result<&'a [Value], ImportError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(values)) => Ok(values),
        Some(_) => Err(ImportError::shape(
            location,
            format!("{key} must be a list"),
        )),
    }
}

/// Numbers are accepted for text columns, "serving_quantity": 4 reads as "4".
fn text(object: &Map<String, Value>, key: &str, location: &str) -> Result<String, ImportError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(ImportError::shape(
            location,
            format!("{key} must be text"),
        )),
    }
}

fn required_text(
    object: &Map<String, Value>,
    key: &str,
    location: &str,
) -> Result<String, ImportError> {
    let value = text(object, key, location)?;

    if value.trim().is_empty() {
        return Err(ImportError::shape(location, format!("{key} is required")));
    }

    Ok(value)
}
