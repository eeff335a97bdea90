use std::{fmt, str::FromStr};

use diesel::prelude::*;
use lombok::AllArgsConstructor;

use crate::database::error::ValidationError;

#[derive(Queryable, Selectable, Identifiable, AllArgsConstructor, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::database::schema::recipe)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub serving_quantity: Option<String>,
    pub preparing_time: Option<String>,
    pub skill_level: Option<String>,
    pub instructions: Option<String>,
    pub notes: Option<String>,
}

// Row of the recipe list
#[derive(Queryable, Selectable, AllArgsConstructor, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::database::schema::recipe)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub skill_level: Option<String>,
}

/// The six editable columns, written as a whole by insert and update.
#[derive(Insertable, AsChangeset, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::database::schema::recipe)]
pub struct RecipeFields {
    pub name: String,
    pub serving_quantity: String,
    pub preparing_time: String,
    pub skill_level: String,
    pub instructions: String,
    pub notes: String,
}

impl RecipeFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(())
    }
}

impl From<&Recipe> for RecipeFields {
    fn from(recipe: &Recipe) -> Self {
        let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            name: recipe.name.clone(),
            serving_quantity: or_empty(&recipe.serving_quantity),
            preparing_time: or_empty(&recipe.preparing_time),
            skill_level: or_empty(&recipe.skill_level),
            instructions: or_empty(&recipe.instructions),
            notes: or_empty(&recipe.notes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillLevel {
    Easy,
    Medium,
    Hard,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [SkillLevel::Easy, SkillLevel::Medium, SkillLevel::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Easy => "Easy",
            SkillLevel::Medium => "Medium",
            SkillLevel::Hard => "Hard",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown skill level: {s}"))
    }
}
