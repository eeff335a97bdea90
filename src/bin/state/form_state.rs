use crate::database::models::recipe::{Recipe, RecipeFields, SkillLevel};

/// Values currently typed in the form, detached from the stored row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub serving_quantity: String,
    pub preparing_time: String,
    pub skill_level: String,
    pub instructions: String,
    pub notes: String,
    selected_id: Option<i32>,
}

impl FormState {
    pub fn selected_id(&self) -> Option<i32> {
        self.selected_id
    }

    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            name: self.name.clone(),
            serving_quantity: self.serving_quantity.clone(),
            preparing_time: self.preparing_time.clone(),
            skill_level: normalize_skill_level(&self.skill_level),
            instructions: self.instructions.trim().to_owned(),
            notes: self.notes.trim().to_owned(),
        }
    }

    pub fn populate(&mut self, recipe: &Recipe) {
        let fields = RecipeFields::from(recipe);

        self.name = fields.name;
        self.serving_quantity = fields.serving_quantity;
        self.preparing_time = fields.preparing_time;
        self.skill_level = fields.skill_level;
        self.instructions = fields.instructions;
        self.notes = fields.notes;
        self.selected_id = Some(recipe.id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// Known levels are stored with their canonical spelling, anything else as typed
fn normalize_skill_level(text: &str) -> String {
    text.parse::<SkillLevel>()
        .map_or_else(|_| text.to_owned(), |level| level.to_string())
}
