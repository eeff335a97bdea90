use tracing::{debug, error, info, trace_span, warn};

use crate::database::{
    error::RepositoryError,
    models::{recipe::RecipeSummary, recipe_ingredient::IngredientUsage},
    repository::RecipeRepository,
};

use super::{form_state::FormState, message::UserMessage};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No selection, empty form
    #[default]
    Idle,
    /// A recipe is selected and shown as stored
    Viewing,
    /// The selected recipe has unsaved changes in the form
    Editing,
}

/// Everything a widget can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    Reload,
    Select(i32),
    FormEdited,
    Add,
    Update,
    Delete,
    ConfirmDelete,
    CancelDelete,
    Clear,
}

/// State of the recipe window. Every mutation reloads the recipe list from
/// the repository instead of patching it.
pub struct AppState<R> {
    repository: R,
    form: FormState,
    recipes: Vec<RecipeSummary>,
    ingredients: Vec<IngredientUsage>,
    flow: FlowState,
    pending_delete: Option<i32>,
    last_inserted_id: Option<i32>,
    message: Option<UserMessage>,
}

impl<R: RecipeRepository> AppState<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            form: FormState::default(),
            recipes: Vec::new(),
            ingredients: Vec::new(),
            flow: FlowState::Idle,
            pending_delete: None,
            last_inserted_id: None,
            message: None,
        }
    }

    pub fn handle(&mut self, action: RecipeAction) {
        let span = trace_span!("handle", ?action);
        let _guard = span.enter();

        match action {
            RecipeAction::Reload => self.reload_recipes(),
            RecipeAction::Select(id) => self.select_recipe(id),
            RecipeAction::FormEdited => self.form_edited(),
            RecipeAction::Add => self.add_recipe(),
            RecipeAction::Update => self.update_recipe(),
            RecipeAction::Delete => self.request_delete(),
            RecipeAction::ConfirmDelete => self.confirm_delete(),
            RecipeAction::CancelDelete => self.cancel_delete(),
            RecipeAction::Clear => self.clear_form(),
        }
    }

    pub fn reload_recipes(&mut self) {
        match self.repository.list_recipes() {
            Ok(recipes) => self.recipes = recipes,
            Err(e) => {
                self.recipes.clear();
                self.report(&e);
            }
        }
    }

    pub fn select_recipe(&mut self, id: i32) {
        let recipe = match self.repository.get_recipe(id) {
            Ok(recipe) => recipe,
            Err(e) => return self.report(&e),
        };

        let Some(recipe) = recipe else {
            warn!(id, "Selected recipe no longer exists");
            self.message = Some(UserMessage::warning(
                "Select",
                "This recipe no longer exists.",
            ));
            return self.reload_recipes();
        };

        self.form.populate(&recipe);
        self.flow = FlowState::Viewing;
        self.load_ingredients(id);
    }

    pub fn form_edited(&mut self) {
        if self.flow == FlowState::Viewing {
            self.flow = FlowState::Editing;
        }
    }

    pub fn add_recipe(&mut self) {
        let fields = self.form.fields();

        if let Err(e) = fields.validate() {
            debug!("Rejected recipe without a name");
            return self.report(&RepositoryError::from(e));
        }

        match self.repository.insert_recipe(&fields) {
            Ok(id) => {
                info!(id, "Recipe added");
                self.message = Some(UserMessage::info("Success", "Recipe added."));
                self.last_inserted_id = Some(id);
                self.clear_form();
                self.reload_recipes();
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn update_recipe(&mut self) {
        let Some(id) = self.form.selected_id() else {
            self.message = Some(UserMessage::warning(
                "Update",
                "Select a recipe to update.",
            ));
            return;
        };

        match self.repository.update_recipe(id, &self.form.fields()) {
            Ok(_) => {
                info!(id, "Recipe updated");
                self.message = Some(UserMessage::info("Updated", "Recipe updated."));
                self.flow = FlowState::Viewing;
                self.reload_recipes();
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn request_delete(&mut self) {
        match self.form.selected_id() {
            Some(id) => self.pending_delete = Some(id),
            None => {
                self.message = Some(UserMessage::warning(
                    "Delete",
                    "Select a recipe to delete.",
                ))
            }
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match self.repository.delete_recipe(id) {
            Ok(_) => {
                info!(id, "Recipe deleted");
                self.message = Some(UserMessage::info("Deleted", "Recipe deleted."));
                self.clear_form();
                self.reload_recipes();
            }
            Err(e) => self.report(&e),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn clear_form(&mut self) {
        self.form.clear();
        self.ingredients.clear();
        self.flow = FlowState::Idle;
    }

    fn load_ingredients(&mut self, recipe_id: i32) {
        match self.repository.list_ingredients_for_recipe(recipe_id) {
            Ok(ingredients) => self.ingredients = ingredients,
            Err(e) => {
                self.ingredients.clear();
                self.report(&e);
            }
        }
    }

    fn report(&mut self, e: &RepositoryError) {
        match e {
            RepositoryError::Validation(_) => warn!("{e}"),
            _ => error!("{e}"),
        }

        self.message = Some(UserMessage::from(e));
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn recipes(&self) -> &[RecipeSummary] {
        &self.recipes
    }

    pub fn ingredients(&self) -> &[IngredientUsage] {
        &self.ingredients
    }

    pub fn flow(&self) -> FlowState {
        self.flow
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn last_inserted_id(&self) -> Option<i32> {
        self.last_inserted_id
    }

    pub fn take_message(&mut self) -> Option<UserMessage> {
        self.message.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{
        memory::InMemoryRecipeRepository,
        models::recipe::{Recipe, RecipeFields},
        repository::MockRecipeRepository,
    };
    use crate::state::message::MessageKind;

    fn fill_pancakes(form: &mut FormState) {
        form.name = "Pancakes".to_owned();
        form.serving_quantity = "4".to_owned();
        form.preparing_time = "15".to_owned();
        form.skill_level = "Easy".to_owned();
        form.instructions = "Mix and fry".to_owned();
        form.notes = String::new();
    }

    fn state_with_pancakes() -> (AppState<InMemoryRecipeRepository>, i32) {
        let mut state = AppState::new(InMemoryRecipeRepository::new());
        fill_pancakes(state.form_mut());
        state.handle(RecipeAction::Add);
        let id = state.last_inserted_id().unwrap();
        state.take_message();
        (state, id)
    }

    #[test]
    fn add_clears_form_and_reloads_list() {
        let (mut state, id) = state_with_pancakes();

        assert_eq!(state.flow(), FlowState::Idle);
        assert_eq!(state.form(), &FormState::default());
        assert_eq!(
            state.recipes(),
            &[RecipeSummary::new(
                id,
                "Pancakes".to_owned(),
                Some("Easy".to_owned())
            )]
        );
        assert_eq!(state.take_message(), None);
    }

    #[test]
    fn add_reports_success() {
        let mut state = AppState::new(InMemoryRecipeRepository::new());
        fill_pancakes(state.form_mut());
        state.add_recipe();

        assert_eq!(
            state.take_message(),
            Some(UserMessage::info("Success", "Recipe added."))
        );
    }

    #[test]
    fn empty_name_never_reaches_the_repository() {
        let mut repository = MockRecipeRepository::new();
        repository.expect_insert_recipe().times(0);
        repository.expect_list_recipes().times(0);

        let mut state = AppState::new(repository);
        state.form_mut().notes = "no name".to_owned();
        state.handle(RecipeAction::Add);

        let message = state.take_message().unwrap();
        assert_eq!(message.kind, MessageKind::Warning);
        assert_eq!(message.text, "Name is required.");
        // Form left as typed
        assert_eq!(state.form().notes, "no name");
    }

    #[test]
    fn select_populates_form_and_loads_ingredients() {
        let (mut state, id) = state_with_pancakes();

        state.handle(RecipeAction::Select(id));

        assert_eq!(state.flow(), FlowState::Viewing);
        assert_eq!(state.form().selected_id(), Some(id));
        assert_eq!(state.form().name, "Pancakes");
        assert_eq!(state.form().instructions, "Mix and fry");
        // Nothing linked yet
        assert!(state.ingredients().is_empty());
        assert_eq!(state.take_message(), None);
    }

    #[test]
    fn select_shows_linked_ingredients() {
        let repository = InMemoryRecipeRepository::new();
        let id = repository
            .insert_recipe(&RecipeFields {
                name: "Omelette".to_owned(),
                ..RecipeFields::default()
            })
            .unwrap();
        let eggs = repository.add_ingredient("Eggs");
        repository.link(id, eggs, 3.0, "pcs");

        let mut state = AppState::new(repository);
        state.reload_recipes();
        state.select_recipe(id);

        assert_eq!(
            state.ingredients(),
            &[IngredientUsage::new(
                "Eggs".to_owned(),
                Some(3.0),
                Some("pcs".to_owned())
            )]
        );
    }

    #[test]
    fn editing_then_update_returns_to_viewing() {
        let (mut state, id) = state_with_pancakes();
        state.select_recipe(id);

        state.form_mut().name = "Buttermilk pancakes".to_owned();
        state.handle(RecipeAction::FormEdited);
        assert_eq!(state.flow(), FlowState::Editing);

        state.handle(RecipeAction::Update);

        assert_eq!(state.flow(), FlowState::Viewing);
        assert_eq!(
            state.take_message(),
            Some(UserMessage::info("Updated", "Recipe updated."))
        );
        // Form keeps what was submitted
        assert_eq!(state.form().name, "Buttermilk pancakes");
        assert_eq!(state.form().selected_id(), Some(id));
        assert_eq!(state.recipes()[0].name, "Buttermilk pancakes");
    }

    #[test]
    fn edits_without_selection_stay_idle() {
        let mut state = AppState::new(InMemoryRecipeRepository::new());
        state.form_mut().name = "Draft".to_owned();
        state.form_edited();

        assert_eq!(state.flow(), FlowState::Idle);
    }

    #[test]
    fn update_and_delete_need_a_selection() {
        let (mut state, _) = state_with_pancakes();

        state.handle(RecipeAction::Update);
        assert_eq!(
            state.take_message(),
            Some(UserMessage::warning("Update", "Select a recipe to update."))
        );

        state.handle(RecipeAction::Delete);
        assert_eq!(
            state.take_message(),
            Some(UserMessage::warning("Delete", "Select a recipe to delete."))
        );
        assert_eq!(state.pending_delete(), None);
        assert_eq!(state.recipes().len(), 1);
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let (mut state, id) = state_with_pancakes();
        state.select_recipe(id);

        state.handle(RecipeAction::Delete);
        assert_eq!(state.pending_delete(), Some(id));
        assert_eq!(state.recipes().len(), 1);

        state.handle(RecipeAction::CancelDelete);
        assert_eq!(state.pending_delete(), None);
        assert_eq!(state.flow(), FlowState::Viewing);

        state.handle(RecipeAction::Delete);
        state.handle(RecipeAction::ConfirmDelete);

        assert!(state.recipes().is_empty());
        assert_eq!(state.flow(), FlowState::Idle);
        assert_eq!(state.form(), &FormState::default());
        assert!(state.ingredients().is_empty());
        assert_eq!(
            state.take_message(),
            Some(UserMessage::info("Deleted", "Recipe deleted."))
        );
    }

    #[test]
    fn clear_detaches_selection_and_ingredients() {
        let repository = InMemoryRecipeRepository::new();
        let id = repository
            .insert_recipe(&RecipeFields {
                name: "Salad".to_owned(),
                ..RecipeFields::default()
            })
            .unwrap();
        let lettuce = repository.add_ingredient("Lettuce");
        repository.link(id, lettuce, 1.0, "head");

        let mut state = AppState::new(repository);
        state.select_recipe(id);
        assert_eq!(state.ingredients().len(), 1);

        state.handle(RecipeAction::Clear);

        assert_eq!(state.flow(), FlowState::Idle);
        assert_eq!(state.form().selected_id(), None);
        assert!(state.ingredients().is_empty());
    }

    #[test]
    fn connection_failure_keeps_form() {
        let (mut state, id) = state_with_pancakes();
        state.select_recipe(id);
        state.form_mut().notes = "unsaved".to_owned();

        state.repository.set_offline(true);
        state.handle(RecipeAction::Update);

        let message = state.take_message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.title, "Connection");
        assert_eq!(state.form().notes, "unsaved");
        assert_eq!(state.form().selected_id(), Some(id));
    }

    #[test]
    fn statement_error_is_reported() {
        let mut repository = MockRecipeRepository::new();
        repository
            .expect_insert_recipe()
            .times(1)
            .returning(|_| Err(diesel::result::Error::NotFound.into()));
        repository.expect_list_recipes().times(0);

        let mut state = AppState::new(repository);
        state.form_mut().name = "Stew".to_owned();
        state.add_recipe();

        let message = state.take_message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.title, "Error");
        assert_eq!(state.form().name, "Stew");
        assert_eq!(state.last_inserted_id(), None);
    }

    #[test]
    fn selecting_a_vanished_recipe_reloads_the_list() {
        let mut repository = MockRecipeRepository::new();
        repository.expect_get_recipe().returning(|_| Ok(None));
        repository
            .expect_list_recipes()
            .times(1)
            .returning(|| Ok(Vec::new()));
        repository.expect_list_ingredients_for_recipe().times(0);

        let mut state = AppState::new(repository);
        state.select_recipe(42);

        assert_eq!(state.flow(), FlowState::Idle);
        assert_eq!(state.take_message().unwrap().kind, MessageKind::Warning);
    }

    #[test]
    fn update_of_missing_row_is_not_an_error() {
        let mut repository = MockRecipeRepository::new();
        repository.expect_get_recipe().returning(|id| {
            Ok(Some(Recipe::new(
                id,
                "Ghost".to_owned(),
                None,
                None,
                None,
                None,
                None,
            )))
        });
        repository
            .expect_list_ingredients_for_recipe()
            .returning(|_| Ok(Vec::new()));
        repository.expect_update_recipe().returning(|_, _| Ok(0));
        repository.expect_list_recipes().returning(|| Ok(Vec::new()));

        let mut state = AppState::new(repository);
        state.select_recipe(5);
        state.update_recipe();

        assert_eq!(state.take_message().unwrap().kind, MessageKind::Info);
        assert_eq!(state.flow(), FlowState::Viewing);
    }
}
