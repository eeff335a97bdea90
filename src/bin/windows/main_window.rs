use std::sync::mpsc::{self, Receiver};

use egui::{CentralPanel, Context};
use egui_dock::{DockArea, DockState, NodeIndex, Style};
use egui_modal::{Icon, Modal};
use tracing::{trace, trace_span};

use crate::{
    database::repository::RecipeRepository,
    state::{
        app_state::{AppState, RecipeAction},
        message::{MessageKind, UserMessage},
    },
};

use super::tabs::recipe_tabs::{
    form_tab::FormTab, ingredients_tab::IngredientsTab, recipe_tab_viewer::RecipeTabsViewer,
    recipe_tabs_data::RecipeTabsData, recipes_tab::RecipesTab,
};

pub struct MainWindow<R> {
    state: AppState<R>,
    dock_state: DockState<RecipeTabsData>,
    action_rx: Receiver<RecipeAction>,
    actions: Vec<RecipeAction>,
    current_message: Option<UserMessage>,
}

impl<R: RecipeRepository> MainWindow<R> {
    const CONFIRM_MODAL_ID: &'static str = "confirm delete modal";
    const MESSAGE_MODAL_ID: &'static str = "message modal";

    pub fn new(_: &eframe::CreationContext<'_>, repository: R) -> Self {
        let (action_tx, action_rx) = mpsc::channel();

        let form_tab = FormTab::new(action_tx.clone());
        let recipes_tab = RecipesTab::new(action_tx);
        let ingredients_tab = IngredientsTab::new();

        let mut dock_state = DockState::new(vec![RecipeTabsData::Form(form_tab)]);
        let surface = dock_state.main_surface_mut();
        let nodes = surface.split_below(
            NodeIndex::root(),
            0.42,
            vec![RecipeTabsData::Recipes(recipes_tab)],
        );
        surface.split_right(
            nodes[1],
            0.55,
            vec![RecipeTabsData::Ingredients(ingredients_tab)],
        );

        let mut state = AppState::new(repository);
        state.reload_recipes();

        Self {
            state,
            dock_state,
            action_rx,
            actions: Vec::new(),
            current_message: None,
        }
    }

    fn dispatch_actions(&mut self, ctx: &Context) {
        let span = trace_span!("dispatch_actions");
        let _guard = span.enter();

        let mut actions = std::mem::take(&mut self.actions);
        actions.extend(self.action_rx.try_iter());

        if actions.is_empty() {
            return;
        }

        trace!(?actions, "Handling actions");
        actions
            .into_iter()
            .for_each(|action| self.state.handle(action));

        ctx.request_repaint();
    }

    fn show_confirm_delete(&mut self, ctx: &Context) {
        let confirm_modal = Modal::new(ctx, Self::CONFIRM_MODAL_ID);

        confirm_modal.show(|ui| {
            confirm_modal.title(ui, "Confirm");
            confirm_modal.frame(ui, |ui| {
                confirm_modal.body_and_icon(ui, "Are you sure to delete?", Icon::Warning);
            });
            confirm_modal.buttons(ui, |ui| {
                if confirm_modal.button(ui, "No").clicked() {
                    self.actions.push(RecipeAction::CancelDelete);
                }
                if confirm_modal.caution_button(ui, "Yes").clicked() {
                    self.actions.push(RecipeAction::ConfirmDelete);
                }
            });
        });
    }

    fn show_message(&mut self, ctx: &Context) {
        let message_modal = Modal::new(ctx, Self::MESSAGE_MODAL_ID);

        if let Some(ref message) = self.current_message {
            let icon = match message.kind {
                MessageKind::Info => Icon::Info,
                MessageKind::Warning => Icon::Warning,
                MessageKind::Error => Icon::Error,
            };

            let mut closed = false;
            message_modal.show(|ui| {
                message_modal.title(ui, message.title.as_str());
                message_modal.frame(ui, |ui| {
                    message_modal.body_and_icon(ui, message.text.as_str(), icon);
                });
                message_modal.buttons(ui, |ui| {
                    closed = message_modal.button(ui, "Ok").clicked();
                });
            });

            if closed {
                self.current_message = None;
            }
        }
    }

    // Modals are opened after the actions ran so they show what the state now needs
    fn open_modals(&mut self, ctx: &Context) {
        let confirm_modal = Modal::new(ctx, Self::CONFIRM_MODAL_ID);
        if self.state.pending_delete().is_some() && !confirm_modal.is_open() {
            confirm_modal.open();
            ctx.request_repaint();
        }

        if let Some(message) = self.state.take_message() {
            self.current_message = Some(message);
            Modal::new(ctx, Self::MESSAGE_MODAL_ID).open();
            ctx.request_repaint();
        }
    }
}

impl<R: RecipeRepository> eframe::App for MainWindow<R> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let span = trace_span!("update");
        let _guard = span.enter();

        CentralPanel::default().show(ctx, |ui| {
            let mut tab_viewer = RecipeTabsViewer::new(&mut self.state);

            DockArea::new(&mut self.dock_state)
                .show_close_buttons(false)
                .style(Style::from_egui(ui.style().as_ref()))
                .show_inside(ui, &mut tab_viewer);
        });

        self.show_confirm_delete(ctx);
        self.show_message(ctx);

        self.dispatch_actions(ctx);
        self.open_modals(ctx);
    }
}
