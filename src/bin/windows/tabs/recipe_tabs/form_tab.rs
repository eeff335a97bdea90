use std::sync::mpsc::Sender;

use egui::{ComboBox, Grid, TextEdit, Ui};

use crate::{
    database::models::recipe::SkillLevel,
    state::{
        app_state::{FlowState, RecipeAction},
        form_state::FormState,
    },
};

use super::send_action;

pub struct FormTab {
    action_tx: Sender<RecipeAction>,
}

impl FormTab {
    const FIELD_WIDTH: f32 = 320f32;

    pub fn new(action_tx: Sender<RecipeAction>) -> Self {
        Self { action_tx }
    }

    pub fn show(&mut self, ui: &mut Ui, form: &mut FormState, flow: FlowState) {
        ui.label(Self::status_text(form, flow));
        ui.separator();

        let mut changed = false;

        ui.horizontal_top(|ui| {
            Grid::new("recipe form fields")
                .num_columns(2)
                .spacing([12f32, 8f32])
                .show(ui, |ui| {
                    ui.label("Name:");
                    changed |= ui
                        .add(TextEdit::singleline(&mut form.name).desired_width(Self::FIELD_WIDTH))
                        .changed();
                    ui.end_row();

                    ui.label("Serving:");
                    changed |= ui.text_edit_singleline(&mut form.serving_quantity).changed();
                    ui.end_row();

                    ui.label("Prep Time:");
                    changed |= ui.text_edit_singleline(&mut form.preparing_time).changed();
                    ui.end_row();

                    ui.label("Skill:");
                    let selected_text = form.skill_level.clone();
                    ComboBox::new("skill level", "")
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for level in SkillLevel::ALL {
                                changed |= ui
                                    .selectable_value(
                                        &mut form.skill_level,
                                        level.to_string(),
                                        level.as_str(),
                                    )
                                    .changed();
                            }
                        });
                    ui.end_row();
                });

            Grid::new("recipe form texts")
                .num_columns(2)
                .spacing([12f32, 8f32])
                .show(ui, |ui| {
                    ui.label("Instructions:");
                    changed |= ui
                        .add(
                            TextEdit::multiline(&mut form.instructions)
                                .desired_rows(5)
                                .desired_width(Self::FIELD_WIDTH),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Notes:");
                    changed |= ui
                        .add(
                            TextEdit::multiline(&mut form.notes)
                                .desired_rows(3)
                                .desired_width(Self::FIELD_WIDTH),
                        )
                        .changed();
                    ui.end_row();
                });
        });

        if changed {
            send_action(&self.action_tx, RecipeAction::FormEdited);
        }

        ui.add_space(8f32);
        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                send_action(&self.action_tx, RecipeAction::Add);
            }
            if ui.button("Update").clicked() {
                send_action(&self.action_tx, RecipeAction::Update);
            }
            if ui.button("Delete").clicked() {
                send_action(&self.action_tx, RecipeAction::Delete);
            }
            if ui.button("Clear").clicked() {
                send_action(&self.action_tx, RecipeAction::Clear);
            }
        });
    }

    fn status_text(form: &FormState, flow: FlowState) -> String {
        match (flow, form.selected_id()) {
            (FlowState::Viewing, Some(id)) => format!("Recipe #{id}"),
            (FlowState::Editing, Some(id)) => format!("Recipe #{id} (modified)"),
            _ => "New recipe".to_owned(),
        }
    }
}
