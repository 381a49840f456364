//! The route metadata panel: name, description, city search, counts,
//! and the save/clear/export actions.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::dialog::{ConfirmAction, ConfirmDialog, ConfirmRequest, ConfirmResolved};
use crate::editor::RecenterCamera;
use crate::geocode::CitySearchState;
use crate::route::persistence::{AsyncRouteOperation, RouteSaveError};
use crate::session::{EditorSession, SaveSessionRequest};
use crate::theme;

use super::search::city_search_section;

/// Pending "export snapshot" file dialog, one at a time.
#[derive(Resource, Default)]
pub struct ExportState {
    pub pending: Option<Task<Option<PathBuf>>>,
}

#[allow(clippy::too_many_arguments)]
pub fn route_panel_ui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut session: ResMut<EditorSession>,
    mut search: ResMut<CitySearchState>,
    mut export: ResMut<ExportState>,
    async_op: Res<AsyncRouteOperation>,
    save_error: Res<RouteSaveError>,
    mut dialog: ResMut<ConfirmDialog>,
    mut save_requests: MessageWriter<SaveSessionRequest>,
    mut recenter: MessageWriter<RecenterCamera>,
    mut resolved: MessageWriter<ConfirmResolved>,
) -> Result {
    // Finish a pending export dialog before drawing anything
    if let Some(ref mut task) = export.pending
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        export.pending = None;
        if let Some(path) = result {
            write_snapshot(&path, &session);
        }
    }

    let now = time.elapsed_secs_f64();

    egui::SidePanel::right("route_panel")
        .default_width(280.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.heading("Parcours");
            ui.add_space(8.0);

            ui.label("Nom :");
            ui.add(
                egui::TextEdit::singleline(&mut session.name)
                    .desired_width(f32::INFINITY)
                    .hint_text("Parcours sans titre"),
            );

            ui.add_space(6.0);
            ui.label("Description :");
            ui.add(
                egui::TextEdit::multiline(&mut session.description)
                    .desired_width(f32::INFINITY)
                    .desired_rows(3),
            );

            ui.add_space(6.0);
            city_search_section(ui, &mut search, &mut session, now, &mut recenter);

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);

            ui.label(
                egui::RichText::new(format!(
                    "{} panneau(x) · {} trajet(s)",
                    session.annotation.markers.len(),
                    session.annotation.paths.len()
                ))
                .color(theme::ui::LABEL_TEXT),
            );

            ui.add_space(8.0);

            let busy = async_op.is_busy();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Enregistrer"))
                    .clicked()
                {
                    save_requests.write(SaveSessionRequest);
                }

                let can_clear = !session.annotation.is_empty() && !dialog.is_open();
                if ui
                    .add_enabled(can_clear, egui::Button::new("Tout effacer"))
                    .clicked()
                {
                    dialog.ask(
                        ConfirmRequest {
                            title: "Tout effacer".to_string(),
                            message: "Supprimer tous les panneaux et trajets du parcours ?"
                                .to_string(),
                            confirm_text: Some("Effacer".to_string()),
                            cancel_text: None,
                            action: ConfirmAction::ClearAnnotation,
                        },
                        &mut resolved,
                    );
                }
            });

            ui.add_space(4.0);
            if ui
                .add_enabled(export.pending.is_none(), egui::Button::new("Exporter JSON…"))
                .clicked()
            {
                let task_pool = AsyncComputeTaskPool::get();
                export.pending = Some(task_pool.spawn(async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Exporter l'annotation")
                        .add_filter("JSON", &["json"])
                        .set_file_name("annotation.json")
                        .save_file()
                        .await
                        .map(|h| h.path().to_path_buf())
                }));
            }

            ui.add_space(8.0);
            if let Some(ref description) = async_op.operation_description {
                ui.label(egui::RichText::new(description).color(theme::ui::HINT_TEXT));
            } else if let Some(ref message) = save_error.message {
                ui.colored_label(theme::ui::ERROR_TEXT, message);
            } else if session.saved_at.is_some() {
                ui.colored_label(theme::ui::SAVED_TEXT, "Enregistré");
            }
        });

    Ok(())
}

/// Write the bare annotation snapshot (not the whole route file) for use
/// outside the application.
fn write_snapshot(path: &PathBuf, session: &EditorSession) {
    match serde_json::to_string_pretty(&session.annotation) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                error!("Failed to export annotation to {:?}: {}", path, e);
            } else {
                info!("Exported annotation to {:?}", path);
            }
        }
        Err(e) => error!("Failed to serialize annotation: {}", e),
    }
}
