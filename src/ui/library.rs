//! The route library screen: saved routes with open/view/delete actions,
//! plus entry points for a new route and importing an external file.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::ConfigResetNotification;
use crate::dialog::{ConfirmAction, ConfirmDialog, ConfirmRequest, ConfirmResolved};
use crate::route::persistence::{
    AsyncRouteOperation, LoadRouteRequest, RouteLibrary, RouteLoadError,
};
use crate::session::NewRouteRequest;
use crate::theme;

/// Pending "import route" file dialog, one at a time.
#[derive(Resource, Default)]
pub struct ImportState {
    pub pending: Option<Task<Option<PathBuf>>>,
}

#[allow(clippy::too_many_arguments)]
pub fn library_ui(
    mut contexts: EguiContexts,
    library: Res<RouteLibrary>,
    async_op: Res<AsyncRouteOperation>,
    load_error: Res<RouteLoadError>,
    mut import: ResMut<ImportState>,
    mut dialog: ResMut<ConfirmDialog>,
    mut new_requests: MessageWriter<NewRouteRequest>,
    mut load_requests: MessageWriter<LoadRouteRequest>,
    mut resolved: MessageWriter<ConfirmResolved>,
) -> Result {
    if let Some(ref mut task) = import.pending
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        import.pending = None;
        if let Some(path) = result {
            load_requests.write(LoadRouteRequest {
                path,
                read_only: false,
            });
        }
    }

    egui::CentralPanel::default().show(contexts.ctx_mut()?, |ui| {
        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.heading("RouteForge");
            ui.label(
                egui::RichText::new("Éditeur d'annotations de parcours")
                    .color(theme::ui::HINT_TEXT),
            );
        });
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new(
                    egui::RichText::new("Nouveau parcours").size(14.0).strong(),
                ))
                .clicked()
            {
                new_requests.write(NewRouteRequest);
            }

            if ui
                .add_enabled(import.pending.is_none(), egui::Button::new("Importer…"))
                .clicked()
            {
                let task_pool = AsyncComputeTaskPool::get();
                import.pending = Some(task_pool.spawn(async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Importer un parcours")
                        .add_filter("JSON", &["json"])
                        .pick_file()
                        .await
                        .map(|h| h.path().to_path_buf())
                }));
            }

            if async_op.is_busy()
                && let Some(ref description) = async_op.operation_description
            {
                ui.label(egui::RichText::new(description).color(theme::ui::HINT_TEXT));
            }
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(8.0);

        if let Some(ref error) = library.scan_error {
            ui.colored_label(theme::ui::ERROR_TEXT, error);
        }
        if let Some(ref error) = load_error.message {
            ui.colored_label(theme::ui::ERROR_TEXT, error);
        }

        if library.scanned && library.routes.is_empty() {
            ui.label(
                egui::RichText::new("Aucun parcours enregistré.")
                    .color(theme::ui::HINT_TEXT)
                    .italics(),
            );
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for route in &library.routes {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&route.name).size(14.0).strong());
                        let mut details = format!(
                            "{} panneau(x) · {} trajet(s) · {}",
                            route.marker_count, route.path_count, route.created_date
                        );
                        if !route.city.is_empty() {
                            details = format!("{} · {}", route.city, details);
                        }
                        ui.label(egui::RichText::new(details).color(theme::ui::HINT_TEXT).small());
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Supprimer").clicked() {
                            dialog.ask(
                                ConfirmRequest {
                                    title: "Supprimer le parcours".to_string(),
                                    message: format!("Supprimer « {} » ?", route.name),
                                    confirm_text: Some("Supprimer".to_string()),
                                    cancel_text: None,
                                    action: ConfirmAction::DeleteRoute {
                                        path: route.path.clone(),
                                    },
                                },
                                &mut resolved,
                            );
                        }
                        if ui.button("Voir").clicked() {
                            load_requests.write(LoadRouteRequest {
                                path: route.path.clone(),
                                read_only: true,
                            });
                        }
                        if ui.button("Ouvrir").clicked() {
                            load_requests.write(LoadRouteRequest {
                                path: route.path.clone(),
                                read_only: false,
                            });
                        }
                    });
                });
                ui.separator();
            }
        });
    });

    Ok(())
}

/// One-shot notice shown when the config file could not be read.
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut close = false;
    egui::Window::new("Configuration réinitialisée")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            if let Some(ref reason) = notification.reason {
                ui.label(reason);
            }
            ui.label("Les valeurs par défaut ont été restaurées.");
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                close = true;
            }
        });

    if close {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}
