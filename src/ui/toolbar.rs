use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editor::CurrentMode;
use crate::route::SignKind;
use crate::session::{CloseSessionRequest, EditorSession};
use crate::theme;

/// The editor toolbar: one button per sign kind, the draw and edit tools,
/// and the lock banner after a save.
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut mode: ResMut<CurrentMode>,
    session: Res<EditorSession>,
    mut close_requests: MessageWriter<CloseSessionRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                let locked = mode.is_locked();

                for kind in SignKind::all() {
                    let selected = mode.placing_kind() == Some(*kind);
                    let button = egui::Button::new(
                        egui::RichText::new(kind.display_name()).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    if ui.add_enabled(!locked, button).clicked() {
                        mode.toggle_place(*kind);
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let draw_button = egui::Button::new(
                    egui::RichText::new("Tracer").size(14.0).strong(),
                )
                .min_size(egui::vec2(0.0, 28.0))
                .selected(mode.is_drawing());
                if ui.add_enabled(!locked, draw_button).clicked() {
                    mode.toggle_draw();
                }

                // Always enabled: the edit tool doubles as the unlock
                let edit_button = egui::Button::new(
                    egui::RichText::new("Modifier").size(14.0).strong(),
                )
                .min_size(egui::vec2(0.0, 28.0))
                .selected(mode.is_editing());
                if ui.add(edit_button).clicked() {
                    mode.toggle_edit();
                }

                if locked {
                    ui.add_space(12.0);
                    ui.colored_label(
                        theme::ui::LOCKED_BANNER,
                        egui::RichText::new("Enregistré — cliquez sur Modifier pour continuer")
                            .strong(),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new("Fermer").min_size(egui::vec2(0.0, 24.0)))
                        .clicked()
                    {
                        close_requests.write(CloseSessionRequest);
                    }
                    if !session.name.trim().is_empty() {
                        ui.label(egui::RichText::new(&session.name).strong());
                    }
                });
            });
        });
    Ok(())
}

/// The viewer's reduced toolbar: just the route name and a way back.
pub fn viewer_toolbar_ui(
    mut contexts: EguiContexts,
    session: Res<EditorSession>,
    mut close_requests: MessageWriter<CloseSessionRequest>,
) -> Result {
    egui::TopBottomPanel::top("viewer_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&session.name).size(14.0).strong());
                if !session.city.trim().is_empty() {
                    ui.label(
                        egui::RichText::new(format!("— {}", session.city))
                            .color(theme::ui::HINT_TEXT),
                    );
                }
                ui.label(egui::RichText::new("(lecture seule)").color(theme::ui::HINT_TEXT));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(egui::Button::new("Fermer").min_size(egui::vec2(0.0, 24.0)))
                        .clicked()
                    {
                        close_requests.write(CloseSessionRequest);
                    }
                });
            });
        });
    Ok(())
}
