//! Modal confirmation dialog.
//!
//! Destructive operations never run directly from the button that triggers
//! them. They call [`ConfirmDialog::ask`], the modal renders on the next
//! frame, and a [`ConfirmResolved`] message carries the verdict back to
//! whichever system owns the action. Every request resolves exactly once,
//! whether confirmed, cancelled, or dismissed with Escape.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use std::path::PathBuf;

/// What the user is being asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Wipe every marker and path of the open session.
    ClearAnnotation,
    /// Delete a saved route file from the library.
    DeleteRoute { path: PathBuf },
}

/// A pending question. Button labels fall back to Confirmer/Annuler.
#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
    pub action: ConfirmAction,
}

/// The dialog's answer. `confirmed` is false for cancel, close, and Escape.
#[derive(Message, Debug, Clone)]
pub struct ConfirmResolved {
    pub action: ConfirmAction,
    pub confirmed: bool,
}

#[derive(Resource, Default)]
pub struct ConfirmDialog {
    pending: Option<ConfirmRequest>,
}

impl ConfirmDialog {
    /// Queue a question. A second ask while one is pending replaces it and
    /// the first resolves cancelled, so no caller is left waiting forever.
    pub fn ask(&mut self, request: ConfirmRequest, resolved: &mut MessageWriter<ConfirmResolved>) {
        if let Some(previous) = self.pending.take() {
            resolved.write(ConfirmResolved {
                action: previous.action,
                confirmed: false,
            });
        }
        self.pending = Some(request);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

fn confirm_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog: ResMut<ConfirmDialog>,
    mut resolved: MessageWriter<ConfirmResolved>,
    mut was_open: Local<bool>,
) -> Result {
    let Some(request) = dialog.pending.clone() else {
        *was_open = false;
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;

    let mut verdict: Option<bool> = None;
    let mut open = true;

    let window = egui::Window::new(&request.title)
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(&request.message);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let confirm_label = request.confirm_text.as_deref().unwrap_or("Confirmer");
                let cancel_label = request.cancel_text.as_deref().unwrap_or("Annuler");

                if ui.button(confirm_label).clicked() {
                    verdict = Some(true);
                }
                if ui.button(cancel_label).clicked() {
                    verdict = Some(false);
                }
            });
        });

    // Title-bar close button or Escape both count as a cancel
    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        verdict = Some(false);
    }

    // So does clicking outside the window, but only once the dialog has been
    // on screen for a frame; otherwise the click that asked the question
    // would dismiss it immediately
    if *was_open
        && let Some(ref window) = window
        && window.response.clicked_elsewhere()
    {
        verdict = Some(false);
    }

    if let Some(confirmed) = verdict {
        dialog.pending = None;
        resolved.write(ConfirmResolved {
            action: request.action,
            confirmed,
        });
    }

    *was_open = dialog.pending.is_some();
    Ok(())
}

pub struct ConfirmDialogPlugin;

impl Plugin for ConfirmDialogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConfirmDialog>()
            .add_message::<ConfirmResolved>()
            .add_systems(EguiPrimaryContextPass, confirm_dialog_ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_starts_closed() {
        assert!(!ConfirmDialog::default().is_open());
    }

    #[test]
    fn test_default_button_labels_are_optional() {
        let request = ConfirmRequest {
            title: "Tout effacer".to_string(),
            message: "Supprimer tous les panneaux et trajets ?".to_string(),
            confirm_text: None,
            cancel_text: None,
            action: ConfirmAction::ClearAnnotation,
        };
        assert_eq!(request.confirm_text.as_deref().unwrap_or("Confirmer"), "Confirmer");
        assert_eq!(request.cancel_text.as_deref().unwrap_or("Annuler"), "Annuler");
    }
}
