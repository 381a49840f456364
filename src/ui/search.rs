//! The city search field and its candidate list, embedded in the route
//! panel. Edits are debounced by the geocoder; picking a candidate
//! recenters the map without touching the projection origin.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::editor::RecenterCamera;
use crate::geocode::CitySearchState;
use crate::session::EditorSession;
use crate::theme;

pub fn city_search_section(
    ui: &mut egui::Ui,
    search: &mut CitySearchState,
    session: &mut EditorSession,
    now: f64,
    recenter: &mut MessageWriter<RecenterCamera>,
) {
    ui.label("Ville :");
    let response = ui.add(
        egui::TextEdit::singleline(&mut search.query)
            .desired_width(f32::INFINITY)
            .hint_text("Rechercher une ville…"),
    );
    if response.changed() {
        search.note_edit(now);
        session.city = search.query.clone();
    }

    if search.searching {
        ui.label(egui::RichText::new("Recherche…").color(theme::ui::HINT_TEXT));
    }

    if let Some(ref error) = search.error {
        ui.colored_label(theme::ui::ERROR_TEXT, error);
    }

    let mut picked: Option<RecenterCamera> = None;
    for candidate in &search.candidates {
        if ui
            .selectable_label(false, egui::RichText::new(&candidate.display_name).small())
            .clicked()
        {
            picked = Some(RecenterCamera {
                position: candidate.position,
            });
        }
    }

    if let Some(message) = picked {
        recenter.write(message);
        search.candidates.clear();
    }
}
