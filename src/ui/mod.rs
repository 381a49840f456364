mod library;
mod route_panel;
mod search;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::session::{in_editor, in_library, in_viewer};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<library::ImportState>()
            .init_resource::<route_panel::ExportState>()
            // Side panel first so the top panel fits beside it, then the
            // screen-level surfaces, then overlays
            .add_systems(
                EguiPrimaryContextPass,
                (
                    route_panel::route_panel_ui.run_if(in_editor),
                    toolbar::toolbar_ui.run_if(in_editor),
                    toolbar::viewer_toolbar_ui.run_if(in_viewer),
                    library::library_ui.run_if(in_library),
                    library::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}
