pub mod badge;
pub mod camera;
pub mod grid;
pub mod mode;
pub mod params;
pub mod paths;
pub mod signs;
pub mod snapshot;

pub use camera::{EditorCamera, RecenterCamera};
pub use mode::{CurrentMode, EditorMode};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::geo::MapOrigin;
use crate::session::{in_editor, on_map};

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapOrigin>()
            .init_resource::<mode::CurrentMode>()
            .init_resource::<signs::SignDragState>()
            .init_resource::<paths::DraftPath>()
            .init_resource::<snapshot::SnapshotDirty>()
            .add_message::<camera::RecenterCamera>()
            .add_message::<signs::RemoveSignRequest>()
            .add_message::<paths::RemoveVertexRequest>()
            .add_message::<snapshot::AnnotationChanged>()
            .add_systems(Startup, camera::spawn_camera)
            // Camera and rendering run on both the editor and viewer screens
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    camera::recenter_camera,
                    grid::draw_graticule,
                    signs::rendering::render_signs,
                    paths::rendering::render_paths,
                )
                    .run_if(on_map),
            )
            // Mutations and their affordances are editor-only
            .add_systems(
                Update,
                (
                    signs::placement::handle_sign_placement,
                    signs::placement::handle_sign_removal,
                    signs::drag::handle_sign_drag,
                    paths::draw_tool::handle_path_drawing,
                    paths::edit_tool::handle_vertex_removal,
                    paths::rendering::render_draft_path,
                    paths::rendering::render_vertex_handles,
                    badge::sync_sign_badges,
                    badge::sync_vertex_badges,
                    badge::update_badge_visibility,
                    snapshot::emit_change_notifications,
                )
                    .run_if(in_editor),
            )
            .add_systems(
                EguiPrimaryContextPass,
                badge::render_delete_badges.run_if(in_editor),
            );
    }
}
