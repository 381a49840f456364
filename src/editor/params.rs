//! Common SystemParam bundles to reduce parameter counts in editor systems.
//!
//! Most input systems need the same camera/window plumbing to turn a cursor
//! position into a geographic point. Rather than repeating four queries
//! everywhere, they take a [`MapCursor`] bundle.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::geo::{GeoPoint, MapOrigin};

use super::camera::{CameraZoom, EditorCamera};

/// Bundled camera, window, and projection queries for cursor lookups.
#[derive(SystemParam)]
pub struct MapCursor<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static CameraZoom),
        With<EditorCamera>,
    >,
    pub origin: Res<'w, MapOrigin>,
}

impl MapCursor<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Get the geographic position of the cursor, if available
    pub fn cursor_geo_pos(&self) -> Option<GeoPoint> {
        self.cursor_world_pos().map(|w| self.origin.unproject(w))
    }

    /// World meters per screen pixel at the current zoom. Glyphs and hit
    /// radii are specified in pixels, so systems scale them by this.
    pub fn meters_per_pixel(&self) -> f32 {
        self.camera
            .single()
            .map(|(_, _, zoom)| zoom.scale)
            .unwrap_or(1.0)
    }

    /// Screen position of a world point, if it projects onto the viewport.
    pub fn world_to_screen(&self, world: Vec2) -> Option<Vec2> {
        let (camera, transform, _) = self.camera.single().ok()?;
        camera.world_to_viewport(transform, world.extend(0.0)).ok()
    }

    /// Screen position of a geographic point, if visible.
    pub fn geo_to_screen(&self, point: GeoPoint) -> Option<Vec2> {
        self.world_to_screen(self.origin.project(point))
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
