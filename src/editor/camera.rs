use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::geo::{GeoPoint, MapOrigin};

#[derive(Component)]
pub struct EditorCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Message to move the camera over a geographic point (city search result,
/// session start). The projection origin is left untouched.
#[derive(Message)]
pub struct RecenterCamera {
    pub position: GeoPoint,
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<EditorCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) && !mouse_button.pressed(MouseButton::Right) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<EditorCamera>>,
) {
    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };

        zoom.scale = (zoom.scale * (1.0 - scroll_amount)).clamp(0.05, 50.0);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<EditorCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// Handles [`RecenterCamera`] requests by projecting the target point into
/// world space and jumping the camera there.
pub fn recenter_camera(
    mut events: MessageReader<RecenterCamera>,
    origin: Res<MapOrigin>,
    mut camera_query: Query<&mut Transform, With<EditorCamera>>,
) {
    for event in events.read() {
        let Ok(mut transform) = camera_query.single_mut() else {
            return;
        };
        let world = origin.project(event.position);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        info!(
            "Recentered camera on ({:.4}, {:.4})",
            event.position.lat, event.position.lng
        );
    }
}

/// Puts the camera back over the projection origin at default zoom, used
/// when a new session starts.
pub fn reset_camera(camera_query: &mut Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>) {
    if let Ok((mut transform, mut zoom)) = camera_query.single_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
        zoom.scale = 1.0;
    }
}
