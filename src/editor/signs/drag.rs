//! Dragging placed signs to a new position.
//!
//! The sign follows the cursor while the button is held, but the change
//! notification only fires on release - intermediate positions are never
//! reported.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::SIGN_GLYPH_SIZE;

use super::super::mode::CurrentMode;
use super::super::params::{is_cursor_over_ui, MapCursor};
use super::super::snapshot::SnapshotDirty;
use super::{Sign, SignDragState};

pub fn handle_sign_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mode: Res<CurrentMode>,
    cursor: MapCursor,
    time: Res<Time>,
    mut drag_state: ResMut<SignDragState>,
    mut dirty: ResMut<SnapshotDirty>,
    mut signs: Query<(Entity, &mut Sign)>,
    mut contexts: EguiContexts,
) {
    if !mode.allows_sign_drag() {
        drag_state.dragging = None;
        return;
    }

    if mouse_button.just_pressed(MouseButton::Left) && !is_cursor_over_ui(&mut contexts) {
        if let Some(cursor_world) = cursor.cursor_world_pos() {
            let grab_radius = SIGN_GLYPH_SIZE * 0.5 * cursor.meters_per_pixel();
            let mut closest: Option<(Entity, f32)> = None;
            for (entity, sign) in signs.iter() {
                let distance = cursor_world.distance(cursor.origin.project(sign.position));
                if distance <= grab_radius
                    && closest.is_none_or(|(_, best)| distance < best)
                {
                    closest = Some((entity, distance));
                }
            }
            if let Some((entity, _)) = closest {
                drag_state.dragging = Some(entity);
                drag_state.moved = false;
            }
        }
    }

    let Some(dragging) = drag_state.dragging else {
        return;
    };

    if mouse_button.pressed(MouseButton::Left) {
        if let Some(position) = cursor.cursor_geo_pos()
            && let Ok((_, mut sign)) = signs.get_mut(dragging)
            && sign.position != position
        {
            sign.position = position;
            drag_state.moved = true;
        }
    } else {
        // Released (or the sign was deleted mid-drag)
        if drag_state.moved {
            dirty.mark(time.elapsed_secs_f64());
        }
        drag_state.dragging = None;
        drag_state.moved = false;
    }
}
