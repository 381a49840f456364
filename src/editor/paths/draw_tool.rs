//! Freehand path drawing.
//!
//! Press starts a draft, drag appends spaced points, release commits the
//! draft as a [`RoutePath`] entity when it has at least two points. A
//! shorter stroke is discarded silently and the draw tool stays armed.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::DRAW_MIN_POINT_SPACING;

use super::super::mode::CurrentMode;
use super::super::params::{is_cursor_over_ui, MapCursor};
use super::super::snapshot::SnapshotDirty;
use super::{DraftPath, RoutePath};

pub fn handle_path_drawing(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mode: ResMut<CurrentMode>,
    cursor: MapCursor,
    time: Res<Time>,
    mut draft: ResMut<DraftPath>,
    mut dirty: ResMut<SnapshotDirty>,
    mut contexts: EguiContexts,
) {
    if !mode.is_drawing() {
        draft.active = false;
        draft.points.clear();
        return;
    }

    if mouse_button.just_pressed(MouseButton::Left) && !is_cursor_over_ui(&mut contexts) {
        if let Some(world_pos) = cursor.cursor_world_pos() {
            draft.active = true;
            draft.points.clear();
            draft.points.push(world_pos);
        }
        return;
    }

    if !draft.active {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) {
        // Spacing is screen-relative so zoomed-out strokes stay sparse
        let spacing = DRAW_MIN_POINT_SPACING * cursor.meters_per_pixel();
        if let Some(world_pos) = cursor.cursor_world_pos()
            && let Some(last) = draft.points.last()
            && world_pos.distance(*last) > spacing
        {
            draft.points.push(world_pos);
        }
    } else if mouse_button.just_released(MouseButton::Left) {
        draft.active = false;
        if draft.points.len() >= 2 {
            let points = draft
                .points
                .iter()
                .map(|world| cursor.origin.unproject(*world))
                .collect::<Vec<_>>();
            info!("Committed drawn path with {} points", points.len());
            commands.spawn(RoutePath { points });
            dirty.mark(time.elapsed_secs_f64());
            mode.finish_drawing();
        }
        draft.points.clear();
    }
}
