//! Gizmo rendering for committed paths, the in-progress draft, and vertex
//! handles while the edit tool is active.

use bevy::prelude::*;

use crate::constants::PATH_VERTEX_SIZE;
use crate::theme;

use super::super::mode::CurrentMode;
use super::super::params::MapCursor;
use super::{DraftPath, RoutePath};

pub fn render_paths(mut gizmos: Gizmos, cursor: MapCursor, paths: Query<&RoutePath>) {
    for path in paths.iter() {
        let points = path
            .points
            .iter()
            .map(|point| cursor.origin.project(*point))
            .collect::<Vec<_>>();
        for pair in points.windows(2) {
            gizmos.line_2d(pair[0], pair[1], theme::PATH_STROKE);
        }
    }
}

pub fn render_draft_path(mut gizmos: Gizmos, draft: Res<DraftPath>) {
    if !draft.active || draft.points.len() < 2 {
        return;
    }
    for pair in draft.points.windows(2) {
        gizmos.line_2d(pair[0], pair[1], theme::PATH_DRAFT);
    }
}

pub fn render_vertex_handles(
    mut gizmos: Gizmos,
    mode: Res<CurrentMode>,
    cursor: MapCursor,
    paths: Query<&RoutePath>,
) {
    if !mode.is_editing() {
        return;
    }

    let radius = PATH_VERTEX_SIZE * 0.5 * cursor.meters_per_pixel();
    let hover_radius = radius * 2.0;
    let cursor_world = cursor.cursor_world_pos();

    for path in paths.iter() {
        for point in &path.points {
            let center = cursor.origin.project(*point);
            let hovered = cursor_world
                .map(|c| c.distance(center) <= hover_radius)
                .unwrap_or(false);
            let color = if hovered {
                theme::PATH_VERTEX_HOVER
            } else {
                theme::PATH_VERTEX
            };
            gizmos.circle_2d(center, radius, color);
        }
    }
}
