//! Gizmo rendering for sign glyphs.
//!
//! Glyphs are drawn at a constant screen size regardless of zoom, like the
//! marker icons of a web map, so the world-space radius is rescaled from
//! the camera zoom every frame.

use bevy::prelude::*;

use crate::constants::SIGN_GLYPH_SIZE;
use crate::route::SignKind;
use crate::theme;

use super::super::params::MapCursor;
use super::Sign;

pub fn render_signs(mut gizmos: Gizmos, cursor: MapCursor, signs: Query<&Sign>) {
    let radius = SIGN_GLYPH_SIZE * 0.5 * cursor.meters_per_pixel();
    let cursor_world = cursor.cursor_world_pos();

    for sign in signs.iter() {
        let center = cursor.origin.project(sign.position);

        if let Some(cursor_world) = cursor_world
            && cursor_world.distance(center) <= radius * 1.5
        {
            gizmos.circle_2d(center, radius * 1.4, theme::SIGN_HOVER_HALO);
        }

        draw_glyph(&mut gizmos, sign.kind, center, radius);
    }
}

fn draw_glyph(gizmos: &mut Gizmos, kind: SignKind, center: Vec2, radius: f32) {
    match kind {
        SignKind::Priority => {
            draw_diamond(gizmos, center, radius, theme::SIGN_PRIORITY_BORDER);
            draw_diamond(gizmos, center, radius * 0.75, theme::SIGN_PRIORITY_FILL);
            draw_diamond(gizmos, center, radius * 0.5, theme::SIGN_PRIORITY_FILL);
        }
        SignKind::Stop => {
            draw_octagon(gizmos, center, radius, theme::SIGN_STOP_FILL);
            draw_octagon(gizmos, center, radius * 0.8, theme::SIGN_STOP_FILL);
        }
        SignKind::Zone30 => {
            gizmos.circle_2d(center, radius, theme::SIGN_ZONE_RING);
            gizmos.circle_2d(center, radius * 0.9, theme::SIGN_ZONE_RING);
            gizmos.circle_2d(center, radius * 0.65, theme::SIGN_ZONE_FACE);
        }
        SignKind::EndZone30 => {
            gizmos.circle_2d(center, radius, theme::SIGN_ZONE_END);
            gizmos.circle_2d(center, radius * 0.65, theme::SIGN_ZONE_FACE);
            // Diagonal strike across the face
            let arm = Vec2::splat(radius * std::f32::consts::FRAC_1_SQRT_2);
            gizmos.line_2d(center - arm, center + arm, theme::SIGN_ZONE_END);
        }
        SignKind::Unknown => {
            gizmos.circle_2d(center, radius * 0.8, theme::SIGN_UNKNOWN);
        }
    }
}

fn draw_diamond(gizmos: &mut Gizmos, center: Vec2, radius: f32, color: Color) {
    let points = [
        center + Vec2::new(0.0, radius),
        center + Vec2::new(radius, 0.0),
        center + Vec2::new(0.0, -radius),
        center + Vec2::new(-radius, 0.0),
        center + Vec2::new(0.0, radius),
    ];
    gizmos.linestrip_2d(points, color);
}

fn draw_octagon(gizmos: &mut Gizmos, center: Vec2, radius: f32, color: Color) {
    let mut points = Vec::with_capacity(9);
    for i in 0..=8 {
        // Offset by half a step so the octagon sits flat-side down
        let angle = std::f32::consts::TAU * (i as f32 + 0.5) / 8.0;
        points.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
    }
    gizmos.linestrip_2d(points, color);
}
