use bevy::prelude::*;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::geo::METERS_PER_DEGREE;
use crate::theme;

use super::camera::{CameraZoom, EditorCamera};

/// Graticule line spacing in degrees; every other line is drawn stronger.
const GRATICULE_STEP_DEG: f64 = 0.005;

/// Pick the graticule spacing in world meters. At high zoom-out the base
/// step would flood the view, so the step doubles until lines stay sparse.
fn graticule_step_meters(view_height: f32) -> f32 {
    let mut step = (GRATICULE_STEP_DEG * METERS_PER_DEGREE) as f32;
    while view_height / step > 40.0 {
        step *= 2.0;
    }
    step
}

/// Draws a light latitude/longitude reference grid under the annotation.
pub fn draw_graticule(
    mut gizmos: Gizmos,
    camera_query: Query<(&Transform, &CameraZoom), With<EditorCamera>>,
) {
    let Ok((camera_transform, zoom)) = camera_query.single() else {
        return;
    };

    let view_width = DEFAULT_WINDOW_WIDTH * zoom.scale;
    let view_height = DEFAULT_WINDOW_HEIGHT * zoom.scale;
    let step = graticule_step_meters(view_height);

    let camera_pos = camera_transform.translation.truncate();

    let start_x = ((camera_pos.x - view_width / 2.0) / step).floor() as i32;
    let end_x = ((camera_pos.x + view_width / 2.0) / step).ceil() as i32;
    let start_y = ((camera_pos.y - view_height / 2.0) / step).floor() as i32;
    let end_y = ((camera_pos.y + view_height / 2.0) / step).ceil() as i32;

    for x in start_x..=end_x {
        let color = if x % 2 == 0 {
            theme::GRATICULE_MAJOR_COLOR
        } else {
            theme::GRATICULE_COLOR
        };
        let x_pos = x as f32 * step;
        gizmos.line_2d(
            Vec2::new(x_pos, start_y as f32 * step),
            Vec2::new(x_pos, end_y as f32 * step),
            color,
        );
    }

    for y in start_y..=end_y {
        let color = if y % 2 == 0 {
            theme::GRATICULE_MAJOR_COLOR
        } else {
            theme::GRATICULE_COLOR
        };
        let y_pos = y as f32 * step;
        gizmos.line_2d(
            Vec2::new(start_x as f32 * step, y_pos),
            Vec2::new(end_x as f32 * step, y_pos),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_base_at_close_zoom() {
        let base = (GRATICULE_STEP_DEG * METERS_PER_DEGREE) as f32;
        assert_eq!(graticule_step_meters(base * 10.0), base);
    }

    #[test]
    fn test_step_doubles_when_zoomed_out() {
        let base = (GRATICULE_STEP_DEG * METERS_PER_DEGREE) as f32;
        let step = graticule_step_meters(base * 100.0);
        assert!(step > base);
        // Always a power-of-two multiple of the base step
        let ratio = step / base;
        assert_eq!(ratio.fract(), 0.0);
    }

    #[test]
    fn test_step_keeps_line_count_bounded() {
        for view_height in [1000.0, 10_000.0, 100_000.0, 1_000_000.0] {
            let step = graticule_step_meters(view_height);
            assert!(view_height / step <= 40.0);
        }
    }
}
