//! Geometric hit tests for paths and their vertices, in world space.

use bevy::prelude::*;

/// Distance from `point` to the segment `a`-`b`.
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Whether `point` lies within `radius` of any segment of the polyline.
pub fn point_near_path(point: Vec2, path: &[Vec2], radius: f32) -> bool {
    path.windows(2)
        .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment_endpoints_and_middle() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        assert_eq!(distance_to_segment(Vec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Vec2::new(-4.0, 0.0), a, b), 4.0);
        assert_eq!(distance_to_segment(Vec2::new(13.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(distance_to_segment(p, Vec2::ZERO, Vec2::ZERO), 5.0);
    }

    #[test]
    fn test_point_near_path() {
        let path = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ];
        assert!(point_near_path(Vec2::new(5.0, 1.0), &path, 2.0));
        assert!(point_near_path(Vec2::new(11.0, 5.0), &path, 2.0));
        assert!(!point_near_path(Vec2::new(5.0, 5.0), &path, 2.0));
    }

    #[test]
    fn test_single_point_path_never_hit() {
        assert!(!point_near_path(Vec2::ZERO, &[Vec2::ZERO], 10.0));
    }
}
