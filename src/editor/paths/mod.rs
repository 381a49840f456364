//! Drawn route paths: freehand drawing, vertex editing, and rendering.

use bevy::prelude::*;

use crate::geo::GeoPoint;

pub mod draw_tool;
pub mod edit_tool;
pub mod hit_testing;
pub mod rendering;

/// A committed route polyline. Points are geographic and ordered in draw
/// order; the invariant `points.len() >= 2` holds for every live entity.
#[derive(Component, Debug, Clone)]
pub struct RoutePath {
    pub points: Vec<GeoPoint>,
}

/// The polyline being drawn right now, in world space. Lives as a resource
/// so the preview renderer can show it before it commits.
#[derive(Resource, Default)]
pub struct DraftPath {
    pub active: bool,
    pub points: Vec<Vec2>,
}

/// Request to remove one vertex from a path (written by its delete badge).
#[derive(Message)]
pub struct RemoveVertexRequest {
    pub path: Entity,
    pub index: usize,
}
