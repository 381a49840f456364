//! Traffic-sign markers: placement, dragging, and glyph rendering.

use bevy::prelude::*;

use crate::geo::GeoPoint;
use crate::route::SignKind;

pub mod drag;
pub mod placement;
pub mod rendering;

/// A placed sign marker. The geographic position is the source of truth;
/// rendering projects it through the session origin every frame.
#[derive(Component, Debug, Clone)]
pub struct Sign {
    pub kind: SignKind,
    pub position: GeoPoint,
}

/// Tracks an in-progress sign drag.
#[derive(Resource, Default)]
pub struct SignDragState {
    pub dragging: Option<Entity>,
    /// Set once the sign actually moved, so a plain click on a sign does
    /// not fire a change notification on release.
    pub moved: bool,
}

/// Request to delete one sign entity (written by its delete badge).
#[derive(Message)]
pub struct RemoveSignRequest {
    pub sign: Entity,
}
