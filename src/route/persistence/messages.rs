//! Message types for route persistence operations.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::route::RouteFile;

/// Request to write a route file to disk.
#[derive(Message)]
pub struct SaveRouteRequest {
    pub path: PathBuf,
    pub file: RouteFile,
}

/// Request to read a route file from disk. `read_only` is carried through to
/// the loaded-notification so the session opens the right screen.
#[derive(Message)]
pub struct LoadRouteRequest {
    pub path: PathBuf,
    pub read_only: bool,
}

/// Request to rescan the routes directory.
#[derive(Message)]
pub struct ListRoutesRequest;

/// Request to delete a saved route file.
#[derive(Message)]
pub struct DeleteRouteRequest {
    pub path: PathBuf,
}

/// Emitted after a save task completes successfully.
#[derive(Message)]
pub struct RouteSaved {
    pub path: PathBuf,
}

/// Emitted after a load task completes successfully; the session consumes
/// this to populate the editor or viewer.
#[derive(Message)]
pub struct RouteLoaded {
    pub path: PathBuf,
    pub file: RouteFile,
    pub read_only: bool,
}
