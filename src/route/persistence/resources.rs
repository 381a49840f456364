//! Resource types for route persistence state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use crate::route::RouteSummary;

use super::results::{DeleteResult, ListResult, LoadResult, SaveResult};

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct RouteSaveError {
    pub message: Option<String>,
}

/// Resource tracking load operation errors for display to user.
#[derive(Resource, Default)]
pub struct RouteLoadError {
    pub message: Option<String>,
}

/// Resource tracking async route I/O operations. One operation at a time;
/// new requests are refused while one is in flight.
#[derive(Resource, Default)]
pub struct AsyncRouteOperation {
    pub is_saving: bool,
    pub is_loading: bool,
    /// Description of the current operation for the status line
    pub operation_description: Option<String>,
}

impl AsyncRouteOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// The in-memory listing of saved routes shown on the library screen.
#[derive(Resource, Default)]
pub struct RouteLibrary {
    pub routes: Vec<RouteSummary>,
    /// False until the first directory scan has completed.
    pub scanned: bool,
    pub scan_error: Option<String>,
}

/// Component for save task
#[derive(Component)]
pub struct SaveRouteTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadRouteTask(pub Task<LoadResult>);

/// Component for directory scan task
#[derive(Component)]
pub struct ListRoutesTask(pub Task<ListResult>);

/// Component for delete task
#[derive(Component)]
pub struct DeleteRouteTask(pub Task<DeleteResult>);

/// Resource tracking the file backing the current editor session, if any.
#[derive(Resource, Default)]
pub struct CurrentRouteFile {
    pub path: Option<PathBuf>,
}
