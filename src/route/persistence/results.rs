//! Result types for async route file operations.

use std::path::PathBuf;

use crate::route::{RouteFile, RouteSummary};

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub file: Option<RouteFile>,
    pub read_only: bool,
    pub error: Option<String>,
}

/// Result of scanning the routes directory
pub struct ListResult {
    pub routes: Vec<RouteSummary>,
    pub error: Option<String>,
}

/// Result of deleting a route file
pub struct DeleteResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

impl SaveResult {
    pub fn ok(path: PathBuf) -> Self {
        Self {
            path,
            success: true,
            error: None,
        }
    }

    pub fn error(path: PathBuf, message: String) -> Self {
        Self {
            path,
            success: false,
            error: Some(message),
        }
    }
}

impl LoadResult {
    pub fn ok(path: PathBuf, file: RouteFile, read_only: bool) -> Self {
        Self {
            path,
            file: Some(file),
            read_only,
            error: None,
        }
    }

    pub fn error(path: PathBuf, read_only: bool, message: String) -> Self {
        Self {
            path,
            file: None,
            read_only,
            error: Some(message),
        }
    }
}
