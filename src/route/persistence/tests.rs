//! Unit tests for the route persistence module.

use std::path::PathBuf;

use super::resources::{AsyncRouteOperation, RouteLibrary, RouteLoadError, RouteSaveError};
use super::results::{LoadResult, SaveResult};
use crate::route::{Annotation, RouteFile};

// AsyncRouteOperation tests
#[test]
fn test_async_operation_idle_by_default() {
    let op = AsyncRouteOperation::default();
    assert!(!op.is_busy());
    assert!(op.operation_description.is_none());
}

#[test]
fn test_async_operation_busy_while_saving() {
    let op = AsyncRouteOperation {
        is_saving: true,
        ..Default::default()
    };
    assert!(op.is_busy());
}

#[test]
fn test_async_operation_busy_while_loading() {
    let op = AsyncRouteOperation {
        is_loading: true,
        ..Default::default()
    };
    assert!(op.is_busy());
}

// Result constructor tests
#[test]
fn test_save_result_ok() {
    let result = SaveResult::ok(PathBuf::from("routes/a.json"));
    assert!(result.success);
    assert!(result.error.is_none());
    assert_eq!(result.path, PathBuf::from("routes/a.json"));
}

#[test]
fn test_save_result_error() {
    let result = SaveResult::error(PathBuf::from("routes/a.json"), "disk full".to_string());
    assert!(!result.success);
    assert_eq!(result.error, Some("disk full".to_string()));
}

#[test]
fn test_load_result_ok_carries_read_only() {
    let file = RouteFile::new(
        "Tour".to_string(),
        String::new(),
        String::new(),
        Annotation::default(),
    );
    let result = LoadResult::ok(PathBuf::from("routes/a.json"), file, true);
    assert!(result.error.is_none());
    assert!(result.read_only);
    assert_eq!(result.file.unwrap().name, "Tour");
}

#[test]
fn test_load_result_error_has_no_file() {
    let result = LoadResult::error(PathBuf::from("routes/a.json"), false, "not json".to_string());
    assert!(result.file.is_none());
    assert_eq!(result.error, Some("not json".to_string()));
}

// Status resource tests
#[test]
fn test_error_resources_empty_by_default() {
    assert!(RouteSaveError::default().message.is_none());
    assert!(RouteLoadError::default().message.is_none());
}

#[test]
fn test_route_library_starts_unscanned() {
    let library = RouteLibrary::default();
    assert!(!library.scanned);
    assert!(library.routes.is_empty());
    assert!(library.scan_error.is_none());
}
