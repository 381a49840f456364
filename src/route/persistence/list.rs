//! Routes directory scanning and route deletion.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use std::path::Path;

use crate::paths;
use crate::route::{RouteFile, RouteSummary};

use super::messages::{DeleteRouteRequest, ListRoutesRequest};
use super::resources::{DeleteRouteTask, ListRoutesTask, RouteLibrary};
use super::results::{DeleteResult, ListResult};

/// Scan the routes directory and build one summary per parseable file.
/// Unparseable files are logged and skipped; they never fail the scan.
fn scan_routes_dir(dir: &Path) -> ListResult {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            return ListResult {
                routes: Vec::new(),
                error: Some(format!("Failed to read routes directory: {}", e)),
            };
        }
    };

    let mut routes = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<RouteFile>(&json) {
                Ok(file) => {
                    routes.push((file.created_at.clone(), RouteSummary::from_file(path, &file)))
                }
                Err(e) => warn!("Skipping unparseable route file {:?}: {}", path, e),
            },
            Err(e) => warn!("Skipping unreadable route file {:?}: {}", path, e),
        }
    }

    // Newest first; RFC 3339 strings order chronologically
    routes.sort_by(|(a, sa), (b, sb)| b.cmp(a).then(sa.name.cmp(&sb.name)));

    ListResult {
        routes: routes.into_iter().map(|(_, summary)| summary).collect(),
        error: None,
    }
}

/// Starts an async directory scan. Unlike save/load there is no busy guard;
/// a scan is cheap and the latest result simply wins.
pub fn list_routes_system(
    mut commands: Commands,
    mut events: MessageReader<ListRoutesRequest>,
) {
    let mut requested = false;
    for _ in events.read() {
        requested = true;
    }
    if !requested {
        return;
    }

    let dir = paths::routes_dir();
    let task_pool = IoTaskPool::get();
    let task = task_pool.spawn(async move { scan_routes_dir(&dir) });
    commands.spawn(ListRoutesTask(task));
}

/// Polls scan tasks into the library resource.
pub fn poll_list_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ListRoutesTask)>,
    mut library: ResMut<RouteLibrary>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            library.scanned = true;
            library.scan_error = result.error;
            if library.scan_error.is_none() {
                library.routes = result.routes;
            }

            commands.entity(entity).despawn();
        }
    }
}

/// Starts an async delete of a route file.
pub fn delete_route_system(
    mut commands: Commands,
    mut events: MessageReader<DeleteRouteRequest>,
) {
    for event in events.read() {
        let path = event.path.clone();
        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match std::fs::remove_file(&path) {
                Ok(()) => DeleteResult {
                    path,
                    success: true,
                    error: None,
                },
                Err(e) => DeleteResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to delete route: {}", e)),
                },
            }
        });
        commands.spawn(DeleteRouteTask(task));
    }
}

/// Polls delete tasks and refreshes the listing afterwards.
pub fn poll_delete_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut DeleteRouteTask)>,
    mut list_events: MessageWriter<ListRoutesRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            if result.success {
                info!("Deleted route {:?}", result.path);
            } else if let Some(error) = result.error {
                error!("{}", error);
            }
            list_events.write(ListRoutesRequest);

            commands.entity(entity).despawn();
        }
    }
}
