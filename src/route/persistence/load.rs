//! Route load system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::route::RouteFile;

use super::messages::{LoadRouteRequest, RouteLoaded};
use super::resources::{AsyncRouteOperation, CurrentRouteFile, LoadRouteTask, RouteLoadError};
use super::results::LoadResult;

/// Starts an async load operation (file I/O and parsing only; entity
/// spawning happens in the session once the result arrives)
pub fn load_route_system(
    mut commands: Commands,
    mut events: MessageReader<LoadRouteRequest>,
    mut async_op: ResMut<AsyncRouteOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Route operation already in progress, ignoring load request");
            continue;
        }

        let path = event.path.clone();
        let read_only = event.read_only;
        let route_name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or("parcours")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Chargement de {}...", route_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let json = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    return LoadResult::error(path, read_only, format!("Failed to read file: {}", e));
                }
            };

            match serde_json::from_str::<RouteFile>(&json) {
                Ok(file) => LoadResult::ok(path, file, read_only),
                Err(e) => {
                    LoadResult::error(path, read_only, format!("Failed to parse route file: {}", e))
                }
            }
        });

        commands.spawn(LoadRouteTask(task));
    }
}

/// Polls load tasks and forwards successful loads to the session.
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadRouteTask)>,
    mut async_op: ResMut<AsyncRouteOperation>,
    mut load_error: ResMut<RouteLoadError>,
    mut current_file: ResMut<CurrentRouteFile>,
    mut loaded_events: MessageWriter<RouteLoaded>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;
            load_error.message = None;

            if let Some(error) = result.error {
                load_error.message = Some(error.clone());
                error!("{}", error);
                commands.entity(entity).despawn();
                continue;
            }

            let Some(file) = result.file else {
                commands.entity(entity).despawn();
                continue;
            };

            info!("Route loaded from {:?}", result.path);
            current_file.path = Some(result.path.clone());
            loaded_events.write(RouteLoaded {
                path: result.path,
                file,
                read_only: result.read_only,
            });

            commands.entity(entity).despawn();
        }
    }
}
