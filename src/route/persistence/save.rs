//! Route save system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use super::messages::{ListRoutesRequest, RouteSaved, SaveRouteRequest};
use super::resources::{AsyncRouteOperation, CurrentRouteFile, RouteSaveError, SaveRouteTask};
use super::results::SaveResult;

/// Starts an async save operation
pub fn save_route_system(
    mut commands: Commands,
    mut events: MessageReader<SaveRouteRequest>,
    mut async_op: ResMut<AsyncRouteOperation>,
) {
    for event in events.read() {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("Route operation already in progress, ignoring save request");
            continue;
        }

        let path = event.path.clone();
        let file = event.file.clone();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Enregistrement de {}...", file.name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            if let Some(parent) = path.parent()
                && let Err(e) = std::fs::create_dir_all(parent)
            {
                return SaveResult::error(path, format!("Failed to create routes directory: {}", e));
            }

            match serde_json::to_string_pretty(&file) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        SaveResult::error(path, format!("Failed to write file: {}", e))
                    } else {
                        SaveResult::ok(path)
                    }
                }
                Err(e) => SaveResult::error(path, format!("Failed to serialize route: {}", e)),
            }
        });

        commands.spawn(SaveRouteTask(task));
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveRouteTask)>,
    mut async_op: ResMut<AsyncRouteOperation>,
    mut current_file: ResMut<CurrentRouteFile>,
    mut save_error: ResMut<RouteSaveError>,
    mut saved_events: MessageWriter<RouteSaved>,
    mut list_events: MessageWriter<ListRoutesRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_saving = false;
            async_op.operation_description = None;

            if result.success {
                info!("Route saved to {:?}", result.path);
                save_error.message = None;
                current_file.path = Some(result.path.clone());
                saved_events.write(RouteSaved {
                    path: result.path.clone(),
                });
                // The library listing is stale after a save
                list_events.write(ListRoutesRequest);
            } else if let Some(error) = result.error {
                error!("{}", error);
                save_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}
