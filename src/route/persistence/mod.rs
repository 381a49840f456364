//! Route persistence: saving, loading, listing, and deleting route files.
//!
//! All file I/O runs on [`bevy::tasks::IoTaskPool`] background tasks with
//! poll systems on the main schedule. Save and load share a busy guard so at
//! most one heavyweight operation is in flight; results surface through
//! status resources and messages, never panics.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types for route operations
//! - [`resources`] - Resource types for state tracking
//! - [`results`] - Result types for async operations
//! - [`save`] - Save system and task polling
//! - [`load`] - Load system and task polling
//! - [`list`] - Directory scan and delete systems

mod list;
mod load;
mod messages;
mod resources;
mod results;
mod save;

#[cfg(test)]
mod tests;

// Re-exports - Messages
pub use messages::{
    DeleteRouteRequest, ListRoutesRequest, LoadRouteRequest, RouteLoaded, RouteSaved,
    SaveRouteRequest,
};

// Re-exports - Resources
pub use resources::{
    AsyncRouteOperation, CurrentRouteFile, RouteLibrary, RouteLoadError, RouteSaveError,
};

// Re-exports - Systems
pub use list::{delete_route_system, list_routes_system, poll_delete_tasks, poll_list_tasks};
pub use load::{load_route_system, poll_load_tasks};
pub use save::{poll_save_tasks, save_route_system};

use bevy::prelude::*;

pub struct RoutePersistencePlugin;

impl Plugin for RoutePersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsyncRouteOperation>()
            .init_resource::<RouteLibrary>()
            .init_resource::<RouteSaveError>()
            .init_resource::<RouteLoadError>()
            .init_resource::<CurrentRouteFile>()
            .add_message::<SaveRouteRequest>()
            .add_message::<LoadRouteRequest>()
            .add_message::<ListRoutesRequest>()
            .add_message::<DeleteRouteRequest>()
            .add_message::<RouteSaved>()
            .add_message::<RouteLoaded>()
            .add_systems(
                Update,
                (
                    save_route_system.run_if(on_message::<SaveRouteRequest>),
                    load_route_system.run_if(on_message::<LoadRouteRequest>),
                    list_routes_system.run_if(on_message::<ListRoutesRequest>),
                    delete_route_system.run_if(on_message::<DeleteRouteRequest>),
                    poll_save_tasks,
                    poll_load_tasks,
                    poll_list_tasks,
                    poll_delete_tasks,
                ),
            );
    }
}
