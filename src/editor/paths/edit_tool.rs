//! Vertex removal for committed paths.

use bevy::prelude::*;

use super::super::mode::CurrentMode;
use super::super::snapshot::SnapshotDirty;
use super::{RemoveVertexRequest, RoutePath};

/// Removes the requested vertex, keeping the two-point floor: a path is
/// never reduced below a drawable line, so requests against a two-point
/// path are silent no-ops. Whole-path deletion is not an editing gesture.
/// A locked session drops requests outright.
pub fn handle_vertex_removal(
    mut requests: MessageReader<RemoveVertexRequest>,
    mode: Res<CurrentMode>,
    mut paths: Query<&mut RoutePath>,
    time: Res<Time>,
    mut dirty: ResMut<SnapshotDirty>,
) {
    if mode.is_locked() {
        requests.clear();
        return;
    }

    for request in requests.read() {
        let Ok(mut path) = paths.get_mut(request.path) else {
            continue;
        };
        if path.points.len() <= 2 || request.index >= path.points.len() {
            continue;
        }
        path.points.remove(request.index);
        dirty.mark(time.elapsed_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::geo::GeoPoint;

    fn path_of(n: usize) -> RoutePath {
        RoutePath {
            points: (0..n)
                .map(|i| GeoPoint::new(48.85 + i as f64 * 0.001, 2.35))
                .collect(),
        }
    }

    fn removal_world(points: usize) -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Time>();
        world.init_resource::<SnapshotDirty>();
        world.init_resource::<CurrentMode>();
        world.init_resource::<Messages<RemoveVertexRequest>>();
        let path = world.spawn(path_of(points)).id();
        (world, path)
    }

    fn request(world: &mut World, path: Entity, index: usize) {
        world
            .resource_mut::<Messages<RemoveVertexRequest>>()
            .write(RemoveVertexRequest { path, index });
    }

    #[test]
    fn test_removal_preserves_order_and_marks_dirty() {
        let (mut world, path) = removal_world(4);
        let before = world.get::<RoutePath>(path).unwrap().points.clone();
        request(&mut world, path, 2);

        world.run_system_once(handle_vertex_removal).unwrap();

        let after = &world.get::<RoutePath>(path).unwrap().points;
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[3]);
        assert!(world.resource::<SnapshotDirty>().changed_at.is_some());
    }

    #[test]
    fn test_two_point_floor_is_a_silent_no_op() {
        let (mut world, path) = removal_world(2);
        let before = world.get::<RoutePath>(path).unwrap().points.clone();
        request(&mut world, path, 0);

        world.run_system_once(handle_vertex_removal).unwrap();

        assert_eq!(world.get::<RoutePath>(path).unwrap().points, before);
        assert!(world.resource::<SnapshotDirty>().changed_at.is_none());
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let (mut world, path) = removal_world(3);
        request(&mut world, path, 7);

        world.run_system_once(handle_vertex_removal).unwrap();

        assert_eq!(world.get::<RoutePath>(path).unwrap().points.len(), 3);
        assert!(world.resource::<SnapshotDirty>().changed_at.is_none());
    }

    #[test]
    fn test_removal_suppressed_while_locked() {
        let (mut world, path) = removal_world(3);
        world.resource_mut::<CurrentMode>().lock();
        request(&mut world, path, 1);

        world.run_system_once(handle_vertex_removal).unwrap();

        assert_eq!(world.get::<RoutePath>(path).unwrap().points.len(), 3);
        assert!(world.resource::<SnapshotDirty>().changed_at.is_none());
    }
}
