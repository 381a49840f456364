//! Sign placement and removal.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::super::mode::CurrentMode;
use super::super::params::{is_cursor_over_ui, MapCursor};
use super::super::snapshot::SnapshotDirty;
use super::{RemoveSignRequest, Sign};

/// Places one sign of the armed kind on a left click, then disarms.
pub fn handle_sign_placement(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mode: ResMut<CurrentMode>,
    cursor: MapCursor,
    time: Res<Time>,
    mut dirty: ResMut<SnapshotDirty>,
    mut contexts: EguiContexts,
) {
    let Some(kind) = mode.placing_kind() else {
        return;
    };

    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(position) = cursor.cursor_geo_pos() else {
        return;
    };

    commands.spawn(Sign { kind, position });
    info!(
        "Placed {} sign at ({:.5}, {:.5})",
        kind.tag(),
        position.lat,
        position.lng
    );

    mode.finish_placement();
    dirty.mark(time.elapsed_secs_f64());
}

/// Despawns signs named in removal requests. Requests for entities that are
/// already gone are ignored, so double-clicking a badge is harmless. A
/// locked session drops requests outright; nothing mutates until unlock.
pub fn handle_sign_removal(
    mut commands: Commands,
    mut requests: MessageReader<RemoveSignRequest>,
    mode: Res<CurrentMode>,
    signs: Query<(), With<Sign>>,
    time: Res<Time>,
    mut dirty: ResMut<SnapshotDirty>,
) {
    if mode.is_locked() {
        requests.clear();
        return;
    }

    for request in requests.read() {
        if signs.get(request.sign).is_err() {
            continue;
        }
        commands.entity(request.sign).despawn();
        dirty.mark(time.elapsed_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::geo::GeoPoint;
    use crate::route::SignKind;

    fn removal_world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Time>();
        world.init_resource::<SnapshotDirty>();
        world.init_resource::<CurrentMode>();
        world.init_resource::<Messages<RemoveSignRequest>>();
        let sign = world
            .spawn(Sign {
                kind: SignKind::Stop,
                position: GeoPoint::new(48.85, 2.35),
            })
            .id();
        (world, sign)
    }

    #[test]
    fn test_removal_despawns_and_marks_dirty() {
        let (mut world, sign) = removal_world();
        world
            .resource_mut::<Messages<RemoveSignRequest>>()
            .write(RemoveSignRequest { sign });

        world.run_system_once(handle_sign_removal).unwrap();

        assert!(world.get::<Sign>(sign).is_none());
        assert!(world.resource::<SnapshotDirty>().changed_at.is_some());
    }

    #[test]
    fn test_removal_suppressed_while_locked() {
        let (mut world, sign) = removal_world();
        world.resource_mut::<CurrentMode>().lock();
        world
            .resource_mut::<Messages<RemoveSignRequest>>()
            .write(RemoveSignRequest { sign });

        world.run_system_once(handle_sign_removal).unwrap();

        assert!(world.get::<Sign>(sign).is_some());
        assert!(world.resource::<SnapshotDirty>().changed_at.is_none());

        // The locked run drained the request; unlocking must not replay it
        world.resource_mut::<CurrentMode>().unlock();
        world.run_system_once(handle_sign_removal).unwrap();
        assert!(world.get::<Sign>(sign).is_some());
    }
}
