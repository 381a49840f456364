//! Annotation snapshot plumbing.
//!
//! Entities are the working representation; the serializable
//! [`Annotation`] is derived from them on demand. Mutations never build a
//! snapshot directly - they mark [`SnapshotDirty`], and once no further
//! mutation arrives within the settle window a single [`AnnotationChanged`]
//! message is emitted with the fresh snapshot. A burst of edits (a drag, a
//! drawn stroke) therefore collapses into one notification.

use bevy::prelude::*;

use crate::constants::CHANGE_SETTLE_SECS;
use crate::route::{Annotation, SavedMarker, SavedPath};

use super::paths::RoutePath;
use super::signs::Sign;

/// Set whenever an annotation entity is created, moved, or removed.
#[derive(Resource, Default)]
pub struct SnapshotDirty {
    pub changed_at: Option<f64>,
}

impl SnapshotDirty {
    /// Record a mutation at `now`. Repeated marks push the settle window
    /// forward, so the notification fires only once the burst ends.
    pub fn mark(&mut self, now: f64) {
        self.changed_at = Some(now);
    }

    fn settled(&self, now: f64) -> bool {
        match self.changed_at {
            Some(changed_at) => now - changed_at >= CHANGE_SETTLE_SECS,
            None => false,
        }
    }
}

/// Emitted after mutations settle; carries the complete current snapshot.
#[derive(Message)]
pub struct AnnotationChanged {
    pub annotation: Annotation,
}

/// Build the serializable snapshot from the live entities.
pub fn collect_annotation<'a>(
    signs: impl Iterator<Item = &'a Sign>,
    paths: impl Iterator<Item = &'a RoutePath>,
) -> Annotation {
    Annotation {
        markers: signs
            .map(|sign| SavedMarker::new(sign.kind, sign.position))
            .collect(),
        paths: paths
            .map(|path| SavedPath {
                points: path.points.clone(),
            })
            .collect(),
    }
}

/// Spawn annotation entities from a loaded snapshot. The input is sanitized
/// first, so malformed markers and degenerate paths never become entities.
pub fn spawn_annotation(commands: &mut Commands, annotation: &Annotation) {
    let annotation = annotation.clone().sanitized();

    for marker in &annotation.markers {
        commands.spawn(Sign {
            kind: marker.kind,
            position: marker.position(),
        });
    }

    for path in &annotation.paths {
        commands.spawn(RoutePath {
            points: path.points.clone(),
        });
    }
}

/// Emits [`AnnotationChanged`] once the settle window after the last
/// mutation has elapsed.
pub fn emit_change_notifications(
    time: Res<Time>,
    mut dirty: ResMut<SnapshotDirty>,
    signs: Query<&Sign>,
    paths: Query<&RoutePath>,
    mut writer: MessageWriter<AnnotationChanged>,
) {
    let now = time.elapsed_secs_f64();
    if !dirty.settled(now) {
        return;
    }
    dirty.changed_at = None;

    let annotation = collect_annotation(signs.iter(), paths.iter());
    debug!(
        "Annotation changed: {} markers, {} paths",
        annotation.markers.len(),
        annotation.paths.len()
    );
    writer.write(AnnotationChanged { annotation });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::route::SignKind;

    #[test]
    fn test_clean_state_never_settles() {
        let dirty = SnapshotDirty::default();
        assert!(!dirty.settled(100.0));
    }

    #[test]
    fn test_settles_after_window() {
        let mut dirty = SnapshotDirty::default();
        dirty.mark(10.0);
        assert!(!dirty.settled(10.0));
        assert!(!dirty.settled(10.0 + CHANGE_SETTLE_SECS / 2.0));
        assert!(dirty.settled(10.0 + CHANGE_SETTLE_SECS));
    }

    #[test]
    fn test_repeated_marks_extend_the_window() {
        let mut dirty = SnapshotDirty::default();
        dirty.mark(10.0);
        dirty.mark(10.0 + CHANGE_SETTLE_SECS * 0.9);
        assert!(!dirty.settled(10.0 + CHANGE_SETTLE_SECS));
        assert!(dirty.settled(10.0 + CHANGE_SETTLE_SECS * 1.9));
    }

    #[test]
    fn test_collect_annotation_shape() {
        let signs = vec![
            Sign {
                kind: SignKind::Stop,
                position: GeoPoint::new(48.85, 2.35),
            },
            Sign {
                kind: SignKind::Zone30,
                position: GeoPoint::new(48.86, 2.36),
            },
        ];
        let paths = vec![RoutePath {
            points: vec![GeoPoint::new(48.85, 2.35), GeoPoint::new(48.851, 2.351)],
        }];

        let annotation = collect_annotation(signs.iter(), paths.iter());
        assert_eq!(annotation.markers.len(), 2);
        assert_eq!(annotation.markers[0].kind, SignKind::Stop);
        assert_eq!(annotation.markers[1].lat, 48.86);
        assert_eq!(annotation.paths.len(), 1);
        assert_eq!(annotation.paths[0].points.len(), 2);
    }

    #[test]
    fn test_collect_empty_world() {
        let annotation = collect_annotation(std::iter::empty(), std::iter::empty());
        assert!(annotation.is_empty());
    }

    // Import into a live world, then export: a well-formed snapshot must
    // come back identical.
    #[test]
    fn test_spawn_then_collect_round_trip() {
        use bevy::ecs::system::RunSystemOnce;

        let annotation = Annotation {
            markers: vec![
                SavedMarker::new(SignKind::Priority, GeoPoint::new(48.85, 2.35)),
                SavedMarker::new(SignKind::EndZone30, GeoPoint::new(48.86, 2.36)),
            ],
            paths: vec![SavedPath {
                points: vec![
                    GeoPoint::new(48.85, 2.35),
                    GeoPoint::new(48.851, 2.351),
                    GeoPoint::new(48.852, 2.352),
                ],
            }],
        };

        let mut world = World::new();
        let input = annotation.clone();
        world
            .run_system_once(move |mut commands: Commands| {
                spawn_annotation(&mut commands, &input);
            })
            .unwrap();

        let mut signs = world.query::<&Sign>();
        let mut paths = world.query::<&RoutePath>();
        let exported = collect_annotation(signs.iter(&world), paths.iter(&world));
        assert_eq!(exported, annotation);
    }
}
