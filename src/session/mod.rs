//! Session orchestration: which screen is shown, the metadata of the open
//! route, and the transitions between library, editor, and viewer.
//!
//! The editor systems themselves never decide when a session starts or
//! ends. They run behind the [`in_editor`]/[`on_map`] run conditions and
//! this module flips the screen, seeds the projection origin, and spawns or
//! despawns the annotation entities around them.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::config::{AppConfig, SaveConfigRequest};
use crate::dialog::{ConfirmAction, ConfirmResolved};
use crate::editor::badge::DeleteBadge;
use crate::editor::camera::{reset_camera, CameraZoom, EditorCamera};
use crate::editor::mode::CurrentMode;
use crate::editor::paths::{DraftPath, RoutePath};
use crate::editor::signs::{Sign, SignDragState};
use crate::editor::snapshot::{
    collect_annotation, spawn_annotation, AnnotationChanged, SnapshotDirty,
};
use crate::geo::{GeoPoint, MapOrigin};
use crate::geocode::CitySearchState;
use crate::route::persistence::{
    CurrentRouteFile, DeleteRouteRequest, ListRoutesRequest, RouteLoaded, RouteSaved,
    SaveRouteRequest,
};
use crate::route::{Annotation, RouteFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppScreen {
    #[default]
    Library,
    Editor,
    Viewer,
}

#[derive(Resource, Default)]
pub struct ScreenState {
    pub screen: AppScreen,
}

pub fn in_library(state: Res<ScreenState>) -> bool {
    state.screen == AppScreen::Library
}

pub fn in_editor(state: Res<ScreenState>) -> bool {
    state.screen == AppScreen::Editor
}

pub fn in_viewer(state: Res<ScreenState>) -> bool {
    state.screen == AppScreen::Viewer
}

/// Editor or viewer: anywhere the map and its annotation are on screen.
pub fn on_map(state: Res<ScreenState>) -> bool {
    state.screen != AppScreen::Library
}

/// Metadata of the open route session. The annotation mirror is refreshed
/// from change notifications so the UI can show counts without querying
/// entities.
#[derive(Resource, Default)]
pub struct EditorSession {
    pub name: String,
    pub description: String,
    pub city: String,
    pub read_only: bool,
    pub annotation: Annotation,
    /// Creation timestamp carried over from the loaded file, so re-saving
    /// does not rewrite history.
    created_at: Option<String>,
    /// Set when a save completes, for the "Enregistré" status line.
    pub saved_at: Option<f64>,
}

/// Start an empty editing session (the library's "Nouveau parcours").
#[derive(Message)]
pub struct NewRouteRequest;

/// Save the open session to its file, creating one on first save.
#[derive(Message)]
pub struct SaveSessionRequest;

/// Leave the editor or viewer and return to the library.
#[derive(Message)]
pub struct CloseSessionRequest;

type AnnotationEntities<'w, 's> =
    Query<'w, 's, Entity, Or<(With<Sign>, With<RoutePath>, With<DeleteBadge>)>>;

fn despawn_annotation(commands: &mut Commands, entities: &AnnotationEntities) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
}

fn reset_interaction_state(
    mode: &mut CurrentMode,
    drag: &mut SignDragState,
    draft: &mut DraftPath,
    dirty: &mut SnapshotDirty,
) {
    *mode = CurrentMode::default();
    *drag = SignDragState::default();
    draft.active = false;
    draft.points.clear();
    dirty.changed_at = None;
}

/// The projection origin for a loaded route: its first annotated point,
/// falling back to the remembered map center, then the built-in default.
fn origin_for(annotation: &Annotation, config: &AppConfig) -> GeoPoint {
    annotation
        .markers
        .first()
        .map(|marker| marker.position())
        .or_else(|| {
            annotation
                .paths
                .first()
                .and_then(|path| path.points.first().copied())
        })
        .or(config.data.last_center)
        .unwrap_or_else(|| MapOrigin::default().0)
}

#[allow(clippy::too_many_arguments)]
fn handle_new_route(
    mut commands: Commands,
    mut requests: MessageReader<NewRouteRequest>,
    entities: AnnotationEntities,
    config: Res<AppConfig>,
    mut screen: ResMut<ScreenState>,
    mut session: ResMut<EditorSession>,
    mut origin: ResMut<MapOrigin>,
    mut current_file: ResMut<CurrentRouteFile>,
    mut mode: ResMut<CurrentMode>,
    mut drag: ResMut<SignDragState>,
    mut draft: ResMut<DraftPath>,
    mut dirty: ResMut<SnapshotDirty>,
    mut search: ResMut<CitySearchState>,
    time: Res<Time>,
    mut camera: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    let mut requested = false;
    for _ in requests.read() {
        requested = true;
    }
    if !requested {
        return;
    }

    despawn_annotation(&mut commands, &entities);
    reset_interaction_state(&mut mode, &mut drag, &mut draft, &mut dirty);

    let city = config.data.last_city.clone().unwrap_or_default();
    *session = EditorSession {
        city: city.clone(),
        ..Default::default()
    };
    *origin = MapOrigin(config.data.last_center.unwrap_or_else(|| MapOrigin::default().0));
    current_file.path = None;
    reset_camera(&mut camera);

    search.query = city;
    search.candidates.clear();
    if !search.query.trim().is_empty() {
        search.request_now(time.elapsed_secs_f64());
    }

    screen.screen = AppScreen::Editor;
    info!("Started a new route session");
}

#[allow(clippy::too_many_arguments)]
fn handle_route_loaded(
    mut commands: Commands,
    mut loaded: MessageReader<RouteLoaded>,
    entities: AnnotationEntities,
    config: Res<AppConfig>,
    mut screen: ResMut<ScreenState>,
    mut session: ResMut<EditorSession>,
    mut origin: ResMut<MapOrigin>,
    mut current_file: ResMut<CurrentRouteFile>,
    mut mode: ResMut<CurrentMode>,
    mut drag: ResMut<SignDragState>,
    mut draft: ResMut<DraftPath>,
    mut dirty: ResMut<SnapshotDirty>,
    mut search: ResMut<CitySearchState>,
    mut camera: Query<(&mut Transform, &mut CameraZoom), With<EditorCamera>>,
) {
    for message in loaded.read() {
        despawn_annotation(&mut commands, &entities);
        reset_interaction_state(&mut mode, &mut drag, &mut draft, &mut dirty);

        let annotation = message.file.annotation.clone().sanitized();
        *origin = MapOrigin(origin_for(&annotation, &config));
        spawn_annotation(&mut commands, &annotation);

        *session = EditorSession {
            name: message.file.name.clone(),
            description: message.file.description.clone(),
            city: message.file.city.clone(),
            read_only: message.read_only,
            annotation,
            created_at: Some(message.file.created_at.clone()),
            saved_at: None,
        };
        current_file.path = Some(message.path.clone());
        reset_camera(&mut camera);

        search.query = session.city.clone();
        search.candidates.clear();

        screen.screen = if message.read_only {
            AppScreen::Viewer
        } else {
            AppScreen::Editor
        };
        info!(
            "Opened route \"{}\" ({} markers, {} paths, read_only={})",
            session.name,
            session.annotation.markers.len(),
            session.annotation.paths.len(),
            message.read_only
        );
    }
}

/// Collects the live annotation, locks the editor, and hands the file to
/// the persistence layer.
#[allow(clippy::too_many_arguments)]
fn handle_save_session(
    mut requests: MessageReader<SaveSessionRequest>,
    signs: Query<&Sign>,
    paths: Query<&RoutePath>,
    mut session: ResMut<EditorSession>,
    current_file: Res<CurrentRouteFile>,
    origin: Res<MapOrigin>,
    mut config: ResMut<AppConfig>,
    mut mode: ResMut<CurrentMode>,
    mut save_requests: MessageWriter<SaveRouteRequest>,
    mut save_config: MessageWriter<SaveConfigRequest>,
) {
    let mut requested = false;
    for _ in requests.read() {
        requested = true;
    }
    if !requested || session.read_only {
        return;
    }

    let annotation = collect_annotation(signs.iter(), paths.iter());
    session.annotation = annotation.clone();

    let name = if session.name.trim().is_empty() {
        "Parcours sans titre".to_string()
    } else {
        session.name.trim().to_string()
    };

    let mut file = RouteFile::new(
        name.clone(),
        session.description.clone(),
        session.city.clone(),
        annotation,
    );
    if let Some(ref created_at) = session.created_at {
        file.created_at = created_at.clone();
    }
    session.created_at = Some(file.created_at.clone());

    let path = current_file.path.clone().unwrap_or_else(|| {
        crate::paths::routes_dir().join(format!("{}.json", crate::paths::sanitize_file_stem(&name)))
    });

    save_requests.write(SaveRouteRequest { path, file });
    mode.lock();

    // Remember where the user was working for the next session
    config.data.last_center = Some(origin.0);
    config.data.last_city = (!session.city.trim().is_empty()).then(|| session.city.clone());
    config.dirty = true;
    save_config.write(SaveConfigRequest);
}

fn handle_route_saved(
    mut saved: MessageReader<RouteSaved>,
    time: Res<Time>,
    mut session: ResMut<EditorSession>,
) {
    for message in saved.read() {
        debug!("Session file saved to {:?}", message.path);
        session.saved_at = Some(time.elapsed_secs_f64());
    }
}

/// Mirrors settled change notifications into the session metadata.
fn apply_annotation_changes(
    mut changes: MessageReader<AnnotationChanged>,
    mut session: ResMut<EditorSession>,
) {
    for change in changes.read() {
        session.annotation = change.annotation.clone();
        // Any edit invalidates the saved confirmation
        session.saved_at = None;
    }
}

/// Applies confirmed destructive actions from the dialog.
fn handle_confirm_resolved(
    mut commands: Commands,
    mut resolved: MessageReader<ConfirmResolved>,
    entities: AnnotationEntities,
    time: Res<Time>,
    mut mode: ResMut<CurrentMode>,
    mut dirty: ResMut<SnapshotDirty>,
    mut delete_requests: MessageWriter<DeleteRouteRequest>,
) {
    for message in resolved.read() {
        if !message.confirmed {
            continue;
        }
        match &message.action {
            ConfirmAction::ClearAnnotation => {
                despawn_annotation(&mut commands, &entities);
                dirty.mark(time.elapsed_secs_f64());
                mode.unlock();
                info!("Cleared all annotation from the session");
            }
            ConfirmAction::DeleteRoute { path } => {
                delete_requests.write(DeleteRouteRequest { path: path.clone() });
            }
        }
    }
}

fn handle_close_session(
    mut commands: Commands,
    mut requests: MessageReader<CloseSessionRequest>,
    entities: AnnotationEntities,
    mut screen: ResMut<ScreenState>,
    mut mode: ResMut<CurrentMode>,
    mut drag: ResMut<SignDragState>,
    mut draft: ResMut<DraftPath>,
    mut dirty: ResMut<SnapshotDirty>,
    mut list_requests: MessageWriter<ListRoutesRequest>,
) {
    let mut requested = false;
    for _ in requests.read() {
        requested = true;
    }
    if !requested {
        return;
    }

    despawn_annotation(&mut commands, &entities);
    reset_interaction_state(&mut mode, &mut drag, &mut draft, &mut dirty);
    screen.screen = AppScreen::Library;
    list_requests.write(ListRoutesRequest);
}

fn initial_route_scan(mut list_requests: MessageWriter<ListRoutesRequest>) {
    list_requests.write(ListRoutesRequest);
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenState>()
            .init_resource::<EditorSession>()
            .add_message::<NewRouteRequest>()
            .add_message::<SaveSessionRequest>()
            .add_message::<CloseSessionRequest>()
            .add_systems(Startup, initial_route_scan)
            .add_systems(
                Update,
                (
                    handle_new_route.run_if(on_message::<NewRouteRequest>),
                    handle_route_loaded.run_if(on_message::<RouteLoaded>),
                    handle_save_session.run_if(on_message::<SaveSessionRequest>),
                    handle_route_saved.run_if(on_message::<RouteSaved>),
                    apply_annotation_changes.run_if(on_message::<AnnotationChanged>),
                    handle_confirm_resolved.run_if(on_message::<ConfirmResolved>),
                    handle_close_session.run_if(on_message::<CloseSessionRequest>),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{SavedMarker, SavedPath, SignKind};

    #[test]
    fn test_default_screen_is_library() {
        assert_eq!(ScreenState::default().screen, AppScreen::Library);
    }

    #[test]
    fn test_origin_prefers_first_marker() {
        let annotation = Annotation {
            markers: vec![SavedMarker::new(SignKind::Stop, GeoPoint::new(45.76, 4.83))],
            paths: vec![SavedPath {
                points: vec![GeoPoint::new(43.6, 1.44), GeoPoint::new(43.61, 1.45)],
            }],
        };
        let config = AppConfig::default();
        assert_eq!(origin_for(&annotation, &config), GeoPoint::new(45.76, 4.83));
    }

    #[test]
    fn test_origin_falls_back_to_first_path_point() {
        let annotation = Annotation {
            markers: vec![],
            paths: vec![SavedPath {
                points: vec![GeoPoint::new(43.6, 1.44), GeoPoint::new(43.61, 1.45)],
            }],
        };
        let config = AppConfig::default();
        assert_eq!(origin_for(&annotation, &config), GeoPoint::new(43.6, 1.44));
    }

    #[test]
    fn test_origin_of_empty_route_uses_remembered_center() {
        let mut config = AppConfig::default();
        config.data.last_center = Some(GeoPoint::new(47.21, -1.55));
        assert_eq!(
            origin_for(&Annotation::default(), &config),
            GeoPoint::new(47.21, -1.55)
        );

        let blank = AppConfig::default();
        assert_eq!(
            origin_for(&Annotation::default(), &blank),
            MapOrigin::default().0
        );
    }
}
