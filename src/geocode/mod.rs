//! Debounced city geocoding against the Nominatim search API.
//!
//! Typing in the city field never blocks the frame. Edits only stamp the
//! search state; once the query has been stable for the debounce window a
//! background task performs the HTTP lookup. Every request carries a
//! sequence number and results from superseded requests are discarded, so
//! a slow early response can never overwrite a newer one.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use serde::Deserialize;

use crate::constants::{GEOCODE_COUNTRY_SUFFIX, GEOCODE_DEBOUNCE_SECS};
use crate::editor::camera::RecenterCamera;
use crate::geo::GeoPoint;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("routeforge/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GeocodeCandidate {
    pub display_name: String,
    pub position: GeoPoint,
}

/// The city search box state plus debounce/sequencing bookkeeping.
#[derive(Resource, Default)]
pub struct CitySearchState {
    pub query: String,
    pub candidates: Vec<GeocodeCandidate>,
    pub searching: bool,
    pub error: Option<String>,
    last_edit: Option<f64>,
    last_sent: Option<String>,
    next_seq: u64,
    current_seq: u64,
}

impl CitySearchState {
    /// Record that the query text changed at `now`.
    pub fn note_edit(&mut self, now: f64) {
        self.last_edit = Some(now);
        self.error = None;
    }

    /// Ask for an immediate lookup of the current query, skipping the
    /// debounce window. Used when a session opens with a known city.
    pub fn request_now(&mut self, now: f64) {
        self.last_edit = Some(now - GEOCODE_DEBOUNCE_SECS);
        self.last_sent = None;
    }

    /// Whether a request should be sent at `now`.
    fn due(&self, now: f64) -> bool {
        let Some(last_edit) = self.last_edit else {
            return false;
        };
        let trimmed = self.query.trim();
        !trimmed.is_empty()
            && self.last_sent.as_deref() != Some(trimmed)
            && now - last_edit >= GEOCODE_DEBOUNCE_SECS
    }

    /// Stamp an outgoing request and return its sequence number.
    fn begin_request(&mut self) -> u64 {
        self.next_seq += 1;
        self.current_seq = self.next_seq;
        self.last_sent = Some(self.query.trim().to_string());
        self.searching = true;
        self.current_seq
    }

    /// Only the most recently sent request may deliver results.
    fn is_current(&self, seq: u64) -> bool {
        seq == self.current_seq
    }
}

pub struct GeocodeResult {
    seq: u64,
    candidates: Vec<GeocodeCandidate>,
    error: Option<String>,
}

impl GeocodeResult {
    fn found(candidates: Vec<GeocodeCandidate>) -> Self {
        Self {
            seq: 0,
            candidates,
            error: None,
        }
    }

    fn no_candidates() -> Self {
        Self::found(Vec::new())
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            seq: 0,
            candidates: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[derive(Component)]
struct GeocodeTask(Task<GeocodeResult>);

/// Wire shape of one Nominatim search hit. Coordinates arrive as strings.
#[derive(Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

fn query_nominatim(query: &str) -> Result<Vec<GeocodeCandidate>, String> {
    let places: Vec<NominatimPlace> = ureq::get(NOMINATIM_URL)
        .query("q", query)
        .query("format", "json")
        .query("limit", "5")
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|err| err.to_string())?
        .into_json()
        .map_err(|err| err.to_string())?;

    Ok(places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.parse::<f64>().ok()?;
            let lng = place.lon.parse::<f64>().ok()?;
            let position = GeoPoint::new(lat, lng);
            position.is_finite().then_some(GeocodeCandidate {
                display_name: place.display_name,
                position,
            })
        })
        .collect())
}

fn fetch_candidates(query: String) -> GeocodeResult {
    match query_nominatim(&query) {
        Ok(candidates) if candidates.is_empty() => GeocodeResult::no_candidates(),
        Ok(candidates) => GeocodeResult::found(candidates),
        Err(err) => {
            // Network failures degrade to a status line, never an abort
            warn!("Geocoding request failed: {err}");
            GeocodeResult::error("Recherche de ville indisponible")
        }
    }
}

/// Sends a lookup once the query has been stable for the debounce window.
fn dispatch_geocode_requests(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<CitySearchState>,
) {
    if !state.due(time.elapsed_secs_f64()) {
        return;
    }

    let seq = state.begin_request();
    let query = format!("{}{}", state.query.trim(), GEOCODE_COUNTRY_SUFFIX);
    debug!("Geocoding \"{query}\" (request {seq})");

    let task = AsyncComputeTaskPool::get().spawn(async move {
        let mut result = fetch_candidates(query);
        result.seq = seq;
        result
    });
    commands.spawn(GeocodeTask(task));
}

/// Applies finished lookups, dropping any that were superseded. The best
/// match recenters the camera; the rest stay listed for manual picking.
fn poll_geocode_tasks(
    mut commands: Commands,
    mut state: ResMut<CitySearchState>,
    mut tasks: Query<(Entity, &mut GeocodeTask)>,
    mut recenter: MessageWriter<RecenterCamera>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        if !state.is_current(result.seq) {
            debug!("Dropping stale geocode result (request {})", result.seq);
            continue;
        }

        state.searching = false;
        state.candidates = result.candidates;
        state.error = result.error;

        if let Some(best) = state.candidates.first() {
            recenter.write(RecenterCamera {
                position: best.position,
            });
        }
    }
}

pub struct GeocodePlugin;

impl Plugin for GeocodePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CitySearchState>()
            .add_systems(Update, (dispatch_geocode_requests, poll_geocode_tasks));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_never_due() {
        let mut state = CitySearchState::default();
        state.note_edit(1.0);
        assert!(!state.due(100.0));

        state.query = "   ".to_string();
        assert!(!state.due(100.0));
    }

    #[test]
    fn test_debounce_window() {
        let mut state = CitySearchState {
            query: "Lyon".to_string(),
            ..Default::default()
        };
        state.note_edit(10.0);
        assert!(!state.due(10.0));
        assert!(!state.due(10.0 + GEOCODE_DEBOUNCE_SECS * 0.5));
        assert!(state.due(10.0 + GEOCODE_DEBOUNCE_SECS));
    }

    #[test]
    fn test_same_query_not_resent() {
        let mut state = CitySearchState {
            query: "Lyon".to_string(),
            ..Default::default()
        };
        state.note_edit(10.0);
        state.begin_request();

        // Editing to an identical (trimmed) query stays quiet
        state.query = " Lyon ".to_string();
        state.note_edit(20.0);
        assert!(!state.due(20.0 + GEOCODE_DEBOUNCE_SECS));

        state.query = "Lyon 3e".to_string();
        state.note_edit(30.0);
        assert!(state.due(30.0 + GEOCODE_DEBOUNCE_SECS));
    }

    #[test]
    fn test_only_latest_request_is_current() {
        let mut state = CitySearchState {
            query: "Nantes".to_string(),
            ..Default::default()
        };
        state.note_edit(1.0);
        let first = state.begin_request();

        state.query = "Nancy".to_string();
        state.note_edit(2.0);
        let second = state.begin_request();

        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_request_now_skips_debounce() {
        let mut state = CitySearchState {
            query: "Paris".to_string(),
            ..Default::default()
        };
        state.request_now(50.0);
        assert!(state.due(50.0));
    }

    #[test]
    fn test_request_now_allows_resending_same_query() {
        let mut state = CitySearchState {
            query: "Paris".to_string(),
            ..Default::default()
        };
        state.note_edit(1.0);
        state.begin_request();
        assert!(!state.due(100.0));

        state.request_now(100.0);
        assert!(state.due(100.0));
    }
}
