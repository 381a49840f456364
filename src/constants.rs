//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Default map center latitude (Paris) when no city has been chosen
pub const DEFAULT_CENTER_LAT: f64 = 48.8566;

/// Default map center longitude (Paris)
pub const DEFAULT_CENTER_LNG: f64 = 2.3522;

/// Sign glyphs are drawn at a fixed screen size, like classic web-map icons
pub const SIGN_GLYPH_SIZE: f32 = 32.0;

/// Side length of the square hover-revealed delete badges, in pixels
pub const DELETE_BADGE_SIZE: f32 = 14.0;

/// Quiescence window before a typed city query is sent to the geocoder
pub const GEOCODE_DEBOUNCE_SECS: f64 = 0.5;

/// Country qualifier appended to every geocoding query
pub const GEOCODE_COUNTRY_SUFFIX: &str = ", France";

/// Settle delay between a mutation and the change notification it emits
pub const CHANGE_SETTLE_SECS: f64 = 0.1;

/// Grace period before a delete badge hides after the pointer leaves
pub const BADGE_GRACE_SECS: f64 = 0.1;

/// Minimum cursor travel (in pixels) before a drawn path gains a new point
pub const DRAW_MIN_POINT_SPACING: f32 = 2.0;

/// Radius of the vertex handles shown while editing a path, in pixels
pub const PATH_VERTEX_SIZE: f32 = 6.0;
