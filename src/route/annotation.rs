//! The serializable annotation snapshot exchanged with persistence.
//!
//! This is the only shape that crosses the editor's boundary: a flat list of
//! sign markers and drawn paths in latitude/longitude degrees. Entity
//! identity never survives serialization; re-importing a snapshot produces
//! fresh entities with equivalent content.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// The closed set of traffic-sign categories, plus a catch-all for tags
/// written by newer versions of the application.
///
/// The logical kind is stored on the marker itself; it is never recovered
/// from the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignKind {
    #[default]
    Priority,
    Stop,
    Zone30,
    EndZone30,
    /// Unrecognized stored tag. Renders with the fallback glyph and
    /// re-serializes as a fixed tag instead of failing the import.
    Unknown,
}

impl SignKind {
    /// The wire tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            SignKind::Priority => "priority",
            SignKind::Stop => "stop",
            SignKind::Zone30 => "zone30",
            SignKind::EndZone30 => "finZone30",
            SignKind::Unknown => "unknown",
        }
    }

    /// Parse a wire tag. Anything unrecognized maps to [`SignKind::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "priority" => SignKind::Priority,
            "stop" => SignKind::Stop,
            "zone30" => SignKind::Zone30,
            "finZone30" => SignKind::EndZone30,
            _ => SignKind::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SignKind::Priority => "Priorité",
            SignKind::Stop => "Stop",
            SignKind::Zone30 => "Zone 30",
            SignKind::EndZone30 => "Fin zone 30",
            SignKind::Unknown => "Inconnu",
        }
    }

    /// The kinds offered on the toolbar (excludes the fallback).
    pub fn all() -> &'static [SignKind] {
        &[
            SignKind::Priority,
            SignKind::Stop,
            SignKind::Zone30,
            SignKind::EndZone30,
        ]
    }
}

impl Serialize for SignKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for SignKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(SignKind::from_tag(&tag))
    }
}

/// One persisted sign marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMarker {
    #[serde(rename = "type")]
    pub kind: SignKind,
    pub lat: f64,
    pub lng: f64,
}

impl SavedMarker {
    pub fn new(kind: SignKind, position: GeoPoint) -> Self {
        Self {
            kind,
            lat: position.lat,
            lng: position.lng,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// One persisted drawn path. A well-formed path has at least two points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedPath {
    pub points: Vec<GeoPoint>,
}

/// The full annotation snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub markers: Vec<SavedMarker>,
    #[serde(default)]
    pub paths: Vec<SavedPath>,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.paths.is_empty()
    }

    /// Drop malformed entries so the import as a whole never fails.
    ///
    /// Markers with non-finite coordinates are skipped. Paths lose their
    /// non-finite points, and a path left with fewer than two usable points
    /// is skipped entirely. Unknown sign tags were already mapped to
    /// [`SignKind::Unknown`] during deserialization.
    pub fn sanitized(mut self) -> Self {
        self.markers.retain(|m| m.position().is_finite());
        for path in &mut self.paths {
            path.points.retain(GeoPoint::is_finite);
        }
        self.paths.retain(|p| p.points.len() >= 2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SignKind tag tests
    #[test]
    fn test_sign_kind_tags_round_trip() {
        for kind in SignKind::all() {
            assert_eq!(SignKind::from_tag(kind.tag()), *kind);
        }
    }

    #[test]
    fn test_sign_kind_end_zone_wire_tag() {
        // The persisted tag differs from the Rust name.
        assert_eq!(SignKind::EndZone30.tag(), "finZone30");
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        assert_eq!(SignKind::from_tag("bogus"), SignKind::Unknown);
        assert_eq!(SignKind::from_tag(""), SignKind::Unknown);
    }

    #[test]
    fn test_unknown_survives_export() {
        let json = serde_json::to_string(&SignKind::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
    }

    // Wire shape tests
    #[test]
    fn test_marker_wire_shape() {
        let marker = SavedMarker::new(SignKind::Stop, GeoPoint::new(48.85, 2.35));
        let json = serde_json::to_string(&marker).unwrap();
        assert_eq!(json, r#"{"type":"stop","lat":48.85,"lng":2.35}"#);
    }

    #[test]
    fn test_annotation_round_trip() {
        let annotation = Annotation {
            markers: vec![
                SavedMarker::new(SignKind::Priority, GeoPoint::new(48.86, 2.34)),
                SavedMarker::new(SignKind::EndZone30, GeoPoint::new(48.87, 2.33)),
            ],
            paths: vec![SavedPath {
                points: vec![
                    GeoPoint::new(48.85, 2.35),
                    GeoPoint::new(48.86, 2.36),
                    GeoPoint::new(48.87, 2.37),
                ],
            }],
        };

        let json = serde_json::to_string(&annotation).unwrap();
        let parsed: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, annotation);
    }

    #[test]
    fn test_import_unknown_marker_type() {
        let json = r#"{"markers":[{"type":"bogus","lat":1.0,"lng":1.0}],"paths":[]}"#;
        let parsed: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.markers.len(), 1);
        assert_eq!(parsed.markers[0].kind, SignKind::Unknown);
    }

    #[test]
    fn test_import_missing_fields_default_empty() {
        let parsed: Annotation = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_sanitize_drops_non_finite_marker() {
        let annotation = Annotation {
            markers: vec![
                SavedMarker::new(SignKind::Stop, GeoPoint::new(f64::NAN, 2.0)),
                SavedMarker::new(SignKind::Stop, GeoPoint::new(48.0, 2.0)),
            ],
            paths: vec![],
        };

        let clean = annotation.sanitized();
        assert_eq!(clean.markers.len(), 1);
        assert!(clean.markers[0].position().is_finite());
    }

    #[test]
    fn test_sanitize_drops_degenerate_path() {
        let annotation = Annotation {
            markers: vec![],
            paths: vec![
                // One usable point after filtering - dropped
                SavedPath {
                    points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::INFINITY, 1.0)],
                },
                // Two usable points - kept
                SavedPath {
                    points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)],
                },
            ],
        };

        let clean = annotation.sanitized();
        assert_eq!(clean.paths.len(), 1);
        assert_eq!(clean.paths[0].points.len(), 2);
    }

    #[test]
    fn test_sanitize_keeps_well_formed_intact() {
        let annotation = Annotation {
            markers: vec![SavedMarker::new(SignKind::Zone30, GeoPoint::new(48.0, 2.0))],
            paths: vec![SavedPath {
                points: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)],
            }],
        };

        let clean = annotation.clone().sanitized();
        assert_eq!(clean, annotation);
    }
}
