//! The saved-route file format: metadata plus the annotation snapshot,
//! stored as one pretty-printed JSON file per route.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::annotation::Annotation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteFile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub annotation: Annotation,
    /// RFC 3339 creation timestamp, set once and kept across re-saves.
    pub created_at: String,
}

impl RouteFile {
    pub fn new(name: String, description: String, city: String, annotation: Annotation) -> Self {
        Self {
            name,
            description,
            city,
            annotation,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// The creation date in short form for list display, falling back to the
    /// raw string when the stored timestamp does not parse.
    pub fn created_date(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// A lightweight row for the route library list, built without keeping the
/// full annotation in memory.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    pub path: PathBuf,
    pub name: String,
    pub city: String,
    pub marker_count: usize,
    pub path_count: usize,
    pub created_date: String,
}

impl RouteSummary {
    pub fn from_file(path: PathBuf, file: &RouteFile) -> Self {
        Self {
            path,
            name: file.name.clone(),
            city: file.city.clone(),
            marker_count: file.annotation.markers.len(),
            path_count: file.annotation.paths.len(),
            created_date: file.created_date(),
        }
    }
}
