//! Route data model and persistence.
//!
//! - [`annotation`] - the serializable annotation snapshot (wire shape)
//! - [`file`] - the saved-route file format and library summaries
//! - [`persistence`] - async save/load/list/delete of route files

pub mod annotation;
pub mod file;
pub mod persistence;

pub use annotation::{Annotation, SavedMarker, SavedPath, SignKind};
pub use file::{RouteFile, RouteSummary};
