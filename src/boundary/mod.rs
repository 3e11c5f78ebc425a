//! Boundary polygon storage and point-in-polygon containment.
//!
//! The polygon delimits the territory where the GCJ-02 offset applies. It
//! is loaded once (from an already-decoded JSON payload or a file) and is
//! read-only afterwards, so converters can share it freely across threads.

mod contains;
mod store;

pub use contains::classify;
pub use store::{BoundaryPolygon, BoundaryStore, LoadError};
