//! Meridian - coordinate conversion between WGS-84, GCJ-02 and BD-09
//!
//! GCJ-02 is the obfuscated national frame used by mainland-China map data:
//! WGS-84 coordinates inside a boundary polygon get a nonlinear offset
//! applied, coordinates outside pass through untouched. BD-09 is a further
//! closed-form transform of GCJ-02 used by one map vendor. This library
//! provides the boundary store, the containment test, the frame transforms
//! and a converter with Force/Auto policies in sync and async forms.

pub mod boundary;
pub mod config;
pub mod convert;
pub mod models;
pub mod transform;

pub use boundary::{BoundaryPolygon, BoundaryStore, LoadError};
pub use config::ConverterConfig;
pub use convert::LocationConverter;
pub use models::{Containment, Frame, GeoPoint, LocationResult, Policy};
