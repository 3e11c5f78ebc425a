//! Shared model types for frames, points and conversion results.

mod location;

pub use location::{Containment, Frame, GeoPoint, LocationResult, Policy};
