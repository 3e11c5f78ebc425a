//! Coordinate, frame and policy types.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon), degrees.
///
/// No range validation is performed; callers supply valid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Coordinate reference frame a point is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// Globally consistent geodetic frame.
    Wgs84,
    /// Obfuscated national frame, offset applied inside the boundary.
    Gcj02,
    /// Vendor frame derived from GCJ-02.
    Bd09,
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frame::Wgs84 => write!(f, "wgs84"),
            Frame::Gcj02 => write!(f, "gcj02"),
            Frame::Bd09 => write!(f, "bd09"),
        }
    }
}

/// Conversion policy for directions that touch the obfuscated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Always apply the offset, never consult containment.
    Force,
    /// Apply the offset only when the point is inside the boundary.
    Auto,
}

impl Policy {
    pub fn is_force(self) -> bool {
        self == Policy::Force
    }
}

/// Tri-state containment outcome carried on batch results.
///
/// A non-`Unknown` value on an *input* element is authoritative: the
/// containment test is skipped for that element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    #[default]
    Unknown,
    Inside,
    Outside,
}

impl Containment {
    pub(crate) fn from_inside(inside: bool) -> Self {
        if inside {
            Containment::Inside
        } else {
            Containment::Outside
        }
    }
}

/// A point tagged with the frame it is expressed in, plus the containment
/// outcome once a batch conversion has determined it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub frame: Frame,
    pub point: GeoPoint,
    #[serde(default)]
    pub containment: Containment,
}

impl LocationResult {
    pub fn new(frame: Frame, point: GeoPoint) -> Self {
        Self {
            frame,
            point,
            containment: Containment::Unknown,
        }
    }

    pub fn with_containment(frame: Frame, point: GeoPoint, containment: Containment) -> Self {
        Self {
            frame,
            point,
            containment,
        }
    }
}
