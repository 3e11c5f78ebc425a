//! Boundary polygon store: load-once, read-many.

use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::models::GeoPoint;

/// Errors from loading a boundary definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("boundary source unavailable")]
    SourceUnavailable,
    #[error("boundary payload is empty")]
    EmptyPayload,
    #[error("boundary payload is malformed")]
    MalformedPayload,
}

/// An ordered, implicitly closed ring of vertices (last connects to first).
///
/// Never empty once constructed; never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    vertices: Vec<GeoPoint>,
}

impl BoundaryPolygon {
    /// Build a polygon from [lat, lon] vertex pairs.
    ///
    /// A closed ring needs at least 3 vertices.
    pub fn from_pairs(pairs: Vec<[f64; 2]>) -> Result<Self, LoadError> {
        if pairs.is_empty() {
            return Err(LoadError::EmptyPayload);
        }
        if pairs.len() < 3 {
            return Err(LoadError::MalformedPayload);
        }
        let vertices = pairs
            .into_iter()
            .map(|[lat, lon]| GeoPoint { lat, lon })
            .collect();
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Owns the boundary polygon after load and hands out read-only snapshots.
///
/// The polygon transitions from absent to present atomically; a failed load
/// leaves any previously loaded polygon untouched. Concurrent loads are
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct BoundaryStore {
    polygon: RwLock<Option<Arc<BoundaryPolygon>>>,
}

impl BoundaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of [lat, lon] pairs and replace the stored polygon.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<(), LoadError> {
        if bytes.is_empty() || bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(LoadError::EmptyPayload);
        }
        let pairs: Vec<[f64; 2]> =
            serde_json::from_slice(bytes).map_err(|_| LoadError::MalformedPayload)?;
        let polygon = BoundaryPolygon::from_pairs(pairs)?;
        info!("Loaded boundary polygon with {} vertices", polygon.len());
        let mut slot = self.polygon.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(polygon));
        Ok(())
    }

    /// Read a boundary definition file and load it.
    ///
    /// Runs the read on the tokio blocking pool; a missing or unreadable
    /// file reports `SourceUnavailable`.
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        let bytes = tokio::fs::read(path.as_ref())
            .await
            .map_err(|_| LoadError::SourceUnavailable)?;
        self.load_bytes(&bytes)
    }

    /// Read-only view of the current polygon, `None` until a load succeeds.
    pub fn snapshot(&self) -> Option<Arc<BoundaryPolygon>> {
        self.polygon
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
