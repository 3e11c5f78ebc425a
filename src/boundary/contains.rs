//! Ray-casting containment test and batch classification.

use tracing::debug;

use super::BoundaryPolygon;
use crate::models::{Containment, LocationResult};

impl BoundaryPolygon {
    /// Ray-casting point-in-polygon test, boundary-inclusive.
    ///
    /// A point equal to a vertex or lying exactly on an edge counts as
    /// contained. The check ordering is load-bearing for compatibility with
    /// existing datasets: vertex equality sets the inside flag but does not
    /// stop edge processing, so a later crossing can still toggle it; an
    /// exact edge crossing stops immediately.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let vertices = self.vertices();
        let n = vertices.len();
        let mut inside = false;
        for idx in 0..n {
            let next = if idx + 1 == n { 0 } else { idx + 1 };
            let a = vertices[idx];
            let b = vertices[next];

            if (lon == a.lon && lat == a.lat) || (lon == b.lon && lat == b.lat) {
                inside = true;
            }

            // Edge straddles the query latitude: one endpoint inclusive,
            // the other exclusive, so a vertex shared by two edges is not
            // counted twice.
            if (b.lat < lat && a.lat >= lat) || (b.lat >= lat && a.lat < lat) {
                let crossing_lon = b.lon + (lat - b.lat) * (a.lon - b.lon) / (a.lat - b.lat);
                if crossing_lon == lon {
                    inside = true;
                    break;
                }
                if crossing_lon > lon {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Classify a batch of points against the boundary, in place.
///
/// Elements whose containment is already known are left untouched. With
/// `frequency` N > 1 only every Nth element (indices 0, N, 2N, ...) is
/// tested; the elements in between reuse the last computed flag, trading
/// accuracy near the boundary for throughput on dense, spatially-correlated
/// batches. 0 or 1 tests every element.
///
/// With no polygon loaded, every undetermined element is marked `Outside`:
/// no region restricts any point.
pub fn classify(polygon: Option<&BoundaryPolygon>, results: &mut [LocationResult], frequency: u32) {
    let Some(polygon) = polygon else {
        for result in results.iter_mut() {
            if result.containment == Containment::Unknown {
                result.containment = Containment::Outside;
            }
        }
        return;
    };

    debug!(
        "Classifying {} points against {}-vertex boundary (frequency {})",
        results.len(),
        polygon.len(),
        frequency
    );

    let mut inside = false;
    for (index, result) in results.iter_mut().enumerate() {
        if result.containment != Containment::Unknown {
            continue;
        }
        if frequency > 0 && index % frequency as usize > 0 {
            result.containment = Containment::from_inside(inside);
            continue;
        }
        inside = polygon.contains(result.point.lat, result.point.lon);
        result.containment = Containment::from_inside(inside);
    }
}
