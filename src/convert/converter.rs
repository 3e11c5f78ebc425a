//! The location converter: composes boundary containment and the frame
//! transforms per requested direction and policy.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::worker::{self, Job};
use crate::boundary::{classify, BoundaryStore};
use crate::config::ConverterConfig;
use crate::models::{Containment, Frame, GeoPoint, LocationResult, Policy};
use crate::transform::{bd09, gcj02};

/// Policy-aware conversion logic shared by the sync entry points and the
/// async worker.
pub(crate) struct Core {
    store: Arc<BoundaryStore>,
    config: ConverterConfig,
}

impl Core {
    /// Containment against the current boundary snapshot. With no polygon
    /// loaded nothing is inside: no region restricts any point.
    fn contains(&self, point: GeoPoint) -> bool {
        match self.store.snapshot() {
            Some(polygon) => polygon.contains(point.lat, point.lon),
            None => false,
        }
    }

    fn wgs84_to_gcj02(&self, point: GeoPoint, policy: Policy) -> GeoPoint {
        let shifted = gcj02::forward(point);
        if policy.is_force() || self.contains(shifted) {
            shifted
        } else {
            point
        }
    }

    fn gcj02_to_wgs84(&self, point: GeoPoint, policy: Policy) -> GeoPoint {
        if policy.is_force() || self.contains(point) {
            gcj02::inverse(point)
        } else {
            point
        }
    }

    pub(crate) fn convert(
        &self,
        point: GeoPoint,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> GeoPoint {
        match (from, to) {
            (Frame::Wgs84, Frame::Gcj02) => self.wgs84_to_gcj02(point, policy),
            (Frame::Gcj02, Frame::Wgs84) => self.gcj02_to_wgs84(point, policy),
            (Frame::Gcj02, Frame::Bd09) => bd09::encrypt(point),
            (Frame::Bd09, Frame::Gcj02) => bd09::decrypt(point),
            (Frame::Wgs84, Frame::Bd09) => bd09::encrypt(self.wgs84_to_gcj02(point, policy)),
            (Frame::Bd09, Frame::Wgs84) => self.gcj02_to_wgs84(bd09::decrypt(point), policy),
            _ => point,
        }
    }

    /// WGS-84 -> GCJ-02 batch. The offset is applied to every element up
    /// front because containment is only meaningful in the obfuscated
    /// frame; under Auto, elements found outside revert to their original
    /// coordinate.
    fn wgs84_to_gcj02_batch(
        &self,
        inputs: Vec<LocationResult>,
        policy: Policy,
    ) -> Vec<LocationResult> {
        let mut shifted: Vec<LocationResult> = inputs
            .iter()
            .map(|loc| {
                LocationResult::with_containment(
                    Frame::Gcj02,
                    gcj02::forward(loc.point),
                    loc.containment,
                )
            })
            .collect();

        if policy.is_force() {
            return shifted;
        }

        let polygon = self.store.snapshot();
        classify(polygon.as_deref(), &mut shifted, self.config.check_frequency);

        shifted
            .into_iter()
            .zip(inputs)
            .map(|(gcj02_result, original)| {
                // Only standard-frame elements are eligible for this
                // conversion.
                if original.frame != Frame::Wgs84 {
                    original
                } else if gcj02_result.containment == Containment::Inside {
                    gcj02_result
                } else {
                    LocationResult::with_containment(
                        Frame::Wgs84,
                        original.point,
                        Containment::Outside,
                    )
                }
            })
            .collect()
    }

    /// GCJ-02 -> WGS-84 batch. The inputs are already in the frame the
    /// containment test wants; under Auto only elements inside the
    /// boundary get the inverse offset.
    fn gcj02_to_wgs84_batch(
        &self,
        inputs: Vec<LocationResult>,
        policy: Policy,
    ) -> Vec<LocationResult> {
        if policy.is_force() {
            return inputs
                .into_iter()
                .map(|loc| {
                    LocationResult::with_containment(
                        Frame::Wgs84,
                        gcj02::inverse(loc.point),
                        loc.containment,
                    )
                })
                .collect();
        }

        let mut checked = inputs.clone();
        let polygon = self.store.snapshot();
        classify(polygon.as_deref(), &mut checked, self.config.check_frequency);

        checked
            .into_iter()
            .zip(inputs)
            .map(|(gcj02_result, original)| {
                if original.frame != Frame::Gcj02 {
                    original
                } else if gcj02_result.containment == Containment::Inside {
                    LocationResult::with_containment(
                        Frame::Wgs84,
                        gcj02::inverse(gcj02_result.point),
                        Containment::Inside,
                    )
                } else {
                    gcj02_result
                }
            })
            .collect()
    }

    pub(crate) fn convert_batch_tagged(
        &self,
        points: Vec<LocationResult>,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> Vec<LocationResult> {
        if from == to {
            return points;
        }
        match (from, to) {
            (Frame::Wgs84, Frame::Gcj02) => self.wgs84_to_gcj02_batch(points, policy),
            (Frame::Gcj02, Frame::Wgs84) => self.gcj02_to_wgs84_batch(points, policy),
            (Frame::Gcj02, Frame::Bd09) => points
                .into_iter()
                .map(|loc| {
                    if loc.frame != Frame::Gcj02 {
                        loc
                    } else {
                        LocationResult::with_containment(
                            Frame::Bd09,
                            bd09::encrypt(loc.point),
                            loc.containment,
                        )
                    }
                })
                .collect(),
            (Frame::Bd09, Frame::Gcj02) => points
                .into_iter()
                .map(|loc| {
                    if loc.frame != Frame::Bd09 {
                        loc
                    } else {
                        LocationResult::with_containment(
                            Frame::Gcj02,
                            bd09::decrypt(loc.point),
                            loc.containment,
                        )
                    }
                })
                .collect(),
            // Composed through the middle frame; the vendor leg encrypts
            // whatever the GCJ-02 stage produced, matching the per-point
            // composition order. Elements whose tag does not match `from`
            // skip the whole composition, not just the GCJ-02 stage, so a
            // stray vendor-frame element is never encrypted twice.
            (Frame::Wgs84, Frame::Bd09) => {
                let originals = points.clone();
                self.wgs84_to_gcj02_batch(points, policy)
                    .into_iter()
                    .zip(originals)
                    .map(|(loc, original)| {
                        if original.frame != Frame::Wgs84 {
                            original
                        } else {
                            LocationResult::with_containment(
                                Frame::Bd09,
                                bd09::encrypt(loc.point),
                                loc.containment,
                            )
                        }
                    })
                    .collect()
            }
            (Frame::Bd09, Frame::Wgs84) => {
                let originals = points.clone();
                let gcj02_points = points
                    .into_iter()
                    .map(|loc| {
                        if loc.frame != Frame::Bd09 {
                            loc
                        } else {
                            LocationResult::with_containment(
                                Frame::Gcj02,
                                bd09::decrypt(loc.point),
                                loc.containment,
                            )
                        }
                    })
                    .collect();
                self.gcj02_to_wgs84_batch(gcj02_points, policy)
                    .into_iter()
                    .zip(originals)
                    .map(|(loc, original)| {
                        if original.frame != Frame::Bd09 {
                            original
                        } else {
                            loc
                        }
                    })
                    .collect()
            }
            _ => points,
        }
    }
}

/// Converter between the WGS-84, GCJ-02 and BD-09 frames.
///
/// Holds a shared [`BoundaryStore`] (injected, read-only after load). Sync
/// entry points compute on the calling thread and are freely concurrent;
/// async entry points funnel through a dedicated worker task so at most one
/// heavy computation per converter is in flight, with the result delivered
/// wherever the caller awaits.
///
/// With no boundary loaded, Auto-policy conversions degrade to "nothing is
/// inside the region" and pass points through unchanged instead of failing.
/// Callers that need strict behavior should check
/// [`BoundaryStore::snapshot`] before relying on Auto.
pub struct LocationConverter {
    core: Arc<Core>,
    jobs: mpsc::Sender<Job>,
}

impl LocationConverter {
    /// Build a converter and spawn its worker task.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(store: Arc<BoundaryStore>, config: ConverterConfig) -> Self {
        let core = Arc::new(Core { store, config });
        let jobs = worker::spawn(Arc::clone(&core));
        Self { core, jobs }
    }

    /// Convert a single point between frames, blocking the calling thread.
    pub fn convert(&self, point: GeoPoint, from: Frame, to: Frame, policy: Policy) -> GeoPoint {
        self.core.convert(point, from, to, policy)
    }

    /// Convert an ordered batch; output order matches input order
    /// index-for-index.
    pub fn convert_batch(
        &self,
        points: &[GeoPoint],
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> Vec<LocationResult> {
        let tagged = points
            .iter()
            .map(|&point| LocationResult::new(from, point))
            .collect();
        self.core.convert_batch_tagged(tagged, from, to, policy)
    }

    /// Batch conversion over already-tagged elements. An element whose
    /// containment is not `Unknown` is taken at its word and skips the
    /// containment test.
    ///
    /// An element whose frame does not match `from` passes through
    /// unchanged under Auto, and under both policies for any direction
    /// involving the vendor frame. The one exception is Force on the
    /// WGS-84/GCJ-02 directions, which applies the offset to every element
    /// verbatim regardless of tag.
    pub fn convert_batch_tagged(
        &self,
        points: Vec<LocationResult>,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> Vec<LocationResult> {
        self.core.convert_batch_tagged(points, from, to, policy)
    }

    /// Async single-point conversion via the dedicated worker.
    ///
    /// If the worker is gone (runtime shut down) the input is handed back
    /// unchanged.
    pub async fn convert_async(
        &self,
        point: GeoPoint,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> GeoPoint {
        let (reply, response) = tokio::sync::oneshot::channel();
        let job = Job::Point {
            point,
            from,
            to,
            policy,
            reply,
        };
        if self.jobs.send(job).await.is_err() {
            return point;
        }
        response.await.unwrap_or(point)
    }

    /// Async batch conversion via the dedicated worker.
    pub async fn convert_batch_async(
        &self,
        points: Vec<GeoPoint>,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> Vec<LocationResult> {
        let tagged = points
            .into_iter()
            .map(|point| LocationResult::new(from, point))
            .collect();
        self.convert_batch_tagged_async(tagged, from, to, policy)
            .await
    }

    /// Async tagged batch conversion via the dedicated worker.
    pub async fn convert_batch_tagged_async(
        &self,
        points: Vec<LocationResult>,
        from: Frame,
        to: Frame,
        policy: Policy,
    ) -> Vec<LocationResult> {
        let fallback = points.clone();
        let (reply, response) = tokio::sync::oneshot::channel();
        let job = Job::Batch {
            points,
            from,
            to,
            policy,
            reply,
        };
        if self.jobs.send(job).await.is_err() {
            return fallback;
        }
        response.await.unwrap_or(fallback)
    }

    /// The injected boundary store, e.g. for checking whether a boundary
    /// has been loaded before trusting Auto policy.
    pub fn store(&self) -> &Arc<BoundaryStore> {
        &self.core.store
    }
}
