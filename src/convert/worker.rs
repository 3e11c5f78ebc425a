//! Dedicated worker task for async conversions.
//!
//! One worker per converter instance serializes the offset and containment
//! computation: at most one job runs at a time, bounding the trigonometric
//! CPU load and keeping access to the shared boundary snapshot sequential.
//! Results travel back over per-job oneshot channels and are observed
//! wherever the caller awaits.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::converter::Core;
use crate::models::{Frame, GeoPoint, LocationResult, Policy};

/// A queued conversion request.
pub(crate) enum Job {
    Point {
        point: GeoPoint,
        from: Frame,
        to: Frame,
        policy: Policy,
        reply: oneshot::Sender<GeoPoint>,
    },
    Batch {
        points: Vec<LocationResult>,
        from: Frame,
        to: Frame,
        policy: Policy,
        reply: oneshot::Sender<Vec<LocationResult>>,
    },
}

/// Spawn the worker loop and hand back its job queue.
///
/// The queue is bounded so a burst of async submissions applies
/// backpressure instead of piling up unboundedly. Dropping the last sender
/// shuts the worker down.
pub(crate) fn spawn(core: Arc<Core>) -> mpsc::Sender<Job> {
    let (tx, mut rx) = mpsc::channel::<Job>(32);

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            match job {
                Job::Point {
                    point,
                    from,
                    to,
                    policy,
                    reply,
                } => {
                    // A dropped receiver just means the caller went away.
                    let _ = reply.send(core.convert(point, from, to, policy));
                }
                Job::Batch {
                    points,
                    from,
                    to,
                    policy,
                    reply,
                } => {
                    let _ = reply.send(core.convert_batch_tagged(points, from, to, policy));
                }
            }
        }
        debug!("Converter worker stopping, job queue closed");
    });

    tx
}
