//! Polling Subscriptions
//!
//! The live views (pending rides, ride status, active drives) re-fetch on a
//! fixed interval rather than subscribing to pushes. Each poller owns one
//! background task publishing into a `watch` channel; dropping or stopping
//! the handle cancels the task, so a torn-down view leaks no timer. A
//! future push transport can replace the task without changing consumers.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use yc_common::Ride;

/// Handle to a running poller. Stopping (or dropping) it cancels the
/// background task.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stop polling. Idempotent.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `fetch` every `interval`, publishing the latest successful
/// value. The first fetch fires immediately; failures are logged and the
/// previous value stays until a fetch succeeds again.
pub fn spawn<T, F, Fut>(interval: Duration, fetch: F) -> (watch::Receiver<Option<T>>, PollHandle)
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send,
{
    let (tx, rx) = watch::channel(None);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match fetch().await {
                Ok(value) => {
                    // All receivers gone: the view is torn down.
                    if tx.send(Some(value)).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Poll fetch failed"),
            }
        }
    });
    (rx, PollHandle { task })
}

/// The driver's pending-ride feed.
#[must_use]
pub fn watch_unclaimed_rides(
    api: ApiClient,
    actor: Uuid,
    interval: Duration,
) -> (watch::Receiver<Option<Vec<Ride>>>, PollHandle) {
    spawn(interval, move || {
        let api = api.clone();
        async move { api.unclaimed_rides(actor).await }
    })
}

/// The rider's single-ride status view.
#[must_use]
pub fn watch_ride(
    api: ApiClient,
    actor: Uuid,
    ride_id: Uuid,
    interval: Duration,
) -> (watch::Receiver<Option<Ride>>, PollHandle) {
    spawn(interval, move || {
        let api = api.clone();
        async move { api.ride(actor, ride_id).await }
    })
}

/// The driver's active drives (accepted and ongoing rides).
#[must_use]
pub fn watch_active_drives(
    api: ApiClient,
    actor: Uuid,
    interval: Duration,
) -> (watch::Receiver<Option<Vec<Ride>>>, PollHandle) {
    use yc_common::RideStatus;
    spawn(interval, move || {
        let api = api.clone();
        async move {
            api.assigned_rides(actor, &[RideStatus::Accepted, RideStatus::Ongoing])
                .await
        }
    })
}
