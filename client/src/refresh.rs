//! Periodic re-fetching of dashboard data.
//!
//! A failed fetch never replaces data that was already published; the error
//! is recorded next to the last good snapshot.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::ClientResult;

/// Latest published state of a refreshed view
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Option<Arc<T>>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure, cleared by the next success
    pub last_error: Option<String>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            refreshed_at: self.refreshed_at,
            last_error: self.last_error.clone(),
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            refreshed_at: None,
            last_error: None,
        }
    }
}

/// Background task that runs `fetch` on an interval and publishes the result.
///
/// The first fetch runs immediately. Stopping or dropping the loop aborts the
/// task; a fetch that completes after that is discarded.
pub struct RefreshLoop<T> {
    snapshot: watch::Receiver<Snapshot<T>>,
    trigger: Arc<Notify>,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + Sync + 'static> RefreshLoop<T> {
    pub fn spawn<F, Fut>(interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(Snapshot::default());
        let trigger = Arc::new(Notify::new());
        let cancelled = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn({
            let trigger = Arc::clone(&trigger);
            let cancelled = Arc::clone(&cancelled);
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {}
                        _ = trigger.notified() => {}
                    }
                    if cancelled.load(Ordering::Acquire) {
                        break;
                    }

                    let result = fetch().await;
                    if cancelled.load(Ordering::Acquire) {
                        tracing::debug!("refresh finished after stop, discarding");
                        break;
                    }

                    match result {
                        Ok(data) => {
                            tx.send_replace(Snapshot {
                                data: Some(Arc::new(data)),
                                refreshed_at: Some(Utc::now()),
                                last_error: None,
                            });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "refresh failed, keeping previous data");
                            tx.send_modify(|snapshot| snapshot.last_error = Some(e.to_string()));
                        }
                    }
                }
            }
        });

        Self {
            snapshot: rx,
            trigger,
            cancelled,
            task: Some(task),
        }
    }
}

impl<T> RefreshLoop<T> {
    pub fn latest(&self) -> Option<Arc<T>> {
        self.snapshot.borrow().data.clone()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every published change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot.clone()
    }

    /// Fetch now instead of waiting for the next tick
    pub fn refresh_now(&self) {
        self.trigger.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }

    pub fn stop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for RefreshLoop<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One slice of view state for callers that fetch by hand.
///
/// Same rule as [`RefreshLoop`]: success replaces the data, failure keeps it.
#[derive(Debug, Clone)]
pub struct ViewSlice<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for ViewSlice<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            updated_at: None,
        }
    }
}

impl<T> ViewSlice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn finish(&mut self, result: ClientResult<T>, now: DateTime<Utc>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.updated_at = Some(now);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use chrono::TimeZone;

    #[test]
    fn test_view_slice_keeps_data_on_failure() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let mut slice = ViewSlice::new();

        slice.begin();
        assert!(slice.is_loading());
        slice.finish(Ok(vec![1, 2, 3]), t0);
        assert_eq!(slice.data(), Some(&vec![1, 2, 3]));

        slice.begin();
        slice.finish(Err(ClientError::MissingData), t0 + chrono::Duration::seconds(30));
        assert!(!slice.is_loading());
        assert_eq!(slice.data(), Some(&vec![1, 2, 3]));
        assert_eq!(slice.error(), Some("response carried no data"));
        assert_eq!(slice.updated_at(), Some(t0));
    }
}
