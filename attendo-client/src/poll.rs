//! Background polling
//!
//! A [`Poller`] fetches once immediately, then on a fixed interval, and
//! publishes the latest successful value on a watch channel. Failed polls
//! are logged and keep the last-known value. Pollers stop on drop, on
//! [`Poller::stop`], or when the session logs out.

use std::future::Future;
use std::sync::Arc;

use shared::models::{AttendanceStatus, Notification};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::AttendoClient;

pub struct Poller<T> {
    rx: watch::Receiver<Option<T>>,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a poller on the current runtime
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, session: &Session, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send,
    {
        let (tx, rx) = watch::channel(None);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let mut auth_rx = session.subscribe();

        let handle = tokio::spawn(async move {
            tracing::debug!(poller = name, ?period, "poller started");
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,

                    changed = auth_rx.changed() => {
                        if changed.is_err() || !*auth_rx.borrow_and_update() {
                            tracing::debug!(poller = name, "session ended, stopping poller");
                            break;
                        }
                    }

                    _ = interval.tick() => {
                        match fetch().await {
                            Ok(value) => {
                                tx.send_replace(Some(value));
                            }
                            Err(e) => tracing::warn!(poller = name, "poll failed: {e}"),
                        }
                    }
                }
            }
            tracing::debug!(poller = name, "poller stopped");
        });

        Self { rx, shutdown, handle }
    }

    /// Last successfully fetched value
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.rx.clone()
    }

    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl<C: HttpClient + 'static> AttendoClient<C> {
    /// Attendance status, refreshed at the status poll interval
    pub fn poll_attendance_status(self: &Arc<Self>) -> Poller<AttendanceStatus> {
        let client = Arc::clone(self);
        Poller::spawn("attendance-status", self.config.status_poll_interval, &self.session, move || {
            let client = Arc::clone(&client);
            async move { client.attendance_status().await }
        })
    }

    /// Notification list, refreshed at the notification poll interval
    pub fn poll_notifications(self: &Arc<Self>) -> Poller<Vec<Notification>> {
        let client = Arc::clone(self);
        Poller::spawn("notifications", self.config.notification_poll_interval, &self.session, move || {
            let client = Arc::clone(&client);
            async move { client.notifications().await }
        })
    }
}
