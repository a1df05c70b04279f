//! Transient page-level alerts
//!
//! Every alert owns its dismiss timer. Removing the alert (manually, or by
//! dropping the queue) cancels the timer, so a timer never fires for an
//! alert that is already gone.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use uuid::Uuid;

/// How long an alert stays on screen
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Visual flavour of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

/// A notification shown above the form
#[derive(Debug)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Cancels the dismiss timer when the alert is dropped
    _timer: Option<DropGuard>,
}

/// Ordered list of visible alerts with their expiry channel
#[derive(Debug)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    timeout: Duration,
    expired_tx: mpsc::UnboundedSender<Uuid>,
    expired_rx: mpsc::UnboundedReceiver<Uuid>,
}

impl AlertQueue {
    pub fn new(timeout: Duration) -> Self {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        Self {
            alerts: Vec::new(),
            timeout,
            expired_tx,
            expired_rx,
        }
    }

    /// Show an alert and schedule its removal
    ///
    /// Outside a tokio runtime no timer is started and the alert stays until
    /// dismissed.
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let timer = self.spawn_timer(id);

        self.alerts.push(Alert {
            id,
            kind,
            message: message.into(),
            created_at: Utc::now(),
            _timer: timer,
        });

        id
    }

    fn spawn_timer(&self, id: Uuid) -> Option<DropGuard> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.expired_tx.clone();
        let timeout = self.timeout;

        handle.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(timeout) => {
                    let _ = tx.send(id);
                }
            }
        });

        Some(token.drop_guard())
    }

    /// Remove an alert before its timer fires
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        before != self.alerts.len()
    }

    /// Remove the most recent alert
    pub fn dismiss_latest(&mut self) -> bool {
        self.alerts.pop().is_some()
    }

    /// Remove every alert whose timer has fired; returns how many went away
    pub fn drain_expired(&mut self) -> usize {
        let mut removed = 0;
        while let Ok(id) = self.expired_rx.try_recv() {
            if self.dismiss(id) {
                tracing::debug!("Alert {id} expired");
                removed += 1;
            }
        }
        removed
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl Default for AlertQueue {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_TIMEOUT)
    }
}
