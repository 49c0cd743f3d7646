//! Community alert feed.
//!
//! Residents report fire sightings, road closures, and help requests while
//! an event is active. The feed is a shared in-memory list, newest first;
//! durable alert storage belongs to an external collaborator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Error returned when posting a malformed alert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid alert: {reason}")]
pub struct InvalidAlert {
    reason: &'static str,
}

/// The kinds of community alert residents can post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// A fire sighting.
    Fire,
    /// A road closure.
    Road,
    /// A request for help.
    Help,
}

/// A posted community alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub reporter: Option<String>,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Feed {
    next_id: u64,
    alerts: Vec<Alert>,
}

/// Thread-safe community alert feed.
#[derive(Clone, Default)]
pub struct CommunityAlerts {
    inner: Arc<RwLock<Feed>>,
}

impl CommunityAlerts {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a new alert.
    ///
    /// Title and description must both be non-empty.
    pub async fn post(
        &self,
        kind: AlertKind,
        title: impl Into<String>,
        description: impl Into<String>,
        reporter: Option<String>,
    ) -> Result<Alert, InvalidAlert> {
        let title = title.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(InvalidAlert {
                reason: "title must not be empty",
            });
        }
        if description.trim().is_empty() {
            return Err(InvalidAlert {
                reason: "description must not be empty",
            });
        }

        let mut feed = self.inner.write().await;
        let alert = Alert {
            id: feed.next_id,
            kind,
            title,
            description,
            reporter,
            posted_at: Utc::now(),
        };
        feed.next_id += 1;
        feed.alerts.push(alert.clone());

        Ok(alert)
    }

    /// All alerts, newest first.
    pub async fn list(&self) -> Vec<Alert> {
        let feed = self.inner.read().await;
        feed.alerts.iter().rev().cloned().collect()
    }

    /// Number of posted alerts.
    pub async fn len(&self) -> usize {
        let feed = self.inner.read().await;
        feed.alerts.len()
    }

    /// Whether the feed is empty.
    pub async fn is_empty(&self) -> bool {
        let feed = self.inner.read().await;
        feed.alerts.is_empty()
    }
}
