// ─── Notifications ───
// Status events for the frontend and user-facing alerts. Both are
// fire-and-forget: nothing in the setup flow waits on a reply.

pub mod sinks;

use serde::{Deserialize, Serialize};

use crate::core::runtime::Runner;

pub use sinks::{ChannelAlerts, ChannelSink, LogAlerts, LogSink};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    InstallingDependency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub app_name: String,
    pub runner: Runner,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

/// Receiver of game status updates.
pub trait StatusSink: Send + Sync {
    fn publish(&self, event: StatusEvent);
}

/// Surface that shows alerts to the user.
pub trait AlertSurface: Send + Sync {
    fn show(&self, alert: Alert);
}
