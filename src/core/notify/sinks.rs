use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use super::{Alert, AlertSurface, Severity, StatusEvent, StatusSink};

/// Forwards status events over an unbounded channel. A dropped receiver
/// is not an error; the event is simply lost.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<StatusEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<StatusEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StatusSink for ChannelSink {
    fn publish(&self, event: StatusEvent) {
        let _ = self.tx.send(event);
    }
}

/// Writes status events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn publish(&self, event: StatusEvent) {
        info!(
            "[{}:{}] status -> {:?}",
            event.runner, event.app_name, event.status
        );
    }
}

/// Forwards alerts over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelAlerts {
    tx: UnboundedSender<Alert>,
}

impl ChannelAlerts {
    pub fn new() -> (Self, UnboundedReceiver<Alert>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSurface for ChannelAlerts {
    fn show(&self, alert: Alert) {
        let _ = self.tx.send(alert);
    }
}

/// Writes alerts to the log at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerts;

impl AlertSurface for LogAlerts {
    fn show(&self, alert: Alert) {
        match alert.severity {
            Severity::Error => error!("{}: {}", alert.title, alert.message),
        }
    }
}
