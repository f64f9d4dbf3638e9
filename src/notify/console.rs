use crate::notify::Notifier;
use log::{debug, warn};

/// Notifier that reports alerts on the service console
///
/// Carries its own configured message, set at rule registration time; the
/// alert line built by the monitor is recorded at debug level.
pub struct ConsoleNotifier {
    message: String,
}

impl ConsoleNotifier {
    /// Create a console notifier with a configured message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, alert_message: &str) {
        debug!("Console dispatch for alert: {}", alert_message);
        warn!("Alert: `{}`", self.message);
    }
}
