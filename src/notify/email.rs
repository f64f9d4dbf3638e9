use crate::notify::Notifier;
use log::{debug, info};

/// Notifier that dispatches an email with a configured subject
///
/// The dispatch is reported through the log facade; there is no delivery
/// confirmation and a failed relay would not be retried or surfaced.
pub struct EmailNotifier {
    subject: String,
}

impl EmailNotifier {
    /// Create an email notifier with a configured subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, alert_message: &str) {
        debug!("Email dispatch for alert: {}", alert_message);
        info!("Dispatching an email with subject `{}`", self.subject);
    }
}
