/// Console notification back-end
pub mod console;
/// Email notification back-end
pub mod email;

pub use console::ConsoleNotifier;
pub use email::EmailNotifier;

/// A delivery mechanism invoked with a textual alert message when a rule's
/// threshold is met
///
/// Delivery is fire-and-forget and synchronous: there is no failure channel
/// back to the caller, no retry, and a back-end that fails reports through
/// the log facade only.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Deliver one alert message
    fn notify(&self, alert_message: &str);
}
