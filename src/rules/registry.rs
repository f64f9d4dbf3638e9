//! Alert rules and the ordered rule registry

use crate::notify::Notifier;
use crate::rules::WindowSpec;
use std::sync::Arc;

/// A registered alert rule for one (client, event type) pair
///
/// Created at registration time and never mutated afterwards; the registry
/// owns it for the lifetime of the process. Notifiers are shared so a
/// triggered rule's set can be dispatched after the registry lock is
/// released.
pub struct AlertRule {
    /// Client the rule applies to
    pub client: String,
    /// Event type the rule applies to
    pub event_type: String,
    /// Threshold window
    pub window: WindowSpec,
    /// Notifiers invoked in sequence when the rule fires
    pub notifiers: Vec<Arc<dyn Notifier>>,
}

impl std::fmt::Debug for AlertRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertRule")
            .field("client", &self.client)
            .field("event_type", &self.event_type)
            .field("window", &self.window)
            .field("notifiers", &self.notifiers.len())
            .finish()
    }
}

impl AlertRule {
    /// Create a new alert rule
    pub fn new(
        client: impl Into<String>,
        event_type: impl Into<String>,
        window: WindowSpec,
        notifiers: Vec<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            client: client.into(),
            event_type: event_type.into(),
            window,
            notifiers,
        }
    }

    /// Whether this rule applies to a (client, event type) pair
    pub fn matches(&self, client: &str, event_type: &str) -> bool {
        self.client == client && self.event_type == event_type
    }

    /// Message passed to this rule's notifiers when it fires
    pub fn config_message(&self) -> String {
        format!("{} {} threshold breached", self.client, self.event_type)
    }
}

/// Ordered collection of alert rules
///
/// Registration order is preserved and is the tie-break when several rules
/// share a (client, event type) pair: the earliest registered rule whose
/// threshold is satisfied wins.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<AlertRule>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule, preserving registration order
    pub fn register(&mut self, rule: AlertRule) {
        self.rules.push(rule);
    }

    /// Rules matching a (client, event type) pair, in registration order
    ///
    /// The iterator is finite and restartable; each call walks the registry
    /// independently.
    pub fn matching<'a>(
        &'a self,
        client: &'a str,
        event_type: &'a str,
    ) -> impl Iterator<Item = &'a AlertRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(client, event_type))
    }

    /// Largest window size configured for a (client, event type) pair
    ///
    /// `None` when no rule matches the pair; history for such keys has no
    /// retention bound.
    pub fn largest_window_secs(&self, client: &str, event_type: &str) -> Option<u64> {
        self.matching(client, event_type)
            .map(|rule| rule.window.size_secs())
            .max()
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
