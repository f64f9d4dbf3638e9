//! The monitor orchestrating record-and-evaluate
//!
//! This module owns the shared mutable state of the service: the per-key
//! event histories and the ordered rule registry, both guarded by a single
//! exclusive lock.

use crate::events::{Event, EventKey};
use crate::rules::{threshold_met, AlertRule, RuleRegistry};
use crate::store::EventStore;
use chrono::{Duration, Utc};
use log::{debug, info};
use std::sync::Mutex;

/// Outcome of recording one event
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// Alert line for the triggered rule, if any
    pub alert_message: Option<String>,
    /// Whether a rule triggered
    pub triggered: bool,
}

struct MonitorState {
    store: EventStore,
    registry: RuleRegistry,
}

/// Orchestrator owning the event store and the rule registry
///
/// One exclusive lock guards all mutable state: `record_event` and
/// `register_rule` are fully serialized, so a rule registered concurrently
/// with an in-flight record is either visible to that record's entire scan
/// or not at all, never partially. Notifier dispatch happens after the lock
/// is released, so a slow back-end does not stall other callers.
pub struct Monitor {
    state: Mutex<MonitorState>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    /// Create a monitor with no rules and no recorded events
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MonitorState {
                store: EventStore::new(),
                registry: RuleRegistry::new(),
            }),
        }
    }

    /// Register an alert rule
    pub fn register_rule(&self, rule: AlertRule) {
        info!(
            "Registering alert rule for {} with event type {}",
            rule.client, rule.event_type
        );
        let mut state = self.state.lock().unwrap();
        state.registry.register(rule);
    }

    /// Record an event and evaluate matching rules
    ///
    /// Appends to the event's history, prunes entries older than the largest
    /// window configured for the key, then walks matching rules in
    /// registration order. The first rule whose threshold is met fires: its
    /// notifiers are invoked in sequence with the rule's configured message
    /// and no further rules are evaluated, even if they would also have
    /// triggered. Append, prune, scan, and evaluation run under one critical
    /// section; dispatch runs after it.
    pub fn record_event(&self, event: Event) -> RecordOutcome {
        let now = Utc::now();
        let key = event.key();
        debug!("Recording event for {}", key);

        let mut outcome = RecordOutcome {
            alert_message: None,
            triggered: false,
        };
        let mut pending = None;

        {
            let mut guard = self.state.lock().unwrap();
            let state = &mut *guard;

            state.store.append(key.clone(), event.timestamp);

            if let Some(size_secs) = state
                .registry
                .largest_window_secs(&event.client, &event.event_type)
            {
                state
                    .store
                    .prune_older_than(&key, now - Duration::seconds(size_secs as i64));
            }

            if let Some(history) = state.store.history(&key) {
                for rule in state.registry.matching(&event.client, &event.event_type) {
                    if threshold_met(&rule.window, history, now) {
                        info!(
                            "Alert triggered for {} with event type {}",
                            event.client, event.event_type
                        );
                        outcome.alert_message = Some(format!(
                            "Alert triggered for {} with event type {}",
                            event.client, event.event_type
                        ));
                        outcome.triggered = true;
                        pending = Some((rule.config_message(), rule.notifiers.clone()));
                        break;
                    }
                }
            }
        }

        // Dispatch outside the critical section.
        if let Some((message, notifiers)) = pending {
            for notifier in notifiers {
                notifier.notify(&message);
            }
        }

        outcome
    }

    /// Number of registered rules
    ///
    /// Primarily used for testing and monitoring.
    pub fn rule_count(&self) -> usize {
        self.state.lock().unwrap().registry.rule_count()
    }

    /// Number of history entries currently retained for a (client, event
    /// type) pair
    ///
    /// Primarily used for testing and monitoring.
    pub fn recorded_count(&self, client: &str, event_type: &str) -> usize {
        let key = EventKey::from_parts(client, event_type);
        self.state.lock().unwrap().store.recorded_count(&key)
    }
}
