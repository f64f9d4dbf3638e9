/// Error types for the alerting service
pub mod error;

/// Core event types
pub mod events;

/// Append-only event history storage
pub mod store;

/// Alert rules, window evaluation, and the rule registry
pub mod rules;

/// Notification back-ends
pub mod notify;

/// The monitor orchestrating record-and-evaluate
pub mod monitor;

/// HTTP API surface
pub mod api;

/// Configuration management
pub mod config;

// Re-export commonly used types
pub use error::{ConfigError, DecodeError};
