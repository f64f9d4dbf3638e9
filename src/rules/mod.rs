/// Window specifications and threshold evaluation
pub mod window;
/// Alert rules and the ordered registry
pub mod registry;

pub use registry::{AlertRule, RuleRegistry};
pub use window::{threshold_met, WindowSpec};
