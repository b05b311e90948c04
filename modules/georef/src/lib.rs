// === PUBLIC CONTRACT ===
// Only the contract module should be public for callers to consume
pub mod contract;

pub use contract::{client, error, model};

pub mod names;

// === INTERNAL MODULES ===
// Exposed for testing and for the CLI planner; callers should go through
// the `contract` module.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
