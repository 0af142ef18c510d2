//! Engine-level tests.
//!
//! - `helpers.rs`: board fixtures and setup utilities
//! - `scenarios.rs`: end-to-end swaps with exact expected outcomes
//! - `determinism.rs`: seeded replays produce identical boards and scores
//! - `properties.rs`: proptest invariants over random boards and swaps

mod helpers;

pub use helpers::*;
