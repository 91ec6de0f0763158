//! Match-level tests for the engine.
//!
//! - **Scenarios**: full shots from launch to resolution
//! - **Determinism**: same seed and inputs give the same state hash
//! - **Properties**: invariants under random input sequences
//!
//! # Test Structure
//!
//! - `helpers.rs`: match setup and flight utilities
//! - `scenarios.rs`: end-to-end shot scenarios
//! - `determinism.rs`: replay equality
//! - `properties.rs`: proptest invariants

mod helpers;

// Re-export for convenience
pub use helpers::*;
