//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `verify.rs` — `--function test`: catalog → login → endpoint checks → verdict.
//! - `rollback.rs` — workflow approval, standalone or after a failed test.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod rollback;
pub mod verify;

pub use rollback::{handle_rollback_command, run_rollback};
pub use verify::handle_test_command;
