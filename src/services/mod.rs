//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `transport.rs` — `HttpTransport` seam + reqwest blocking client.
//! - `auth.rs` — credential exchange for a bearer token.
//! - `verifier.rs` — endpoint loop, fail-fast vs collect-all.
//! - `aggregator.rs` — ordered failure collection + verdict.
//! - `rollback.rs` — workflow job lookup + approval, selection policies.
//! - `logging.rs` — run-scoped console/file log sink.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Every network call goes through `HttpTransport`.
//! - Services return `SmokeError`; commands wrap in `anyhow`.
//! - Keep command handlers thin; delegate to services.

pub mod aggregator;
pub mod auth;
pub mod logging;
pub mod output;
pub mod rollback;
pub mod transport;
pub mod verifier;
