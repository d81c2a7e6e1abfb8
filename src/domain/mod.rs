//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — catalog entries, verdicts, workflow jobs, report structs.
//! - `constants.rs` — stable defaults (log file, approval API, token scheme).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `RunVerdict`, `TestReport` and `RollbackReport` are the `--json` payloads.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
