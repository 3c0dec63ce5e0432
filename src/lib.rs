//! command-gate: a command-enablement rule engine.
//!
//! User-invocable commands are gated by *conditions*: named boolean
//! predicates over an opaque application context, each owning one bit of a
//! fixed-width flag vector. A command declares the mask of bits it needs
//! true; [`CommandGate::check_command`] evaluates the conditions and
//! answers enabled or disabled, after optionally letting a registered
//! *enabler* rule try to satisfy the missing conditions with one bounded
//! side effect. For the disabled case it picks the single most useful
//! explanatory message by priority.
//!
//! Both registries are filled once during the host's startup phase and are
//! read-only afterwards. The engine holds no locks and spawns no threads;
//! all checks run synchronously on the host's control thread.
//!
//! # Architecture
//!
//! - **[`flags`]** — Condition bit vector, capacity constant, per-condition options builder.
//! - **[`registry`]** — Condition registration: bit assignment, capacity enforcement.
//! - **[`enabler`]** — Rules that may make missing conditions true instead of refusing.
//! - **[`message`]** — Priority-ordered choice of the blocked-command message.
//! - **[`eval`]** — Full and quick evaluation passes, the gate check, outcome types.
//! - **[`logging`]** — Best-effort JSON audit records of gate outcomes.

/// Rules that may satisfy missing conditions via a side effect.
pub mod enabler;
/// Evaluation passes, the gate check, and outcome types.
pub mod eval;
/// The condition bit vector and options builder.
pub mod flags;
/// File-based audit records of gate outcomes.
pub mod logging;
/// Blocked-command message resolution.
pub mod message;
/// Condition registration and storage.
pub mod registry;

pub use enabler::{Enabler, EnablerRegistry};
pub use eval::decision::{BlockedMessage, GateOutcome, Verdict};
pub use eval::{CommandGate, FlagState};
pub use flags::{CommandFlags, FLAG_CAPACITY, FlagOptions, MessageFormatter};
pub use registry::{Condition, FlagRegistry, RegistryError};
