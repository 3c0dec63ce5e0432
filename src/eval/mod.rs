//! Evaluation and gating: flag passes, the check entry point, outcome types.

pub mod decision;

pub use decision::{BlockedMessage, GateOutcome, Verdict};

use std::panic::{self, AssertUnwindSafe};

use crate::enabler::{Enabler, EnablerRegistry};
use crate::flags::{CommandFlags, FlagOptions};
use crate::message;
use crate::registry::{Condition, FlagRegistry, RegistryError};

/// The decision engine: registered conditions, registered enabler rules,
/// and the check that combines them.
///
/// Both registries are populated during the host's startup phase; after
/// that the gate is only read. Every call is synchronous and bounded: one
/// check runs each predicate at most twice and at most one enabler action.
pub struct CommandGate<C> {
    flags: FlagRegistry<C>,
    enablers: EnablerRegistry<C>,
}

impl<C> CommandGate<C> {
    pub fn new() -> Self {
        Self {
            flags: FlagRegistry::new(),
            enablers: EnablerRegistry::new(),
        }
    }

    /// Register a condition; see [`FlagRegistry::register`].
    pub fn register_flag(
        &mut self,
        predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
        options: FlagOptions,
    ) -> Result<CommandFlags, RegistryError> {
        self.flags.register(predicate, options)
    }

    /// Register an enabler rule. Rules are consulted in registration order.
    pub fn register_enabler(&mut self, enabler: Enabler<C>) {
        self.enablers.register(enabler);
    }

    pub fn flag_registry(&self) -> &FlagRegistry<C> {
        &self.flags
    }

    /// Compute every condition bit fresh.
    pub fn evaluate(&self, ctx: &C) -> CommandFlags {
        self.pass(ctx, None)
    }

    /// Recompute only quick-test bits; every other bit is carried over from
    /// `last`, the caller's most recent full evaluation.
    pub fn quick_evaluate(&self, ctx: &C, last: CommandFlags) -> CommandFlags {
        self.pass(ctx, Some(last))
    }

    fn pass(&self, ctx: &C, last: Option<CommandFlags>) -> CommandFlags {
        let mut flags = CommandFlags::default();
        for condition in self.flags.conditions() {
            let value = match last {
                Some(last) if !condition.options().quick_test => {
                    last.has_index(condition.index())
                }
                _ => run_predicate(condition, ctx),
            };
            flags = flags.with_index(condition.index(), value);
        }
        flags
    }

    /// Decide whether a command with requirement mask `required` may run.
    ///
    /// Runs a full evaluation; if the mask is unmet, consults at most one
    /// enabler rule (none when `strict`), re-evaluates once, and finally
    /// resolves the blocked message against the flags as they now stand.
    pub fn check_command(
        &self,
        display_name: &str,
        required: CommandFlags,
        ctx: &mut C,
        strict: bool,
    ) -> GateOutcome {
        let mut current = self.evaluate(ctx);
        if current.contains(required) {
            log::debug!("{display_name}: enabled");
            return GateOutcome::enabled();
        }

        if !strict
            && let Some(rule) = self.enablers.select(required, current, ctx)
        {
            run_enabler(rule, ctx, required);
            current = self.evaluate(ctx);
            if current.contains(required) {
                log::debug!("{display_name}: enabled after enabler");
                return GateOutcome::enabled();
            }
        }

        let blocked = message::resolve(&self.flags, required, current, display_name);
        let outcome = GateOutcome::disabled(blocked);
        log::debug!(
            "{display_name}: disabled, missing {:?}{}",
            required & !current,
            if outcome.is_silent() { " (silent)" } else { "" },
        );
        outcome
    }
}

impl<C> Default for CommandGate<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side record of the most recent evaluation, for hosts that
/// interleave cheap refresh ticks with occasional full passes.
///
/// Starts at the [`CommandFlags::NOT_YET_EVALUATED`] sentinel, which forces
/// the first refresh to be a full pass regardless of what was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagState {
    last: CommandFlags,
}

impl FlagState {
    pub fn new() -> Self {
        Self {
            last: CommandFlags::NOT_YET_EVALUATED,
        }
    }

    /// The stored flags, or `None` before the first refresh.
    pub fn current(&self) -> Option<CommandFlags> {
        (self.last != CommandFlags::NOT_YET_EVALUATED).then_some(self.last)
    }

    /// Re-evaluate and store. A quick refresh recomputes only quick-test
    /// conditions, unless nothing has been evaluated yet, in which case a
    /// full pass runs.
    pub fn refresh<C>(&mut self, gate: &CommandGate<C>, ctx: &C, quick: bool) -> CommandFlags {
        self.last = if quick && self.last != CommandFlags::NOT_YET_EVALUATED {
            gate.quick_evaluate(ctx, self.last)
        } else {
            gate.evaluate(ctx)
        };
        self.last
    }
}

impl Default for FlagState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one predicate with panic isolation. A predicate that cannot be
/// evaluated counts as unsatisfied; it must not poison the rest of the
/// pass. Predicates are required to be side-effect-free, so observing
/// state across the unwind boundary is sound.
fn run_predicate<C>(condition: &Condition<C>, ctx: &C) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| condition.test(ctx))) {
        Ok(value) => value,
        Err(_) => {
            log::warn!(
                "condition {} panicked during evaluation, treated as unsatisfied",
                condition.index()
            );
            false
        }
    }
}

/// Run an enabler action with the same isolation. Whatever a failed action
/// left behind, the re-evaluation that follows sees the true state and the
/// check falls through to the normal disabled path.
fn run_enabler<C>(rule: &Enabler<C>, ctx: &mut C, required: CommandFlags) {
    if panic::catch_unwind(AssertUnwindSafe(|| rule.run(ctx, required))).is_err() {
        log::warn!("enabler action panicked for requirement {required:?}");
    }
}
