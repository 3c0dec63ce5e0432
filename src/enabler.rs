//! Rules that try to satisfy missing conditions instead of refusing a command.

use crate::flags::CommandFlags;

type FlagsThunk = Box<dyn Fn() -> CommandFlags + Send + Sync>;

/// A rule that may perform one side effect to make missing conditions true.
///
/// `actual` names the conditions that, once all true, mean the rule has
/// nothing left to do; `possible` names the conditions it might be able to
/// make true. Both are thunks rather than plain masks: a rule is often
/// registered before every flag value it names exists, so the masks are
/// computed only when the rule is consulted.
pub struct Enabler<C> {
    actual: FlagsThunk,
    possible: FlagsThunk,
    applicable: Box<dyn Fn(&C) -> bool + Send + Sync>,
    try_enable: Box<dyn Fn(&mut C, CommandFlags) + Send + Sync>,
}

impl<C> Enabler<C> {
    /// Build a rule. `try_enable` receives the full requirement mask of the
    /// command being checked; it must mutate state synchronously and
    /// boundedly, since the gate re-evaluates immediately afterwards.
    pub fn new(
        actual: impl Fn() -> CommandFlags + Send + Sync + 'static,
        possible: impl Fn() -> CommandFlags + Send + Sync + 'static,
        applicable: impl Fn(&C) -> bool + Send + Sync + 'static,
        try_enable: impl Fn(&mut C, CommandFlags) + Send + Sync + 'static,
    ) -> Self {
        Self {
            actual: Box::new(actual),
            possible: Box::new(possible),
            applicable: Box::new(applicable),
            try_enable: Box::new(try_enable),
        }
    }

    pub(crate) fn actual_flags(&self) -> CommandFlags {
        (self.actual)()
    }

    pub(crate) fn possible_flags(&self) -> CommandFlags {
        (self.possible)()
    }

    pub(crate) fn is_applicable(&self, ctx: &C) -> bool {
        (self.applicable)(ctx)
    }

    pub(crate) fn run(&self, ctx: &mut C, required: CommandFlags) {
        (self.try_enable)(ctx, required);
    }
}

/// Append-only store of enabler rules, consulted in registration order.
pub struct EnablerRegistry<C> {
    entries: Vec<Enabler<C>>,
}

impl<C> EnablerRegistry<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, enabler: Enabler<C>) {
        self.entries.push(enabler);
    }

    /// The first rule that might help with `required`, whose goal is not
    /// already met under `current`, and which declares itself applicable.
    pub(crate) fn select(
        &self,
        required: CommandFlags,
        current: CommandFlags,
        ctx: &C,
    ) -> Option<&Enabler<C>> {
        self.entries.iter().find(|rule| {
            rule.possible_flags().intersects(required)
                && !current.contains(rule.actual_flags())
                && rule.is_applicable(ctx)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for EnablerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
