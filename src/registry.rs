//! Condition registration: bit index assignment and capacity enforcement.

use thiserror::Error;

use crate::eval::decision::BlockedMessage;
use crate::flags::{CommandFlags, FLAG_CAPACITY, FlagOptions};

/// Error raised during the registration phase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Every bit of the flag vector is taken. Raising [`FLAG_CAPACITY`] is
    /// the only fix; the registry never grows at runtime. Hosts should
    /// treat this as fatal at startup.
    #[error("condition capacity exhausted ({FLAG_CAPACITY} bits)")]
    CapacityExhausted,
}

/// A registered condition: one bit of the flag vector, the predicate that
/// computes it, and the options governing refresh and message resolution.
pub struct Condition<C> {
    index: usize,
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
    options: FlagOptions,
}

impl<C> Condition<C> {
    /// The zero-based bit index assigned at registration.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The single-bit flag value for this condition.
    pub fn flag(&self) -> CommandFlags {
        CommandFlags::from_index(self.index)
    }

    pub(crate) fn test(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }

    pub(crate) fn options(&self) -> &FlagOptions {
        &self.options
    }

    /// This condition's dialog content for a blocked command, if it carries
    /// a message formatter.
    pub(crate) fn blocked_message(&self, display_name: &str) -> Option<BlockedMessage> {
        self.options.message.as_ref().map(|format| BlockedMessage {
            text: format(display_name),
            title: self.options.title.clone(),
            help_page: self.options.help_page.clone(),
        })
    }
}

/// Append-only store of registered conditions.
///
/// Populated once during the host's startup phase. Entries are never
/// removed or reassigned; evaluation, message resolution, and enabler
/// selection all walk them in registration order.
pub struct FlagRegistry<C> {
    conditions: Vec<Condition<C>>,
}

impl<C> FlagRegistry<C> {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Reserve the next bit position and associate it with `predicate`.
    ///
    /// Returns the single-bit flag value for the new condition, usable
    /// thereafter as a named constant and in requirement masks. Fails once
    /// all [`FLAG_CAPACITY`] positions are taken, leaving the registry
    /// exactly as it was.
    pub fn register(
        &mut self,
        predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
        options: FlagOptions,
    ) -> Result<CommandFlags, RegistryError> {
        let index = self.conditions.len();
        if index >= FLAG_CAPACITY {
            return Err(RegistryError::CapacityExhausted);
        }
        self.conditions.push(Condition {
            index,
            predicate: Box::new(predicate),
            options,
        });
        Ok(CommandFlags::from_index(index))
    }

    /// Registered conditions, in registration order.
    pub(crate) fn conditions(&self) -> &[Condition<C>] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<C> Default for FlagRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_registration_order() {
        let mut registry: FlagRegistry<()> = FlagRegistry::new();
        for expected in 0..8 {
            let flag = registry.register(|_| true, FlagOptions::new()).unwrap();
            assert_eq!(flag, CommandFlags::from_index(expected));
        }
        let indices: Vec<usize> = registry.conditions().iter().map(Condition::index).collect();
        assert_eq!(indices, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn registered_flag_is_single_bit() {
        let mut registry: FlagRegistry<()> = FlagRegistry::new();
        let flag = registry.register(|_| true, FlagOptions::new()).unwrap();
        assert_eq!(flag.bits().count_ones(), 1);
    }

    #[test]
    fn overflow_is_rejected() {
        let mut registry: FlagRegistry<()> = FlagRegistry::new();
        for _ in 0..FLAG_CAPACITY {
            registry.register(|_| true, FlagOptions::new()).unwrap();
        }
        assert_eq!(
            registry.register(|_| true, FlagOptions::new()),
            Err(RegistryError::CapacityExhausted)
        );
        // The failed call must not have touched the registry.
        assert_eq!(registry.len(), FLAG_CAPACITY);
    }

    #[test]
    fn blocked_message_carries_title_and_help_page() {
        let mut registry: FlagRegistry<()> = FlagRegistry::new();
        registry
            .register(
                |_| false,
                FlagOptions::new()
                    .message(|name| format!("{name} needs a selection"))
                    .title("No selection")
                    .help_page("Selecting_Audio"),
            )
            .unwrap();
        let message = registry.conditions()[0].blocked_message("Cut").unwrap();
        assert_eq!(message.text, "Cut needs a selection");
        assert_eq!(message.title.as_deref(), Some("No selection"));
        assert_eq!(message.help_page.as_deref(), Some("Selecting_Audio"));
    }

    #[test]
    fn condition_without_formatter_has_no_message() {
        let mut registry: FlagRegistry<()> = FlagRegistry::new();
        registry.register(|_| false, FlagOptions::new()).unwrap();
        assert!(registry.conditions()[0].blocked_message("Cut").is_none());
    }
}
