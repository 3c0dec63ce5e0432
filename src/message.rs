//! Choosing the explanatory message for a blocked command.

use crate::eval::decision::BlockedMessage;
use crate::flags::CommandFlags;
use crate::registry::{Condition, FlagRegistry};

/// Pick the dialog content for a command whose `required` mask is not met
/// by `current`.
///
/// Among the missing conditions carrying a message formatter, the highest
/// priority wins; ties go to the lowest bit index, i.e. the earliest
/// registered. When no missing condition has a formatter the result
/// degrades to the generic fallback, or to `None` (silently disabled) when
/// every missing condition opts out of the default message.
pub fn resolve<C>(
    registry: &FlagRegistry<C>,
    required: CommandFlags,
    current: CommandFlags,
    display_name: &str,
) -> Option<BlockedMessage> {
    let missing = required & !current;
    if missing.is_empty() {
        return None;
    }

    let mut best: Option<&Condition<C>> = None;
    let mut default_allowed = false;
    for condition in registry.conditions() {
        if !missing.intersects(condition.flag()) {
            continue;
        }
        if condition.options().message.is_some()
            // Strictly-greater keeps the earliest registered on ties.
            && best.is_none_or(|b| condition.options().priority > b.options().priority)
        {
            best = Some(condition);
        }
        if condition.options().enable_default_message {
            default_allowed = true;
        }
    }

    if let Some(condition) = best {
        return condition.blocked_message(display_name);
    }
    if default_allowed {
        return Some(BlockedMessage::fallback(display_name));
    }
    None
}
