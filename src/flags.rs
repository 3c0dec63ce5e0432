//! The condition bit vector and per-condition options.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::Serialize;

/// Maximum number of registerable conditions.
///
/// Raising this constant is the only sanctioned way to get more room; the
/// registry never grows dynamically, so mask arithmetic stays a single
/// integer operation.
pub const FLAG_CAPACITY: usize = 64;

/// A set of condition bits.
///
/// Each bit position belongs to exactly one registered condition. The value
/// returned by registration carries a single bit; requirement masks are
/// built from those values with `|`:
///
/// ```ignore
/// let required = has_selection | transport_stopped;
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct CommandFlags(u64);

impl CommandFlags {
    /// The empty mask. A command requiring it is always enabled.
    pub const ALWAYS_ENABLED: Self = Self(0);

    /// Sentinel for flag state that has not been computed yet.
    ///
    /// Never a legitimate evaluation result. Holders must replace it with a
    /// full evaluation before comparing against requirement masks; see
    /// [`FlagState`](crate::eval::FlagState).
    pub const NOT_YET_EVALUATED: Self = Self(u64::MAX);

    /// The single-bit value for a registered condition index.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(1 << index)
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `mask` is set in `self`.
    pub const fn contains(self, mask: Self) -> bool {
        self.0 & mask.0 == mask.0
    }

    /// True when `self` and `mask` share at least one bit.
    pub const fn intersects(self, mask: Self) -> bool {
        self.0 & mask.0 != 0
    }

    pub(crate) const fn has_index(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    pub(crate) const fn with_index(self, index: usize, set: bool) -> Self {
        if set {
            Self(self.0 | (1 << index))
        } else {
            Self(self.0 & !(1 << index))
        }
    }
}

impl BitOr for CommandFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CommandFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CommandFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CommandFlags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for CommandFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NOT_YET_EVALUATED {
            return f.write_str("CommandFlags(<not yet evaluated>)");
        }
        f.write_str("CommandFlags{")?;
        let mut first = true;
        for index in 0..FLAG_CAPACITY {
            if self.has_index(index) {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{index}")?;
                first = false;
            }
        }
        f.write_str("}")
    }
}

/// Formats the blocked-command dialog text, given the command's display name.
pub type MessageFormatter = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Per-condition options: how the condition takes part in refresh passes and
/// in message resolution when it blocks a command.
///
/// A consuming builder; chain the setters and hand the result to
/// registration:
///
/// ```ignore
/// gate.register_flag(
///     |app: &App| app.transport.stopped(),
///     FlagOptions::new()
///         .priority(5)
///         .message(|name| format!("Stop playback before using {name}.")),
/// )?;
/// ```
pub struct FlagOptions {
    pub(crate) message: Option<MessageFormatter>,
    pub(crate) help_page: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) priority: u32,
    pub(crate) quick_test: bool,
    pub(crate) enable_default_message: bool,
}

impl Default for FlagOptions {
    fn default() -> Self {
        Self {
            message: None,
            help_page: None,
            title: None,
            priority: 0,
            quick_test: false,
            enable_default_message: true,
        }
    }
}

impl FlagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-default dialog text for when this condition blocks a command.
    /// The formatter receives the command's display name.
    pub fn message(mut self, format: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.message = Some(Box::new(format));
        self
    }

    /// Help page offered from the blocked-command dialog.
    /// Used only together with a message formatter.
    pub fn help_page(mut self, page: impl Into<String>) -> Self {
        self.help_page = Some(page.into());
        self
    }

    /// Non-default dialog title. Used only together with a message formatter.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Conditions with higher priority win when choosing which message to
    /// show; ties go to the earliest registered condition.
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Mark the predicate cheap enough to recompute on every refresh tick.
    /// Non-quick predicates may be carried over between full passes.
    pub fn quick_test(mut self) -> Self {
        self.quick_test = true;
        self
    }

    /// When no blocking condition supplies a message, suppress the generic
    /// fallback dialog on this condition's account.
    pub fn disable_default_message(mut self) -> Self {
        self.enable_default_message = false;
        self
    }
}
