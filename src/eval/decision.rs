//! Outcome types for a gate check.

use serde::Serialize;

/// Whether a command may execute right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Enabled,
    Disabled,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Enabled => "enabled",
            Verdict::Disabled => "disabled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Enabled => "ENABLED",
            Verdict::Disabled => "DISABLED",
        }
    }
}

/// Dialog content explaining why a command is blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedMessage {
    /// Dialog text, already formatted with the command's display name.
    pub text: String,
    /// Non-default dialog title, when the blocking condition set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Help page offered from the dialog, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_page: Option<String>,
}

impl BlockedMessage {
    /// The generic text used when no blocking condition supplies its own.
    pub(crate) fn fallback(display_name: &str) -> Self {
        Self {
            text: format!("\"{display_name}\" is not available at the moment."),
            title: None,
            help_page: None,
        }
    }
}

/// Result of one gate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutcome {
    pub verdict: Verdict,
    /// Present only in the disabled-with-message terminal state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<BlockedMessage>,
}

impl GateOutcome {
    pub(crate) fn enabled() -> Self {
        Self {
            verdict: Verdict::Enabled,
            message: None,
        }
    }

    pub(crate) fn disabled(message: Option<BlockedMessage>) -> Self {
        Self {
            verdict: Verdict::Disabled,
            message,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.verdict == Verdict::Enabled
    }

    /// Disabled with no dialog to show.
    pub fn is_silent(&self) -> bool {
        self.verdict == Verdict::Disabled && self.message.is_none()
    }
}
