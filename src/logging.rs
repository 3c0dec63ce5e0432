//! Best-effort audit logging of gate outcomes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::eval::decision::{GateOutcome, Verdict};
use crate::flags::CommandFlags;

/// One line of the audit log.
#[derive(Debug, Serialize)]
pub struct AuditRecord<'a> {
    /// Seconds since the Unix epoch at the time of the check.
    pub unix_time: u64,
    /// The command's display name.
    pub command: &'a str,
    /// The requirement mask the command was checked against.
    pub required: CommandFlags,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

/// Append one JSON line describing a gate outcome.
///
/// Best-effort: failures leave a debug-level breadcrumb and are otherwise
/// ignored. Auditing must never affect the check path.
pub fn append_audit_record(
    path: &Path,
    display_name: &str,
    required: CommandFlags,
    outcome: &GateOutcome,
) {
    let record = AuditRecord {
        unix_time: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        command: display_name,
        required,
        verdict: outcome.verdict,
        message: outcome.message.as_ref().map(|m| m.text.as_str()),
    };
    let Ok(line) = serde_json::to_string(&record) else {
        return;
    };
    let written = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "{line}"));
    if let Err(err) = written {
        log::debug!("audit record dropped: {err}");
    }
}
