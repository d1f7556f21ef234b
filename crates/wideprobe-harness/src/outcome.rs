//! Probe process outcome classification.
//!
//! The probes' only externally observable control signal is how the
//! process ended: a clean exit means the fault did not fire, a signal
//! death is the corruption signal under test.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

/// How a trigger process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Process exited normally with the given code.
    Exited { code: i32 },
    /// Process was terminated by the given signal.
    Signaled { signo: i32 },
}

impl ProbeOutcome {
    /// Classify a wait status.
    #[must_use]
    pub fn classify(status: ExitStatus) -> ProbeOutcome {
        match status.signal() {
            Some(signo) => ProbeOutcome::Signaled { signo },
            // A status that is neither a signal nor an exit code does not
            // occur for a reaped child on Linux; fold it into a nonzero exit.
            None => ProbeOutcome::Exited {
                code: status.code().unwrap_or(-1),
            },
        }
    }

    /// True only for a clean exit 0, the "bug not present" path.
    #[must_use]
    pub fn survived(self) -> bool {
        matches!(self, ProbeOutcome::Exited { code: 0 })
    }

    /// Short human-readable label (`exit:0`, `signal:11`).
    #[must_use]
    pub fn label(self) -> String {
        match self {
            ProbeOutcome::Exited { code } => format!("exit:{code}"),
            ProbeOutcome::Signaled { signo } => format!("signal:{signo}"),
        }
    }
}
