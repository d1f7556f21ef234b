//! Probe catalog: the fixed contracts of the two trigger binaries.
//!
//! Each [`ProbeSpec`] records what the harness feeds a trigger and what a
//! healthy libc produces back. There is no dynamic configuration; the
//! probes are hardcoded call sequences by design.

use serde::{Deserialize, Serialize};

use crate::wide::{CONV_BUF_LEN, CONV_INPUT_BYTES};

/// Identifier for a known probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeId {
    /// Allocator-stomp detector: `fputws` to a closed stderr stream.
    FputwsStomp,
    /// Conversion destination-bound probe: unvalidated `wcstombs`.
    WcstombsBound,
}

impl ProbeId {
    /// All known probes, in catalog order.
    #[must_use]
    pub fn all() -> [ProbeId; 2] {
        [ProbeId::FputwsStomp, ProbeId::WcstombsBound]
    }

    /// Stable string form, matching the trigger binary name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeId::FputwsStomp => "fputws_stomp",
            ProbeId::WcstombsBound => "wcstombs_bound",
        }
    }

    /// Case-insensitive parse accepting `-` or `_` separators.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<ProbeId> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "fputws_stomp" => Some(ProbeId::FputwsStomp),
            "wcstombs_bound" => Some(ProbeId::WcstombsBound),
            _ => None,
        }
    }
}

/// Contract of one probe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Probe identifier.
    pub id: ProbeId,
    /// Trigger binary name under the bin directory.
    pub bin_name: String,
    /// One-line description of what the probe exercises.
    pub summary: String,
    /// Bytes piped to the trigger's stdin.
    pub stdin: Vec<u8>,
    /// Exit code a surviving run must produce.
    pub expected_exit: i32,
    /// Exact stdout byte count a surviving run must produce.
    pub expected_stdout_len: usize,
    /// Whether the run must produce no stderr bytes (stomp probe closes
    /// the stream, so nothing can be visible).
    pub expect_silent_stderr: bool,
}

impl ProbeSpec {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Returns the specs for the two built-in probes.
#[must_use]
pub fn builtin_probes() -> Vec<ProbeSpec> {
    vec![
        ProbeSpec {
            id: ProbeId::FputwsStomp,
            bin_name: ProbeId::FputwsStomp.as_str().to_string(),
            summary: "close stderr, fputws a 4096-char wide string, then loop \
                      marker writes against free(malloc(1))"
                .to_string(),
            stdin: Vec::new(),
            expected_exit: 0,
            expected_stdout_len: 0,
            expect_silent_stderr: true,
        },
        ProbeSpec {
            id: ProbeId::WcstombsBound,
            bin_name: ProbeId::WcstombsBound.as_str().to_string(),
            summary: "read 8 raw bytes, wcstombs them unvalidated with bound 16, \
                      emit all 16 destination bytes"
                .to_string(),
            stdin: vec![0u8; CONV_INPUT_BYTES],
            expected_exit: 0,
            expected_stdout_len: CONV_BUF_LEN,
            expect_silent_stderr: true,
        },
    ]
}

/// Looks up a built-in probe by id. The catalog covers every [`ProbeId`].
#[must_use]
pub fn find_probe(id: ProbeId) -> Option<ProbeSpec> {
    builtin_probes().into_iter().find(|spec| spec.id == id)
}
