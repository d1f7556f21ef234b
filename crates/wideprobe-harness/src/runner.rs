//! Trigger subprocess execution and contract verification.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use sha2::{Digest, Sha256};
use wideprobe_core::catalog::{ProbeId, ProbeSpec};
use wideprobe_core::convert;

use crate::error::HarnessError;
use crate::outcome::ProbeOutcome;

/// Captured result of one trigger execution.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRun {
    /// Which probe ran.
    pub probe: ProbeId,
    /// How the process terminated.
    pub outcome: ProbeOutcome,
    /// Raw stdout bytes (the leaked/converted buffer for the bound probe).
    pub stdout: Vec<u8>,
    /// Raw stderr bytes (must stay empty; the stomp probe closes the stream).
    pub stderr: Vec<u8>,
    /// SHA-256 of `stdout`, pinning the emitted bytes in evidence.
    pub stdout_sha256: String,
}

/// One verified property of a run.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    /// Property name.
    pub check: String,
    /// Whether the run satisfied it.
    pub passed: bool,
    /// Expected/actual detail for failures, context otherwise.
    pub detail: String,
}

/// Spawns trigger binaries from a bin directory and collects their output.
pub struct ProbeRunner {
    bin_dir: PathBuf,
}

impl ProbeRunner {
    /// Create a runner rooted at `bin_dir` (e.g. `target/debug`).
    #[must_use]
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.into(),
        }
    }

    /// Path the runner expects the trigger binary at.
    #[must_use]
    pub fn binary_path(&self, spec: &ProbeSpec) -> PathBuf {
        self.bin_dir.join(&spec.bin_name)
    }

    /// Run one probe to completion and capture everything it produced.
    ///
    /// Blocks until the child is reaped; the probes have no timeouts.
    pub fn run(&self, spec: &ProbeSpec) -> Result<ProbeRun, HarnessError> {
        self.run_with_stdin(spec, &spec.stdin)
    }

    /// Run one probe with override stdin bytes (for leak exploration).
    pub fn run_with_stdin(&self, spec: &ProbeSpec, stdin: &[u8]) -> Result<ProbeRun, HarnessError> {
        let path = self.binary_path(spec);
        if !path.exists() {
            return Err(HarnessError::MissingBinary { path });
        }

        let mut child = Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                bin: spec.bin_name.clone(),
                source,
            })?;

        if let Some(mut pipe) = child.stdin.take() {
            // A broken-pipe write is fine: the trigger may exit (or die)
            // before reading, and that is part of the observation.
            let _ = pipe.write_all(stdin);
        }

        let output = child
            .wait_with_output()
            .map_err(|source| HarnessError::Collect {
                bin: spec.bin_name.clone(),
                source,
            })?;

        Ok(ProbeRun {
            probe: spec.id,
            outcome: ProbeOutcome::classify(output.status),
            stdout_sha256: hex_digest(&output.stdout),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Lowercase hex SHA-256 of a byte buffer.
#[must_use]
pub fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(64);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Verifies a run against its catalog contract.
///
/// Checks, in order: termination status, stdout byte count, stderr
/// silence, and (for the conversion probe, when the safe model accepts the
/// input) stdout content against the correct-converter model. A content
/// mismatch with exit 0 means the converter left different bytes behind
/// than a correct one would, which is the leak the probe exists to expose.
#[must_use]
pub fn verify_run(spec: &ProbeSpec, run: &ProbeRun) -> Vec<VerificationResult> {
    let mut results = Vec::new();

    let survived = run.outcome
        == (ProbeOutcome::Exited {
            code: spec.expected_exit,
        });
    results.push(VerificationResult {
        check: format!("{}/termination", spec.id.as_str()),
        passed: survived,
        detail: format!("expected exit:{}, got {}", spec.expected_exit, run.outcome.label()),
    });

    results.push(VerificationResult {
        check: format!("{}/stdout_len", spec.id.as_str()),
        passed: run.stdout.len() == spec.expected_stdout_len,
        detail: format!(
            "expected {} bytes, got {} (sha256 {})",
            spec.expected_stdout_len,
            run.stdout.len(),
            run.stdout_sha256
        ),
    });

    if spec.expect_silent_stderr {
        results.push(VerificationResult {
            check: format!("{}/stderr_silent", spec.id.as_str()),
            passed: run.stderr.is_empty(),
            detail: format!("{} stray stderr bytes", run.stderr.len()),
        });
    }

    if spec.id == ProbeId::WcstombsBound {
        match convert::model_conversion_output(&spec.stdin) {
            Ok(expected) => results.push(VerificationResult {
                check: format!("{}/stdout_content", spec.id.as_str()),
                passed: run.stdout == expected,
                detail: format!(
                    "correct-converter model sha256 {}, trigger sha256 {}",
                    hex_digest(&expected),
                    run.stdout_sha256
                ),
            }),
            Err(err) => results.push(VerificationResult {
                // Invalid wide input: converter output is implementation-
                // defined, so only record what was observed.
                check: format!("{}/stdout_content", spec.id.as_str()),
                passed: true,
                detail: format!("model declined input ({err}); observed sha256 {}", run.stdout_sha256),
            }),
        }
    }

    results
}

/// Convenience: the default bin directory relative to a workspace root.
#[must_use]
pub fn default_bin_dir(workspace_root: &Path) -> PathBuf {
    workspace_root.join("target").join("debug")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use wideprobe_core::catalog::{ProbeId, find_probe};

    fn synthetic_run(spec: &ProbeSpec, raw_status: i32, stdout: Vec<u8>) -> ProbeRun {
        ProbeRun {
            probe: spec.id,
            outcome: ProbeOutcome::classify(ExitStatus::from_raw(raw_status)),
            stdout_sha256: hex_digest(&stdout),
            stdout,
            stderr: Vec::new(),
        }
    }

    #[test]
    fn surviving_stomp_run_passes_all_checks() {
        let spec = find_probe(ProbeId::FputwsStomp).unwrap();
        let run = synthetic_run(&spec, 0, Vec::new());
        let results = verify_run(&spec, &run);
        assert!(results.iter().all(|r| r.passed), "failures: {results:?}");
    }

    #[test]
    fn signaled_stomp_run_fails_termination_check() {
        let spec = find_probe(ProbeId::FputwsStomp).unwrap();
        let run = synthetic_run(&spec, 11, Vec::new());
        let results = verify_run(&spec, &run);
        let term = results.iter().find(|r| r.check.ends_with("/termination")).unwrap();
        assert!(!term.passed);
        assert!(term.detail.contains("signal:11"), "detail: {}", term.detail);
    }

    #[test]
    fn bound_run_with_all_zero_output_passes_content_check() {
        let spec = find_probe(ProbeId::WcstombsBound).unwrap();
        let run = synthetic_run(&spec, 0, vec![0u8; 16]);
        let results = verify_run(&spec, &run);
        assert!(results.iter().all(|r| r.passed), "failures: {results:?}");
    }

    #[test]
    fn bound_run_with_leaked_bytes_fails_content_check() {
        let spec = find_probe(ProbeId::WcstombsBound).unwrap();
        let mut leaked = vec![0u8; 16];
        leaked[7] = 0x41; // a byte the converter should never have produced
        let run = synthetic_run(&spec, 0, leaked);
        let results = verify_run(&spec, &run);
        let content = results.iter().find(|r| r.check.ends_with("/stdout_content")).unwrap();
        assert!(!content.passed);
    }

    #[test]
    fn bound_run_with_short_output_fails_length_check() {
        let spec = find_probe(ProbeId::WcstombsBound).unwrap();
        let run = synthetic_run(&spec, 0, vec![0u8; 5]);
        let results = verify_run(&spec, &run);
        let len = results.iter().find(|r| r.check.ends_with("/stdout_len")).unwrap();
        assert!(!len.passed);
    }

    #[test]
    fn stray_stderr_bytes_fail_silence_check() {
        let spec = find_probe(ProbeId::FputwsStomp).unwrap();
        let mut run = synthetic_run(&spec, 0, Vec::new());
        run.stderr = b"noise".to_vec();
        let results = verify_run(&spec, &run);
        let silent = results.iter().find(|r| r.check.ends_with("/stderr_silent")).unwrap();
        assert!(!silent.passed);
    }

    #[test]
    fn hex_digest_is_64_lowercase_hex_chars() {
        let d = hex_digest(b"");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // SHA-256 of the empty string is a fixed value.
        assert!(d.starts_with("e3b0c442"));
    }

    #[test]
    fn missing_binary_is_reported_not_panicked() {
        let spec = find_probe(ProbeId::FputwsStomp).unwrap();
        let runner = ProbeRunner::new("/nonexistent/bin/dir");
        let err = runner.run(&spec).unwrap_err();
        assert!(matches!(err, HarnessError::MissingBinary { .. }));
    }
}
