//! # wideprobe-harness
//!
//! Runs the trigger binaries as subprocesses, classifies how each process
//! ended (clean exit vs. signal), captures the raw bytes it emitted, and
//! verifies the runs against the probe catalog. The triggers themselves
//! never report anything; all observation happens from the outside, here.

#![forbid(unsafe_code)]

pub mod error;
pub mod outcome;
pub mod report;
pub mod runner;

pub use error::HarnessError;
pub use outcome::ProbeOutcome;
pub use report::{ProbeReport, ReportSummary};
pub use runner::{ProbeRun, ProbeRunner, VerificationResult, verify_run};
