//! CLI entrypoint for the wideprobe harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wideprobe_core::catalog::{self, ProbeId};
use wideprobe_harness::{HarnessError, ProbeReport, ProbeRunner, report::RunSection, verify_run};

/// Harness for the wide-character corruption trigger binaries.
#[derive(Debug, Parser)]
#[command(name = "wideprobe-harness")]
#[command(about = "Runs the wideprobe triggers and verifies their contracts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the probes in the catalog.
    List,
    /// Run one probe and print the captured run as JSON.
    Run {
        /// Probe id (fputws_stomp or wcstombs_bound).
        probe: String,
        /// Directory containing the trigger binaries.
        #[arg(long, default_value = "target/debug")]
        bin_dir: PathBuf,
        /// Override the stdin bytes with a hex string (conversion probe
        /// leak exploration).
        #[arg(long)]
        stdin_hex: Option<String>,
    },
    /// Run every probe, verify the contract properties, and emit a report.
    Verify {
        /// Directory containing the trigger binaries.
        #[arg(long, default_value = "target/debug")]
        bin_dir: PathBuf,
        /// Output report path (markdown; a .json sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            for spec in catalog::builtin_probes() {
                println!("{:<16} {}", spec.id.as_str(), spec.summary);
            }
        }
        Command::Run {
            probe,
            bin_dir,
            stdin_hex,
        } => {
            let id = ProbeId::from_str_loose(&probe)
                .ok_or_else(|| HarnessError::UnknownProbe(probe.clone()))?;
            let spec = catalog::find_probe(id)
                .ok_or_else(|| HarnessError::UnknownProbe(probe.clone()))?;
            let runner = ProbeRunner::new(bin_dir);

            let run = match stdin_hex {
                Some(hex) => {
                    let bytes = parse_hex(&hex)?;
                    runner.run_with_stdin(&spec, &bytes)?
                }
                None => runner.run(&spec)?,
            };

            eprintln!("{}: {}", spec.id.as_str(), run.outcome.label());
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        Command::Verify {
            bin_dir,
            report,
            timestamp,
        } => {
            let runner = ProbeRunner::new(bin_dir);
            let mut sections = Vec::new();

            for spec in catalog::builtin_probes() {
                eprintln!("Running {}", spec.id.as_str());
                let run = runner.run(&spec)?;
                let checks = verify_run(&spec, &run);
                sections.push(RunSection::new(&run, checks));
            }

            let report_doc = ProbeReport::new(
                "wideprobe verification report",
                timestamp.unwrap_or_else(|| format!("{:?}", std::time::SystemTime::now())),
                sections,
            );

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json()?)?;
            } else {
                print!("{}", report_doc.to_markdown());
            }

            if !report_doc.summary.all_passed() {
                return Err("Probe verification failed".into());
            }
        }
    }

    Ok(())
}

/// Parse a hex string (optionally `0x`-prefixed, `_` separators allowed)
/// into bytes.
fn parse_hex(raw: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let s = raw.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let s = s.replace('_', "");
    if s.len() % 2 != 0 {
        return Err(format!("hex string has odd length: '{raw}'").into());
    }
    let mut bytes = Vec::with_capacity(s.len() / 2);
    for i in (0..s.len()).step_by(2) {
        bytes.push(u8::from_str_radix(&s[i..i + 2], 16)?);
    }
    Ok(bytes)
}
