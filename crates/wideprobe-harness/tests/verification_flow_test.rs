// End-to-end verification flow over synthetic runs: catalog -> verify ->
// report, without spawning real trigger processes.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use wideprobe_core::catalog::{ProbeId, ProbeSpec, builtin_probes, find_probe};
use wideprobe_core::convert::model_conversion_output;
use wideprobe_harness::report::RunSection;
use wideprobe_harness::runner::hex_digest;
use wideprobe_harness::{ProbeOutcome, ProbeReport, ProbeRun, verify_run};

fn run_for(spec: &ProbeSpec, raw_status: i32, stdout: Vec<u8>) -> ProbeRun {
    ProbeRun {
        probe: spec.id,
        outcome: ProbeOutcome::classify(ExitStatus::from_raw(raw_status)),
        stdout_sha256: hex_digest(&stdout),
        stdout,
        stderr: Vec::new(),
    }
}

#[test]
fn healthy_libc_scenario_produces_all_pass_report() {
    let mut sections = Vec::new();
    for spec in builtin_probes() {
        let stdout = match spec.id {
            ProbeId::FputwsStomp => Vec::new(),
            ProbeId::WcstombsBound => model_conversion_output(&spec.stdin).unwrap().to_vec(),
        };
        let run = run_for(&spec, 0, stdout);
        let checks = verify_run(&spec, &run);
        sections.push(RunSection::new(&run, checks));
    }

    let report = ProbeReport::new("verification", "fixed-ts", sections);
    assert!(report.summary.all_passed(), "report: {}", report.to_markdown());
    assert_eq!(report.sections.len(), 2);
}

#[test]
fn stomped_allocator_scenario_fails_termination_only() {
    let spec = find_probe(ProbeId::FputwsStomp).unwrap();
    // SIGSEGV during the malloc/free loop.
    let run = run_for(&spec, 11, Vec::new());
    let checks = verify_run(&spec, &run);

    let failed: Vec<_> = checks.iter().filter(|c| !c.passed).collect();
    assert_eq!(failed.len(), 1, "checks: {checks:?}");
    assert!(failed[0].check.ends_with("/termination"));
    assert!(failed[0].detail.contains("signal:11"));
}

#[test]
fn overflowing_converter_scenario_fails_length_check() {
    let spec = find_probe(ProbeId::WcstombsBound).unwrap();
    // A converter that wrote past its bound and a trigger that emitted more
    // than the destination buffer would show up as extra stdout bytes.
    let run = run_for(&spec, 0, vec![0u8; 24]);
    let checks = verify_run(&spec, &run);

    let len = checks.iter().find(|c| c.check.ends_with("/stdout_len")).unwrap();
    assert!(!len.passed);
}

#[test]
fn zero_input_expectation_matches_probe_contract() {
    // The catalog feeds the conversion probe 8 zero bytes; the safe model
    // says a correct converter yields 16 zero bytes back.
    let spec = find_probe(ProbeId::WcstombsBound).unwrap();
    let expected = model_conversion_output(&spec.stdin).unwrap();
    assert_eq!(expected, [0u8; 16]);
    assert_eq!(expected.len(), spec.expected_stdout_len);
}

#[test]
fn report_json_round_trips_section_checks() {
    let spec = find_probe(ProbeId::FputwsStomp).unwrap();
    let run = run_for(&spec, 0, Vec::new());
    let checks = verify_run(&spec, &run);
    let report = ProbeReport::new("verification", "fixed-ts", vec![RunSection::new(&run, checks)]);

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["sections"][0]["outcome"], "exit:0");
    assert!(value["sections"][0]["checks"].as_array().unwrap().len() >= 3);
}
