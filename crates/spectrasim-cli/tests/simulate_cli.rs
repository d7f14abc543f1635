use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SCENARIO_VALUES: &str = r#"
{
  "decay_rates": "1.0,2.0",
  "amplitudes": "0.5,0.5",
  "location_mean": "500,600",
  "width": "10,10",
  "skewness": "0,0",
  "timepoints.max": 10,
  "timepoints.stepsize": 0.1,
  "wavelength.min": 400,
  "wavelength.max": 700,
  "wavelength.stepsize": 1,
  "stdev_noise": 0.01,
  "seed": 42,
  "add_gaussian_irf": true,
  "irf_location": 0,
  "irf_width": 1,
  "use_sequential_scheme": false
}
"#;

#[test]
fn simulate_writes_accepted_parameters() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let output_path = temp.path().join("out/params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let output = run_spectrasim(&[
        "simulate",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--output",
        output_path.to_str().expect("path should be utf-8"),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("decay_rates: [1.0, 2.0]"), "stdout: {}", stdout);

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("output file should exist"),
    )
    .expect("output should be json");
    assert_eq!(parsed["decay_rates"], serde_json::json!([1.0, 2.0]));
    assert_eq!(parsed["wavelength"]["stepsize"], 1.0);
    assert_eq!(parsed["seed"], 42);
    assert_eq!(parsed["add_gaussian_irf"], true);
}

#[test]
fn simulate_reports_missing_decay_rates() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let output_path = temp.path().join("params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let output = run_spectrasim(&[
        "simulate",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--set",
        "decay_rates=",
        "--output",
        output_path.to_str().expect("path should be utf-8"),
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stdout)
            .contains("Please fill in the mandatory field: Decay rates")
    );
    assert!(!output_path.exists(), "rejected input must not write output");
}

#[test]
fn simulate_reports_every_blank_list_field() {
    let output = run_spectrasim(&["simulate", "--set", "amplitudes=a,b"]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please fill in the mandatory field: Decay rates"));
    assert!(stdout.contains(
        "Invalid input in field: Amplitudes. Please enter comma-separated floats."
    ));
    assert!(stdout.contains("Please fill in the mandatory field: Skewness of spectra (cm-1)"));
}

#[test]
fn simulate_rejects_unknown_override_fields() {
    let output = run_spectrasim(&["simulate", "--set", "sead=4"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [INPUT.UNKNOWN_FIELD]"), "stderr: {}", stderr);
    assert!(stderr.contains("FATAL EXIT CODE: 2"));
}

#[test]
fn simulate_missing_values_file_is_an_io_failure() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("absent.json");

    let output = run_spectrasim(&[
        "simulate",
        "--values",
        missing.to_str().expect("path should be utf-8"),
    ]);

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[IO.VALUES_READ]"));
}

#[test]
fn fields_lists_the_form() {
    let output = run_spectrasim(&["fields"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("timepoints.stepsize"));
    assert!(stdout.contains("Use Sequential Scheme"));
    assert!(stdout.contains("[ Simulate ]"));
}

#[test]
fn check_strict_flags_uneven_components() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let params_path = temp.path().join("params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let simulate = run_spectrasim(&[
        "simulate",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--set",
        "width=10",
        "--output",
        params_path.to_str().expect("path should be utf-8"),
    ]);
    assert!(simulate.status.success(), "uneven lengths still build");

    let lenient = run_spectrasim(&["check", params_path.to_str().expect("path should be utf-8")]);
    assert!(lenient.status.success());

    let strict = run_spectrasim(&[
        "check",
        "--strict",
        params_path.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(strict.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("[INPUT.SCHEMA]"), "stderr: {}", stderr);
    assert!(stderr.contains("width"));
}

#[test]
fn quiet_simulate_skips_the_echo_but_still_writes_output() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let output_path = temp.path().join("params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let output = run_spectrasim(&[
        "simulate",
        "--quiet",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--set",
        "seed=7.0",
        "--output",
        output_path.to_str().expect("path should be utf-8"),
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&output.stdout));

    let parsed: Value = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("output file should exist"),
    )
    .expect("output should be json");
    assert_eq!(parsed["seed"], 7);
}

#[test]
fn quiet_simulate_still_reports_rejections() {
    let output = run_spectrasim(&["simulate", "--quiet"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stdout)
            .contains("Please fill in the mandatory field: Decay rates")
    );
}

#[test]
fn simulate_output_with_infinite_values_passes_check() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let params_path = temp.path().join("params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let simulate = run_spectrasim(&[
        "simulate",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--set",
        "decay_rates=inf,1",
        "--output",
        params_path.to_str().expect("path should be utf-8"),
    ]);
    assert!(simulate.status.success());

    let check = run_spectrasim(&["check", params_path.to_str().expect("path should be utf-8")]);
    assert!(
        check.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&check.stderr)
    );
    assert!(String::from_utf8_lossy(&check.stdout).contains("decay_rates: [inf, 1.0]"));
}

#[test]
fn check_rejects_malformed_parameter_documents() {
    let temp = TempDir::new().expect("tempdir should be created");
    let values_path = temp.path().join("values.json");
    let params_path = temp.path().join("params.json");
    write_file(&values_path, SCENARIO_VALUES);

    let simulate = run_spectrasim(&[
        "simulate",
        "--values",
        values_path.to_str().expect("path should be utf-8"),
        "--output",
        params_path.to_str().expect("path should be utf-8"),
    ]);
    assert!(simulate.status.success());
    let saved: Value = serde_json::from_str(
        &fs::read_to_string(&params_path).expect("output file should exist"),
    )
    .expect("output should be json");

    let mut empty_sequence = saved.clone();
    empty_sequence["amplitudes"] = serde_json::json!([]);
    let mut missing_axis_key = saved;
    missing_axis_key["wavelength"] = serde_json::json!({ "min": 400.0, "max": 700.0 });

    for (name, document) in [
        ("empty.json", empty_sequence),
        ("axis.json", missing_axis_key),
    ] {
        let path = temp.path().join(name);
        write_file(&path, &document.to_string());

        let check = run_spectrasim(&["check", path.to_str().expect("path should be utf-8")]);
        assert_eq!(check.status.code(), Some(2), "{} should be rejected", name);
        let stderr = String::from_utf8_lossy(&check.stderr);
        assert!(stderr.contains("[INPUT.PARAMETERS_DOCUMENT]"), "stderr: {}", stderr);
        assert!(stderr.contains("FATAL EXIT CODE: 2"));
    }
}

fn run_spectrasim(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_spectrasim");
    Command::new(binary_path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spectrasim should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}
