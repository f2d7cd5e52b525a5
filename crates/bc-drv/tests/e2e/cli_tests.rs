//! CLI-level end-to-end tests: invokes the `bc` binary as a subprocess and
//! checks its exit code, stdout, and the intermediate file it writes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bc"))
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn help_mentions_input_and_flags() {
    bc_bin().arg("--help").assert().success().stdout(predicate::str::contains("--emit-code"));
}

#[test]
fn version_flag_succeeds() {
    bc_bin().arg("--version").assert().success();
}

#[test]
fn compiles_to_default_bif_path() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "hello.b", "main() { return(0); }\n");

    bc_bin().arg(&input).assert().success();

    assert!(input.with_extension("bif").exists());
}

#[test]
fn dash_o_overrides_default_output_path() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "hello.b", "main() { return(0); }\n");
    let output = dir.path().join("out.bif");

    bc_bin().arg(&input).arg("-o").arg(&output).assert().success();

    assert!(output.exists());
    assert!(!input.with_extension("bif").exists());
}

#[test]
fn emit_code_prints_listing_and_skips_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "f.b", "f() { return(1 + 2); }\n");

    bc_bin()
        .arg(&input)
        .arg("--emit-code")
        .assert()
        .success()
        .stdout(predicate::str::contains("f:"))
        .stdout(predicate::str::contains("PSHCON"));

    assert!(!input.with_extension("bif").exists());
}

#[test]
fn listing_flag_prints_and_still_writes_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "f.b", "f() { return(1); }\n");

    bc_bin().arg(&input).arg("--listing").assert().success().stdout(predicate::str::contains("f:"));

    assert!(input.with_extension("bif").exists());
}

#[test]
fn emit_tokens_dumps_kinds_without_writing_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "f.b", "f() { return(1); }\n");

    bc_bin().arg(&input).arg("--emit-tokens").assert().success().stdout(predicate::str::contains("Name"));

    assert!(!input.with_extension("bif").exists());
}

#[test]
fn undefined_symbol_fails_and_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "bad.b", "f() { return(g()); }\n");

    bc_bin().arg(&input).assert().failure();

    assert!(!input.with_extension("bif").exists());
}

#[test]
fn config_file_supplies_default_output() {
    let dir = TempDir::new().unwrap();
    let input = write_source(&dir, "f.b", "f() { return(0); }\n");
    let configured_output = dir.path().join("from_config.bif");
    let config_path = dir.path().join("bc.toml");
    std::fs::write(&config_path, format!("output = {:?}\n", configured_output.to_str().unwrap())).unwrap();

    bc_bin().arg(&input).arg("-c").arg(&config_path).assert().success();

    assert!(configured_output.exists());
}
