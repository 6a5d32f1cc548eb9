use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn hkconf() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hkconf"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn configure_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("configure prints JSON")
}

fn strings(value: &Value) -> Vec<&str> {
    value.as_array().map(|a| a.iter().filter_map(Value::as_str).collect()).unwrap_or_default()
}

#[test]
fn no_arguments_prints_help() {
    hkconf().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn detect_reports_the_haiku_platform() {
    hkconf()
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Haiku"))
        .stdout(predicate::str::contains("Can build"));
}

#[test]
fn options_lists_platform_toggles() {
    hkconf()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("use_lto"))
        .stdout(predicate::str::contains("yes|no|full"))
        .stdout(predicate::str::contains("builtin_").not());
}

#[test]
fn bundled_options_as_json() {
    let output = hkconf().args(["options", "--bundled", "--json"]).assert().success();
    let options: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    let options = options.as_array().unwrap();
    assert_eq!(options.len(), 17);
    assert_eq!(options[0]["name"], "builtin_libwebp");
    assert_eq!(options[0]["kind"], "bool");
    assert_eq!(options[0]["default"], true);
}

#[test]
fn configure_with_defaults_prints_environment() {
    let dir = tempdir().unwrap();
    let report = configure_json(hkconf().current_dir(dir.path()).args(["configure", "--target", "release"]));

    assert_eq!(report["platform"], "Haiku");
    assert_eq!(report["settings"]["target"], "release");
    assert_eq!(report["env"]["cc"], "gcc-x86");
    assert_eq!(report["env"]["cxx"], "g++-x86");

    let flags = strings(&report["env"]["cc_flags"]);
    assert_eq!(&flags[..2], ["-g1", "-O3"]);
    let defines = strings(&report["env"]["cpp_defines"]);
    assert_eq!(defines.iter().filter(|d| **d == "HAIKU_ENABLED").count(), 1);
    assert!(!defines.contains(&"DEBUG_ENABLED"));
}

#[test]
fn configure_reads_settings_file_and_jobs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("build.toml");
    fs::write(&path, "use_lto = true\nuse_asan = true\n\n[builtin]\nlibpng = false\n").unwrap();

    let report = configure_json(hkconf().current_dir(dir.path()).args([
        "configure",
        "--settings",
        path.to_str().unwrap(),
        "--jobs",
        "3",
    ]));

    assert_eq!(report["env"]["jobs"], 3);
    assert_eq!(report["env"]["extra_suffix"], "s");
    assert!(strings(&report["env"]["link_flags"]).contains(&"-flto=3"));
    assert!(strings(&report["env"]["link_flags"]).contains(&"-fsanitize=address"));
    assert_eq!(report["settings"]["builtin"]["libpng"], true, "coupled with bundled freetype");
}

#[test]
fn environment_overrides_settings() {
    let dir = tempdir().unwrap();
    let report = configure_json(
        hkconf()
            .current_dir(dir.path())
            .env("HKC__TARGET", "release")
            .env("HKC__USE_LTO", "true")
            .env("HKC__BUILTIN__ZLIB", "false")
            .args(["configure", "--jobs", "1"]),
    );

    assert_eq!(report["settings"]["target"], "release");
    assert_eq!(report["settings"]["use_lto"], true);
    assert_eq!(report["settings"]["builtin"]["zlib"], true, "coupled with bundled freetype");
    assert_eq!(strings(&report["env"]["cc_flags"])[..4], ["-g1", "-O3", "-flto", "-pipe"]);
    assert!(strings(&report["env"]["link_flags"]).contains(&"-flto"));
}

#[test]
fn environment_overrides_settings_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hkconf.toml"), "target = \"release_debug\"\nbits = 32\n").unwrap();

    let report = configure_json(
        hkconf().current_dir(dir.path()).env("HKC__TARGET", "release").args(["configure"]),
    );

    assert_eq!(report["settings"]["target"], "release");
    assert_eq!(report["settings"]["bits"], "32");
}

#[test]
fn missing_settings_file_fails() {
    let dir = tempdir().unwrap();
    hkconf()
        .current_dir(dir.path())
        .args(["configure", "--settings", "absent.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Loading settings"));
}

#[test]
fn invalid_target_is_rejected_by_the_parser() {
    hkconf()
        .args(["configure", "--target", "fastest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fastest"));
}
