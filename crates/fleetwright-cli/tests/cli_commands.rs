use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixtures present")
}

fn sample(name: &str) -> PathBuf {
    fixtures_dir().join("lists").join(name)
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("fleetwright-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("FLEETWRIGHT_CATALOG")
        .env_remove("FLEETWRIGHT_ALIASES")
        .arg("--catalog")
        .arg(fixtures_dir().join("catalog.json"))
        .arg("--aliases")
        .arg(fixtures_dir().join("aliases.json"));
    cmd
}

#[test]
fn normalize_timestamped_matches_canonical_sample() {
    let expected = fs::read_to_string(sample("canonical.txt")).expect("read sample");
    cli()
        .args(["normalize", "--format", "timestamped"])
        .arg(sample("timestamped.txt"))
        .assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", expected.trim_end())));
}

#[test]
fn normalize_reads_stdin() {
    cli()
        .args(["normalize", "--format", "counted", "-"])
        .write_stdin("2 x TIE Fighter Squadron (8)\n= 16 Points\n")
        .assert()
        .success()
        .stdout(contains("Squadrons:\n• 2 x TIE Fighter Squadron (16)"));
}

#[test]
fn unknown_format_is_rejected_with_suggestion() {
    cli()
        .args(["normalize", "--format", "hyphen"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("unknown fleet list format: hyphen"))
        .stderr(contains("hyphenated"));
}

#[test]
fn import_reexports_canonical_text() {
    cli()
        .args(["import", "--faction", "empire", "--format", "hyphenated"])
        .arg(sample("hyphenated.txt"))
        .assert()
        .success()
        .stdout(contains(" Name: Hammer of Tarkin"))
        .stdout(contains("• 3 x TIE Fighter Squadron (24)"))
        .stdout(contains("Total Points: 278"))
        .stderr(contains("skipped").not());
}

#[test]
fn import_reports_skipped_lines_on_stderr() {
    cli()
        .args(["import", "--faction", "empire"])
        .write_stdin("Victory II-Class Star Destroyer (85)\n• Gunery Team (7)\n")
        .assert()
        .success()
        .stdout(contains("Victory II-Class Star Destroyer (85)"))
        .stderr(contains("skipped: • Gunery Team (7)"))
        .stderr(contains("Gunnery Team (7)"));
}

#[test]
fn strict_import_fails_on_skipped_lines() {
    cli()
        .args(["import", "--faction", "empire", "--strict"])
        .write_stdin("Victory II-Class Star Destroyer (85)\n• Gunery Team (7)\n")
        .assert()
        .failure()
        .stderr(contains("1 line(s) could not be imported"));
}

#[test]
fn import_json_includes_fleet_and_totals() {
    let output = cli()
        .args(["import", "--faction", "empire", "--output", "json"])
        .arg(sample("canonical.txt"))
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["points"]["total"], 278);
    assert_eq!(json["declared"]["total"], 278);
    assert_eq!(json["clean"], true);
    assert_eq!(json["fleet"]["ships"].as_array().map(Vec::len), Some(3));
}

#[test]
fn faction_mismatch_aborts_import() {
    cli()
        .args(["import", "--faction", "rebels"])
        .arg(sample("canonical.txt"))
        .assert()
        .failure()
        .stderr(contains("fleet list is for Empire, but the fleet being edited is Rebellion"));
}

#[test]
fn check_passes_clean_list() {
    cli()
        .args(["check", "--faction", "empire"])
        .arg(sample("canonical.txt"))
        .assert()
        .success()
        .stdout(contains("Hammer of Tarkin (Empire)"))
        .stdout(contains("Total: 278"));
}

#[test]
fn check_fails_on_total_mismatch() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("list.txt");
    fs::write(&path, "Victory II-Class Star Destroyer (85)\n\nTotal Points: 120\n").expect("write list");

    cli()
        .args(["check", "--faction", "empire"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(contains("Total: 85 (list says 120)"))
        .stderr(contains("declared total 120 but cards add up to 85"));
}

#[test]
fn catalog_lists_current_printings() {
    cli()
        .args(["catalog", "--kind", "upgrades", "--faction", "empire"])
        .assert()
        .success()
        .stdout(contains("Grand Moff Tarkin (38)"))
        .stdout(contains("gunnery-team-errata"))
        .stdout(contains("Leia Organa").not());
}

#[test]
fn missing_catalog_is_reported() {
    let dir = tempdir().expect("temp dir");
    cargo_bin_cmd!("fleetwright-cli")
        .env("RUST_LOG", "error")
        .args(["--catalog"])
        .arg(dir.path().join("missing.json"))
        .args(["catalog"])
        .assert()
        .failure()
        .stderr(contains("failed to load content"));
}
