use std::fs;

use assert_cmd::Command;
use csv::Reader;
use predicates::prelude::*;
use tempfile::tempdir;

const BODIES_IN_DATA: usize = 20;

#[test]
fn orrery_records_one_row_per_body_per_tick() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("frames/run.csv");

    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "3", "--tick-ms", "1", "--output"])
        .arg(&output)
        .assert()
        .success();

    let mut reader = Reader::from_path(&output).expect("csv readable");
    let headers = reader.headers().expect("header").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["tick", "body_id", "name", "x", "y"]
    );
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), 3 * BODIES_IN_DATA);
    assert_eq!(&rows[0][2], "Mercury");
    assert!(rows.iter().any(|r| &r[2] == "Moon"));
    assert_eq!(&rows.last().unwrap()[0], "3");
}

#[test]
fn orrery_prints_frames_without_an_output_file() {
    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "1", "--tick-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Earth").and(predicate::str::contains("Triton")));
}

#[test]
fn orrery_writes_a_json_snapshot() {
    let dir = tempdir().expect("temp dir");
    let snapshot = dir.path().join("scene.json");

    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "2", "--tick-ms", "1", "--output", "-", "--snapshot-json"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tick,body_id,name,x,y"));

    let text = fs::read_to_string(&snapshot).expect("snapshot written");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["tick"], 2);
    assert_eq!(value["bodies"].as_array().unwrap().len(), BODIES_IN_DATA);
}

#[test]
fn orrery_reports_malformed_data() {
    let dir = tempdir().expect("temp dir");
    let data = dir.path().join("broken.yaml");
    fs::write(&data, "planets:\n  - name: Nowhere\n    radius: 10\n").unwrap();

    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "1", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load bodies"));
}

#[test]
fn orrery_reads_settings_from_a_config_file() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("orrery.toml");
    let data = dir.path().join("solo.toml");
    fs::write(
        &data,
        "name = \"Solo\"\ndistance = 1\nradius = 1\nlength_of_year = 1\n",
    )
    .unwrap();
    fs::write(
        &config,
        format!("tick_period_ms = 1\ndata_path = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "2", "--output", "-", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solo").count(2));
}

#[test]
fn orrery_rejects_a_zero_tick_period() {
    Command::cargo_bin("orrery")
        .expect("binary exists")
        .args(["--ticks", "1", "--tick-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tick_period_ms"));
}

#[test]
fn catalog_prints_natural_language_facts() {
    Command::cargo_bin("catalog")
        .expect("binary exists")
        .args(["--body", "earth"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("== Earth ==")
                .and(predicate::str::contains("Length of Year"))
                .and(predicate::str::contains("Satellites"))
                .and(predicate::str::contains("Mars").not()),
        );
}

#[test]
fn catalog_rejects_unknown_bodies() {
    Command::cargo_bin("catalog")
        .expect("binary exists")
        .args(["--body", "Vulcan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no body named Vulcan"));
}
