//! Save/load round-trip guarantees for planner files.

use geocam_core::Configuration;
use geocam_store::ConfigSet;

fn sample_set() -> ConfigSet {
    let mut set = ConfigSet::default();
    set.push("mast wide", Configuration::default());
    set.push(
        "mast tele",
        Configuration {
            fx: 2560.0,
            fy: 2560.0,
            max_zoom: 12.0,
            height: 18.5,
            tilt_angle: -3.25,
            pan_angle: 47.0,
            roll_range: 0.75,
            range: 3000.0,
            resolution: 0.5,
            description: "long-range surface search".to_string(),
            ..Configuration::default()
        },
    );
    set
}

#[test]
fn save_then_load_reproduces_every_field() {
    let set = sample_set();
    let mut buf = Vec::new();
    set.save(&mut buf).unwrap();
    let reloaded = ConfigSet::load(buf.as_slice()).unwrap();
    assert_eq!(reloaded, set);
}

#[test]
fn round_trip_preserves_label_order() {
    let set = sample_set();
    let mut buf = Vec::new();
    set.save(&mut buf).unwrap();
    let reloaded = ConfigSet::load(buf.as_slice()).unwrap();
    let labels: Vec<&str> = reloaded.records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["mast wide", "mast tele"]);
}

#[test]
fn saving_is_deterministic() {
    let set = sample_set();
    let mut a = Vec::new();
    let mut b = Vec::new();
    set.save(&mut a).unwrap();
    set.save(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cameras.json");

    let set = sample_set();
    set.save_path(&path).unwrap();
    let reloaded = ConfigSet::load_path(&path).unwrap();
    assert_eq!(reloaded, set);
}

#[test]
fn awkward_float_values_survive_the_round_trip() {
    let mut set = ConfigSet::default();
    set.push(
        "awkward",
        Configuration {
            fx: 1234.567_890_123_456_7,
            tilt_angle: -0.000_123,
            height: 1.0e-12,
            ..Configuration::default()
        },
    );
    let mut buf = Vec::new();
    set.save(&mut buf).unwrap();
    let reloaded = ConfigSet::load(buf.as_slice()).unwrap();
    assert_eq!(reloaded.records[0].config.fx, set.records[0].config.fx);
    assert_eq!(
        reloaded.records[0].config.tilt_angle,
        set.records[0].config.tilt_angle
    );
    assert_eq!(
        reloaded.records[0].config.height,
        set.records[0].config.height
    );
}
