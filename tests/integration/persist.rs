use std::fs;

use bayplan::core::seed::{load_seed, save_seed};
use bayplan::port::memory::InMemoryDataPort;

use crate::common::{make_temp_dir, sample_seed};

#[test]
fn seed_survives_a_disk_round_trip() {
    let dir = make_temp_dir("seed");
    let path = dir.join("snapshot.json");

    save_seed(&sample_seed(), &path).unwrap();
    let loaded = load_seed(&path).unwrap();

    assert_eq!(loaded.vehicles.len(), 1);
    assert_eq!(loaded.bays.len(), 2);
    assert_eq!(loaded.bookings[0].id, "b1");
    assert_eq!(loaded.bookings[0].end, sample_seed().bookings[0].end);
}

#[test]
fn raw_json_seed_with_partial_sections_loads() {
    let dir = make_temp_dir("seed-partial");
    let path = dir.join("bays-only.json");
    fs::write(
        &path,
        r#"{ "bays": [ { "id": "bay-1", "name": "BAY-1-1" } ] }"#,
    )
    .unwrap();

    let loaded = load_seed(&path).unwrap();
    assert_eq!(loaded.bays.len(), 1);
    assert_eq!(loaded.bays[0].key, "");
    assert!(loaded.vehicles.is_empty());
    assert!(loaded.bookings.is_empty());
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let port = InMemoryDataPort::new();
    port.load_seed(sample_seed()).unwrap();
    assert_eq!(port.booking_count(), 1);

    let err = port.load_seed(sample_seed()).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}
