use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use bayplan::core::models::{Bay, Booking, Company, Technician, Vehicle};
use bayplan::core::seed::{SeedFile, save_seed};
use bayplan::core::types::BookingStatus;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_bayplan"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("bayplan-it-{prefix}-{nanos}-{seq}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_config(dir: &PathBuf, file_logging: bool) -> PathBuf {
    let flag = if file_logging { "True" } else { "False" };
    let json = format!(
        r#"
    {{
      "api_base_url": {{ "value": "http://shop.local:8090", "description": "API" }},
      "push_url": {{ "value": "ws://shop.local:8090/ws", "description": "push" }},
      "default_view": {{ "value": "month", "description": "view" }},
      "max_events_per_cell": {{ "value": 2, "description": "cell limit" }},
      "occupancy_refresh_secs": {{ "value": 60, "description": "occupancy" }},
      "reconnect_backoff_secs": {{ "value": 3, "description": "backoff" }},
      "file_logging_enabled": {{ "value": "{flag}", "description": "file logging" }}
    }}
    "#
    );
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    path
}

pub fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn sample_seed() -> SeedFile {
    SeedFile {
        vehicles: vec![Vehicle {
            id: "v1".into(),
            company_id: "c1".into(),
            plate: "ABC123".into(),
            vin: String::new(),
            make: "Freightliner".into(),
            model: "Cascadia".into(),
        }],
        bays: vec![
            Bay {
                id: "bay-1".into(),
                name: "BAY-1-1".into(),
                key: String::new(),
            },
            Bay {
                id: "bay-2".into(),
                name: "BAY-2-3".into(),
                key: String::new(),
            },
        ],
        technicians: vec![Technician {
            id: "t1".into(),
            name: "J. Doe".into(),
        }],
        companies: vec![Company {
            id: "c1".into(),
            name: "Acme Freight".into(),
        }],
        bookings: vec![Booking {
            id: "b1".into(),
            number: None,
            vehicle_id: "v1".into(),
            bay_id: "bay-2".into(),
            company_id: "c1".into(),
            technician_ids: vec!["t1".into()],
            start: dt(2024, 3, 15, 9, 0),
            end: Some(dt(2024, 3, 15, 10, 30)),
            status: BookingStatus::Open,
            complaint: None,
            description: "brake check".into(),
            fullbay_service_id: None,
            notes: String::new(),
        }],
    }
}

pub fn write_seed(dir: &PathBuf) -> PathBuf {
    let path = dir.join("seed.json");
    save_seed(&sample_seed(), &path).unwrap();
    path
}

pub fn run_board(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("binary should run")
}
