mod manager_tests;
mod overflow_tests;

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::context::AppContext;
use crate::core::lookup::LookupCache;
use crate::core::models::{Bay, Booking, BookingInput, Company, OccupancyEntry, Technician, Vehicle};
use crate::core::seed::SeedFile;
use crate::core::types::{BookingStatus, LookupKind, TimeRange};
use crate::errors::{Error, Result};
use crate::port::memory::InMemoryDataPort;
use crate::port::{AgendaFilters, LookupBatch, SchedulingDataPort};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(super) fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub(super) fn booking(id: &str, bay: &str, start: NaiveDateTime) -> Booking {
    Booking {
        id: id.to_string(),
        number: None,
        vehicle_id: "v1".into(),
        bay_id: bay.to_string(),
        company_id: "c1".into(),
        technician_ids: vec!["t1".into()],
        start,
        end: Some(start + chrono::Duration::minutes(90)),
        status: BookingStatus::Open,
        complaint: None,
        description: "brake check".into(),
        fullbay_service_id: None,
        notes: String::new(),
    }
}

/// Lookups matching the seeded port: one vehicle, two bays, two technicians.
pub(super) fn sample_lookups() -> LookupCache {
    let mut lookups = LookupCache::new();
    lookups.replace_vehicles(vec![Vehicle {
        id: "v1".into(),
        company_id: "c1".into(),
        plate: "ABC123".into(),
        vin: String::new(),
        make: String::new(),
        model: String::new(),
    }]);
    lookups.replace_bays(vec![
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
    ]);
    lookups.replace_technicians(vec![
        Technician {
            id: "t1".into(),
            name: "J. Doe".into(),
        },
        Technician {
            id: "t2".into(),
            name: "M. Ortiz".into(),
        },
    ]);
    lookups.replace_companies(vec![Company {
        id: "c1".into(),
        name: "Acme Freight".into(),
    }]);
    lookups
}

fn temp_config_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("bayplan-schedule-{nanos}.json"))
}

fn write_sample_config(path: &PathBuf) {
    let json = r#"
    {
      "api_base_url": { "value": "http://shop.local:8090", "description": "API" },
      "push_url": { "value": "ws://shop.local:8090/ws", "description": "push" },
      "default_view": { "value": "month", "description": "view" },
      "max_events_per_cell": { "value": 2, "description": "cell limit" },
      "occupancy_refresh_secs": { "value": 60, "description": "occupancy" },
      "reconnect_backoff_secs": { "value": 3, "description": "backoff" },
      "file_logging_enabled": { "value": "False", "description": "file logging" }
    }
    "#;
    fs::write(path, json).unwrap();
}

pub(super) fn make_ctx() -> AppContext {
    let path = temp_config_path();
    write_sample_config(&path);
    let logs_dir = std::env::temp_dir().join("bayplan-schedule-logs");
    AppContext::new_with_paths(path, logs_dir).unwrap()
}

fn seed() -> SeedFile {
    SeedFile {
        vehicles: vec![Vehicle {
            id: "v1".into(),
            company_id: "c1".into(),
            plate: "ABC123".into(),
            vin: String::new(),
            make: String::new(),
            model: String::new(),
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
        technicians: vec![
            Technician {
                id: "t1".into(),
                name: "J. Doe".into(),
            },
            Technician {
                id: "t2".into(),
                name: "M. Ortiz".into(),
            },
        ],
        companies: vec![Company {
            id: "c1".into(),
            name: "Acme Freight".into(),
        }],
        bookings: vec![
            booking("b1", "bay-2", dt(2024, 3, 15, 9, 0)),
            booking("b2", "bay-1", dt(2024, 3, 15, 11, 0)),
            booking("b3", "bay-1", dt(2024, 3, 20, 9, 0)),
        ],
    }
}

/// The reference port wrapped with call counters and an injectable write
/// failure, for asserting fetch/write cardinality at the manager level.
pub(super) struct CountingPort {
    pub inner: InMemoryDataPort,
    pub agenda_calls: Cell<usize>,
    pub occupancy_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub update_calls: Cell<usize>,
    pub fail_writes: Cell<bool>,
}

impl CountingPort {
    pub fn seeded() -> Self {
        let inner = InMemoryDataPort::new();
        inner.load_seed(seed()).unwrap();
        Self {
            inner,
            agenda_calls: Cell::new(0),
            occupancy_calls: Cell::new(0),
            create_calls: Cell::new(0),
            update_calls: Cell::new(0),
            fail_writes: Cell::new(false),
        }
    }

    fn write_gate(&self) -> Result<()> {
        if self.fail_writes.get() {
            Err(Error::parse("injected write failure"))
        } else {
            Ok(())
        }
    }
}

impl SchedulingDataPort for CountingPort {
    fn fetch_agenda(&self, range: &TimeRange, filters: &AgendaFilters) -> Result<Vec<Booking>> {
        self.agenda_calls.set(self.agenda_calls.get() + 1);
        self.inner.fetch_agenda(range, filters)
    }

    fn fetch_occupancy_snapshot(&self) -> Result<HashMap<String, OccupancyEntry>> {
        self.occupancy_calls.set(self.occupancy_calls.get() + 1);
        Ok(self.inner.snapshot_at(dt(2024, 3, 15, 9, 30)))
    }

    fn create_booking(&self, input: &BookingInput) -> Result<Booking> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.write_gate()?;
        self.inner.create_booking(input)
    }

    fn update_booking(&self, id: &str, full_record: &BookingInput) -> Result<Booking> {
        self.update_calls.set(self.update_calls.get() + 1);
        self.write_gate()?;
        self.inner.update_booking(id, full_record)
    }

    fn close_booking(&self, id: &str) -> Result<()> {
        self.write_gate()?;
        self.inner.close_booking(id)
    }

    fn cancel_booking(&self, id: &str) -> Result<()> {
        self.write_gate()?;
        self.inner.cancel_booking(id)
    }

    fn list_lookup(&self, kind: LookupKind, query: Option<&str>) -> Result<LookupBatch> {
        self.inner.list_lookup(kind, query)
    }
}
