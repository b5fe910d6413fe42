pub mod memory;
pub mod push;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::models::{Bay, Booking, BookingInput, Company, OccupancyEntry, Technician, Vehicle};
use crate::core::types::{LookupKind, TimeRange};
use crate::errors::Result;

/// Server-side agenda filters. An unset field means "no constraint";
/// technician filtering is membership in the booking's technician set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaFilters {
    #[serde(default)]
    pub bay_id: Option<String>,
    #[serde(default)]
    pub technician_id: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl AgendaFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bay_id.is_none() && self.technician_id.is_none() && self.company_id.is_none()
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(bay) = &self.bay_id {
            if &booking.bay_id != bay {
                return false;
            }
        }
        if let Some(company) = &self.company_id {
            if &booking.company_id != company {
                return false;
            }
        }
        if let Some(tech) = &self.technician_id {
            if !booking.technician_ids.iter().any(|t| t == tech) {
                return false;
            }
        }
        true
    }
}

/// One reference-data batch, typed by the kind that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupBatch {
    Vehicles(Vec<Vehicle>),
    Bays(Vec<Bay>),
    Technicians(Vec<Technician>),
    Companies(Vec<Company>),
}

impl LookupBatch {
    pub fn kind(&self) -> LookupKind {
        match self {
            LookupBatch::Vehicles(_) => LookupKind::Vehicle,
            LookupBatch::Bays(_) => LookupKind::Bay,
            LookupBatch::Technicians(_) => LookupKind::Technician,
            LookupBatch::Companies(_) => LookupKind::Company,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LookupBatch::Vehicles(v) => v.len(),
            LookupBatch::Bays(v) => v.len(),
            LookupBatch::Technicians(v) => v.len(),
            LookupBatch::Companies(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read/write boundary to the scheduling backend. Transport-agnostic; the
/// production implementation speaks HTTP+JSON, the in-memory one backs the
/// binary and the test suite. Timeouts belong to the transport, not here.
pub trait SchedulingDataPort {
    /// Every booking whose interval intersects `range`, already filtered
    /// server-side.
    fn fetch_agenda(&self, range: &TimeRange, filters: &AgendaFilters) -> Result<Vec<Booking>>;

    /// Point-in-time map of bay id to the booking currently occupying it.
    fn fetch_occupancy_snapshot(&self) -> Result<HashMap<String, OccupancyEntry>>;

    fn create_booking(&self, input: &BookingInput) -> Result<Booking>;

    /// Whole-record replace. The server does not merge partial payloads;
    /// callers must send every field.
    fn update_booking(&self, id: &str, full_record: &BookingInput) -> Result<Booking>;

    fn close_booking(&self, id: &str) -> Result<()>;

    fn cancel_booking(&self, id: &str) -> Result<()>;

    /// Typeahead/reference data for one kind, optionally narrowed by a
    /// case-insensitive substring query.
    fn list_lookup(&self, kind: LookupKind, query: Option<&str>) -> Result<LookupBatch>;
}
