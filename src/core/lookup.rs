use std::collections::HashMap;

use crate::core::models::{BaseRecord, Bay, Company, Technician, Vehicle};

/// Shared read-side caches of reference data.
///
/// Every component reads these; they are refreshed independently and are
/// eventually consistent, so a render may transiently fall back to a raw id
/// until the matching batch arrives. Components never mutate the maps
/// directly; the schedule manager replaces them wholesale from port batches.
#[derive(Debug, Default)]
pub struct LookupCache {
    vehicles: HashMap<String, Vehicle>,
    bays: HashMap<String, Bay>,
    technicians: HashMap<String, Technician>,
    companies: HashMap<String, Company>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_vehicles(&mut self, batch: Vec<Vehicle>) {
        self.vehicles = index_by_id(batch);
    }

    pub fn replace_bays(&mut self, batch: Vec<Bay>) {
        self.bays = index_by_id(batch);
    }

    pub fn replace_technicians(&mut self, batch: Vec<Technician>) {
        self.technicians = index_by_id(batch);
    }

    pub fn replace_companies(&mut self, batch: Vec<Company>) {
        self.companies = index_by_id(batch);
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.get(id)
    }

    pub fn bay(&self, id: &str) -> Option<&Bay> {
        self.bays.get(id)
    }

    pub fn technician(&self, id: &str) -> Option<&Technician> {
        self.technicians.get(id)
    }

    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.get(id)
    }

    /// Plate-or-VIN for a vehicle; empty string while the lookup is missing.
    pub fn vehicle_plate_or_vin(&self, id: &str) -> String {
        self.vehicles
            .get(id)
            .map(|v| v.plate_or_vin().to_string())
            .unwrap_or_default()
    }

    /// Bay display name; empty string while the lookup is missing.
    pub fn bay_name(&self, id: &str) -> String {
        self.bays
            .get(id)
            .map(|b| b.name.clone())
            .unwrap_or_default()
    }

    /// Technician display name; empty string while the lookup is missing.
    pub fn technician_name(&self, id: &str) -> String {
        self.technicians
            .get(id)
            .map(|t| t.name.clone())
            .unwrap_or_default()
    }

    /// Company display name, falling back to the raw id so detail views stay
    /// usable before the batch lands.
    pub fn company_label(&self, id: &str) -> String {
        self.companies
            .get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn all_bays(&self) -> Vec<&Bay> {
        let mut v: Vec<&Bay> = self.bays.values().collect();
        v.sort_by(|a, b| a.name.cmp(&b.name));
        v
    }
}

fn index_by_id<T: BaseRecord>(batch: Vec<T>) -> HashMap<String, T> {
    batch
        .into_iter()
        .map(|r| (r.id().to_string(), r))
        .collect()
}

/// Merge two record lists by id with deterministic precedence: every primary
/// record wins over a fallback record with the same id, and ordering is
/// primary-first, then fallback records not shadowed by a primary. Used to
/// fold fresh typeahead results over already-known reference data.
pub fn merge_by_id<T: BaseRecord + Clone>(primary: &[T], fallback: &[T]) -> Vec<T> {
    let mut out: Vec<T> = primary.to_vec();
    for record in fallback {
        if !primary.iter().any(|p| p.id() == record.id()) {
            out.push(record.clone());
        }
    }
    out
}
