use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDateTime};

use crate::core::models::{
    Bay, Booking, BookingInput, Company, OccupancyEntry, Technician, Vehicle,
};
use crate::core::repository::{Repository, Sort};
use crate::core::seed::SeedFile;
use crate::core::types::{BookingStatus, LookupKind, TimeRange};
use crate::errors::{Error, Result};
use crate::port::{AgendaFilters, LookupBatch, SchedulingDataPort};

/// Interval length assumed for occupancy when a booking has no end.
const OPEN_ENDED_HOURS: i64 = 1;

/// Repository-backed reference implementation of the data port. Used by the
/// binary (seeded from a JSON file) and by the integration tests; it mirrors
/// the backend's agenda/occupancy semantics so the core can be exercised
/// without a network.
#[derive(Debug)]
pub struct InMemoryDataPort {
    state: RefCell<PortState>,
}

#[derive(Debug)]
struct PortState {
    bookings: Repository<Booking>,
    vehicles: Repository<Vehicle>,
    bays: Repository<Bay>,
    technicians: Repository<Technician>,
    companies: Repository<Company>,
}

impl InMemoryDataPort {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PortState {
                bookings: Repository::new("bk"),
                vehicles: Repository::new("vh"),
                bays: Repository::new("bay"),
                technicians: Repository::new("tech"),
                companies: Repository::new("co"),
            }),
        }
    }

    /// Load a seed snapshot, keeping the ids from the file.
    pub fn load_seed(&self, seed: SeedFile) -> Result<()> {
        let mut state = self.state.borrow_mut();
        for v in seed.vehicles {
            state.vehicles.insert_with_id(v)?;
        }
        for b in seed.bays {
            state.bays.insert_with_id(b)?;
        }
        for t in seed.technicians {
            state.technicians.insert_with_id(t)?;
        }
        for c in seed.companies {
            state.companies.insert_with_id(c)?;
        }
        for b in seed.bookings {
            state.bookings.insert_with_id(b)?;
        }
        Ok(())
    }

    pub fn booking(&self, id: &str) -> Result<Booking> {
        self.state.borrow().bookings.get(id).cloned()
    }

    pub fn booking_count(&self) -> usize {
        self.state.borrow().bookings.len()
    }

    /// Occupancy derived at an explicit instant; the trait method snapshots
    /// at the wall clock.
    pub fn snapshot_at(&self, at: NaiveDateTime) -> HashMap<String, OccupancyEntry> {
        let state = self.state.borrow();
        let mut occupancy = HashMap::new();
        for booking in state.bookings.values(Sort::Unordered) {
            if !booking.status.is_active() {
                continue;
            }
            let end = booking
                .end
                .unwrap_or(booking.start + Duration::hours(OPEN_ENDED_HOURS));
            if booking.start <= at && at < end {
                occupancy.insert(
                    booking.bay_id.clone(),
                    OccupancyEntry {
                        booking_id: booking.id.clone(),
                        number: booking.number.clone(),
                        vehicle_id: booking.vehicle_id.clone(),
                        company_id: booking.company_id.clone(),
                        start: booking.start,
                        end: booking.end,
                        status: booking.status,
                    },
                );
            }
        }
        occupancy
    }

    fn apply_input(booking: &mut Booking, input: &BookingInput) {
        booking.complaint = input.complaint.clone();
        booking.description = input.description.clone();
        booking.fullbay_service_id = input.fullbay_service_id.clone();
        booking.vehicle_id = input.vehicle_id.clone();
        booking.bay_id = input.bay_id.clone();
        booking.technician_ids = input.technician_ids.clone();
        booking.company_id = input.company_id.clone();
        booking.start = input.start;
        booking.end = input.end;
        if let Some(status) = input.status {
            booking.status = status;
        }
        booking.notes = input.notes.clone();
    }

    fn matches_query(haystack: &str, query: Option<&str>) -> bool {
        match query {
            None => true,
            Some(q) => haystack.to_lowercase().contains(&q.to_lowercase()),
        }
    }
}

impl Default for InMemoryDataPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulingDataPort for InMemoryDataPort {
    fn fetch_agenda(&self, range: &TimeRange, filters: &AgendaFilters) -> Result<Vec<Booking>> {
        let state = self.state.borrow();
        let hits = state
            .bookings
            .query()
            .r#where(|b| {
                let end = b.end.unwrap_or(b.start + Duration::hours(OPEN_ENDED_HOURS));
                range.intersects(b.start, end)
            })
            .r#where(|b| filters.matches(b))
            .order_with(|a, b| a.start.cmp(&b.start))
            .collect();
        Ok(hits.into_iter().cloned().collect())
    }

    fn fetch_occupancy_snapshot(&self) -> Result<HashMap<String, OccupancyEntry>> {
        Ok(self.snapshot_at(Local::now().naive_local()))
    }

    fn create_booking(&self, input: &BookingInput) -> Result<Booking> {
        let mut state = self.state.borrow_mut();
        if input.vehicle_id.is_empty() || input.bay_id.is_empty() {
            return Err(Error::Parse(
                "Booking requires a vehicle and a bay.".into(),
            ));
        }
        let mut booking = Booking {
            id: String::new(),
            number: None,
            vehicle_id: String::new(),
            bay_id: String::new(),
            company_id: String::new(),
            technician_ids: Vec::new(),
            start: input.start,
            end: input.end,
            status: input.status.unwrap_or(BookingStatus::Open),
            complaint: None,
            description: String::new(),
            fullbay_service_id: None,
            notes: String::new(),
        };
        Self::apply_input(&mut booking, input);
        Ok(state.bookings.insert(booking).clone())
    }

    fn update_booking(&self, id: &str, full_record: &BookingInput) -> Result<Booking> {
        let mut state = self.state.borrow_mut();
        let booking = state.bookings.get_mut(id)?;
        Self::apply_input(booking, full_record);
        Ok(booking.clone())
    }

    fn close_booking(&self, id: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.bookings.get_mut(id)?.status = BookingStatus::Closed;
        Ok(())
    }

    fn cancel_booking(&self, id: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.bookings.get_mut(id)?.status = BookingStatus::Canceled;
        Ok(())
    }

    fn list_lookup(&self, kind: LookupKind, query: Option<&str>) -> Result<LookupBatch> {
        let state = self.state.borrow();
        let batch = match kind {
            LookupKind::Vehicle => LookupBatch::Vehicles(
                state
                    .vehicles
                    .query()
                    .r#where(|v| {
                        Self::matches_query(&format!("{} {} {}", v.plate, v.vin, v.model), query)
                    })
                    .order(Sort::IdAsc)
                    .collect()
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            LookupKind::Bay => LookupBatch::Bays(
                state
                    .bays
                    .query()
                    .r#where(|b| Self::matches_query(&b.name, query))
                    .order(Sort::IdAsc)
                    .collect()
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            LookupKind::Technician => LookupBatch::Technicians(
                state
                    .technicians
                    .query()
                    .r#where(|t| Self::matches_query(&t.name, query))
                    .order(Sort::IdAsc)
                    .collect()
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
            LookupKind::Company => LookupBatch::Companies(
                state
                    .companies
                    .query()
                    .r#where(|c| Self::matches_query(&c.name, query))
                    .order(Sort::IdAsc)
                    .collect()
                    .into_iter()
                    .cloned()
                    .collect(),
            ),
        };
        Ok(batch)
    }
}
