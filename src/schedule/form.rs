use chrono::NaiveDateTime;

use crate::core::lookup::LookupCache;
use crate::core::models::{Booking, BookingInput};
use crate::core::types::BookingStatus;
use crate::errors::{Error, Result};

/// Draft state behind the create/edit modal. Holds raw field values until
/// submission; a failed write leaves everything in place (plus `error`) so
/// the user can correct and retry.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub complaint: String,
    pub description: String,
    pub fullbay_service_id: String,
    pub vehicle_id: String,
    pub bay_id: String,
    pub technician_ids: Vec<String>,
    pub company_id: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub status: BookingStatus,
    pub notes: String,
    pub error: Option<String>,
}

/// Field labels resolved from the lookup caches for display next to the raw
/// ids. Missing lookups fall back to the id itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLabels {
    pub vehicle: String,
    pub bay: String,
    pub company: String,
    pub technicians: Vec<String>,
}

impl BookingForm {
    pub fn blank() -> Self {
        Self {
            complaint: String::new(),
            description: String::new(),
            fullbay_service_id: String::new(),
            vehicle_id: String::new(),
            bay_id: String::new(),
            technician_ids: Vec::new(),
            company_id: String::new(),
            start: None,
            end: None,
            status: BookingStatus::Open,
            notes: String::new(),
            error: None,
        }
    }

    /// Fresh draft prefilled with a selected slot's span. No network call
    /// happens until submission.
    pub fn for_slot(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        let mut form = Self::blank();
        form.start = Some(start);
        form.end = end;
        form
    }

    /// Edit draft prefilled from the record behind an event.
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            complaint: booking.complaint.clone().unwrap_or_default(),
            description: booking.description.clone(),
            fullbay_service_id: booking.fullbay_service_id.clone().unwrap_or_default(),
            vehicle_id: booking.vehicle_id.clone(),
            bay_id: booking.bay_id.clone(),
            technician_ids: booking.technician_ids.clone(),
            company_id: booking.company_id.clone(),
            start: Some(booking.start),
            end: booking.end,
            status: booking.status,
            notes: booking.notes.clone(),
            error: None,
        }
    }

    pub fn labels(&self, lookups: &LookupCache) -> FormLabels {
        FormLabels {
            vehicle: lookup_or_id(lookups.vehicle_plate_or_vin(&self.vehicle_id), &self.vehicle_id),
            bay: lookup_or_id(lookups.bay_name(&self.bay_id), &self.bay_id),
            company: lookups.company_label(&self.company_id),
            technicians: self
                .technician_ids
                .iter()
                .map(|id| lookup_or_id(lookups.technician_name(id), id))
                .collect(),
        }
    }

    /// Payload for a create submission. New bookings always start open.
    pub fn to_create_input(&self) -> Result<BookingInput> {
        let mut input = self.to_input()?;
        input.status = Some(BookingStatus::Open);
        Ok(input)
    }

    /// Payload for an edit submission. Status is left unset so the server
    /// keeps the booking's current status.
    pub fn to_update_input(&self) -> Result<BookingInput> {
        let mut input = self.to_input()?;
        input.status = None;
        Ok(input)
    }

    fn to_input(&self) -> Result<BookingInput> {
        let start = self
            .start
            .ok_or_else(|| Error::Parse("Booking needs a start time.".into()))?;
        if self.vehicle_id.is_empty() {
            return Err(Error::Parse("Booking needs a vehicle.".into()));
        }
        if self.bay_id.is_empty() {
            return Err(Error::Parse("Booking needs a bay.".into()));
        }
        if let Some(end) = self.end {
            if end <= start {
                return Err(Error::Parse(
                    "Booking end must be after its start.".into(),
                ));
            }
        }

        Ok(BookingInput {
            complaint: none_if_empty(&self.complaint),
            description: self.description.clone(),
            fullbay_service_id: none_if_empty(&self.fullbay_service_id),
            vehicle_id: self.vehicle_id.clone(),
            bay_id: self.bay_id.clone(),
            technician_ids: self.technician_ids.clone(),
            company_id: self.company_id.clone(),
            start,
            end: self.end,
            status: None,
            notes: self.notes.clone(),
        })
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn lookup_or_id(label: String, id: &str) -> String {
    if label.is_empty() {
        id.to_string()
    } else {
        label
    }
}
