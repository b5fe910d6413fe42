use crate::core::types::BookingStatus;
use crate::extensions::string::ShortId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything stored in a string-keyed repository.
pub trait BaseRecord {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_base_record {
    ($ty:ty) => {
        impl BaseRecord for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

/// A scheduled occupation of one bay by one vehicle over a time interval.
///
/// Owned by the backend service; the core treats every instance as an
/// immutable snapshot for the duration of a render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub number: Option<String>,
    pub vehicle_id: String,
    pub bay_id: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub technician_ids: Vec<String>,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    pub status: BookingStatus,
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fullbay_service_id: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Booking {
    /// Human-readable label: the assigned number, or a truncated id.
    pub fn display_number(&self) -> &str {
        match &self.number {
            Some(n) if !n.is_empty() => n,
            _ => self.id.short_id(),
        }
    }

    /// The full-record write shape. The backend replaces the whole record on
    /// update, so reschedules must send every field, not a patch.
    pub fn to_input(&self) -> BookingInput {
        BookingInput {
            complaint: self.complaint.clone(),
            description: self.description.clone(),
            fullbay_service_id: self.fullbay_service_id.clone(),
            vehicle_id: self.vehicle_id.clone(),
            bay_id: self.bay_id.clone(),
            technician_ids: self.technician_ids.clone(),
            company_id: self.company_id.clone(),
            start: self.start,
            end: self.end,
            status: Some(self.status),
            notes: self.notes.clone(),
        }
    }
}

impl_base_record!(Booking);

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking(id={}, number={}, bay={}, start={}, status={})",
            self.id,
            self.display_number(),
            self.bay_id,
            self.start.format("%Y-%m-%d %H:%M"),
            self.status
        )
    }
}

/// Write payload for create and whole-record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInput {
    #[serde(default)]
    pub complaint: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fullbay_service_id: Option<String>,
    pub vehicle_id: String,
    pub bay_id: String,
    #[serde(default)]
    pub technician_ids: Vec<String>,
    #[serde(default)]
    pub company_id: String,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// Left unset on edit submissions so the server keeps the current status.
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub notes: String,
}

/// A physical service location, addressed as `BAY-<lane>-<position>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bay {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub key: String,
}

impl Bay {
    /// Case-insensitive key used to bind the bay to a blueprint position.
    pub fn position_key(&self) -> String {
        self.name.to_uppercase()
    }
}

impl_base_record!(Bay);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
}

impl Vehicle {
    /// Plate when present, otherwise VIN; may be empty for incomplete records.
    pub fn plate_or_vin(&self) -> &str {
        if !self.plate.is_empty() {
            &self.plate
        } else {
            &self.vin
        }
    }

    /// Label for pickers: plate/VIN, or make+model as a last resort.
    pub fn display_label(&self) -> String {
        let primary = self.plate_or_vin();
        if !primary.is_empty() {
            return primary.to_string();
        }
        format!("{} {}", self.make, self.model).trim().to_string()
    }
}

impl_base_record!(Vehicle);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    pub name: String,
}

impl_base_record!(Technician);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl_base_record!(Company);

/// Point-in-time "what is in this bay right now", keyed by bay id in the
/// snapshot map. Present iff a booking's interval contains the snapshot
/// instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub booking_id: String,
    #[serde(default)]
    pub number: Option<String>,
    pub vehicle_id: String,
    #[serde(default)]
    pub company_id: String,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    pub status: BookingStatus,
}

/// Calendar-displayable projection of a booking. Rebuilt on every range
/// fetch and discarded; interaction handlers never mutate one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Full copy of the record behind the event, so reschedules can send
    /// the whole record with only the times replaced.
    pub source: Booking,
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.title,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
