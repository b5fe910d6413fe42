use chrono::{Duration, NaiveDateTime};

use crate::core::lookup::LookupCache;
use crate::core::models::{Booking, CalendarEvent};
use crate::port::AgendaFilters;

/// Separator between the technician / vehicle / bay title segments.
pub const TITLE_SEPARATOR: &str = " · ";

/// Display length assumed for a booking with no end time. Never written back
/// to the record.
const DEFAULT_DURATION_HOURS: i64 = 1;

/// The end instant used for layout: the booking's own end, or one hour after
/// its start when the record is open-ended.
pub fn effective_end(booking: &Booking) -> NaiveDateTime {
    booking
        .end
        .unwrap_or(booking.start + Duration::hours(DEFAULT_DURATION_HOURS))
}

/// Project raw booking records into calendar events.
///
/// Filtering happens before mapping; lookup misses degrade to empty title
/// segments rather than failing, since the lookup caches are eventually
/// consistent. No ordering is imposed here.
pub fn map_to_events(
    bookings: &[Booking],
    lookups: &LookupCache,
    filters: &AgendaFilters,
) -> Vec<CalendarEvent> {
    bookings
        .iter()
        .filter(|b| filters.matches(b))
        .map(|b| CalendarEvent {
            id: b.id.clone(),
            title: compose_title(b, lookups),
            start: b.start,
            end: effective_end(b),
            source: b.clone(),
        })
        .collect()
}

/// Technician names (comma-joined), vehicle plate-or-VIN, bay name; empty
/// segments dropped.
fn compose_title(booking: &Booking, lookups: &LookupCache) -> String {
    let technicians = booking
        .technician_ids
        .iter()
        .map(|id| lookups.technician_name(id))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let vehicle = lookups.vehicle_plate_or_vin(&booking.vehicle_id);
    let bay = lookups.bay_name(&booking.bay_id);

    [technicians, vehicle, bay]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}
