use chrono::{NaiveDate, NaiveDateTime};

use crate::core::lookup::LookupCache;
use crate::core::models::{Booking, BookingInput, CalendarEvent};
use crate::core::types::{TimeRange, ViewMode};
use crate::errors::{Error, Result, WriteOp};
use crate::port::AgendaFilters;
use crate::schedule::form::BookingForm;
use crate::schedule::mapper::map_to_events;
use crate::schedule::overflow::{AnchorRect, OverflowItem, OverflowMenu, Viewport};
use crate::schedule::range::{compute_range, days_in};

/// Loading/result state of the grid's current range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridPhase {
    Idle,
    Loading,
    Ready,
    /// A failed range fetch; retryable, the previous events stay on screen.
    Error(String),
}

/// Orthogonal interaction state. Each variant terminates back to idle on
/// commit or cancel.
#[derive(Debug, PartialEq)]
pub enum Interaction {
    Idle,
    SelectingSlot { form: BookingForm },
    EditingEvent { booking_id: String, form: BookingForm },
    Dragging { booking: Booking },
    Resizing { booking: Booking },
}

/// A ticketed range fetch. The token is compared at resolution time; only
/// the most recently issued fetch may update the grid (last-range-wins).
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub token: u64,
    pub range: TimeRange,
    pub filters: AgendaFilters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    /// The result was current and is now displayed.
    Applied,
    /// A superseded fetch resolved late; dropped without touching state.
    Stale,
    /// The fetch failed; the grid is in a retryable error state.
    Failed,
}

/// A write the grid wants issued against the data port.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRequest {
    Create(BookingInput),
    Update {
        id: String,
        record: BookingInput,
        op: WriteOp,
    },
}

impl WriteRequest {
    pub fn op(&self) -> WriteOp {
        match self {
            WriteRequest::Create(_) => WriteOp::Create,
            WriteRequest::Update { op, .. } => *op,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteApplied {
    /// Server acknowledged; interaction closed, caches must be invalidated
    /// and the range re-fetched.
    Committed,
    /// Server rejected; any open form stays populated with the message, and
    /// no displayed event moved.
    Rejected(String),
}

/// Events a single day cell can show before truncating to "+X more".
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub visible: Vec<CalendarEvent>,
    pub hidden: Vec<CalendarEvent>,
}

impl DayCell {
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

/// The interactive calendar: owns the current view and reference date,
/// requests bookings for the computed range, and runs the slot-select /
/// edit / drag / resize interactions. Rendering is left to the ui layer.
#[derive(Debug)]
pub struct ScheduleGrid {
    view: ViewMode,
    reference: NaiveDate,
    filters: AgendaFilters,
    phase: GridPhase,
    events: Vec<CalendarEvent>,
    interaction: Interaction,
    overflow: OverflowMenu,
    max_events_per_cell: usize,
    /// Token of the most recently issued fetch.
    current_token: u64,
}

impl ScheduleGrid {
    pub fn new(view: ViewMode, reference: NaiveDate, max_events_per_cell: usize) -> Self {
        Self {
            view,
            reference,
            filters: AgendaFilters::none(),
            phase: GridPhase::Idle,
            events: Vec::new(),
            interaction: Interaction::Idle,
            overflow: OverflowMenu::new(),
            max_events_per_cell: max_events_per_cell.max(1),
            current_token: 0,
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn phase(&self) -> &GridPhase {
        &self.phase
    }

    pub fn filters(&self) -> &AgendaFilters {
        &self.filters
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn overflow(&self) -> &OverflowMenu {
        &self.overflow
    }

    pub fn range(&self) -> TimeRange {
        compute_range(self.reference, self.view)
    }

    pub fn event(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    // ---- View / navigation --------------------------------------------------

    /// Switching views recomputes the range and starts a new fetch.
    pub fn set_view(&mut self, view: ViewMode) -> FetchRequest {
        self.view = view;
        self.begin_fetch()
    }

    /// Navigating recomputes the range for the new reference date.
    pub fn navigate(&mut self, reference: NaiveDate) -> FetchRequest {
        self.reference = reference;
        self.begin_fetch()
    }

    /// Changing filters re-fetches; the server applies them too.
    pub fn set_filters(&mut self, filters: AgendaFilters) -> FetchRequest {
        self.filters = filters;
        self.begin_fetch()
    }

    pub fn clear_filters(&mut self) -> FetchRequest {
        self.set_filters(AgendaFilters::none())
    }

    /// Retry after a failed fetch; just issues a fresh ticket.
    pub fn retry(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    /// Issue a new ticketed fetch for the current range. Any fetch still in
    /// flight is superseded by the new token.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.current_token += 1;
        self.phase = GridPhase::Loading;
        FetchRequest {
            token: self.current_token,
            range: self.range(),
            filters: self.filters.clone(),
        }
    }

    /// Resolve a fetch. Results for any token but the latest are discarded
    /// untouched, regardless of success or failure.
    pub fn apply_fetch(
        &mut self,
        token: u64,
        outcome: Result<Vec<Booking>>,
        lookups: &LookupCache,
    ) -> FetchApplied {
        if token != self.current_token {
            return FetchApplied::Stale;
        }
        match outcome {
            Ok(bookings) => {
                self.events = map_to_events(&bookings, lookups, &self.filters);
                self.phase = GridPhase::Ready;
                FetchApplied::Applied
            }
            Err(err) => {
                self.phase = GridPhase::Error(err.to_string());
                FetchApplied::Failed
            }
        }
    }

    // ---- Create / edit ------------------------------------------------------

    /// Selecting an empty span opens a create draft prefilled with it. No
    /// network call happens; cancel discards the draft without side effects.
    pub fn select_slot(&mut self, start: NaiveDateTime, end: Option<NaiveDateTime>) {
        self.overflow.close();
        self.interaction = Interaction::SelectingSlot {
            form: BookingForm::for_slot(start, end),
        };
    }

    /// Open a blank create draft (the "create booking" button).
    pub fn open_create(&mut self) {
        self.overflow.close();
        self.interaction = Interaction::SelectingSlot {
            form: BookingForm::blank(),
        };
    }

    /// Selecting an event opens an edit draft prefilled from the record
    /// behind it.
    pub fn select_event(&mut self, id: &str) -> Result<()> {
        let event = self
            .event(id)
            .ok_or_else(|| Error::UnknownBooking(id.to_string()))?;
        self.interaction = Interaction::EditingEvent {
            booking_id: event.id.clone(),
            form: BookingForm::from_booking(&event.source),
        };
        Ok(())
    }

    /// Cancel whatever interaction is open. Drafts are discarded; nothing is
    /// sent to the server.
    pub fn cancel_interaction(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Mutable access to the open form for field edits.
    pub fn form_mut(&mut self) -> Option<&mut BookingForm> {
        match &mut self.interaction {
            Interaction::SelectingSlot { form } | Interaction::EditingEvent { form, .. } => {
                Some(form)
            }
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&BookingForm> {
        match &self.interaction {
            Interaction::SelectingSlot { form } | Interaction::EditingEvent { form, .. } => {
                Some(form)
            }
            _ => None,
        }
    }

    /// Build the write for the open form. The interaction stays open until
    /// the write is resolved via `apply_write`.
    pub fn submit_form(&mut self) -> Result<WriteRequest> {
        match &mut self.interaction {
            Interaction::SelectingSlot { form } => {
                let input = match form.to_create_input() {
                    Ok(input) => input,
                    Err(err) => {
                        form.error = Some(err.to_string());
                        return Err(err);
                    }
                };
                form.error = None;
                Ok(WriteRequest::Create(input))
            }
            Interaction::EditingEvent { booking_id, form } => {
                let input = match form.to_update_input() {
                    Ok(input) => input,
                    Err(err) => {
                        form.error = Some(err.to_string());
                        return Err(err);
                    }
                };
                form.error = None;
                Ok(WriteRequest::Update {
                    id: booking_id.clone(),
                    record: input,
                    op: WriteOp::Update,
                })
            }
            _ => Err(Error::interaction("No form is open to submit.")),
        }
    }

    // ---- Drag / resize ------------------------------------------------------

    /// Start dragging an event. The grid keeps a full copy of the record so
    /// the drop can send a whole-record update.
    pub fn begin_drag(&mut self, id: &str) -> Result<()> {
        let event = self
            .event(id)
            .ok_or_else(|| Error::UnknownBooking(id.to_string()))?;
        self.interaction = Interaction::Dragging {
            booking: event.source.clone(),
        };
        Ok(())
    }

    pub fn begin_resize(&mut self, id: &str) -> Result<()> {
        let event = self
            .event(id)
            .ok_or_else(|| Error::UnknownBooking(id.to_string()))?;
        self.interaction = Interaction::Resizing {
            booking: event.source.clone(),
        };
        Ok(())
    }

    /// Drop the dragged event at a new span: a whole-record update with only
    /// start/end replaced. No local positions move until the server confirms
    /// and the range is re-fetched.
    pub fn drop_at(
        &mut self,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Result<WriteRequest> {
        let booking = match &self.interaction {
            Interaction::Dragging { booking } | Interaction::Resizing { booking } => booking,
            _ => return Err(Error::interaction("No drag or resize in progress.")),
        };
        let mut record = booking.to_input();
        record.start = start;
        record.end = end;
        Ok(WriteRequest::Update {
            id: booking.id.clone(),
            record,
            op: WriteOp::Reschedule,
        })
    }

    // ---- Write resolution ---------------------------------------------------

    /// Resolve an issued write. Success closes the interaction; failure
    /// keeps forms open and populated, and drag/resize failures revert to
    /// idle with the displayed times untouched.
    pub fn apply_write(&mut self, outcome: Result<()>) -> WriteApplied {
        match outcome {
            Ok(()) => {
                self.interaction = Interaction::Idle;
                WriteApplied::Committed
            }
            Err(err) => {
                let message = err.to_string();
                match &mut self.interaction {
                    Interaction::SelectingSlot { form }
                    | Interaction::EditingEvent { form, .. } => {
                        form.error = Some(message.clone());
                    }
                    Interaction::Dragging { .. } | Interaction::Resizing { .. } => {
                        self.interaction = Interaction::Idle;
                    }
                    Interaction::Idle => {}
                }
                WriteApplied::Rejected(message)
            }
        }
    }

    // ---- Day cells / overflow -----------------------------------------------

    /// Bucket the loaded events into per-day cells for the current range,
    /// each truncated to the configured maximum. Ordering inside a cell is
    /// by start time, then id, so truncation is deterministic.
    pub fn day_cells(&self) -> Vec<DayCell> {
        let range = self.range();
        days_in(&range)
            .into_iter()
            .map(|date| {
                let mut in_day: Vec<CalendarEvent> = self
                    .events
                    .iter()
                    .filter(|e| e.start.date() <= date && date <= e.end.date())
                    .cloned()
                    .collect();
                in_day.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

                let hidden = if in_day.len() > self.max_events_per_cell {
                    in_day.split_off(self.max_events_per_cell)
                } else {
                    Vec::new()
                };
                DayCell {
                    date,
                    visible: in_day,
                    hidden,
                }
            })
            .collect()
    }

    /// "+X more" was clicked: hand the hidden events plus the cell's anchor
    /// to the overflow menu instead of drilling into the day view.
    pub fn show_more(&mut self, date: NaiveDate, anchor: AnchorRect, viewport: Viewport) {
        let hidden = self
            .day_cells()
            .into_iter()
            .find(|cell| cell.date == date)
            .map(|cell| cell.hidden)
            .unwrap_or_default();
        let items = hidden
            .iter()
            .map(|event| OverflowItem {
                booking_id: event.id.clone(),
                title: event.title.clone(),
                start: event.start,
                end: event.end,
                number_label: event.source.display_number().to_string(),
            })
            .collect();
        self.overflow.open(anchor, items, viewport);
    }

    pub fn close_overflow(&mut self) {
        self.overflow.close();
    }

    pub fn overflow_outside_click(&mut self) {
        self.overflow.outside_click();
    }

    /// Picking a menu entry closes the menu and opens the edit flow for the
    /// chosen booking.
    pub fn select_overflow(&mut self, index: usize) -> Result<()> {
        let Some(item) = self.overflow.select(index) else {
            return Err(Error::interaction("No overflow entry at that index."));
        };
        self.select_event(&item.booking_id)
    }
}
