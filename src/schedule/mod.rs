use std::collections::HashMap;
use std::io::Write;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::core::cache::{CachedPayload, QueryKey, QueryKind};
use crate::core::context::AppContext;
use crate::core::models::OccupancyEntry;
use crate::core::types::{LookupKind, ViewMode};
use crate::diagram::RefreshCadence;
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use crate::port::push::{InvalidationRouter, ReconnectPolicy};
use crate::port::{AgendaFilters, LookupBatch, SchedulingDataPort};
use crate::schedule::grid::{FetchApplied, FetchRequest, ScheduleGrid, WriteApplied, WriteRequest};
use crate::ui::display_manager::DisplayManager;

pub mod form;
pub mod grid;
pub mod mapper;
pub mod overflow;
pub mod range;
pub mod typeahead;
#[cfg(test)]
mod tests;

/// Cache tags refreshed after a committed booking write. Occupancy follows
/// via the push channel, matching the backend's notification fan-out.
const WRITE_INVALIDATION_TAGS: [&str; 2] = ["agenda", "bookings"];

/// Wires the grid to the data port, the caches, and the logger: resolves
/// ticketed fetches, dispatches writes, and routes push-channel frames into
/// cache invalidations.
pub struct ScheduleManager<'a, P: SchedulingDataPort> {
    ctx: &'a mut AppContext,
    port: &'a P,
    grid: ScheduleGrid,
    router: InvalidationRouter,
}

impl<'a, P: SchedulingDataPort> ScheduleManager<'a, P> {
    pub fn new(ctx: &'a mut AppContext, port: &'a P) -> Self {
        Self::with_reference(ctx, port, Local::now().date_naive())
    }

    pub fn with_reference(ctx: &'a mut AppContext, port: &'a P, reference: NaiveDate) -> Self {
        let view = ctx.config.default_view();
        let per_cell = ctx.config.max_events_per_cell();
        Self {
            ctx,
            port,
            grid: ScheduleGrid::new(view, reference, per_cell),
            router: InvalidationRouter::new(),
        }
    }

    pub fn grid(&self) -> &ScheduleGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut ScheduleGrid {
        &mut self.grid
    }

    pub fn context_ref(&self) -> &AppContext {
        self.ctx
    }

    // ---- Lookups ------------------------------------------------------------

    /// Refresh every reference-data cache. Individual failures are logged
    /// and skipped; the affected labels degrade to raw ids until the next
    /// refresh.
    pub fn refresh_lookups(&mut self) {
        for kind in [
            LookupKind::Vehicle,
            LookupKind::Bay,
            LookupKind::Technician,
            LookupKind::Company,
        ] {
            match self.port.list_lookup(kind, None) {
                Ok(batch) => self.absorb_lookup(batch),
                Err(err) => self.ctx.logger.warn(
                    format!("Lookup refresh for '{kind}' failed: {err}"),
                    LogTarget::FileOnly,
                ),
            }
        }
    }

    fn absorb_lookup(&mut self, batch: LookupBatch) {
        match batch {
            LookupBatch::Vehicles(v) => self.ctx.lookups.replace_vehicles(v),
            LookupBatch::Bays(v) => self.ctx.lookups.replace_bays(v),
            LookupBatch::Technicians(v) => self.ctx.lookups.replace_technicians(v),
            LookupBatch::Companies(v) => self.ctx.lookups.replace_companies(v),
        }
    }

    // ---- Range fetches ------------------------------------------------------

    /// Fetch the grid's current range and apply the result. Failures land in
    /// the grid's retryable error phase rather than propagating.
    pub fn refresh(&mut self) {
        let request = self.grid.begin_fetch();
        self.resolve(request);
    }

    pub fn set_view(&mut self, view: ViewMode) {
        let request = self.grid.set_view(view);
        self.resolve(request);
    }

    pub fn navigate(&mut self, reference: NaiveDate) {
        let request = self.grid.navigate(reference);
        self.resolve(request);
    }

    pub fn set_filters(&mut self, filters: AgendaFilters) {
        let request = self.grid.set_filters(filters);
        self.resolve(request);
    }

    fn resolve(&mut self, request: FetchRequest) {
        let key = match QueryKey::with_params(QueryKind::Agenda, &(&request.range, &request.filters))
        {
            Ok(key) => key,
            Err(err) => {
                self.ctx.logger.warn(
                    format!("Agenda cache key unavailable: {err}"),
                    LogTarget::FileOnly,
                );
                QueryKey::new(QueryKind::Agenda, request.range.to_string())
            }
        };

        if let Some(CachedPayload::Agenda(bookings)) = self.ctx.cache.fresh(&key) {
            let bookings = bookings.clone();
            self.grid
                .apply_fetch(request.token, Ok(bookings), &self.ctx.lookups);
            self.ctx.logger.info(
                format!("Agenda {} served from cache", request.range),
                LogTarget::FileOnly,
            );
            return;
        }

        match self.port.fetch_agenda(&request.range, &request.filters) {
            Ok(bookings) => {
                self.ctx
                    .cache
                    .store(key, CachedPayload::Agenda(bookings.clone()));
                let applied =
                    self.grid
                        .apply_fetch(request.token, Ok(bookings), &self.ctx.lookups);
                if applied == FetchApplied::Stale {
                    self.ctx.logger.info(
                        format!("Discarded stale agenda result for {}", request.range),
                        LogTarget::FileOnly,
                    );
                } else {
                    self.ctx.logger.info(
                        format!(
                            "Loaded {} event(s) for {}",
                            self.grid.events().len(),
                            request.range
                        ),
                        LogTarget::FileOnly,
                    );
                }
            }
            Err(err) => {
                let wrapped = Error::range_fetch(err.to_string());
                self.ctx
                    .logger
                    .error(format!("{wrapped}"), LogTarget::ConsoleAndFile);
                self.grid
                    .apply_fetch(request.token, Err(wrapped), &self.ctx.lookups);
            }
        }
    }

    // ---- Writes -------------------------------------------------------------

    /// Submit the open create/edit form. A rejected write leaves the form
    /// open and populated; a committed one invalidates booking-derived
    /// caches and re-fetches the range exactly once.
    pub fn submit_active_form(&mut self) -> Result<WriteApplied> {
        let request = self.grid.submit_form()?;
        Ok(self.dispatch_write(request))
    }

    /// Commit a drag or resize drop: whole-record update with only the
    /// times replaced.
    pub fn commit_reschedule(
        &mut self,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Result<WriteApplied> {
        let request = self.grid.drop_at(start, end)?;
        Ok(self.dispatch_write(request))
    }

    /// Status-transition endpoints; both re-fetch on success.
    pub fn close_booking(&mut self, id: &str) -> WriteApplied {
        let outcome = self
            .port
            .close_booking(id)
            .map_err(|e| Error::write(crate::errors::WriteOp::Close, e.to_string()));
        self.finish_direct_write(outcome)
    }

    pub fn cancel_booking(&mut self, id: &str) -> WriteApplied {
        let outcome = self
            .port
            .cancel_booking(id)
            .map_err(|e| Error::write(crate::errors::WriteOp::Cancel, e.to_string()));
        self.finish_direct_write(outcome)
    }

    fn dispatch_write(&mut self, request: WriteRequest) -> WriteApplied {
        let op = request.op();
        let outcome = match &request {
            WriteRequest::Create(input) => self.port.create_booking(input).map(|_| ()),
            WriteRequest::Update { id, record, .. } => {
                self.port.update_booking(id, record).map(|_| ())
            }
        };
        let outcome = outcome.map_err(|e| Error::write(op, e.to_string()));
        let applied = self.grid.apply_write(outcome);
        self.after_write(&applied);
        applied
    }

    fn finish_direct_write(&mut self, outcome: Result<()>) -> WriteApplied {
        let applied = match outcome {
            Ok(()) => WriteApplied::Committed,
            Err(err) => WriteApplied::Rejected(err.to_string()),
        };
        self.after_write(&applied);
        applied
    }

    fn after_write(&mut self, applied: &WriteApplied) {
        match applied {
            WriteApplied::Committed => {
                for tag in WRITE_INVALIDATION_TAGS {
                    self.ctx.cache.invalidate(tag);
                }
                self.refresh();
            }
            WriteApplied::Rejected(message) => {
                self.ctx
                    .logger
                    .error(message, LogTarget::ConsoleAndFile);
            }
        }
    }

    // ---- Occupancy ----------------------------------------------------------

    /// Current bay occupancy, cached under the `bay-occupancy` tag so push
    /// invalidations force a fresh snapshot on the next cadence tick.
    pub fn occupancy_snapshot(&mut self) -> Result<HashMap<String, OccupancyEntry>> {
        let key = QueryKey::new(QueryKind::Occupancy, "");
        if let Some(CachedPayload::Occupancy(map)) = self.ctx.cache.fresh(&key) {
            return Ok(map.clone());
        }
        match self.port.fetch_occupancy_snapshot() {
            Ok(map) => {
                self.ctx
                    .cache
                    .store(key, CachedPayload::Occupancy(map.clone()));
                Ok(map)
            }
            Err(err) => {
                let wrapped = Error::range_fetch(err.to_string());
                self.ctx
                    .logger
                    .error(format!("{wrapped}"), LogTarget::ConsoleAndFile);
                Err(wrapped)
            }
        }
    }

    /// Cadence for the occupancy poller, taken from config. Independent of
    /// the grid's range-driven fetches.
    pub fn occupancy_cadence(&self) -> RefreshCadence {
        RefreshCadence::new(self.ctx.config.occupancy_refresh_secs())
    }

    // ---- Push channel -------------------------------------------------------

    /// Reconnect policy for the push channel, taken from config.
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::new(self.ctx.config.reconnect_backoff_secs())
    }

    /// Route one raw push frame. Booking notifications invalidate the
    /// cached queries; everything else (including malformed frames) is
    /// dropped silently.
    pub fn handle_push_frame(&mut self, raw: &str) {
        let tags = self.router.route(raw, &mut self.ctx.cache);
        if !tags.is_empty() {
            self.ctx.logger.info(
                format!("Push notification invalidated: {}", tags.join(", ")),
                LogTarget::FileOnly,
            );
        }
    }

    // ---- Rendering ----------------------------------------------------------

    /// Render the grid's current state through the display manager.
    pub fn render_schedule<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let dm = DisplayManager::new();
        dm.render_grid(&self.grid, out)
    }
}
