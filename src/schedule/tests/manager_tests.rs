use crate::core::types::BookingStatus;
use crate::port::AgendaFilters;
use crate::schedule::ScheduleManager;
use crate::schedule::grid::{GridPhase, Interaction, WriteApplied};

#[test]
fn refresh_loads_the_reference_month_with_resolved_titles() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    mgr.refresh_lookups();
    mgr.refresh();

    assert_eq!(*mgr.grid().phase(), GridPhase::Ready);
    assert_eq!(mgr.grid().events().len(), 3);
    let event = mgr.grid().event("b1").unwrap();
    assert_eq!(event.title, "J. Doe · ABC123 · BAY-2-3");
    assert_eq!(event.start, super::dt(2024, 3, 15, 9, 0));
    assert_eq!(event.end, super::dt(2024, 3, 15, 10, 30));
}

#[test]
fn repeat_refreshes_are_served_from_the_query_cache() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    mgr.refresh();
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 1);

    // a different range is a different cache key
    mgr.navigate(super::date(2024, 4, 10));
    assert_eq!(port.agenda_calls.get(), 2);
}

#[test]
fn filters_change_the_fetch_and_the_result() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    mgr.refresh();
    assert_eq!(mgr.grid().events().len(), 3);

    mgr.set_filters(AgendaFilters {
        bay_id: Some("bay-1".into()),
        ..AgendaFilters::none()
    });
    let ids: Vec<&str> = mgr.grid().events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["b2", "b3"]);
}

#[test]
fn reschedule_sends_one_update_and_refetches_once() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));
    mgr.refresh_lookups();
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 1);

    mgr.grid_mut().begin_drag("b1").unwrap();
    let applied = mgr
        .commit_reschedule(
            super::dt(2024, 3, 15, 13, 0),
            Some(super::dt(2024, 3, 15, 14, 30)),
        )
        .unwrap();

    assert_eq!(applied, WriteApplied::Committed);
    assert_eq!(port.update_calls.get(), 1);
    assert_eq!(port.agenda_calls.get(), 2);

    // the display reflects the server-confirmed move
    let event = mgr.grid().event("b1").unwrap();
    assert_eq!(event.start, super::dt(2024, 3, 15, 13, 0));
    assert_eq!(event.end, super::dt(2024, 3, 15, 14, 30));

    // the whole record went across, not a patch
    let stored = port.inner.booking("b1").unwrap();
    assert_eq!(stored.technician_ids, vec!["t1".to_string()]);
    assert_eq!(stored.description, "brake check");
    assert_eq!(stored.status, BookingStatus::Open);
}

#[test]
fn rejected_reschedule_leaves_the_display_untouched() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));
    mgr.refresh();
    port.fail_writes.set(true);

    mgr.grid_mut().begin_drag("b1").unwrap();
    let applied = mgr
        .commit_reschedule(super::dt(2024, 3, 15, 13, 0), None)
        .unwrap();

    assert!(matches!(applied, WriteApplied::Rejected(_)));
    assert_eq!(port.update_calls.get(), 1);
    // no re-fetch, no local mutation
    assert_eq!(port.agenda_calls.get(), 1);
    let event = mgr.grid().event("b1").unwrap();
    assert_eq!(event.start, super::dt(2024, 3, 15, 9, 0));
    assert_eq!(*mgr.grid().interaction(), Interaction::Idle);

    let stored = port.inner.booking("b1").unwrap();
    assert_eq!(stored.start, super::dt(2024, 3, 15, 9, 0));
}

#[test]
fn committed_form_write_invalidates_and_refetches() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 1);

    mgr.grid_mut().select_slot(
        super::dt(2024, 3, 18, 14, 0),
        Some(super::dt(2024, 3, 18, 15, 0)),
    );
    {
        let form = mgr.grid_mut().form_mut().unwrap();
        form.vehicle_id = "v1".into();
        form.bay_id = "bay-1".into();
        form.company_id = "c1".into();
    }

    let applied = mgr.submit_active_form().unwrap();
    assert_eq!(applied, WriteApplied::Committed);
    assert_eq!(port.create_calls.get(), 1);
    assert_eq!(port.agenda_calls.get(), 2);
    assert_eq!(*mgr.grid().interaction(), Interaction::Idle);
    assert_eq!(mgr.grid().events().len(), 4);
}

#[test]
fn rejected_form_write_keeps_the_form_open() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));
    mgr.refresh_lookups();
    mgr.refresh();
    port.fail_writes.set(true);

    mgr.grid_mut().select_event("b1").unwrap();
    let applied = mgr.submit_active_form().unwrap();

    assert!(matches!(applied, WriteApplied::Rejected(_)));
    let form = mgr.grid().form().expect("form must survive the rejection");
    assert_eq!(form.vehicle_id, "v1");
    assert!(form.error.as_deref().unwrap().contains("injected write failure"));
    assert_eq!(port.agenda_calls.get(), 1);
}

#[test]
fn push_frames_invalidate_booking_caches_once() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    mgr.refresh();
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 1);

    mgr.handle_push_frame(r#"{"type":"booking.updated"}"#);
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 2);

    // non-booking and malformed frames leave the cache warm
    mgr.handle_push_frame(r#"{"type":"user.updated"}"#);
    mgr.handle_push_frame("garbage");
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 2);
}

#[test]
fn occupancy_snapshot_is_cached_until_invalidated() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    let snapshot = mgr.occupancy_snapshot().unwrap();
    assert_eq!(port.occupancy_calls.get(), 1);
    // at 09:30 only b1 occupies its bay
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("bay-2").unwrap().booking_id, "b1");

    mgr.occupancy_snapshot().unwrap();
    assert_eq!(port.occupancy_calls.get(), 1);

    mgr.handle_push_frame(r#"{"type":"booking.closed"}"#);
    mgr.occupancy_snapshot().unwrap();
    assert_eq!(port.occupancy_calls.get(), 2);
}

#[test]
fn cadence_and_reconnect_policy_come_from_config() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));

    let mut cadence = mgr.occupancy_cadence();
    let t0 = super::dt(2024, 3, 15, 9, 0);
    assert!(cadence.due(t0));
    cadence.mark_ran(t0);
    assert!(!cadence.due(t0 + chrono::Duration::seconds(59)));
    assert!(cadence.due(t0 + chrono::Duration::seconds(60)));

    let mut policy = mgr.reconnect_policy();
    let retry_at = policy.on_connection_lost(t0);
    assert_eq!(retry_at, t0 + chrono::Duration::seconds(3));
}

#[test]
fn status_transitions_commit_and_refetch() {
    let port = super::CountingPort::seeded();
    let mut ctx = super::make_ctx();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, super::date(2024, 3, 15));
    mgr.refresh();
    assert_eq!(port.agenda_calls.get(), 1);

    assert_eq!(mgr.close_booking("b2"), WriteApplied::Committed);
    assert_eq!(port.inner.booking("b2").unwrap().status, BookingStatus::Closed);
    assert_eq!(port.agenda_calls.get(), 2);

    assert_eq!(mgr.cancel_booking("b3"), WriteApplied::Committed);
    assert_eq!(port.inner.booking("b3").unwrap().status, BookingStatus::Canceled);

    // a failed transition is surfaced, not retried
    port.fail_writes.set(true);
    assert!(matches!(mgr.close_booking("b1"), WriteApplied::Rejected(_)));
    assert_eq!(port.inner.booking("b1").unwrap().status, BookingStatus::Open);
}
