use chrono::NaiveDate;

use bayplan::core::context::AppContext;
use bayplan::core::models::Bay;
use bayplan::diagram::blueprint::LanePlan;
use bayplan::diagram::layout;
use bayplan::port::memory::InMemoryDataPort;
use bayplan::schedule::ScheduleManager;
use bayplan::schedule::grid::WriteApplied;

use crate::common::{dt, make_temp_dir, sample_seed, write_config};

fn build_ctx(tag: &str) -> AppContext {
    let dir = make_temp_dir(tag);
    let config = write_config(&dir, false);
    AppContext::new_with_paths(config, dir.join("logs")).unwrap()
}

fn seeded_port() -> InMemoryDataPort {
    let port = InMemoryDataPort::new();
    port.load_seed(sample_seed()).unwrap();
    port
}

#[test]
fn reschedule_round_trip_through_the_manager() {
    let port = seeded_port();
    let mut ctx = build_ctx("resched");
    let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, reference);

    mgr.refresh_lookups();
    mgr.refresh();

    let event = mgr.grid().event("b1").expect("seeded booking loads");
    assert_eq!(event.title, "J. Doe · ABC123 · BAY-2-3");
    assert_eq!(event.start, dt(2024, 3, 15, 9, 0));
    assert_eq!(event.end, dt(2024, 3, 15, 10, 30));

    mgr.grid_mut().begin_drag("b1").unwrap();
    let applied = mgr
        .commit_reschedule(dt(2024, 3, 15, 13, 0), Some(dt(2024, 3, 15, 14, 30)))
        .unwrap();
    assert_eq!(applied, WriteApplied::Committed);

    // the server-confirmed move is what the grid now shows
    let event = mgr.grid().event("b1").unwrap();
    assert_eq!(event.start, dt(2024, 3, 15, 13, 0));
    assert_eq!(event.end, dt(2024, 3, 15, 14, 30));

    // and the stored record kept every non-time field
    let stored = port.booking("b1").unwrap();
    assert_eq!(stored.technician_ids, vec!["t1".to_string()]);
    assert_eq!(stored.description, "brake check");
}

#[test]
fn occupancy_snapshot_feeds_the_diagram() {
    let port = seeded_port();
    let occupancy = port.snapshot_at(dt(2024, 3, 15, 9, 30));
    assert_eq!(occupancy.len(), 1);

    let bays: Vec<Bay> = sample_seed().bays;
    let lanes = layout(&bays, &occupancy, &LanePlan::standard());

    let slots: Vec<_> = lanes.iter().flat_map(|l| l.slots()).collect();
    let occupied = slots.iter().find(|s| s.key == "BAY-2-3").unwrap();
    assert!(occupied.occupied);
    assert_eq!(
        occupied.occupant.as_ref().map(|o| o.booking_id.as_str()),
        Some("b1")
    );
    let empty = slots.iter().find(|s| s.key == "BAY-1-1").unwrap();
    assert!(!empty.occupied);
    assert!(slots.iter().filter(|s| s.occupied).count() == 1);
}

#[test]
fn render_schedule_writes_the_board() {
    let port = seeded_port();
    let mut ctx = build_ctx("render");
    let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let mut mgr = ScheduleManager::with_reference(&mut ctx, &port, reference);
    mgr.refresh_lookups();
    mgr.refresh();

    let mut buf = Vec::new();
    mgr.render_schedule(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("BOOKINGS (MONTH)"));
    assert!(text.contains("2024-03-15"));
    assert!(text.contains("J. Doe · ABC123 · BAY-2-3"));
}
