pub mod blueprint;

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::core::models::{Bay, OccupancyEntry};
use crate::diagram::blueprint::{
    LANE_WIDTH_PX, LanePlan, SLOT_HEIGHT_PX, TOP_PADDING_PX, build_rows, position_key,
};

/// Horizontal placement of a slot inside its row. Two-slot rows always use
/// left/right at fixed offsets; a single-slot row centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotColumn {
    Center,
    Left,
    Right,
}

impl SlotColumn {
    /// Horizontal center of the slot as a percentage of the lane width.
    pub fn x_percent(self) -> u8 {
        match self {
            SlotColumn::Center => 50,
            SlotColumn::Left => 25,
            SlotColumn::Right => 75,
        }
    }
}

/// One renderable bay position: either bound to a real bay record or a
/// placeholder for a position the database does not know yet. Placeholders
/// render as empty no matter what the occupancy map says.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlot {
    pub key: String,
    pub bay_id: Option<String>,
    pub occupied: bool,
    pub occupant: Option<OccupancyEntry>,
    pub row: usize,
    pub column: SlotColumn,
}

impl RenderedSlot {
    pub fn is_placeholder(&self) -> bool {
        self.bay_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub slots: Vec<RenderedSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLane {
    pub lane: u8,
    pub offset_slots: u8,
    pub rows: Vec<RenderedRow>,
}

impl RenderedLane {
    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(|r| r.slots.len()).sum()
    }

    pub fn slots(&self) -> impl Iterator<Item = &RenderedSlot> {
        self.rows.iter().flat_map(|r| r.slots.iter())
    }

    /// Pixel height of the lane column, stagger rows included.
    pub fn pixel_height(&self) -> u32 {
        TOP_PADDING_PX + (self.offset_slots as u32 + self.rows.len() as u32) * SLOT_HEIGHT_PX
    }
}

/// Pixel width of the whole diagram, one fixed-width column per lane.
pub fn pixel_width(lanes: &[RenderedLane]) -> u32 {
    lanes.len() as u32 * LANE_WIDTH_PX
}

/// Lay the configured bays into the blueprint grid.
///
/// Pure function of its three inputs: no clock, no cached state, so
/// identical inputs always produce identical slot assignments and
/// occupied/empty classification. The inline and fullscreen presentations
/// both call exactly this.
pub fn layout(
    bays: &[Bay],
    occupancy: &HashMap<String, OccupancyEntry>,
    plan: &LanePlan,
) -> Vec<RenderedLane> {
    let by_name: HashMap<String, &Bay> =
        bays.iter().map(|b| (b.position_key(), b)).collect();

    plan.lanes
        .iter()
        .map(|spec| {
            let rows_pattern = build_rows(&spec.row_pattern, spec.expected_count);
            let mut position = 0usize;
            let mut rows = Vec::with_capacity(rows_pattern.len());

            for (row_idx, columns) in rows_pattern.iter().enumerate() {
                let placements: &[SlotColumn] = if *columns == 1 {
                    &[SlotColumn::Center]
                } else {
                    &[SlotColumn::Left, SlotColumn::Right]
                };
                let mut slots = Vec::new();
                for column in placements {
                    if position >= spec.expected_count {
                        break;
                    }
                    position += 1;
                    let key = position_key(spec.lane, position);
                    let bay = by_name.get(&key.to_uppercase()).copied();
                    let occupant = bay.and_then(|b| occupancy.get(&b.id)).cloned();
                    slots.push(RenderedSlot {
                        key,
                        bay_id: bay.map(|b| b.id.clone()),
                        occupied: occupant.is_some(),
                        occupant,
                        row: row_idx,
                        column: *column,
                    });
                }
                if !slots.is_empty() {
                    rows.push(RenderedRow { slots });
                }
            }

            RenderedLane {
                lane: spec.lane,
                offset_slots: spec.offset_slots,
                rows,
            }
        })
        .collect()
}

/// Fixed-interval refresh bookkeeping for the occupancy snapshot,
/// independent of the grid's range-driven fetches.
#[derive(Debug)]
pub struct RefreshCadence {
    every: Duration,
    next_due: Option<NaiveDateTime>,
}

impl RefreshCadence {
    pub fn new(every_secs: u64) -> Self {
        Self {
            every: Duration::seconds(every_secs as i64),
            next_due: None,
        }
    }

    /// Whether a refresh should run at `now`. Always true before the first
    /// run.
    pub fn due(&self, now: NaiveDateTime) -> bool {
        match self.next_due {
            None => true,
            Some(at) => now >= at,
        }
    }

    pub fn mark_ran(&mut self, now: NaiveDateTime) {
        self.next_due = Some(now + self.every);
    }
}
