use once_cell::sync::Lazy;

// Fixed geometry for the floor-plan look. Renderers consume these as data;
// the layout itself is measured in rows and slots.
pub const LANE_WIDTH_PX: u32 = 180;
pub const SLOT_HEIGHT_PX: u32 = 88;
pub const TOP_PADDING_PX: u32 = 16;

/// One lane of the floor plan: how many bay positions it is expected to
/// hold, the column count of each row top to bottom, and a vertical stagger
/// (in slot heights) that shifts the lane down for the stepped blueprint
/// look. The stagger has no effect on slot-to-bay mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSpec {
    pub lane: u8,
    pub expected_count: usize,
    pub row_pattern: Vec<u8>,
    pub offset_slots: u8,
}

/// The full blueprint, passed into the layout as data so the layout stays a
/// pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanePlan {
    pub lanes: Vec<LaneSpec>,
}

static STANDARD_PLAN: Lazy<LanePlan> = Lazy::new(|| LanePlan {
    lanes: vec![
        LaneSpec {
            lane: 1,
            expected_count: 5,
            row_pattern: vec![1, 2, 2],
            offset_slots: 1,
        },
        LaneSpec {
            lane: 2,
            expected_count: 7,
            row_pattern: vec![1, 2, 2, 2],
            offset_slots: 0,
        },
        LaneSpec {
            lane: 3,
            expected_count: 8,
            row_pattern: vec![2, 2, 2, 2],
            offset_slots: 0,
        },
        LaneSpec {
            lane: 4,
            expected_count: 5,
            row_pattern: vec![1, 1, 1, 2],
            offset_slots: 0,
        },
        LaneSpec {
            lane: 5,
            expected_count: 4,
            row_pattern: vec![1, 1, 2],
            offset_slots: 1,
        },
    ],
});

impl LanePlan {
    /// The shop's fixed blueprint, used whenever the backing bay records are
    /// incomplete or a caller has no plan of its own.
    pub fn standard() -> LanePlan {
        STANDARD_PLAN.clone()
    }
}

/// Position key for lane + 1-based position, the case-insensitive join point
/// between blueprint slots and bay records.
pub fn position_key(lane: u8, position: usize) -> String {
    format!("BAY-{lane}-{position}")
}

/// Column counts per row for a lane that must hold `slot_count` positions.
/// When the base pattern is short, rows are appended repeating the last
/// row's column count until capacity is met, so every position has a place
/// to render.
pub fn build_rows(pattern: &[u8], slot_count: usize) -> Vec<u8> {
    let mut rows: Vec<u8> = if pattern.is_empty() {
        vec![1]
    } else {
        pattern.to_vec()
    };
    let mut capacity: usize = rows.iter().map(|c| *c as usize).sum();
    while capacity < slot_count {
        let last = *rows.last().unwrap_or(&1);
        rows.push(last);
        capacity += last as usize;
    }
    rows
}
