use chrono::NaiveDate;

use crate::core::models::CalendarEvent;
use crate::core::types::BookingStatus;
use crate::diagram::RenderedLane;
use crate::schedule::grid::DayCell;
use crate::ui::ansi::{FG_BLUE, FG_GREEN, FG_RED, paint};
use crate::ui::width_util::WidthUtil;

/// Inner character width of one rendered lane column.
const LANE_CHAR_WIDTH: usize = 10;
/// Gap between lane columns.
const LANE_GAP: &str = "   ";

const OCCUPIED_MARKER: &str = "[##]";
const EMPTY_MARKER: &str = "[  ]";

#[derive(Debug, Clone)]
pub struct ScheduleSection {
    pub title: String,
    pub rows: Vec<Vec<String>>, // ordered by start time
}

#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder {
    util: WidthUtil,
}

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One section per day, rows ordered by start then id so repeated
    /// renders are stable.
    pub fn schedule_sections(
        &self,
        days: &[NaiveDate],
        events: &[CalendarEvent],
    ) -> Vec<ScheduleSection> {
        days.iter()
            .map(|date| {
                let mut in_day: Vec<&CalendarEvent> = events
                    .iter()
                    .filter(|e| e.start.date() <= *date && *date <= e.end.date())
                    .collect();
                in_day.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

                let rows = in_day
                    .into_iter()
                    .map(|e| {
                        vec![
                            format!(
                                "{}-{}",
                                e.start.format("%H:%M"),
                                e.end.format("%H:%M")
                            ),
                            e.source.display_number().to_string(),
                            e.title.clone(),
                            paint_status(e.source.status),
                        ]
                    })
                    .collect();

                ScheduleSection {
                    title: format!("DATE: {}", date.format("%Y-%m-%d")),
                    rows,
                }
            })
            .collect()
    }

    /// Month view rows: one per day cell, visible titles joined and hidden
    /// events summarized as "+X more".
    pub fn month_rows(&self, cells: &[DayCell]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|cell| {
                let booked = if cell.visible.is_empty() {
                    "-".to_string()
                } else {
                    cell.visible
                        .iter()
                        .map(|e| e.title.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                };
                let more = if cell.hidden_count() > 0 {
                    format!("+{} more", cell.hidden_count())
                } else {
                    String::new()
                };
                vec![cell.date.format("%Y-%m-%d").to_string(), booked, more]
            })
            .collect()
    }

    /// ASCII floor plan: lanes side by side, rows top to bottom, staggered
    /// lanes shifted down by blank slot lines.
    pub fn diagram_lines(&self, lanes: &[RenderedLane]) -> Vec<String> {
        let columns: Vec<Vec<String>> = lanes.iter().map(|l| self.lane_column(l)).collect();
        let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);

        (0..height)
            .map(|i| {
                let line = columns
                    .iter()
                    .map(|col| {
                        let cell = col.get(i).map(String::as_str).unwrap_or("");
                        self.util.pad_visible(cell, LANE_CHAR_WIDTH)
                    })
                    .collect::<Vec<_>>()
                    .join(LANE_GAP);
                line.trim_end().to_string()
            })
            .collect()
    }

    pub fn diagram_legend(&self) -> String {
        format!(
            "{}: occupied   {}: empty (placeholders always empty)",
            paint(FG_BLUE, OCCUPIED_MARKER),
            paint(FG_RED, EMPTY_MARKER)
        )
    }

    fn lane_column(&self, lane: &RenderedLane) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(center(&format!("Lane {}", lane.lane), LANE_CHAR_WIDTH));
        for _ in 0..lane.offset_slots {
            lines.push(String::new());
        }
        for row in &lane.rows {
            lines.push(self.row_line(row));
        }
        lines
    }

    fn row_line(&self, row: &crate::diagram::RenderedRow) -> String {
        match row.slots.as_slice() {
            [single] => center(&slot_marker(single.occupied), LANE_CHAR_WIDTH),
            [left, right] => format!(
                "{}  {}",
                slot_marker(left.occupied),
                slot_marker(right.occupied)
            ),
            slots => {
                // Row patterns only hold 1 or 2 columns; anything else would
                // be a malformed plan, render what we have.
                slots
                    .iter()
                    .map(|s| slot_marker(s.occupied))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

fn slot_marker(occupied: bool) -> String {
    if occupied {
        paint(FG_BLUE, OCCUPIED_MARKER)
    } else {
        paint(FG_RED, EMPTY_MARKER)
    }
}

fn paint_status(status: BookingStatus) -> String {
    let label = status.display_label();
    match status {
        BookingStatus::Open => label.to_string(),
        BookingStatus::InProgress => paint(FG_BLUE, label),
        BookingStatus::Closed => paint(FG_GREEN, label),
        BookingStatus::Canceled => paint(FG_RED, label),
    }
}

fn center(s: &str, width: usize) -> String {
    let util = WidthUtil;
    let w = util.visible_width(s);
    if w >= width {
        return s.to_string();
    }
    let left = (width - w) / 2;
    format!("{}{}", " ".repeat(left), s)
}
