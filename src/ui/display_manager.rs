use std::io;
use std::io::Write;

use crate::config::Config;
use crate::core::types::ViewMode;
use crate::diagram::RenderedLane;
use crate::schedule::grid::{GridPhase, ScheduleGrid};
use crate::schedule::range::days_in;
use crate::ui::display_data::{DisplayDataBuilder, ScheduleSection};
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            printer: TablePrinter::new(),
            util: WidthUtil::default(),
            data: DisplayDataBuilder::new(),
        }
    }

    /// Key/description/value table of the loaded settings.
    pub fn render_config<W: Write>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let headers = ["KEY", "DESCRIPTION", "VALUE"];
        let rows: Vec<Vec<String>> = config
            .rows()
            .into_iter()
            .map(|(k, d, v)| vec![k, d, v])
            .collect();

        self.printer.render_table(
            "Config",
            &headers,
            &rows,
            Some("No config items found."),
            None,
            out,
        )
    }

    /// Render the grid for its current view. Month collapses to day cells
    /// with "+X more"; the other views list every event per day.
    pub fn render_grid<W: Write>(&self, grid: &ScheduleGrid, out: &mut W) -> io::Result<()> {
        let banner = format!("Bookings ({})", grid.view());
        match grid.phase() {
            GridPhase::Error(message) => {
                self.printer
                    .render_banner(&banner, self.util.visible_width(message), out)?;
                writeln!(out, "Failed to load: {message}")?;
                writeln!(out, "(retry to re-fetch this range)")?;
                return Ok(());
            }
            GridPhase::Idle | GridPhase::Loading => {
                self.printer.render_banner(&banner, 0, out)?;
                writeln!(out, "Loading...")?;
                return Ok(());
            }
            GridPhase::Ready => {}
        }

        match grid.view() {
            ViewMode::Month => self.render_month(grid, &banner, out),
            ViewMode::Day | ViewMode::Week | ViewMode::Agenda => {
                self.render_sections(grid, &banner, out)
            }
        }
    }

    fn render_month<W: Write>(
        &self,
        grid: &ScheduleGrid,
        banner: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["DATE", "BOOKED", "MORE"];
        let rows = self.data.month_rows(&grid.day_cells());
        self.printer.render_table(
            banner,
            &headers,
            &rows,
            Some("No bookings in this range."),
            None,
            out,
        )
    }

    fn render_sections<W: Write>(
        &self,
        grid: &ScheduleGrid,
        banner: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let headers = ["TIME", "NO.", "BOOKING", "STATUS"];
        let empty_msg = "No bookings scheduled.";

        let days = days_in(&grid.range());
        let sections = self.data.schedule_sections(&days, grid.events());
        let max_width = self.schedule_max_width(&sections, &headers, empty_msg, banner);

        self.printer.render_banner(banner, max_width, out)?;

        for s in &sections {
            let empty = if s.rows.is_empty() {
                Some(empty_msg)
            } else {
                None
            };
            self.printer
                .render_table(&s.title, &headers, &s.rows, empty, Some(max_width), out)?;
        }

        Ok(())
    }

    pub fn render_diagram<W: Write>(&self, lanes: &[RenderedLane], out: &mut W) -> io::Result<()> {
        let lines = self.data.diagram_lines(lanes);
        let width = lines
            .iter()
            .map(|l| self.util.visible_width(l))
            .max()
            .unwrap_or(0);
        self.printer.render_banner("Bay Diagram", width, out)?;
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "{}", self.data.diagram_legend())
    }

    fn schedule_max_width(
        &self,
        sections: &[ScheduleSection],
        headers: &[&str],
        empty_msg: &str,
        banner: &str,
    ) -> usize {
        let mut max_width = self.util.visible_width(banner);
        for s in sections {
            let table_w = self.printer.compute_table_width(headers, &s.rows);
            let title_w = self.util.visible_width(&s.title);
            let empty_w = if s.rows.is_empty() {
                self.util.visible_width(empty_msg)
            } else {
                0
            };
            max_width = max_width.max(table_w.max(title_w).max(empty_w));
        }
        max_width
    }
}
