use crate::ui::width_util::WidthUtil;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_separator<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> std::io::Result<()> {
        let line = if width == 0 {
            "-".into()
        } else {
            "-".repeat(width)
        };
        writeln!(out, "{line}")
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        let w = width.max(self.util.visible_width(title));
        self.write_separator(out, w)?;
        writeln!(out, "{}", title.to_uppercase())?;
        self.write_separator(out, w)
    }

    pub fn compute_table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        let col_widths = self.compute_col_widths(headers, rows);
        self.table_natural_width(&col_widths)
    }

    /// Render into any writer (the binary hands stdout, tests a buffer).
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        min_width: Option<usize>,
        out: &mut W,
    ) -> std::io::Result<()> {
        let min_w = min_width.unwrap_or(0);
        let col_widths = self.compute_col_widths(headers, rows);
        let total_width = self.table_natural_width(&col_widths).max(min_w);

        if rows.is_empty() {
            if let Some(msg) = empty_message {
                let width = total_width
                    .max(self.util.visible_width(table_name))
                    .max(self.util.visible_width(msg));
                self.render_banner(table_name, width, out)?;
                writeln!(out, "{msg}")?;
                self.write_separator(out, width)?;
                return Ok(());
            }
        }

        self.render_banner(table_name, total_width, out)?;

        if !headers.is_empty() {
            writeln!(out, "{}", self.build_line(headers, &col_widths))?;
            self.write_separator(out, total_width)?;
        }

        for row in rows {
            writeln!(out, "{}", self.build_line(row, &col_widths))?;
        }
        self.write_separator(out, total_width)
    }

    fn compute_col_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let col_count = headers.len();
        let mut col_widths = vec![0usize; col_count];
        for (i, h) in headers.iter().enumerate() {
            col_widths[i] = col_widths[i].max(self.util.visible_width(h));
        }
        for r in rows {
            for (i, cell) in r.iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(self.util.visible_width(cell.as_ref()));
            }
        }
        col_widths
    }

    fn table_natural_width(&self, col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            0
        } else {
            col_widths.iter().copied().sum::<usize>() + (col_widths.len() - 1) * 3
        }
    }

    fn build_line<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize]) -> String {
        cells
            .iter()
            .enumerate()
            .take(col_widths.len())
            .map(|(i, cell)| self.util.pad_visible(cell.as_ref(), col_widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
