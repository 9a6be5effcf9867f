use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: &'static str,
    pub width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: &'static str, min_width: usize, align: Align) -> Self {
        Self {
            header,
            width: min_width.max(header.width()),
            align,
        }
    }
}

/// Pads by display width; cells wider than the column are left intact.
pub fn pad_cell(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match align {
        Align::Left => format!("{}{}", cell, fill),
        Align::Right => format!("{}{}", fill, cell),
    }
}

pub struct TableFormatter {
    pub columns: Vec<TableColumn>,
}

impl TableFormatter {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self { columns }
    }

    fn write_rule<W: Write>(
        &self,
        writer: &mut W,
        left: &str,
        middle: &str,
        right: &str,
    ) -> io::Result<()> {
        write!(writer, "{}", left)?;
        for (i, column) in self.columns.iter().enumerate() {
            write!(writer, "{}", "─".repeat(column.width + 2))?;
            if i < self.columns.len() - 1 {
                write!(writer, "{}", middle)?;
            }
        }
        writeln!(writer, "{}", right)
    }

    pub fn write_table_header<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_rule(writer, "┌", "┬", "┐")?;

        write!(writer, "│")?;
        for column in &self.columns {
            write!(
                writer,
                " {} │",
                pad_cell(column.header, column.width, Align::Left)
            )?;
        }
        writeln!(writer)?;

        self.write_rule(writer, "├", "┼", "┤")
    }

    pub fn write_table_row<W: Write>(&self, writer: &mut W, cells: &[String]) -> io::Result<()> {
        write!(writer, "│")?;
        for (column, cell) in self.columns.iter().zip(cells.iter()) {
            write!(writer, " {} │", pad_cell(cell, column.width, column.align))?;
        }
        writeln!(writer)
    }

    pub fn write_table_footer<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_rule(writer, "└", "┴", "┘")
    }
}
