use super::{CSV_HEADER, csv_line, json_line, text_cells};
use crate::compute::RowStream;
use crate::config::Command;
use crate::table_format::TableFormatter;
use std::io::Write;

pub trait Formatter {
    fn write(&mut self, rows: RowStream) -> Result<usize, String>;
}

pub struct CsvFormatter<'a, W: Write> {
    writer: &'a mut W,
    headers: bool,
    flush_each: bool,
}

impl<'a, W: Write> CsvFormatter<'a, W> {
    pub fn new(writer: &'a mut W, headers: bool, flush_each: bool) -> Self {
        Self {
            writer,
            headers,
            flush_each,
        }
    }
}

impl<'a, W: Write> Formatter for CsvFormatter<'a, W> {
    fn write(&mut self, rows: RowStream) -> Result<usize, String> {
        if self.headers {
            writeln!(self.writer, "{}", CSV_HEADER).map_err(|e| e.to_string())?;
        }

        let mut count = 0;
        for row in rows {
            let row = row?;
            writeln!(self.writer, "{}", csv_line(&row)).map_err(|e| e.to_string())?;
            count += 1;
            if self.flush_each {
                self.writer.flush().map_err(|e| e.to_string())?;
            }
        }
        Ok(count)
    }
}

pub struct JsonFormatter<'a, W: Write> {
    writer: &'a mut W,
    flush_each: bool,
}

impl<'a, W: Write> JsonFormatter<'a, W> {
    pub fn new(writer: &'a mut W, flush_each: bool) -> Self {
        Self { writer, flush_each }
    }
}

impl<'a, W: Write> Formatter for JsonFormatter<'a, W> {
    fn write(&mut self, rows: RowStream) -> Result<usize, String> {
        let mut count = 0;
        for row in rows {
            let row = row?;
            let line = json_line(&row).map_err(|e| e.to_string())?;
            writeln!(self.writer, "{}", line).map_err(|e| e.to_string())?;
            count += 1;
            if self.flush_each {
                self.writer.flush().map_err(|e| e.to_string())?;
            }
        }
        Ok(count)
    }
}

pub struct TextFormatter<'a, W: Write> {
    writer: &'a mut W,
    table: TableFormatter,
    command: Command,
    flush_each: bool,
}

impl<'a, W: Write> TextFormatter<'a, W> {
    pub fn new(
        writer: &'a mut W,
        table: TableFormatter,
        command: Command,
        flush_each: bool,
    ) -> Self {
        Self {
            writer,
            table,
            command,
            flush_each,
        }
    }
}

impl<'a, W: Write> Formatter for TextFormatter<'a, W> {
    fn write(&mut self, rows: RowStream) -> Result<usize, String> {
        self.table
            .write_table_header(self.writer)
            .map_err(|e| e.to_string())?;

        let mut count = 0;
        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    // Close the table so partial output stays readable.
                    self.table
                        .write_table_footer(self.writer)
                        .map_err(|e| e.to_string())?;
                    return Err(err);
                }
            };
            self.table
                .write_table_row(self.writer, &text_cells(&row, self.command))
                .map_err(|e| e.to_string())?;
            count += 1;
            if self.flush_each {
                self.writer.flush().map_err(|e| e.to_string())?;
            }
        }

        self.table
            .write_table_footer(self.writer)
            .map_err(|e| e.to_string())?;
        Ok(count)
    }
}
