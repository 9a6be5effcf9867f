//! Output formatting for CSV, JSON, text table and parquet formats.

mod formatters;

use crate::compute::{LocationRow, RowStream};
use crate::config::{Command, OutputFormat, Parameters};
use crate::error::OutputError;
use crate::planner::OutputPlan;
use crate::table_format::{Align, TableColumn, TableFormatter};
use formatters::{CsvFormatter, Formatter, JsonFormatter, TextFormatter};
use geofields::codec::DEFAULT_DISPLAY_WIDTH;
use geofields::render::{self, DisplayFields};
use geofields::{Axis, FieldSet, Predicate};
use serde::Serialize;
use std::io::{self, BufWriter, Write};

pub const CSV_HEADER: &str = "latitude,longitude,\
latitude_degrees,latitude_minutes,latitude_decimal_minutes,latitude_hemisphere,\
longitude_degrees,longitude_minutes,longitude_decimal_minutes,longitude_hemisphere,\
errors";

/// Widest rendering of a location at `width` decimal-minute digits,
/// e.g. `90°00.00′N, 180°00.00′E` for width 2.
fn position_width(width: u32) -> usize {
    19 + 2 * width as usize
}

pub fn location_table(command: Command, params: &Parameters) -> TableFormatter {
    let width = params.width.unwrap_or(DEFAULT_DISPLAY_WIDTH);
    let mut columns = vec![
        TableColumn::new("Latitude", 11, Align::Right),
        TableColumn::new("Longitude", 12, Align::Right),
        TableColumn::new("Position", position_width(width), Align::Left),
    ];
    if command != Command::Encode {
        columns.push(TableColumn::new("Errors", 28, Align::Left));
    }
    TableFormatter::new(columns)
}

fn format_degrees(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_default()
}

/// Present axes only, joined with `", "`; empty when neither is stored.
pub fn format_position(row: &LocationRow) -> String {
    Axis::ALL
        .into_iter()
        .filter_map(|axis| {
            row.location
                .fields(axis)
                .map(|fields| render::format_axis(axis, fields))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn text_cells(row: &LocationRow, command: Command) -> Vec<String> {
    let mut cells = vec![
        row.location
            .latitude()
            .map(|v| format!("{:.6}°", v))
            .unwrap_or_default(),
        row.location
            .longitude()
            .map(|v| format!("{:.6}°", v))
            .unwrap_or_default(),
        format_position(row),
    ];
    if command != Command::Encode {
        cells.push(row.error_messages().join("; "));
    }
    cells
}

fn csv_fields(fields: Option<&FieldSet>, axis: Axis) -> [String; 4] {
    match fields.map(|f| DisplayFields::from_fields(axis, f)) {
        Some(display) => [
            display.degrees,
            display.minutes,
            display.decimal_minutes,
            display.hemisphere,
        ],
        None => Default::default(),
    }
}

pub fn csv_line(row: &LocationRow) -> String {
    let mut values = vec![
        format_degrees(row.location.latitude()),
        format_degrees(row.location.longitude()),
    ];
    for axis in Axis::ALL {
        values.extend(csv_fields(row.location.fields(axis), axis));
    }
    values.push(row.error_messages().join("; "));
    values.join(",")
}

#[derive(Serialize)]
struct JsonRow<'a> {
    latitude: Option<f64>,
    longitude: Option<f64>,
    latitude_fields: Option<&'a FieldSet>,
    longitude_fields: Option<&'a FieldSet>,
    position: String,
    errors: Vec<String>,
}

pub fn json_line(row: &LocationRow) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonRow {
        latitude: row.location.latitude(),
        longitude: row.location.longitude(),
        latitude_fields: row.location.fields(Axis::Latitude),
        longitude_fields: row.location.fields(Axis::Longitude),
        position: format_position(row),
        errors: row.error_messages(),
    })
}

pub fn dispatch_output(
    rows: RowStream,
    command: Command,
    params: &Parameters,
    output_plan: &OutputPlan,
) -> Result<usize, OutputError> {
    let flush_each = output_plan.flush_each_record;
    let mut writer = BufWriter::new(io::stdout());

    let count = match params.output.format {
        OutputFormat::Csv => {
            CsvFormatter::new(&mut writer, params.output.headers, flush_each).write(rows)
        }
        OutputFormat::Json => JsonFormatter::new(&mut writer, flush_each).write(rows),
        OutputFormat::Text => {
            let table = location_table(command, params);
            TextFormatter::new(&mut writer, table, command, flush_each).write(rows)
        }
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => {
            return write_parquet_output(rows, writer).map_err(OutputError::from);
        }
    }
    .map_err(OutputError::from)?;

    writer.flush()?;
    Ok(count)
}

#[cfg(feature = "parquet")]
pub fn write_parquet_output<W: Write + Send>(rows: RowStream, writer: W) -> io::Result<usize> {
    crate::parquet::write_parquet(rows, writer)
}

/// The planned predicate for a bare `within`: infix text or one JSON document.
pub fn write_predicate(predicate: &Predicate, params: &Parameters) -> Result<usize, OutputError> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    match params.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string(predicate)
                .map_err(|e| OutputError::from(e.to_string()))?;
            writeln!(writer, "{}", json)?;
        }
        _ => writeln!(writer, "{}", predicate)?,
    }
    writer.flush()?;
    Ok(1)
}
