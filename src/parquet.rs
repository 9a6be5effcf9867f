//! Parquet output format support.

use crate::compute::RowStream;
use arrow::array::{ArrayRef, Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use geofields::{Axis, FieldSet, Location};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

const BATCH_SIZE: usize = 8192;

/// Stored fields of one axis, one builder per column.
struct AxisBuilders {
    value: Float64Builder,
    degrees: UInt32Builder,
    minutes: UInt32Builder,
    decimal_minutes: UInt64Builder,
    decimal_minutes_width: UInt32Builder,
    hemisphere: StringBuilder,
}

impl AxisBuilders {
    fn new() -> Self {
        Self {
            value: Float64Builder::with_capacity(BATCH_SIZE),
            degrees: UInt32Builder::with_capacity(BATCH_SIZE),
            minutes: UInt32Builder::with_capacity(BATCH_SIZE),
            decimal_minutes: UInt64Builder::with_capacity(BATCH_SIZE),
            decimal_minutes_width: UInt32Builder::with_capacity(BATCH_SIZE),
            hemisphere: StringBuilder::with_capacity(BATCH_SIZE, BATCH_SIZE),
        }
    }

    fn append(&mut self, location: &Location, axis: Axis) {
        let fields: Option<&FieldSet> = location.fields(axis);
        self.value.append_option(location.coordinate(axis));
        self.degrees.append_option(fields.map(|f| f.degrees));
        self.minutes.append_option(fields.map(|f| f.minutes));
        self.decimal_minutes
            .append_option(fields.map(|f| f.decimal_minutes.value));
        self.decimal_minutes_width
            .append_option(fields.map(|f| f.decimal_minutes.width));
        self.hemisphere
            .append_option(fields.map(|f| f.hemisphere.to_string()));
    }

    /// Finishes the current batch; builders are left empty for the next one.
    fn finish(&mut self) -> [ArrayRef; 6] {
        [
            Arc::new(self.value.finish()),
            Arc::new(self.degrees.finish()),
            Arc::new(self.minutes.finish()),
            Arc::new(self.decimal_minutes.finish()),
            Arc::new(self.decimal_minutes_width.finish()),
            Arc::new(self.hemisphere.finish()),
        ]
    }
}

fn build_schema() -> Arc<Schema> {
    let mut fields = Vec::new();
    for axis in Axis::ALL {
        let name = axis.name();
        fields.push(Field::new(name, DataType::Float64, true));
        fields.push(Field::new(format!("{}_degrees", name), DataType::UInt32, true));
        fields.push(Field::new(format!("{}_minutes", name), DataType::UInt32, true));
        fields.push(Field::new(
            format!("{}_decimal_minutes", name),
            DataType::UInt64,
            true,
        ));
        fields.push(Field::new(
            format!("{}_decimal_minutes_width", name),
            DataType::UInt32,
            true,
        ));
        fields.push(Field::new(format!("{}_hemisphere", name), DataType::Utf8, true));
    }
    fields.push(Field::new("errors", DataType::Utf8, true));
    Arc::new(Schema::new(fields))
}

pub fn write_parquet<W: Write + Send>(rows: RowStream, writer: W) -> std::io::Result<usize> {
    let schema = build_schema();
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut parquet_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))
        .map_err(|e| std::io::Error::other(format!("Parquet writer error: {}", e)))?;

    let mut latitude = AxisBuilders::new();
    let mut longitude = AxisBuilders::new();
    let mut errors = StringBuilder::with_capacity(BATCH_SIZE, BATCH_SIZE);

    let mut batch_count = 0;
    let mut total_count = 0;

    for row in rows {
        let row = row.map_err(std::io::Error::other)?;

        latitude.append(&row.location, Axis::Latitude);
        longitude.append(&row.location, Axis::Longitude);
        let messages = row.error_messages();
        if messages.is_empty() {
            errors.append_null();
        } else {
            errors.append_value(messages.join("; "));
        }

        batch_count += 1;
        total_count += 1;

        if batch_count >= BATCH_SIZE {
            flush_batch(
                &mut parquet_writer,
                &schema,
                &mut latitude,
                &mut longitude,
                &mut errors,
            )?;
            batch_count = 0;
        }
    }

    if batch_count > 0 {
        flush_batch(
            &mut parquet_writer,
            &schema,
            &mut latitude,
            &mut longitude,
            &mut errors,
        )?;
    }

    let mut inner = parquet_writer
        .into_inner()
        .map_err(|e| std::io::Error::other(format!("Failed to close parquet: {}", e)))?;
    inner.flush()?;

    Ok(total_count)
}

fn flush_batch<W: Write + Send>(
    writer: &mut ArrowWriter<W>,
    schema: &Arc<Schema>,
    latitude: &mut AxisBuilders,
    longitude: &mut AxisBuilders,
    errors: &mut StringBuilder,
) -> std::io::Result<()> {
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    arrays.extend(latitude.finish());
    arrays.extend(longitude.finish());
    arrays.push(Arc::new(errors.finish()) as ArrayRef);

    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .map_err(|e| std::io::Error::other(format!("Failed to create batch: {}", e)))?;

    writer
        .write(&batch)
        .map_err(|e| std::io::Error::other(format!("Failed to write batch: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{decode_row, encode_row};
    use arrow::array::{Array, Float64Array, StringArray, UInt32Array};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn pair(lat: &str, lon: &str) -> (String, String) {
        (lat.to_string(), lon.to_string())
    }

    #[test]
    fn test_schema_columns() {
        let schema = build_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "latitude");
        assert_eq!(names[4], "latitude_decimal_minutes_width");
        assert_eq!(names[6], "longitude");
        assert_eq!(names[12], "errors");
    }

    #[test]
    fn test_write_and_read_back() {
        let rows: RowStream = Box::new(
            vec![
                encode_row(&pair("42.955833", "-153.371167"), Some(2)),
                decode_row(&pair("91:::N", ":::")),
            ]
            .into_iter(),
        );

        let mut buffer = Vec::new();
        let count = write_parquet(rows, &mut buffer).unwrap();
        assert_eq!(count, 2);

        let reader = ParquetRecordBatchReaderBuilder::try_new(bytes::Bytes::from(buffer))
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];

        let lat = batch
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!((lat.value(0) - 42.955833).abs() < 1e-9);
        assert!(lat.is_null(1));

        let lon_degrees = batch
            .column(7)
            .as_any()
            .downcast_ref::<UInt32Array>()
            .unwrap();
        assert_eq!(lon_degrees.value(0), 153);

        let errors = batch
            .column(12)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert!(errors.is_null(0));
        assert_eq!(errors.value(1), "latitude degrees are invalid");
    }
}
