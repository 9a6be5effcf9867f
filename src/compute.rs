//! Per-record conversion over a streaming input.

use crate::config::{Command, Parameters};
use crate::input::{self, TokenPair, TokenPairStream};
use geofields::{Axis, Location, LocationFlags, Predicate};

#[derive(Debug, Clone)]
pub struct LocationRow {
    pub location: Location,
    pub flags: LocationFlags,
}

impl LocationRow {
    pub fn error_messages(&self) -> Vec<String> {
        self.flags.records().iter().map(|r| r.to_string()).collect()
    }
}

pub type RowResult = Result<LocationRow, String>;
pub type RowStream = Box<dyn Iterator<Item = RowResult>>;

/// Assembles a location from `DEG:MIN:DEC:HEM` tokens. Field errors end up
/// in the flags; only a malformed token is an `Err`.
pub fn decode_row(pair: &TokenPair) -> RowResult {
    let mut location = Location::new();
    location.set_input(Axis::Latitude, input::parse_field_spec(&pair.0)?);
    location.set_input(Axis::Longitude, input::parse_field_spec(&pair.1)?);
    let flags = location.assemble();
    Ok(LocationRow { location, flags })
}

pub fn encode_row(pair: &TokenPair, width: Option<u32>) -> RowResult {
    let latitude = input::parse_degrees("latitude", &pair.0)?;
    let longitude = input::parse_degrees("longitude", &pair.1)?;
    let location = Location::from_degrees(latitude, longitude, width)
        .map_err(|e| format!("Invalid coordinate: {}", e))?;
    Ok(LocationRow {
        location,
        flags: LocationFlags::default(),
    })
}

pub fn compute_rows(
    records: TokenPairStream,
    command: Command,
    filter: Option<Predicate>,
    params: &Parameters,
) -> RowStream {
    let width = params.width;
    let rows = records.map(move |record| {
        let pair = record?;
        match command {
            Command::Encode => encode_row(&pair, width),
            Command::Decode | Command::Within => decode_row(&pair),
        }
    });

    match filter {
        None => Box::new(rows),
        Some(predicate) => Box::new(rows.filter(move |row| match row {
            Ok(row) => predicate.matches(&row.location),
            Err(_) => true,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofields::BoundingBox;

    fn pair(lat: &str, lon: &str) -> TokenPair {
        (lat.to_string(), lon.to_string())
    }

    fn stream(pairs: Vec<TokenPair>) -> TokenPairStream {
        Box::new(pairs.into_iter().map(Ok))
    }

    #[test]
    fn test_decode_row() {
        let row = decode_row(&pair("42:57:35:N", "153:22:27:W")).unwrap();
        assert!(row.flags.is_valid());
        assert!((row.location.latitude().unwrap() - 42.955833).abs() < 1e-5);
        assert!((row.location.longitude().unwrap() + 153.37117).abs() < 1e-5);
    }

    #[test]
    fn test_decode_row_reports_field_errors() {
        let row = decode_row(&pair("95:00::N", ":::")).unwrap();
        assert_eq!(row.error_messages(), vec!["latitude degrees are invalid"]);
        assert_eq!(row.location.latitude(), None);
        assert_eq!(row.location.longitude(), None);

        assert!(decode_row(&pair("42", ":::")).is_err());
    }

    #[test]
    fn test_encode_row() {
        let row = encode_row(&pair("-12.5", ""), Some(3)).unwrap();
        let fields = row.location.fields(Axis::Latitude).unwrap();
        assert_eq!((fields.degrees, fields.minutes), (12, 30));
        assert_eq!(fields.decimal_minutes.width, 3);
        assert_eq!(fields.hemisphere, 'S');
        assert_eq!(row.location.longitude(), None);

        assert_eq!(
            encode_row(&pair("91", "0"), None).unwrap_err(),
            "Invalid coordinate: 91 is not a latitude"
        );
    }

    #[test]
    fn test_within_filter_keeps_matching_rows() {
        let records = stream(vec![
            pair("15:00::N", "25:00::E"),
            pair("15:00::S", "25:00::E"),
            pair("bogus:::N", "25:00::E"),
        ]);
        let filter = BoundingBox::new(10.0, 20.0, 30.0, 40.0).plan();
        let rows: Vec<_> = compute_rows(records, Command::Within, Some(filter), &Parameters::default())
            .collect();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.location.latitude(), Some(15.0));
    }
}
