//! Record sources: inline arguments or `@file` / `@-` line streams.

use geofields::{BoundingBox, RawFieldSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum InputPath {
    Stdin,
    File(PathBuf),
}

impl InputPath {
    pub fn display_name(&self) -> String {
        match self {
            InputPath::Stdin => "stdin".to_string(),
            InputPath::File(path) => path.display().to_string(),
        }
    }
}

/// Two tokens per record: latitude first, then longitude.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSource {
    Inline(String, String),
    File(InputPath),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Records(RecordSource),
    Within {
        bbox: BoundingBox,
        locations: Option<InputPath>,
    },
}

impl DataSource {
    pub fn uses_stdin(&self) -> bool {
        matches!(
            self,
            DataSource::Records(RecordSource::File(InputPath::Stdin))
                | DataSource::Within {
                    locations: Some(InputPath::Stdin),
                    ..
                }
        )
    }
}

pub type TokenPair = (String, String);
pub type TokenPairResult = Result<TokenPair, String>;
pub type TokenPairStream = Box<dyn Iterator<Item = TokenPairResult>>;

pub fn parse_delimited_line(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn open_input(input_path: &InputPath) -> io::Result<Box<dyn BufRead>> {
    match input_path {
        InputPath::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
        InputPath::File(path) => {
            let file = File::open(path)?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Streams the source as latitude/longitude token pairs.
pub fn read_token_pairs(source: RecordSource) -> Result<TokenPairStream, String> {
    match source {
        RecordSource::Inline(lat, lon) => Ok(Box::new(std::iter::once(Ok((lat, lon))))),
        RecordSource::File(path) => read_pairs_file(path),
    }
}

fn read_pairs_file(input_path: InputPath) -> Result<TokenPairStream, String> {
    let path_display = input_path.display_name();
    let reader =
        open_input(&input_path).map_err(|e| format!("Error opening {}: {}", path_display, e))?;

    let mut lines = reader.lines().enumerate();

    let iter = std::iter::from_fn(move || {
        for (idx, line_result) in lines.by_ref() {
            let line_number = idx + 1;
            let line = match line_result {
                Ok(value) => value,
                Err(err) => {
                    return Some(Err(format!(
                        "{}:{}: failed to read line: {}",
                        path_display, line_number, err
                    )));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts = parse_delimited_line(trimmed);
            if parts.len() != 2 {
                return Some(Err(format!(
                    "{}:{}: expected 2 fields (latitude longitude), found {}",
                    path_display,
                    line_number,
                    parts.len()
                )));
            }

            return Some(Ok((parts[0].to_string(), parts[1].to_string())));
        }
        None
    });

    Ok(Box::new(iter))
}

/// Splits `DEG:MIN:DEC:HEM` into raw form fields. Any part may be empty.
pub fn parse_field_spec(token: &str) -> Result<RawFieldSet, String> {
    let parts: Vec<&str> = token.split(':').collect();
    match parts.as_slice() {
        [degrees, minutes, decimal_minutes, hemisphere] => Ok(RawFieldSet::new(
            *degrees,
            *minutes,
            *decimal_minutes,
            *hemisphere,
        )),
        _ if token.trim().is_empty() => Ok(RawFieldSet::default()),
        _ => Err(format!(
            "Invalid field spec '{}': expected DEG:MIN:DEC:HEM",
            token
        )),
    }
}

/// An empty token means the axis has no coordinate.
pub fn parse_degrees(label: &str, token: &str) -> Result<Option<f64>, String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Invalid {}: {}", label, token))
}
