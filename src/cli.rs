//! Command-line parsing and validation.

use crate::config::{Command, OutputFormat, Parameters};
use crate::error::CliError;
use crate::input::{DataSource, InputPath, RecordSource};
use geofields::{AxisConfig, BoundingBox};
use geofields::codec::MAX_WIDTH;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

type CliResult<T> = Result<T, CliError>;

type ApplyFn = fn(Option<&str>, &mut Parameters) -> CliResult<()>;

enum OptKind {
    Value(ApplyFn),
    Flag(ApplyFn),
}

struct OptionSpec {
    name: &'static str,
    kind: OptKind,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        name: "format",
        kind: OptKind::Value(|value, params| {
            let v = required_value("format", value)?;
            params.output.format = v.parse::<OutputFormat>().map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "width",
        kind: OptKind::Value(|value, params| {
            let v = required_value("width", value)?;
            let width = v
                .parse::<u32>()
                .ok()
                .filter(|w| (1..=MAX_WIDTH).contains(w))
                .ok_or_else(|| {
                    CliError::from(format!(
                        "Invalid width value: {} (expected 1 to {})",
                        v, MAX_WIDTH
                    ))
                })?;
            params.width = Some(width);
            Ok(())
        }),
    },
    OptionSpec {
        name: "headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = false;
            Ok(())
        }),
    },
    OptionSpec {
        name: "perf",
        kind: OptKind::Flag(|_, params| {
            params.perf = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "help",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_help_text()))),
    },
    OptionSpec {
        name: "version",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_version_text()))),
    },
];

pub fn parse_cli(args: Vec<String>) -> CliResult<(DataSource, Command, Parameters)> {
    if args.len() < 2 {
        return Err(CliError::Exit(usage_line()));
    }

    let mut params = Parameters::default();
    let mut positional = Vec::new();
    let mut applied_options: HashSet<&'static str> = HashSet::new();

    for arg in args.into_iter().skip(1) {
        if let Some(stripped) = arg.strip_prefix("--") {
            let (name, value) = stripped
                .split_once('=')
                .map(|(n, v)| (n, Some(v)))
                .unwrap_or((stripped, None));
            apply_option(name, value, &mut params, &mut applied_options)?;
        } else {
            positional.push(arg);
        }
    }

    if let Some(first) = positional.first()
        && first == "help"
    {
        let message = positional
            .get(1)
            .map(|command| get_command_help(command))
            .unwrap_or_else(get_help_text);
        return Err(CliError::Exit(message));
    }

    let (command, data_source) = parse_positional_args(&positional)?;

    validate_command_options(command, &data_source, &params, &applied_options)?;

    Ok((data_source, command, params))
}

fn usage_line() -> String {
    "Usage: geofields [OPTIONS] <arguments...> <decode|encode|within>".to_string()
}

fn apply_option(
    name: &str,
    value: Option<&str>,
    params: &mut Parameters,
    applied: &mut HashSet<&'static str>,
) -> CliResult<()> {
    let Some(spec) = OPTION_SPECS.iter().find(|s| s.name == name) else {
        return Err(format!("Unknown option: --{}", name).into());
    };

    match spec.kind {
        OptKind::Value(handler) => {
            let val = required_value(spec.name, value)?;
            handler(Some(val), params)?;
        }
        OptKind::Flag(handler) => {
            if value.is_some() {
                return Err(format!("Option --{} does not take a value", spec.name).into());
            }
            handler(None, params)?;
        }
    }

    applied.insert(spec.name);
    Ok(())
}

fn required_value<'a>(flag: &'static str, value: Option<&'a str>) -> CliResult<&'a str> {
    value.ok_or_else(|| CliError::from(format!("Option --{} requires a value", flag)))
}

fn parse_file_arg(arg: &str) -> CliResult<InputPath> {
    let Some(stripped) = arg.strip_prefix('@') else {
        return Err("Not a file argument".into());
    };

    if stripped == "-" {
        return Ok(InputPath::Stdin);
    }
    if stripped.is_empty() {
        return Err("Empty file name after '@'".into());
    }

    Ok(InputPath::File(PathBuf::from(stripped)))
}

fn parse_positional_args(positional_args: &[String]) -> CliResult<(Command, DataSource)> {
    if positional_args.is_empty() {
        return Err("Need at least command and one argument".into());
    }

    let command_index = positional_args
        .iter()
        .position(|arg| Command::from_arg(arg).is_some())
        .ok_or("No command found (expected decode, encode or within)".to_string())?;

    let command_str = &positional_args[command_index];
    let command = Command::from_arg(command_str)
        .ok_or_else(|| CliError::from(format!("Unknown command: {}", command_str)))?;

    if command_index + 1 < positional_args.len() {
        return Err(format!(
            "Unexpected argument after command: {}",
            positional_args[command_index + 1]
        )
        .into());
    }

    let data_args = &positional_args[..command_index];
    if data_args.is_empty() {
        return Err("Need at least command and one argument".into());
    }

    let data_source = match command {
        Command::Decode | Command::Encode => {
            DataSource::Records(parse_record_source(data_args)?)
        }
        Command::Within => parse_within_args(data_args)?,
    };

    Ok((command, data_source))
}

fn parse_record_source(args: &[String]) -> CliResult<RecordSource> {
    match args {
        [file] => {
            if file.starts_with('@') {
                Ok(RecordSource::File(parse_file_arg(file)?))
            } else {
                Err("Single argument must be a file (@file or @-)".into())
            }
        }
        [lat, lon] => {
            if lat.starts_with('@') || lon.starts_with('@') {
                Err("Use either one @file argument or a latitude and a longitude".into())
            } else {
                Ok(RecordSource::Inline(lat.clone(), lon.clone()))
            }
        }
        _ => Err("Too many arguments".into()),
    }
}

fn parse_within_args(args: &[String]) -> CliResult<DataSource> {
    let (files, corners): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|arg| arg.starts_with('@'));

    let locations = match files.as_slice() {
        [] => None,
        [file] => Some(parse_file_arg(file)?),
        _ => return Err("Only one locations file is allowed".into()),
    };

    let [sw_lat, sw_lng, ne_lat, ne_lng] = corners.as_slice() else {
        return Err(
            "within needs four corners: <sw-lat> <sw-lng> <ne-lat> <ne-lng>".into(),
        );
    };

    let latitude = AxisConfig::latitude();
    let longitude = AxisConfig::longitude();
    let sw_lat = latitude.check_range(parse_f64("south-west latitude", sw_lat)?)?;
    let sw_lng = longitude.check_range(parse_f64("south-west longitude", sw_lng)?)?;
    let ne_lat = latitude.check_range(parse_f64("north-east latitude", ne_lat)?)?;
    let ne_lng = longitude.check_range(parse_f64("north-east longitude", ne_lng)?)?;

    if sw_lat > ne_lat || sw_lng > ne_lng {
        warn!(
            sw_lat,
            sw_lng, ne_lat, ne_lng, "south-west corner exceeds north-east; nothing will match"
        );
    }

    Ok(DataSource::Within {
        bbox: BoundingBox::new(sw_lat, sw_lng, ne_lat, ne_lng),
        locations,
    })
}

fn parse_f64(label: &str, value: &str) -> CliResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| CliError::from(format!("Invalid {} value: {}", label, value)))
}

fn validate_command_options(
    command: Command,
    source: &DataSource,
    params: &Parameters,
    applied: &HashSet<&'static str>,
) -> CliResult<()> {
    if command != Command::Encode && applied.contains("width") {
        return Err(format!("Option --width not valid for {} command", command).into());
    }

    if let DataSource::Within {
        locations: None, ..
    } = source
        && !matches!(
            params.output.format,
            OutputFormat::Text | OutputFormat::Json
        )
    {
        return Err(format!(
            "Option --format={} needs a locations file for within command",
            params.output.format
        )
        .into());
    }

    Ok(())
}

fn get_version_text() -> String {
    format!(
        "geofields {}\n Build: {} ({})\n Built: {}\n Features: {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        env!("BUILD_FEATURES")
    )
}

fn get_help_text() -> String {
    let defaults = Parameters::default();
    let formats = OutputFormat::all().join(", ");
    format!(
        r#"geofields {}
Converts, validates and queries coordinates kept as degree/minute fields.

Usage:
  geofields [OPTIONS] <lat-fields> <lon-fields> decode
  geofields [OPTIONS] <latitude> <longitude> encode
  geofields [OPTIONS] <sw-lat> <sw-lng> <ne-lat> <ne-lng> within
  geofields [OPTIONS] @data.txt <decode|encode>
  geofields [OPTIONS] @locations.txt <sw-lat> <sw-lng> <ne-lat> <ne-lng> within

Examples:
  geofields 42:57:35:N 153:22:27:E decode
  geofields -42.955833 153.371167 encode --width=4
  geofields -10 -20 10 20 within
  echo "42:57:35:N 153:22:27:E" | geofields @- decode --format=json

Arguments:
  <lat-fields>       Latitude fields as DEG:MIN:DEC:HEM, e.g. 42:57:35:N.
  <lon-fields>       Longitude fields as DEG:MIN:DEC:HEM, e.g. 153:22:27:E.
                       Any part may be blank (42:::N); ::: means no coordinate.
                       Blank minutes and decimal minutes count as zero.
  <latitude>         Signed decimal degrees, -90 to +90.
  <longitude>        Signed decimal degrees, -180 to +180.
                       An empty argument means no coordinate.

  File inputs:
    - Each line holds a latitude and a longitude in the command's format.
    - Files accept comma- or whitespace-separated fields.
    - Blank lines and lines starting with # are ignored.
    - @- reads from stdin.

Options:
  --format=<format>     Output format: {}. Default: {}
  --[no-]headers        Include headers in CSV output. Default: {}
  --perf                Print performance statistics to stderr.
  --help                Show this help message and exit.
  --version             Print version information and exit.

Commands:
  decode                Assemble decimal degrees from degree/minute fields.
  encode                Split decimal degrees into degree/minute fields.
  within                Plan a bounding-box query, or filter locations by it.

Logging goes to stderr; set GEOFIELDS_LOG (e.g. debug) to change the level.

Run 'geofields help <command>' for command-specific options.
"#,
        env!("CARGO_PKG_VERSION"),
        formats,
        defaults.output.format,
        defaults.output.headers
    )
}

fn get_command_help(command: &str) -> String {
    match Command::from_arg(command) {
        Some(Command::Decode) => r#"Usage:
  geofields [OPTIONS] <lat-fields> <lon-fields> decode
  geofields [OPTIONS] @data.txt decode

Assembles signed decimal degrees from DEG:MIN:DEC:HEM fields. Each invalid
field is reported in the errors column; an axis with errors has no value.

Examples:
  geofields 42:57:35:N 153:22:27:E decode
  geofields 12:::S ::: decode --format=csv
"#
        .to_string(),
        Some(Command::Encode) => format!(
            r#"Usage:
  geofields [OPTIONS] <latitude> <longitude> encode
  geofields [OPTIONS] @data.txt encode

Splits signed decimal degrees into degree, minute, decimal-minute and
hemisphere fields.

Options:
  --width=<digits>          Decimal-minute digits, 1 to {}. Default: {}

Examples:
  geofields 42.955833 153.371167 encode
  geofields -33.8688 151.2093 encode --width=4
"#,
            MAX_WIDTH,
            geofields::codec::DEFAULT_DISPLAY_WIDTH
        ),
        Some(Command::Within) => r#"Usage:
  geofields [OPTIONS] <sw-lat> <sw-lng> <ne-lat> <ne-lng> within
  geofields [OPTIONS] @locations.txt <sw-lat> <sw-lng> <ne-lat> <ne-lng> within

Without a file, prints the field-level predicate for the box (text or json).
With a file of DEG:MIN:DEC:HEM pairs, prints the locations inside the box.
Matching is accurate to the minute.

Examples:
  geofields 10 20 30 40 within
  geofields -10 -20 10 20 within --format=json
  geofields @ports.txt -45 -180 0 0 within --format=csv
"#
        .to_string(),
        None => format!(
            "Unknown command: {}\n\nRun 'geofields --help' for usage.",
            command
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("geofields")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_decode_inline() {
        let (source, command, params) =
            parse_cli(args(&["42:57:35:N", "153:22:27:E", "decode"])).unwrap();
        assert_eq!(command, Command::Decode);
        assert_eq!(
            source,
            DataSource::Records(RecordSource::Inline(
                "42:57:35:N".to_string(),
                "153:22:27:E".to_string()
            ))
        );
        assert_eq!(params.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_within_accepts_negative_corners_and_file() {
        let (source, command, _) = parse_cli(args(&[
            "@ports.txt",
            "-10",
            "-20.5",
            "10",
            "20",
            "within",
            "--format=csv",
        ]))
        .unwrap();
        assert_eq!(command, Command::Within);
        assert_eq!(
            source,
            DataSource::Within {
                bbox: BoundingBox::new(-10.0, -20.5, 10.0, 20.0),
                locations: Some(InputPath::File(PathBuf::from("ports.txt"))),
            }
        );
    }

    #[test]
    fn test_width_only_for_encode() {
        let err = parse_cli(args(&["1:2:3:N", "4:5:6:E", "decode", "--width=3"])).unwrap_err();
        assert_eq!(err.to_string(), "Option --width not valid for decode command");

        let (_, _, params) = parse_cli(args(&["1.5", "2.5", "encode", "--width=3"])).unwrap();
        assert_eq!(params.width, Some(3));

        assert!(parse_cli(args(&["1.5", "2.5", "encode", "--width=0"])).is_err());
    }

    #[test]
    fn test_within_rejects_out_of_range_corner() {
        let err = parse_cli(args(&["-95", "0", "10", "10", "within"])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid coordinate: -95 is not a latitude");
    }

    #[test]
    fn test_within_plan_only_allows_text_and_json() {
        assert!(parse_cli(args(&["0", "0", "1", "1", "within", "--format=json"])).is_ok());
        assert!(parse_cli(args(&["0", "0", "1", "1", "within", "--format=csv"])).is_err());
    }

    #[test]
    fn test_help_and_version_exit() {
        assert!(matches!(
            parse_cli(args(&["--help"])),
            Err(CliError::Exit(_))
        ));
        assert!(matches!(
            parse_cli(args(&["help", "within"])),
            Err(CliError::Exit(text)) if text.contains("within")
        ));
        assert!(matches!(
            parse_cli(args(&["--version"])),
            Err(CliError::Exit(text)) if text.starts_with("geofields ")
        ));
    }

    #[test]
    fn test_unknown_option_and_missing_command() {
        assert_eq!(
            parse_cli(args(&["--zoom", "1", "2", "decode"]))
                .unwrap_err()
                .to_string(),
            "Unknown option: --zoom"
        );
        assert!(matches!(
            parse_cli(args(&["1", "2"])),
            Err(CliError::Message(_))
        ));
    }
}
