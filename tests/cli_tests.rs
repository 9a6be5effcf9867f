mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_decode_text_table() {
    treasure_decode().assert_success_contains_all(&[
        "│ Latitude",
        "42.955833°",
        "153.371167°",
        "42°57.35′N, 153°22.27′E",
    ]);
}

#[test]
fn test_decode_csv() {
    let output = decode_with_format("csv").stdout_string();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[0],
        "latitude,longitude,latitude_degrees,latitude_minutes,latitude_decimal_minutes,latitude_hemisphere,longitude_degrees,longitude_minutes,longitude_decimal_minutes,longitude_hemisphere,errors"
    );
    assert_eq!(lines[1], "42.955833,153.371167,42,57,35,N,153,22,27,E,");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_decode_southern_western() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "42:57:35:s", "153:22:27:w", "decode"])
        .stdout_string();
    assert_eq!(
        output.trim_end(),
        "-42.955833,-153.371167,42,57,35,S,153,22,27,W,"
    );
}

#[test]
fn test_decode_json() {
    let output = decode_with_format("json").stdout_string();
    let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert!((value["latitude"].as_f64().unwrap() - 42.955833).abs() < 1e-6);
    assert_eq!(value["latitude_fields"]["degrees"], 42);
    assert_eq!(value["latitude_fields"]["decimal_minutes"]["width"], 2);
    assert_eq!(value["longitude_fields"]["hemisphere"], "E");
    assert_eq!(value["position"], "42°57.35′N, 153°22.27′E");
    assert_eq!(value["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn test_decode_field_errors_are_reported_not_fatal() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "91:60:x:Q", "12:::E", "decode"])
        .stdout_string();
    let rows = csv_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "");
    assert_eq!(rows[0][1], "12.000000");
    assert_eq!(
        rows[0][10],
        "latitude degrees are invalid; latitude minutes are invalid; latitude decimal minutes are invalid; latitude hemisphere is invalid"
    );
}

#[test]
fn test_decode_partial_input_defaults_to_zero() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "12:::S", ":::", "decode"])
        .stdout_string();
    assert_eq!(output.trim_end(), "-12.000000,,12,00,0,S,,,,,");
}

#[test]
fn test_decode_missing_degrees_or_hemisphere() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", ":30::N", "10:30::", "decode"])
        .stdout_string();
    assert!(output.contains("latitude degrees are invalid"));
    assert!(output.contains("longitude hemisphere is invalid"));
}

#[test]
fn test_decode_decimal_width_matters() {
    let five_hundredths = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "0:0:05:N", ":::", "decode"])
        .stdout_string();
    let five_tenths = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "0:0:5:N", ":::", "decode"])
        .stdout_string();
    assert!(five_hundredths.starts_with("0.000833,"));
    assert!(five_tenths.starts_with("0.008333,"));
}

#[test]
fn test_decode_accepts_long_decimal_minutes() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "42:57:35000000000000000000:N", ":::", "decode"])
        .stdout_string();
    assert_eq!(
        output.trim_end(),
        "42.955833,,42,57,35000000000000000000,N,,,,,"
    );
}

#[test]
fn test_decode_malformed_spec_is_an_error() {
    GeofieldsTest::new()
        .args(["42:57", "153:22:27:E", "decode"])
        .assert_error_contains("expected DEG:MIN:DEC:HEM");
}

#[test]
fn test_encode_default_width() {
    GeofieldsTest::new()
        .args(["42.955833", "-153.371167", "encode"])
        .assert_success_contains("42°57.35′N, 153°22.27′W");
}

#[test]
fn test_encode_width_option() {
    let output = GeofieldsTest::new()
        .args(["--format=csv", "--no-headers", "--width=4", "-33.8688", "151.2093", "encode"])
        .stdout_string();
    assert_eq!(
        output.trim_end(),
        "-33.868800,151.209300,33,52,1280,S,151,12,5580,E,"
    );
}

#[test]
fn test_encode_zero_is_positive_hemisphere() {
    GeofieldsTest::new()
        .args(["0", "0", "encode"])
        .assert_success_contains("00°00.00′N, 000°00.00′E");
}

#[test]
fn test_encode_rounding_carries() {
    GeofieldsTest::new()
        .args(["41.999999", "0", "encode"])
        .assert_success_contains("42°00.00′N");
}

#[test]
fn test_encode_out_of_range() {
    GeofieldsTest::new()
        .args(["95", "0", "encode"])
        .assert_error_contains("95 is not a latitude");
    GeofieldsTest::new()
        .args(["0", "-181", "encode"])
        .assert_error_contains("-181 is not a longitude");
}

#[test]
fn test_encode_invalid_number() {
    GeofieldsTest::new()
        .args(["north", "0", "encode"])
        .assert_error_contains("Invalid latitude: north");
}

#[test]
fn test_within_prints_predicate() {
    GeofieldsTest::new()
        .args(["10", "20", "30", "40", "within"])
        .assert_success_contains_all(&[
            "latitude_hemisphere = 'N'",
            "longitude_hemisphere = 'E'",
            "latitude_degrees",
        ]);
}

#[test]
fn test_within_json_predicate() {
    let output = GeofieldsTest::new()
        .args(["--format=json", "-10", "-20", "10", "20", "within"])
        .stdout_string();
    let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    let terms = value["and"].as_array().unwrap();
    assert_eq!(terms.len(), 2);
    assert!(terms[0].get("or").is_some());
    assert!(terms[1].get("or").is_some());
}

#[test]
fn test_within_rejects_bad_corners() {
    GeofieldsTest::new()
        .args(["10", "20", "30", "within"])
        .assert_error_contains("within needs four corners");
    GeofieldsTest::new()
        .args(["10", "20", "95", "40", "within"])
        .assert_error_contains("95 is not a latitude");
    GeofieldsTest::new()
        .args(["10", "east", "30", "40", "within"])
        .assert_error_contains("Invalid south-west longitude value: east");
}

#[test]
fn test_within_inverted_box_warns() {
    GeofieldsTest::new()
        .args(["30", "20", "10", "40", "within"])
        .command()
        .assert()
        .success()
        .stderr(predicate::str::contains("south-west corner exceeds north-east"));
}

#[test]
fn test_within_csv_needs_locations_file() {
    GeofieldsTest::new()
        .args(["--format=csv", "10", "20", "30", "40", "within"])
        .assert_error_contains("needs a locations file");
}

#[test]
fn test_format_is_case_insensitive() {
    GeofieldsTest::new()
        .args(["--format=CSV", "1.5", "2.5", "encode"])
        .assert_success_contains("latitude,longitude");
}

#[test]
fn test_unknown_format() {
    GeofieldsTest::new()
        .args(["--format=xml", "1.5", "2.5", "encode"])
        .assert_error_contains("Unknown format: xml");
}

#[test]
fn test_unknown_option() {
    GeofieldsTest::new()
        .args(["--zoom=2", "1.5", "2.5", "encode"])
        .assert_error_contains("Unknown option: --zoom");
}

#[test]
fn test_width_not_valid_for_decode() {
    GeofieldsTest::new()
        .args(["--width=3", "1:::N", "2:::E", "decode"])
        .assert_error_contains("Option --width not valid for decode command");
}

#[test]
fn test_flag_rejects_value() {
    GeofieldsTest::new()
        .args(["--perf=yes", "1.5", "2.5", "encode"])
        .assert_error_contains("Option --perf does not take a value");
}

#[test]
fn test_missing_command() {
    GeofieldsTest::new()
        .args(["1.5", "2.5"])
        .assert_error_contains("No command found");
}

#[test]
fn test_perf_reports_to_stderr() {
    GeofieldsTest::new()
        .args(["--perf", "1.5", "2.5", "encode"])
        .command()
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 1 records in"));
}

#[test]
fn test_help() {
    GeofieldsTest::new()
        .arg("--help")
        .assert_success_contains_all(&["Usage:", "decode", "encode", "within", "--format"]);
}

#[test]
fn test_command_help() {
    GeofieldsTest::new()
        .args(["help", "encode"])
        .assert_success_contains("--width=<digits>");
    GeofieldsTest::new()
        .args(["help", "teleport"])
        .assert_success_contains("Unknown command: teleport");
}

#[test]
fn test_version() {
    GeofieldsTest::new()
        .arg("--version")
        .command()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("geofields "))
        .stdout(predicate::str::contains("Features:"));
}

#[test]
fn test_no_arguments_prints_usage() {
    GeofieldsTest::new().assert_success_contains("Usage: geofields");
}
