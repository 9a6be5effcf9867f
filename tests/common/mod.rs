#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Test helper for running geofields commands with less boilerplate
pub struct GeofieldsTest {
    cmd: Command,
}

pub fn geofields_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("geofields"))
}

impl GeofieldsTest {
    pub fn new() -> Self {
        Self {
            cmd: geofields_command(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn arg<S: AsRef<std::ffi::OsStr>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Feed text to stdin (for `@-` inputs)
    pub fn stdin<S: Into<Vec<u8>>>(mut self, input: S) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    pub fn assert_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    pub fn assert_success_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .success()
            .stdout(predicate::str::contains(text))
    }

    pub fn assert_success_contains_all(mut self, texts: &[&str]) -> assert_cmd::assert::Assert {
        let mut assertion = self.cmd.assert().success();
        for text in texts {
            assertion = assertion.stdout(predicate::str::contains(*text));
        }
        assertion
    }

    pub fn assert_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Assert exit code 1 with the given text in the `Error: ...` line
    pub fn assert_error_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Error: "))
            .stderr(predicate::str::contains(text))
    }

    pub fn command(self) -> Command {
        self.cmd
    }

    pub fn get_output(mut self) -> std::process::Output {
        self.cmd.output().unwrap()
    }

    pub fn stdout_string(self) -> String {
        let output = self.get_output();
        assert!(output.status.success(), "command failed: {:?}", output);
        String::from_utf8(output.stdout).unwrap()
    }
}

/// Decode the example treasure location
pub fn treasure_decode() -> GeofieldsTest {
    GeofieldsTest::new().args(["42:57:35:N", "153:22:27:E", "decode"])
}

/// Decode with an explicit output format (options before positional args)
pub fn decode_with_format(format: &str) -> GeofieldsTest {
    GeofieldsTest::new().args([
        &format!("--format={}", format),
        "42:57:35:N",
        "153:22:27:E",
        "decode",
    ])
}

/// Write lines to a temp file that lives as long as the returned handle
pub fn temp_input(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// `@path` argument for a temp file
pub fn file_arg(file: &NamedTempFile) -> String {
    format!("@{}", file.path().display())
}

/// Parse CSV output into rows of fields, skipping the header
pub fn csv_rows(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}
