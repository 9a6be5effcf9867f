use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Decode,
    Encode,
    Within,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Decode, Command::Encode, Command::Within];

    pub fn name(self) -> &'static str {
        match self {
            Command::Decode => "decode",
            Command::Encode => "encode",
            Command::Within => "within",
        }
    }

    pub fn from_arg(arg: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == arg)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
    #[cfg(feature = "parquet")]
    Parquet,
}

impl OutputFormat {
    pub fn all() -> Vec<&'static str> {
        let mut formats = vec!["text", "csv", "json"];
        if cfg!(feature = "parquet") {
            formats.push("parquet");
        }
        formats
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            #[cfg(feature = "parquet")]
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            #[cfg(feature = "parquet")]
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(format!(
                "Unknown format: {}. Supported formats: {}",
                s,
                OutputFormat::all().join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub headers: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            headers: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parameters {
    pub output: OutputOptions,
    /// Decimal-minute digits for `encode`; `None` uses the library default.
    pub width: Option<u32>,
    pub perf: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_is_case_insensitive() {
        assert_eq!("CSV".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert_eq!("Json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_command_from_arg() {
        assert_eq!(Command::from_arg("within"), Some(Command::Within));
        assert_eq!(Command::from_arg("position"), None);
    }
}
