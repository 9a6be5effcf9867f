use geofields::CoordinateError;
use thiserror::Error;

macro_rules! simple_error {
    ($name:ident) => {
        #[derive(Error, Debug)]
        #[error("{0}")]
        pub struct $name(pub String);

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<std::io::Error> for $name {
            fn from(value: std::io::Error) -> Self {
                Self(value.to_string())
            }
        }
    };
}

#[derive(Error, Debug)]
pub enum CliError {
    /// Print message to stdout and exit with code 0 (help/version/usage).
    #[error("{0}")]
    Exit(String),
    /// Print message to stderr and exit with code 1.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CliError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for CliError {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Message(value.to_string())
    }
}

impl From<CoordinateError> for CliError {
    fn from(value: CoordinateError) -> Self {
        Self::Message(format!("Invalid coordinate: {}", value))
    }
}

simple_error!(PlannerError);
simple_error!(OutputError);
