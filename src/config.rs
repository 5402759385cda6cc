//! Settings for the `uuid4` command line front end.
//!
//! Raw values from the command line are validated once into a [`Config`];
//! everything downstream works with the typed form.

use std::{fmt, num::NonZeroUsize, str::FromStr};

use crate::error::{Error, Result};

/// How generated identifiers are written.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Output {
    /// One canonical string per line.
    #[default]
    Canonical,

    /// Byte length, version nibble and variant bits of each identifier.
    Bytes,

    /// A JSON array of canonical strings.
    Json,
}

impl Output {
    pub const VARIANTS: [&'static str; 3] = ["canonical", "bytes", "json"];
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Canonical => "canonical",
            Self::Bytes => "bytes",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for Output {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "bytes" => Ok(Self::Bytes),
            "json" => Ok(Self::Json),
            other => Err(Error::invalid_argument(format!(
                "unknown output format \"{other}\", expected one of: {}",
                Self::VARIANTS.join(", ")
            ))),
        }
    }
}

/// Validated command line settings.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Config {
    /// Number of identifiers to generate
    pub count: NonZeroUsize,

    /// How to write them
    pub output: Output,
}

impl Config {
    /// Validates the raw settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `count` is zero or `output` names no
    /// known format.
    pub fn new(count: usize, output: &str) -> Result<Self> {
        let count = NonZeroUsize::new(count)
            .ok_or_else(|| Error::invalid_argument("count must be at least 1"))?;
        let output = output.parse()?;

        let config = Self { count, output };
        trace!("config: {config:?}");

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: NonZeroUsize::MIN,
            output: Output::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn accepts_valid_settings() {
        let config = Config::new(3, "json").unwrap();
        assert_eq!(config.count.get(), 3);
        assert_eq!(config.output, Output::Json);
    }

    #[test]
    fn rejects_zero_count() {
        let err = Config::new(0, "canonical").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn rejects_unknown_output() {
        let err = Config::new(1, "urn").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("canonical, bytes, json"));
    }

    #[test]
    fn output_names_round_trip() {
        for name in Output::VARIANTS {
            assert_eq!(name.parse::<Output>().unwrap().to_string(), name);
        }
        assert_eq!("BYTES".parse::<Output>().unwrap(), Output::Bytes);
    }

    #[test]
    fn default_is_one_canonical() {
        let config = Config::default();
        assert_eq!(config.count.get(), 1);
        assert_eq!(config.output, Output::Canonical);
    }
}
