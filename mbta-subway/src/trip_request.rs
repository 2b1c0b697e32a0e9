//! The trip request file: which two stations to connect.
//!
//! ```text
//! # comment
//! from = 'Davis'
//! to = Kendall/MIT
//! ```
//!
//! Only `from` and `to` are accepted. Values may be wrapped in one pair of
//! single quotes; apostrophes inside a name are kept. A repeated key keeps
//! its last value.

use std::path::Path;
use std::str::FromStr;

/// Error reading or parsing a trip request.
#[derive(Debug, thiserror::Error)]
pub enum TripRequestError {
    /// The file could not be read
    #[error("failed to read trip request: {0}")]
    Io(#[from] std::io::Error),

    /// A line held a key other than `from` or `to`, or no `=`
    #[error("line {line}: unknown key {key:?} (expected from or to)")]
    UnknownKey { line: usize, key: String },

    /// A required key was never given
    #[error("trip request is missing {0:?}")]
    MissingKey(&'static str),

    /// A key was given an empty value
    #[error("trip request has an empty value for {key:?}")]
    EmptyValue { key: &'static str },
}

/// Origin and destination station names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub from: String,
    pub to: String,
}

impl TripRequest {
    /// Parse trip request text.
    pub fn parse(text: &str) -> Result<Self, TripRequestError> {
        let mut from: Option<String> = None;
        let mut to: Option<String> = None;

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(TripRequestError::UnknownKey {
                    line: i + 1,
                    key: line.to_string(),
                });
            };
            let value = unquote(value.trim()).to_string();

            match key.trim() {
                "from" => from = Some(value),
                "to" => to = Some(value),
                other => {
                    return Err(TripRequestError::UnknownKey {
                        line: i + 1,
                        key: other.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            from: required("from", from)?,
            to: required("to", to)?,
        })
    }

    /// Read and parse a trip request file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TripRequestError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

impl FromStr for TripRequest {
    type Err = TripRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strip one pair of surrounding single quotes. Quotes inside the value,
/// as in "Saint Mary's Street", are kept.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

fn required(key: &'static str, value: Option<String>) -> Result<String, TripRequestError> {
    match value {
        None => Err(TripRequestError::MissingKey(key)),
        Some(v) if v.trim().is_empty() => Err(TripRequestError::EmptyValue { key }),
        Some(v) => Ok(v.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_quoted_values_and_comments() {
        let request: TripRequest = "# where to\n\nfrom = 'Davis'\n  to=Kendall/MIT  \n"
            .parse()
            .unwrap();
        assert_eq!(
            request,
            TripRequest {
                from: "Davis".into(),
                to: "Kendall/MIT".into(),
            }
        );
    }

    #[test]
    fn apostrophes_inside_names_are_kept() {
        let request =
            TripRequest::parse("from='Saint Mary's Street'\nto=Saint Mary's Street").unwrap();
        assert_eq!(request.from, "Saint Mary's Street");
        assert_eq!(request.to, "Saint Mary's Street");
    }

    #[test]
    fn unbalanced_quote_is_kept() {
        let request = TripRequest::parse("from='Davis\nto=Kendall'").unwrap();
        assert_eq!(request.from, "'Davis");
        assert_eq!(request.to, "Kendall'");
    }

    #[test]
    fn last_value_wins() {
        let request = TripRequest::parse("from=Alewife\nto=Park Street\nfrom=Davis").unwrap();
        assert_eq!(request.from, "Davis");
        assert_eq!(request.to, "Park Street");
    }

    #[test]
    fn unknown_key() {
        let err = TripRequest::parse("from=Davis\nvia=Harvard\nto=Kendall").unwrap_err();
        assert!(matches!(
            err,
            TripRequestError::UnknownKey { line: 2, ref key } if key == "via"
        ));
    }

    #[test]
    fn line_without_separator() {
        let err = TripRequest::parse("Davis").unwrap_err();
        assert!(matches!(err, TripRequestError::UnknownKey { line: 1, .. }));
    }

    #[test]
    fn missing_key() {
        let err = TripRequest::parse("from=Davis").unwrap_err();
        assert!(matches!(err, TripRequestError::MissingKey("to")));
    }

    #[test]
    fn empty_value() {
        let err = TripRequest::parse("from=''\nto=Kendall").unwrap_err();
        assert!(matches!(err, TripRequestError::EmptyValue { key: "from" }));
    }

    #[test]
    fn reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from='Harvard'").unwrap();
        writeln!(file, "to='Park Street'").unwrap();

        let request = TripRequest::from_file(file.path()).unwrap();
        assert_eq!(request.from, "Harvard");
        assert_eq!(request.to, "Park Street");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TripRequest::from_file(dir.path().join("trip.txt")).unwrap_err();
        assert!(matches!(err, TripRequestError::Io(_)));
    }

    #[test]
    fn error_display() {
        let err = TripRequestError::UnknownKey {
            line: 3,
            key: "via".into(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: unknown key \"via\" (expected from or to)"
        );
    }
}
