use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{fs::File, io::BufReader, path::Path};

use crate::{InternalResult, model::DayWindow};

/// Options of one parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParseOptions {
    /// Hand every token to the trace observer.
    #[serde(default)]
    pub trace_tokens: bool,

    /// Hand every grammar decision to the trace observer.
    #[serde(default)]
    pub trace_grammar: bool,

    #[serde(default)]
    pub day_window: DayWindow,
}

impl ParseOptions {
    pub fn from_file<P: AsRef<Path>>(path: P) -> InternalResult<Self> {
        from_file(path)
    }
}

pub fn from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn from_str<T: DeserializeOwned>(s: &str) -> InternalResult<T> {
    Ok(serde_json::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimeOfDay;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options: ParseOptions = from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
        assert_eq!(options.day_window, DayWindow::default());
    }

    #[test]
    fn test_partial_window() {
        let options: ParseOptions =
            from_str(r#"{"trace_grammar": true, "day_window": {"closes": "22:00"}}"#).unwrap();
        assert!(options.trace_grammar);
        assert!(!options.trace_tokens);
        assert_eq!(options.day_window.opens, TimeOfDay::new(8, 0).unwrap());
        assert_eq!(options.day_window.closes, TimeOfDay::new(22, 0).unwrap());
    }

    #[test]
    fn test_serde_roundtrip() {
        let options = ParseOptions {
            trace_tokens: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        tracing::debug!("{}", json);
        assert_eq!(from_str::<ParseOptions>(&json).unwrap(), options);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"day_window": {{"opens": "7:30"}}}}"#).unwrap();
        let options = ParseOptions::from_file(file.path()).unwrap();
        assert_eq!(options.day_window.opens, TimeOfDay::new(7, 30).unwrap());

        assert!(matches!(
            ParseOptions::from_file("/nonexistent/cru.json"),
            Err(Error::Io(_))
        ));
        assert!(matches!(
            from_str::<ParseOptions>(r#"{"day_window": {"opens": "25:00"}}"#),
            Err(Error::Config(_))
        ));
    }
}
