//! Output format configuration for log records
//!
//! - Text: vertically-aligned line built from per-key templates (default)
//! - Json: single-line JSON object with every value stringified

use super::error::{LoggerError, Result};
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: ``app[42] inf core: `request processed` took=3ms 	@ core::serve(server.rs:88)``
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"_l":"inf","_m":"request processed","took":"3ms"}`
    Json,
}

impl OutputFormat {
    /// Encode a record's fields as a single-line JSON object.
    ///
    /// Values are stringified, so encoding never depends on caller types.
    /// Keys come out sorted which keeps output deterministic.
    pub fn encode_json(fields: &HashMap<String, Value>) -> Result<String> {
        let safe: BTreeMap<&str, String> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string()))
            .collect();
        Ok(serde_json::to_string(&safe)?)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(LoggerError::config(
                "format",
                format!("unknown output format '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_json_stringifies() {
        let mut fields = HashMap::new();
        fields.insert("_m".to_string(), Value::from("hello"));
        fields.insert("n".to_string(), Value::from(42));
        fields.insert("ok".to_string(), Value::from(true));

        let line = OutputFormat::encode_json(&fields).unwrap();
        assert_eq!(line, r#"{"_m":"hello","n":"42","ok":"true"}"#);
    }

    #[test]
    fn test_encode_json_escapes() {
        let mut fields = HashMap::new();
        fields.insert("q".to_string(), Value::from("say \"hi\"\n"));

        let line = OutputFormat::encode_json(&fields).unwrap();
        assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["q"], "say \"hi\"\n");
    }

    #[test]
    fn test_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
