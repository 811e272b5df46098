use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier.
///
/// The catalog API hands out numeric ids for some records and string ids for
/// others. The client never interprets them beyond equality, and a numeric
/// `5` is a different identifier from the text `"5"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// Parses operator input: anything that reads as an integer becomes a
/// numeric id, everything else is kept as text.
impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("record id cannot be empty".to_string());
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_are_distinct() {
        assert_ne!(RecordId::Number(5), RecordId::from("5"));
    }

    #[test]
    fn serde_keeps_wire_shape() {
        let n: RecordId = serde_json::from_str("42").unwrap();
        let s: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(n, RecordId::Number(42));
        assert_eq!(s, RecordId::from("abc"));
        assert_eq!(serde_json::to_string(&n).unwrap(), "42");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"abc\"");
    }

    #[test]
    fn from_str_prefers_numbers() {
        assert_eq!("17".parse::<RecordId>().unwrap(), RecordId::Number(17));
        assert_eq!(
            "tap-1".parse::<RecordId>().unwrap(),
            RecordId::from("tap-1")
        );
        assert!("  ".parse::<RecordId>().is_err());
    }
}
