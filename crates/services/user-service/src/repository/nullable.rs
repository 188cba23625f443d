//! Reconciliation between NULL-capable columns and entity zero values.
//!
//! Entities carry absent values as `""` or the epoch timestamp; the database
//! stores them as NULL. Every read path decodes through here and every write
//! path encodes through here, so the two representations never mix.

use chrono::{DateTime, Utc};
use sea_orm::Value;

/// Copy a present column value, or fall back to the type's zero value.
pub fn decode<T: Default>(column: Option<T>) -> T {
    column.unwrap_or_default()
}

/// Empty text is stored as NULL.
pub fn encode_text(value: &str) -> Value {
    if value.is_empty() {
        Value::String(None)
    } else {
        Value::from(value.to_string())
    }
}

/// The zero timestamp is stored as NULL.
pub fn encode_timestamp(value: DateTime<Utc>) -> Value {
    if value == DateTime::<Utc>::default() {
        Value::from(None::<DateTime<Utc>>)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_present_and_absent() {
        assert_eq!(decode(Some("2000-08-30".to_string())), "2000-08-30");
        assert_eq!(decode::<String>(None), "");

        let ts = Utc::now();
        assert_eq!(decode(Some(ts)), ts);
        assert_eq!(decode::<DateTime<Utc>>(None), DateTime::<Utc>::default());
    }

    #[test]
    fn test_encode_text() {
        assert_eq!(encode_text(""), Value::String(None));
        assert_eq!(encode_text("2001"), Value::from("2001".to_string()));
    }

    #[test]
    fn test_encode_timestamp() {
        assert_eq!(
            encode_timestamp(DateTime::<Utc>::default()),
            Value::ChronoDateTimeUtc(None)
        );

        let ts = Utc::now();
        assert_eq!(encode_timestamp(ts), Value::from(ts));
    }
}
