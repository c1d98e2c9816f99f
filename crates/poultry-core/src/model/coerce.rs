// # Payload Coercion
//
// Form inputs arrive as text, API callers may send numbers. Both are accepted
// and coerced to the declared field type. The empty string and `null` mean
// "no value". Nothing beyond type coercion is validated.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

/// Coerce a JSON value into an optional number
pub fn number(field: &str, value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::invalid_payload(format!("{}: {} is not representable", field, n))),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(Error::invalid_payload(format!(
                    "{}: '{}' is not a number",
                    field, text
                ))),
            }
        }
        other => Err(Error::invalid_payload(format!(
            "{}: expected a number, got {}",
            field, other
        ))),
    }
}

/// Coerce a JSON value into an optional calendar date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (UTC date kept) and
/// milliseconds since the Unix epoch.
pub fn date(field: &str, value: &Value) -> Result<Option<NaiveDate>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(Some(date));
            }
            DateTime::parse_from_rfc3339(text)
                .map(|ts| Some(ts.with_timezone(&Utc).date_naive()))
                .map_err(|_| Error::invalid_payload(format!("{}: '{}' is not a date", field, text)))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|ts| Some(ts.date_naive()))
            .ok_or_else(|| Error::invalid_payload(format!("{}: {} is not a timestamp", field, n))),
        other => Err(Error::invalid_payload(format!(
            "{}: expected a date, got {}",
            field, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_coerce_from_text() {
        assert_eq!(number("eggsLaid", &json!("50")).unwrap(), Some(50.0));
        assert_eq!(number("eggsLaid", &json!(" 12.5 ")).unwrap(), Some(12.5));
        assert_eq!(number("eggsLaid", &json!(-3)).unwrap(), Some(-3.0));
        assert_eq!(number("eggsLaid", &json!("")).unwrap(), None);
        assert_eq!(number("eggsLaid", &Value::Null).unwrap(), None);
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        for bad in [json!("abc"), json!("NaN"), json!(true), json!([1])] {
            assert!(matches!(
                number("eggsLaid", &bad),
                Err(Error::InvalidPayload(_))
            ));
        }
    }

    #[test]
    fn dates_normalize_to_calendar_days() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);

        assert_eq!(date("vaccinationDate", &json!("2024-01-01")).unwrap(), expected);
        assert_eq!(
            date("vaccinationDate", &json!("2024-01-01T00:00:00.000Z")).unwrap(),
            expected
        );
        assert_eq!(
            date("vaccinationDate", &json!(1_704_067_200_000i64)).unwrap(),
            expected
        );
        assert_eq!(date("vaccinationDate", &json!("")).unwrap(), None);
        assert!(date("vaccinationDate", &json!("yesterday")).is_err());
    }
}
