//! Input checks shared by the JSON API and the booking form.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Digits only, 10 or 11 of them, once whitespace is removed.
pub fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{10,11}$").unwrap();
    }
    let stripped: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&stripped)
}

pub fn is_in_future(datetime: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    datetime > now
}

/// Storable years: four digits once converted to UTC.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parses an RFC 3339 timestamp, or a naive one read in the salon's offset
/// (what an HTML `datetime-local` input submits).
pub fn parse_datetime(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let parsed = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| offset.from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc)),
    };

    parsed.filter(|dt| YEARS.contains(&dt.year()))
}

/// JSON truthiness: null, false, 0 and "" count as "not supplied".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A non-empty string, or `None` for anything else.
pub fn required_text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn vn() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_phone_accepts_ten_and_eleven_digits() {
        assert!(is_valid_phone("0901234567"));
        assert!(is_valid_phone("09012345678"));
        assert!(is_valid_phone("090 123 4567"));
        assert!(is_valid_phone(" 0901\t234567 "));
    }

    #[test]
    fn test_phone_rejects_everything_else() {
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("090123456"));
        assert!(!is_valid_phone("090123456789"));
        assert!(!is_valid_phone("+84901234567"));
        assert!(!is_valid_phone("090-123-4567"));
        assert!(!is_valid_phone("09012345a7"));
    }

    #[test]
    fn test_in_future_is_strict() {
        let now = Utc::now();
        assert!(is_in_future(now + Duration::seconds(1), now));
        assert!(!is_in_future(now, now));
        assert!(!is_in_future(now - Duration::days(1), now));
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2030-09-20T10:00:00Z", vn()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-09-20T10:00:00+00:00");

        let dt = parse_datetime("2030-09-20T10:00:00+07:00", vn()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-09-20T03:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_uses_salon_offset() {
        let dt = parse_datetime("2030-09-20T10:00", vn()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-09-20T03:00:00+00:00");

        let dt = parse_datetime("2030-09-20 10:30:00", vn()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-09-20T03:30:00+00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_datetime("tomorrow", vn()).is_none());
        assert!(parse_datetime("", vn()).is_none());
        assert!(parse_datetime("2030-13-40T10:00", vn()).is_none());
    }

    #[test]
    fn test_parse_rejects_years_outside_four_digits() {
        assert!(parse_datetime("+10000-01-01T09:00", vn()).is_none());
        assert!(parse_datetime("-0001-01-01T09:00", vn()).is_none());
        // 9999-12-31 23:00 at -05:00 is already year 10000 in UTC
        assert!(parse_datetime("9999-12-31T23:00:00-05:00", vn()).is_none());
        // 0001-01-01 03:00 at +07:00 falls back into year 0
        assert!(parse_datetime("0001-01-01T03:00", vn()).is_none());

        let dt = parse_datetime("9999-12-31T09:00", vn()).unwrap();
        assert_eq!(dt.year(), 9999);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(5)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text(Some(&json!("A"))), Some("A"));
        assert_eq!(required_text(Some(&json!(""))), None);
        assert_eq!(required_text(Some(&json!(42))), None);
        assert_eq!(required_text(None), None);
    }
}
