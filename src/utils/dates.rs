//! Lenient date parsing shared by the JSON payloads and list query parameters.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serializer};

/// Wire format used when serialising publication dates.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const LOCAL_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{0}'; expected YYYY-MM-DD or an ISO 8601 date-time")]
pub struct DateParseError(pub String);

/// Parse `YYYY-MM-DD`, a naive ISO 8601 date-time, or RFC 3339 with an
/// offset.
///
/// Naive input is taken as local wall-clock time. Offset input is converted
/// to local time, the frame the catalog clock reports "now" in.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime, DateParseError> {
    let value = value.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Ok(date_time.with_timezone(&Local).naive_local());
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date_time);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| DateParseError(value.to_string()))
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(DATE_TIME_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_time(&raw).map_err(de::Error::custom)
}

/// `Option` flavour: absent, `null`, and blank strings all read as `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            parse_date_time(&raw).map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};

    #[test]
    fn parses_plain_date_at_midnight() {
        let parsed = parse_date_time("1925-04-10").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (1925, 4, 10));
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn parses_naive_and_fractional_date_times() {
        let parsed = parse_date_time("1960-07-11T13:45:00").unwrap();
        assert_eq!(parsed.hour(), 13);

        let parsed = parse_date_time("1960-07-11T13:45:00.250").unwrap();
        assert_eq!(parsed.minute(), 45);
    }

    #[test]
    fn rfc3339_offsets_are_converted_to_local_time() {
        let local = Local
            .from_local_datetime(&parse_date_time("2001-01-01T01:30:00").unwrap())
            .earliest()
            .unwrap();

        let parsed = parse_date_time(&local.to_rfc3339()).unwrap();
        assert_eq!(parsed.format(DATE_TIME_FORMAT).to_string(), "2001-01-01T01:30:00");

        let parsed = parse_date_time(&local.with_timezone(&Utc).to_rfc3339()).unwrap();
        assert_eq!(parsed.format(DATE_TIME_FORMAT).to_string(), "2001-01-01T01:30:00");
    }

    #[test]
    fn utc_instant_in_the_past_is_before_local_now() {
        let hour_ago = (Utc::now() - Duration::hours(1)).to_rfc3339();
        let parsed = parse_date_time(&hour_ago).unwrap();
        assert!(parsed < Local::now().naive_local());

        let zulu = (Utc::now() - Duration::hours(1))
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        assert!(parse_date_time(&zulu).unwrap() < Local::now().naive_local());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date_time("next tuesday").unwrap_err();
        assert_eq!(err, DateParseError("next tuesday".to_string()));
    }
}
