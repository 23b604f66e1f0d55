//! Wire types for the XSD `date`, `dateTime`, and `time` primitives.
//!
//! Each is a thin wrapper around a `time` value plus an explicit
//! `has_offset` flag, because XSD treats the timezone suffix (`Z`,
//! `+01:00`, or its absence) as significant, independent information, not
//! merely a normalization detail: `"2024-01-01"` and `"2024-01-01Z"` are
//! distinct lexical values that must round-trip distinctly.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time, UtcOffset};

fn format_offset(offset: UtcOffset) -> String {
    if offset == UtcOffset::UTC {
        return "Z".to_string();
    }
    let (h, m, _) = offset.as_hms();
    format!("{:+03}:{:02}", h, m.abs())
}

/// Splits a trailing XSD timezone suffix (`Z` or `±HH:MM`) off a lexical
/// value, returning the remaining body and the parsed offset, if any.
fn split_offset(value: &str) -> Result<(&str, Option<UtcOffset>), String> {
    if let Some(body) = value.strip_suffix('Z') {
        return Ok((body, Some(UtcOffset::UTC)));
    }
    // A leading '-' (date sign) must not be mistaken for an offset sign, so
    // only look for +/- after the first character.
    if value.len() > 1 {
        if let Some(idx) = value[1..].rfind(['+', '-']) {
            let idx = idx + 1;
            let (body, tz) = value.split_at(idx);
            if let Ok(offset) = parse_offset(tz) {
                return Ok((body, Some(offset)));
            }
        }
    }
    Ok((value, None))
}

fn parse_offset(tz: &str) -> Result<UtcOffset, String> {
    let (sign, rest) = tz.split_at(1);
    let sign = if sign == "-" { -1 } else { 1 };
    let mut parts = rest.split(':');
    let hours: i8 = parts
        .next()
        .ok_or_else(|| "missing offset hours".to_string())?
        .parse()
        .map_err(|_| "invalid offset hours".to_string())?;
    let minutes: i8 = parts
        .next()
        .unwrap_or("0")
        .parse()
        .map_err(|_| "invalid offset minutes".to_string())?;
    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(|e| e.to_string())
}

const DATE_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const TIME_FORMAT_SUBSECOND: &[time::format_description::FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:1+]");
const DATETIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATETIME_FORMAT_SUBSECOND: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:1+]");

/// Appends a fractional-seconds suffix to `body` when `nanosecond` is
/// nonzero, trimming trailing zeros so e.g. 500_000_000ns renders as `.5`
/// rather than `.500000000`.
fn format_subsecond(nanosecond: u32) -> String {
    if nanosecond == 0 {
        return String::new();
    }
    let digits = format!("{:09}", nanosecond);
    format!(".{}", digits.trim_end_matches('0'))
}

macro_rules! string_serde {
    ($ty:ty, $visitor:ident, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct $visitor;
                impl Visitor<'_> for $visitor {
                    type Value = $ty;
                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }
                    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                        v.parse().map_err(de::Error::custom)
                    }
                }
                deserializer.deserialize_str($visitor)
            }
        }
    };
}

/// An XSD `xs:date` value: a calendar date with an optional timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsdDate {
    pub date: Date,
    pub offset: Option<UtcOffset>,
}

impl XsdDate {
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}

impl fmt::Display for XsdDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .date
            .format(DATE_FORMAT)
            .map_err(|_| fmt::Error)?;
        write!(f, "{}", body)?;
        if let Some(offset) = self.offset {
            write!(f, "{}", format_offset(offset))?;
        }
        Ok(())
    }
}

impl FromStr for XsdDate {
    type Err = String;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (body, offset) = split_offset(value)?;
        let date = Date::parse(body, DATE_FORMAT).map_err(|e| e.to_string())?;
        Ok(XsdDate { date, offset })
    }
}

string_serde!(XsdDate, XsdDateVisitor, "an XSD date string (YYYY-MM-DD[Z|±HH:MM])");

/// An XSD `xs:time` value: a time-of-day with an optional timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsdTime {
    pub time: Time,
    pub offset: Option<UtcOffset>,
}

impl XsdTime {
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}

impl fmt::Display for XsdTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .time
            .format(TIME_FORMAT)
            .map_err(|_| fmt::Error)?;
        write!(f, "{}{}", body, format_subsecond(self.time.nanosecond()))?;
        if let Some(offset) = self.offset {
            write!(f, "{}", format_offset(offset))?;
        }
        Ok(())
    }
}

impl FromStr for XsdTime {
    type Err = String;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (body, offset) = split_offset(value)?;
        let time = Time::parse(body, TIME_FORMAT_SUBSECOND)
            .or_else(|_| Time::parse(body, TIME_FORMAT))
            .map_err(|e| e.to_string())?;
        Ok(XsdTime { time, offset })
    }
}

string_serde!(XsdTime, XsdTimeVisitor, "an XSD time string (HH:MM:SS[Z|±HH:MM])");

/// An XSD `xs:dateTime` value: a date and time-of-day with an optional
/// timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XsdDateTime {
    pub datetime: PrimitiveDateTime,
    pub offset: Option<UtcOffset>,
}

impl XsdDateTime {
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}

impl fmt::Display for XsdDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .datetime
            .format(DATETIME_FORMAT)
            .map_err(|_| fmt::Error)?;
        write!(
            f,
            "{}{}",
            body,
            format_subsecond(self.datetime.nanosecond())
        )?;
        if let Some(offset) = self.offset {
            write!(f, "{}", format_offset(offset))?;
        }
        Ok(())
    }
}

impl FromStr for XsdDateTime {
    type Err = String;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (body, offset) = split_offset(value)?;
        let datetime = PrimitiveDateTime::parse(body, DATETIME_FORMAT_SUBSECOND)
            .or_else(|_| PrimitiveDateTime::parse(body, DATETIME_FORMAT))
            .map_err(|e| e.to_string())?;
        Ok(XsdDateTime { datetime, offset })
    }
}

string_serde!(
    XsdDateTime,
    XsdDateTimeVisitor,
    "an XSD dateTime string (YYYY-MM-DDTHH:MM:SS[Z|±HH:MM])"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_roundtrips_without_offset() {
        let d: XsdDate = "2024-03-05".parse().unwrap();
        assert!(!d.has_offset());
        assert_eq!(d.to_string(), "2024-03-05");
    }

    #[test]
    fn date_roundtrips_with_utc_offset() {
        let d: XsdDate = "2024-03-05Z".parse().unwrap();
        assert!(d.has_offset());
        assert_eq!(d.to_string(), "2024-03-05Z");
    }

    #[test]
    fn date_roundtrips_with_explicit_offset() {
        let d: XsdDate = "2024-03-05+02:00".parse().unwrap();
        assert!(d.has_offset());
        assert_eq!(d.to_string(), "2024-03-05+02:00");
    }

    #[test]
    fn datetime_roundtrips_with_offset() {
        let dt: XsdDateTime = "2024-03-05T10:30:00Z".parse().unwrap();
        assert!(dt.has_offset());
        assert_eq!(dt.to_string(), "2024-03-05T10:30:00Z");
    }

    #[test]
    fn datetime_roundtrips_without_offset() {
        let dt: XsdDateTime = "2024-03-05T10:30:00".parse().unwrap();
        assert!(!dt.has_offset());
        assert_eq!(dt.to_string(), "2024-03-05T10:30:00");
    }

    #[test]
    fn time_roundtrips_with_negative_offset() {
        let t: XsdTime = "10:30:00-05:00".parse().unwrap();
        assert!(t.has_offset());
        assert_eq!(t.to_string(), "10:30:00-05:00");
    }

    #[test]
    fn datetime_roundtrips_with_fractional_seconds() {
        let dt: XsdDateTime = "2024-03-05T10:30:00.123456789Z".parse().unwrap();
        assert!(dt.has_offset());
        assert_eq!(dt.to_string(), "2024-03-05T10:30:00.123456789Z");
    }

    #[test]
    fn datetime_trims_trailing_zero_subsecond_digits() {
        let dt: XsdDateTime = "2024-03-05T10:30:00.500000000".parse().unwrap();
        assert_eq!(dt.to_string(), "2024-03-05T10:30:00.5");
    }

    #[test]
    fn datetime_without_fractional_seconds_has_no_dot() {
        let dt: XsdDateTime = "2024-03-05T10:30:00.000000000".parse().unwrap();
        assert_eq!(dt.to_string(), "2024-03-05T10:30:00");
    }

    #[test]
    fn time_roundtrips_with_fractional_seconds() {
        let t: XsdTime = "10:30:00.25-05:00".parse().unwrap();
        assert!(t.has_offset());
        assert_eq!(t.to_string(), "10:30:00.25-05:00");
    }

    #[test]
    fn serde_roundtrip_via_json() {
        let dt: XsdDateTime = "2024-03-05T10:30:00Z".parse().unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2024-03-05T10:30:00Z\"");
        let back: XsdDateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dt);
    }
}
