//! Paired conversions between wire text and typed values.
//!
//! Server quirks are preserved on purpose: a version's release date is sent
//! without a time of day and comes back with the server's timezone offset in
//! its place, and a server-info build date never carries a time at all.
//!
//! A field carried as its entity's own text (rather than in a child element)
//! has no way to tell blank from absent. Empty content reads as unset, so
//! `Some("")` in such a field reads back as `None`.

use crate::{Entity, codec};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use jirasoap_wire::{MessageBuilder, Node};
use std::marker::PhantomData;
use thiserror::Error;

/// A wire value could not be converted to its target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("cannot read {text:?} as {target}: {reason}")]
    Invalid {
        target: &'static str,
        text: String,
        reason: String,
    },

    /// Failure inside one field of an entity; `source` is the cause.
    #[error("{entity}.{field} <{wire_tag}>: {source}")]
    Field {
        entity: &'static str,
        field: &'static str,
        wire_tag: &'static str,
        fragment: String,
        source: Box<CoercionError>,
    },

    /// Failure converting a bare result value; `fragment` is the value's element.
    #[error("{source} (in {fragment})")]
    Value {
        fragment: String,
        source: Box<CoercionError>,
    },
}

impl CoercionError {
    pub fn invalid(target: &'static str, text: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            target,
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The innermost conversion failure.
    pub fn root_cause(&self) -> &CoercionError {
        match self {
            Self::Field { source, .. } | Self::Value { source, .. } => source.root_cause(),
            invalid => invalid,
        }
    }

    /// Field names from the outermost entity down to the failing value.
    pub fn field_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field { field, source, .. } = current {
            path.push(*field);
            current = source.as_ref();
        }
        path
    }

    /// Rendering of the outermost fragment that failed to decode.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            Self::Field { fragment, .. } | Self::Value { fragment, .. } => Some(fragment),
            Self::Invalid { .. } => None,
        }
    }
}

/// Conversion between one wire element and a typed value.
pub trait Coercion: 'static {
    type Value: 'static;

    /// Target type name used in error messages.
    const TARGET: &'static str;

    fn decode(node: &Node) -> Result<Self::Value, CoercionError>;

    /// Writes `value` into the element opened for it.
    fn encode(value: &Self::Value, out: &mut MessageBuilder);
}

/// Raw text, unchanged.
pub struct Text;

impl Coercion for Text {
    type Value = String;
    const TARGET: &'static str = "text";

    fn decode(node: &Node) -> Result<String, CoercionError> {
        Ok(node.text().to_string())
    }

    fn encode(value: &String, out: &mut MessageBuilder) {
        out.set_text(value.as_str());
    }
}

/// Decimal integer. An element without text reads as `0`.
pub struct Integer;

impl Coercion for Integer {
    type Value = i64;
    const TARGET: &'static str = "integer";

    fn decode(node: &Node) -> Result<i64, CoercionError> {
        let text = node.text().trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse::<i64>()
            .map_err(|e| CoercionError::invalid(Self::TARGET, node.text(), e))
    }

    fn encode(value: &i64, out: &mut MessageBuilder) {
        out.set_text(value.to_string());
    }
}

/// `true` / `false`. An element without text reads as `false`.
pub struct Boolean;

impl Coercion for Boolean {
    type Value = bool;
    const TARGET: &'static str = "boolean";

    fn decode(node: &Node) -> Result<bool, CoercionError> {
        match node.text().trim().to_ascii_lowercase().as_str() {
            "" | "false" | "0" => Ok(false),
            "true" | "1" => Ok(true),
            _ => Err(CoercionError::invalid(
                Self::TARGET,
                node.text(),
                "expected true or false",
            )),
        }
    }

    fn encode(value: &bool, out: &mut MessageBuilder) {
        out.set_text(if *value { "true" } else { "false" });
    }
}

/// ISO-8601 timestamp. A timestamp without a zone is taken as UTC.
///
/// Encoding writes millisecond precision, so finer fractions of a second do
/// not survive a round trip.
pub struct Timestamp;

impl Coercion for Timestamp {
    type Value = DateTime<FixedOffset>;
    const TARGET: &'static str = "timestamp";

    fn decode(node: &Node) -> Result<DateTime<FixedOffset>, CoercionError> {
        parse_timestamp(node.text().trim())
            .map_err(|reason| CoercionError::invalid(Self::TARGET, node.text(), reason))
    }

    fn encode(value: &DateTime<FixedOffset>, out: &mut MessageBuilder) {
        out.set_text(value.to_rfc3339_opts(SecondsFormat::Millis, false));
    }
}

/// A version release date.
///
/// The server stores no time of day. A date-only value such as
/// `2010-07-12-05:00` decodes to `2010-07-12T05:00:00-05:00`: the zone offset
/// becomes the time component. Full timestamps are accepted as they are.
/// Encoding sends only the date and zone, so any other time of day is lost.
pub struct ServerDate;

impl Coercion for ServerDate {
    type Value = DateTime<FixedOffset>;
    const TARGET: &'static str = "release date";

    fn decode(node: &Node) -> Result<DateTime<FixedOffset>, CoercionError> {
        let text = node.text().trim();
        if text.contains('T') {
            return parse_timestamp(text)
                .map_err(|reason| CoercionError::invalid(Self::TARGET, node.text(), reason));
        }
        let invalid = |reason: &str| CoercionError::invalid(Self::TARGET, node.text(), reason);

        let (date, zone) = split_date(text).ok_or_else(|| invalid("expected YYYY-MM-DD"))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| invalid(&e.to_string()))?;
        let offset = parse_zone(zone).ok_or_else(|| invalid("bad zone designator"))?;

        let seconds = offset.local_minus_utc().unsigned_abs();
        let time = NaiveTime::from_hms_opt(seconds / 3600, (seconds % 3600) / 60, 0)
            .ok_or_else(|| invalid("zone offset out of range"))?;
        offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| invalid("unrepresentable local time"))
    }

    fn encode(value: &DateTime<FixedOffset>, out: &mut MessageBuilder) {
        out.set_text(value.format("%Y-%m-%d%:z").to_string());
    }
}

/// Calendar date with no time component.
pub struct Date;

impl Coercion for Date {
    type Value = NaiveDate;
    const TARGET: &'static str = "date";

    fn decode(node: &Node) -> Result<NaiveDate, CoercionError> {
        let text = node.text().trim();
        let date = text
            .get(..10)
            .ok_or_else(|| CoercionError::invalid(Self::TARGET, node.text(), "expected YYYY-MM-DD"))?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| CoercionError::invalid(Self::TARGET, node.text(), e))
    }

    fn encode(value: &NaiveDate, out: &mut MessageBuilder) {
        out.set_text(value.format("%Y-%m-%d").to_string());
    }
}

/// A nested entity, decoded and encoded through its own schema.
pub struct Nested<E>(PhantomData<E>);

impl<E: Entity> Coercion for Nested<E> {
    type Value = E;
    const TARGET: &'static str = "entity";

    fn decode(node: &Node) -> Result<E, CoercionError> {
        codec::decode(node)
    }

    fn encode(value: &E, out: &mut MessageBuilder) {
        codec::encode(value, out);
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts);
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| e.to_string())
}

fn split_date(text: &str) -> Option<(&str, &str)> {
    if text.len() < 10 || !text.is_char_boundary(10) {
        return None;
    }
    Some(text.split_at(10))
}

fn parse_zone(zone: &str) -> Option<FixedOffset> {
    match zone {
        "" | "Z" => FixedOffset::east_opt(0),
        _ => {
            let (sign, rest) = match zone.as_bytes().first()? {
                b'+' => (1, &zone[1..]),
                b'-' => (-1, &zone[1..]),
                _ => return None,
            };
            let (hours, minutes) = rest.split_once(':').unwrap_or((rest.get(..2)?, rest.get(2..)?));
            let hours: i32 = hours.parse().ok()?;
            let minutes: i32 = minutes.parse().ok()?;
            FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::with_text("v", value)
    }

    #[test]
    fn zone_designators() {
        assert_eq!(parse_zone("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_zone("-05:00").unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(parse_zone("+0530").unwrap().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert!(parse_zone("05:00").is_none());
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let ts = Timestamp::decode(&text("2010-07-12T13:52:04.120")).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn timestamp_encoding_keeps_milliseconds_only() {
        let precise = Timestamp::decode(&text("2010-07-12T13:52:04.123456789Z")).unwrap();
        let mut out = MessageBuilder::new("v");
        Timestamp::encode(&precise, &mut out);
        let sent = out.finish();
        assert_eq!(sent.text(), "2010-07-12T13:52:04.123+00:00");

        let back = Timestamp::decode(&sent).unwrap();
        assert_ne!(back, precise);
        assert_eq!(back.timestamp_millis(), precise.timestamp_millis());
    }

    #[test]
    fn integer_rejects_garbage() {
        let err = Integer::decode(&text("12abc")).unwrap_err();
        assert!(matches!(err, CoercionError::Invalid { target: "integer", .. }));
    }
}
