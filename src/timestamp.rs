//! # Time Reconciler
//!
//! RMC and ZDA sentences carry a UTC time of day and a UTC date in separate
//! fields. The reconciler combines them into one instant and expresses it in
//! the local offset the reconciler was built with.

use std::fmt;

use log::warn;
use nom::{
    Parser,
    character::complete::{char, digit1},
    combinator::opt,
    error::{ErrorKind, ParseError},
    sequence::preceded,
};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError, Field, IResult,
    parsing::{consumed, digits},
};

/// An absolute instant reconciled from a sentence's time and date fields.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// The instant in UTC
    pub utc: OffsetDateTime,
    /// The same instant at the reconciler's local offset, for display
    pub local: OffsetDateTime,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC: {} / local: {}", self.utc, self.local)
    }
}

/// Combines time-of-day and date fields into a [`Timestamp`].
///
/// The local offset is fixed at construction; reconciling never consults the
/// process environment, so the result only depends on the fields.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{Field, TimeReconciler};
/// use time::UtcOffset;
///
/// let reconciler = TimeReconciler::new(UtcOffset::from_hms(2, 0, 0).unwrap());
/// let timestamp = reconciler
///     .reconcile_rmc(&Field::from("123519"), &Field::from("230394"))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(timestamp.utc.hour(), 12);
/// assert_eq!(timestamp.local.hour(), 14);
/// assert_eq!(timestamp.utc, timestamp.local);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReconciler {
    local_offset: UtcOffset,
}

impl TimeReconciler {
    /// Creates a reconciler reporting local time at `local_offset`.
    pub fn new(local_offset: UtcOffset) -> Self {
        TimeReconciler { local_offset }
    }

    /// The offset local timestamps are expressed in.
    pub fn local_offset(&self) -> UtcOffset {
        self.local_offset
    }

    /// Reconciles an RMC `hhmmss.ss` time and `ddmmyy` date.
    ///
    /// Two-digit years from 69 on are taken as 19xx and the rest as 20xx.
    ///
    /// Returns `Ok(None)` if either field is blank (no fix yet) and
    /// [`DecodeError::MalformedTimestamp`] if a non-blank field does not parse.
    pub fn reconcile_rmc(
        &self,
        time: &Field,
        date: &Field,
    ) -> Result<Option<Timestamp>, DecodeError> {
        if time.is_empty() || date.is_empty() {
            return Ok(None);
        }

        let time = parse_time(time)?;
        let date = consumed(short_date, ErrorKind::Eof)
            .parse(date.as_str())
            .map(|(_, date)| date)
            .map_err(|_| DecodeError::MalformedTimestamp(date.to_string()))?;

        self.compose(date, time).map(Some)
    }

    /// Reconciles a ZDA time with its separate day, month and 4-digit year fields.
    ///
    /// Returns `Ok(None)` if the time or all the date fields are blank. A
    /// partially blank date is malformed.
    pub fn reconcile_zda(
        &self,
        time: &Field,
        day: &Field,
        month: &Field,
        year: &Field,
    ) -> Result<Option<Timestamp>, DecodeError> {
        let date_fields = [day, month, year];
        if time.is_empty() || date_fields.iter().all(|field| field.is_empty()) {
            return Ok(None);
        }

        let time = parse_time(time)?;
        let malformed_date = || DecodeError::MalformedTimestamp(format!("{day},{month},{year}"));

        let (Ok(Some(day)), Ok(Some(month))) = (day.parse::<u8>(), month.parse::<u8>()) else {
            return Err(malformed_date());
        };
        let year = consumed(digits(4u8), ErrorKind::Eof)
            .parse(year.as_str())
            .map(|(_, year)| year)
            .map_err(|_: nom::Err<nom::error::Error<&str>>| malformed_date())?;

        let date = Month::try_from(month)
            .ok()
            .and_then(|month| Date::from_calendar_date(year as i32, month, day).ok())
            .ok_or_else(malformed_date)?;

        self.compose(date, time).map(Some)
    }

    // The local instant may fall outside the representable years even when
    // the UTC one does not.
    fn compose(&self, date: Date, time: Time) -> Result<Timestamp, DecodeError> {
        let utc = PrimitiveDateTime::new(date, time).assume_utc();
        let local = utc
            .checked_to_offset(self.local_offset)
            .ok_or_else(|| DecodeError::MalformedTimestamp(format!("{date} {time}")))?;

        Ok(Timestamp { utc, local })
    }
}

impl Default for TimeReconciler {
    fn default() -> Self {
        TimeReconciler::new(UtcOffset::UTC)
    }
}

/// Resolves the local UTC offset of the running process.
///
/// Meant to be called once at start-up and handed to
/// [`Decoder::new`](crate::Decoder::new). Falls back to UTC when the platform
/// cannot determine the offset safely (e.g. a multi-threaded process on some
/// Unix systems).
pub fn local_offset() -> UtcOffset {
    match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(e) => {
            warn!("local time zone: {}; reporting local time in UTC", e);
            UtcOffset::UTC
        }
    }
}

fn parse_time(field: &Field) -> Result<Time, DecodeError> {
    consumed(time_of_day, ErrorKind::Eof)
        .parse(field.as_str())
        .map(|(_, time)| time)
        .map_err(|_| DecodeError::MalformedTimestamp(field.to_string()))
}

/// Parses a `hhmmss` time of day with optional fractional seconds.
///
/// Fraction digits beyond nanosecond precision are ignored.
pub(crate) fn time_of_day(i: &str) -> IResult<&str, Time> {
    let (rest, (hour, minute, second, fraction)) = (
        digits(2u8),
        digits(2u8),
        digits(2u8),
        opt(preceded(char('.'), digit1)),
    )
        .parse(i)?;

    let nanosecond = fraction.map_or(0, |fraction: &str| {
        fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(9)
            .fold(0u32, |nanos, digit| nanos * 10 + u32::from(digit - b'0'))
    });

    let time = Time::from_hms_nano(hour as u8, minute as u8, second as u8, nanosecond)
        .map_err(|_| nom::Err::Error(nom::error::Error::from_error_kind(i, ErrorKind::Verify)))?;

    Ok((rest, time))
}

/// Parses a `ddmmyy` date.
fn short_date(i: &str) -> IResult<&str, Date> {
    let (rest, (day, month, year)) = (digits(2u8), digits(2u8), digits(2u8)).parse(i)?;

    let year = match year {
        69..=99 => year + 1900,
        _ => year + 2000,
    };

    let date = Month::try_from(month as u8)
        .ok()
        .and_then(|month| Date::from_calendar_date(year as i32, month, day as u8).ok())
        .ok_or(nom::Err::Error(nom::error::Error::from_error_kind(
            i,
            ErrorKind::Verify,
        )))?;

    Ok((rest, date))
}
