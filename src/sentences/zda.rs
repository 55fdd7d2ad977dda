#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_decoder, DecodeError, Field, FieldSequence, FromFields, SentenceType,
    Timestamp,
};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(sentence(SentenceType::ZDA))]
pub struct ZDA {
    /// Time in UTC, `hhmmss.ss`
    pub time: Field,
    /// Day, 01 to 31
    pub day: Field,
    /// Month, 01 to 12
    pub month: Field,
    /// Year, 4 digits
    pub year: Field,
    /// Local zone hours, -13 to 13
    pub zone_hours: Field,
    /// Local zone minutes, 00 to 59
    pub zone_minutes: Field,
    /// Fields past the documented layout
    #[nmea(trailing)]
    pub trailing: FieldSequence,
    /// Time and date, reconciled by the decoder
    #[nmea(ignore)]
    pub timestamp: Option<Timestamp>,
}

impl ZDA {
    /// UTC time of day.
    pub fn time(&self) -> Result<Option<time::Time>, DecodeError> {
        self.time.parse()
    }

    /// The local zone transmitted by the receiver, as an offset from UTC.
    ///
    /// The sign of the hours applies to the minutes: `-03,30` is UTC-03:30.
    /// Both fields blank means no zone.
    pub fn zone_offset(&self) -> Result<Option<time::UtcOffset>, DecodeError> {
        let hours = self.zone_hours.parse::<i8>()?;
        let minutes = self.zone_minutes.parse::<i8>()?;

        let (hours, minutes) = match (hours, minutes) {
            (None, None) => return Ok(None),
            (Some(hours), minutes) => (hours, minutes.unwrap_or(0)),
            (None, Some(_)) => {
                return Err(DecodeError::InvalidField(self.zone_hours.to_string()));
            }
        };

        let minutes = if self.zone_hours.as_str().starts_with('-') {
            -minutes.saturating_abs()
        } else {
            minutes
        };

        time::UtcOffset::from_hms(hours, minutes, 0)
            .map(Some)
            .map_err(|_| {
                DecodeError::InvalidField(format!("{},{}", self.zone_hours, self.zone_minutes))
            })
    }
}

#[cfg(test)]
mod tests {
    use time::macros::offset;

    use super::*;
    use crate::split_fields;

    #[test]
    fn test_zda_from_fields() {
        let cases = [
            "160012.71,11,03,2004,-1,00",
            "160012.71,11,03,2004,,",
            ",,,,,",
            "160012.71,11,03,2004,-1,00,X",
        ];

        for input in cases {
            let result = ZDA::from_fields(split_fields(input));
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let result = ZDA::from_fields(split_fields("160012.71,11,03,2004"));
        assert!(matches!(
            result,
            Err(DecodeError::FieldCount { expected: 6, found: 4, .. })
        ));
    }

    #[test]
    fn test_zone_offset() {
        let cases = [
            ("-1,00", Some(offset!(-1))),
            ("02,00", Some(offset!(+2))),
            ("-03,30", Some(offset!(-3:30))),
            ("05,45", Some(offset!(+5:45))),
            ("00,", Some(offset!(UTC))),
            (",", None),
        ];

        for (zone, expected) in cases {
            let fields = split_fields(&format!("160012.71,11,03,2004,{zone}"));
            let zda = ZDA::from_fields(fields).unwrap();
            assert_eq!(zda.zone_offset(), Ok(expected), "Failed: {zone:?}");
        }

        for zone in [",30", "X,00", "30,00"] {
            let fields = split_fields(&format!("160012.71,11,03,2004,{zone}"));
            let zda = ZDA::from_fields(fields).unwrap();
            assert!(zda.zone_offset().is_err(), "Failed: {zone:?}");
        }
    }
}
