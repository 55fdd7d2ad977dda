#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_decoder, DecodeError, Field, FieldSequence, FromFields, SentenceType,
    Timestamp,
    sentences::{Position, Status, east_west, position},
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// The FAA mode indicator of NMEA 2.3 and the navigation status of NMEA 4.1
/// are kept in `trailing`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(sentence(SentenceType::RMC))]
pub struct RMC {
    /// Fix time in UTC, `hhmmss.ss`
    pub fix_time: Field,
    /// Status Mode Indicator
    pub status: Field,
    pub latitude: Field,
    pub latitude_hemisphere: Field,
    pub longitude: Field,
    pub longitude_hemisphere: Field,
    /// Speed over ground in knots
    pub speed_over_ground: Field,
    /// Course over ground in degrees true
    pub course_over_ground: Field,
    /// Fix date in UTC, `ddmmyy`
    pub date: Field,
    /// Magnetic variation in degrees
    pub magnetic_variation: Field,
    /// `E` or `W`
    pub magnetic_variation_direction: Field,
    /// Fields past the documented layout
    #[nmea(trailing)]
    pub trailing: FieldSequence,
    /// Fix time and date, reconciled by the decoder
    #[nmea(ignore)]
    pub timestamp: Option<Timestamp>,
}

impl RMC {
    /// UTC time of the fix.
    pub fn fix_time(&self) -> Result<Option<time::Time>, DecodeError> {
        self.fix_time.parse()
    }

    /// Data status, `Valid` or `Invalid`.
    pub fn status(&self) -> Result<Option<Status>, DecodeError> {
        self.status.parse()
    }

    /// Position of the fix, `None` when blank.
    pub fn position(&self) -> Result<Option<Position>, DecodeError> {
        position(
            &self.latitude,
            &self.latitude_hemisphere,
            &self.longitude,
            &self.longitude_hemisphere,
        )
    }

    /// Speed over ground in knots.
    pub fn speed_over_ground(&self) -> Result<Option<f32>, DecodeError> {
        self.speed_over_ground.parse()
    }

    /// Course over ground, degrees true.
    pub fn course_over_ground(&self) -> Result<Option<f32>, DecodeError> {
        self.course_over_ground.parse()
    }

    /// Magnetic variation in degrees, west negative.
    pub fn magnetic_variation(&self) -> Result<Option<f32>, DecodeError> {
        east_west(&self.magnetic_variation, &self.magnetic_variation_direction)
    }
}
