#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_decoder, DecodeError, Field, FieldSequence, FromFields, SentenceType,
    sentences::{Position, Status, position},
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6
///         |       | |        | |         |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3 receivers append a mode indicator, kept in `trailing`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(sentence(SentenceType::GLL))]
pub struct GLL {
    pub latitude: Field,
    pub latitude_hemisphere: Field,
    pub longitude: Field,
    pub longitude_hemisphere: Field,
    /// Fix time in UTC
    pub fix_time: Field,
    /// Status Mode Indicator
    pub status: Field,
    /// Fields past the documented layout
    #[nmea(trailing)]
    pub trailing: FieldSequence,
}

impl GLL {
    /// Position of the fix, `None` when blank.
    pub fn position(&self) -> Result<Option<Position>, DecodeError> {
        position(
            &self.latitude,
            &self.latitude_hemisphere,
            &self.longitude,
            &self.longitude_hemisphere,
        )
    }

    /// UTC time of the fix.
    pub fn fix_time(&self) -> Result<Option<time::Time>, DecodeError> {
        self.fix_time.parse()
    }

    /// Data status, `Valid` or `Invalid`.
    pub fn status(&self) -> Result<Option<Status>, DecodeError> {
        self.status.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_fields;

    #[test]
    fn test_gll_from_fields() {
        let cases = [
            "4916.45,N,12311.12,W,225444,A",
            "4916.45,N,12311.12,W,225444.00,A,A",
            ",,,,,V",
            ",,,,,",
        ];

        for input in cases {
            let result = GLL::from_fields(split_fields(input));
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = ["4916.45,N,12311.12,W,225444", ",,,"];

        for input in cases {
            let result = GLL::from_fields(split_fields(input));
            assert!(
                matches!(result, Err(DecodeError::FieldCount { expected: 6, .. })),
                "Failed: {input:?}\n\t{result:?}"
            );
        }
    }

    #[test]
    fn test_gll_values() {
        let gll = GLL::from_fields(split_fields("4916.45,N,12311.12,W,225444,A,D")).unwrap();

        let position = gll.position().unwrap().unwrap();
        assert!((position.latitude - 49.274_166).abs() < 1e-6);
        assert!((position.longitude + 123.185_333).abs() < 1e-6);
        assert_eq!(gll.fix_time(), Ok(Some(time::macros::time!(22:54:44))));
        assert_eq!(gll.status(), Ok(Some(Status::Valid)));
        assert_eq!(gll.trailing, vec![Field::from("D")]);
    }
}
