use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_decoder, DecodeError, Field, FieldSequence, FromFields, SentenceType,
    sentences::{Position, Quality, position},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(sentence(SentenceType::GGA))]
pub struct GGA {
    /// Fix time in UTC, `hhmmss.ss`
    pub fix_time: Field,
    /// Latitude, `ddmm.mm`
    pub latitude: Field,
    /// `N` or `S`
    pub latitude_hemisphere: Field,
    /// Longitude, `dddmm.mm`
    pub longitude: Field,
    /// `E` or `W`
    pub longitude_hemisphere: Field,
    /// GPS Quality Indicator
    pub fix_quality: Field,
    /// Number of satellites in use
    pub satellite_count: Field,
    /// Horizontal Dilution of Precision
    pub hdop: Field,
    /// Antenna altitude above/below mean sea level (geoid)
    pub altitude: Field,
    /// Units of antenna altitude, `M`
    pub altitude_unit: Field,
    /// Geoidal separation, the difference between the WGS-84 earth ellipsoid
    /// and mean sea level (geoid), negative when the geoid is below the ellipsoid
    pub geoidal_separation: Field,
    /// Units of geoidal separation, `M`
    pub geoidal_separation_unit: Field,
    /// Age of Differential GPS data in seconds, null when DGPS is not used
    pub dgps_age: Field,
    /// Differential reference station ID
    pub dgps_station_id: Field,
    /// Fields past the documented layout
    #[nmea(trailing)]
    pub trailing: FieldSequence,
}

impl GGA {
    /// UTC time of the fix.
    pub fn fix_time(&self) -> Result<Option<time::Time>, DecodeError> {
        self.fix_time.parse()
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

    /// GPS quality indicator.
    pub fn fix_quality(&self) -> Result<Option<Quality>, DecodeError> {
        self.fix_quality.parse()
    }

    /// Number of satellites in use.
    pub fn satellite_count(&self) -> Result<Option<u8>, DecodeError> {
        self.satellite_count.parse()
    }

    /// Horizontal dilution of precision.
    pub fn hdop(&self) -> Result<Option<f32>, DecodeError> {
        self.hdop.parse()
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> Result<Option<f32>, DecodeError> {
        meters(&self.altitude, &self.altitude_unit)
    }

    /// Geoidal separation in meters.
    pub fn geoidal_separation(&self) -> Result<Option<f32>, DecodeError> {
        meters(&self.geoidal_separation, &self.geoidal_separation_unit)
    }

    /// Age of the differential GPS data.
    pub fn dgps_age(&self) -> Result<Option<Duration>, DecodeError> {
        let Some(seconds) = self.dgps_age.parse::<f32>()? else {
            return Ok(None);
        };

        Duration::try_from_secs_f32(seconds)
            .map(Some)
            .map_err(|_| DecodeError::InvalidField(self.dgps_age.to_string()))
    }

    /// Differential reference station ID.
    pub fn dgps_station_id(&self) -> Result<Option<u16>, DecodeError> {
        self.dgps_station_id.parse()
    }
}

// Receivers only ever send meters; a blank unit is accepted alongside `M`.
fn meters(value: &Field, unit: &Field) -> Result<Option<f32>, DecodeError> {
    match unit.value() {
        None | Some("M") => value.parse(),
        Some(unit) => Err(DecodeError::InvalidField(unit.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_fields;

    const BODY: &str = "001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M";

    #[test]
    fn test_gga_from_fields() {
        let cases = [",,", ",42.0,", ",,69", ",42.0,69", ",42.0,69,extra"];

        for input in cases {
            let fields = split_fields(&format!("{BODY}{input}"));
            let result = GGA::from_fields(fields);
            assert!(result.is_ok(), "Failed: {input:?}\n\t{result:?}");
        }

        let cases = ["", ",", ",42.0"];

        for input in cases {
            let fields = split_fields(&format!("{BODY}{input}"));
            let found = fields.len();
            assert_eq!(
                GGA::from_fields(fields),
                Err(DecodeError::FieldCount {
                    sentence: SentenceType::GGA,
                    expected: 14,
                    found,
                }),
                "Failed: {input:?}"
            );
        }
    }

    #[test]
    fn test_gga_values() {
        let fields = split_fields(&format!("{BODY},42.0,69,X,Y"));
        let gga = GGA::from_fields(fields).unwrap();

        assert_eq!(gga.fix_time(), Ok(Some(time::macros::time!(00:10:43))));
        assert_eq!(gga.fix_quality(), Ok(Some(Quality::GPSFix)));
        assert_eq!(gga.satellite_count(), Ok(Some(12)));
        assert_eq!(gga.hdop(), Ok(Some(0.98)));
        assert_eq!(gga.altitude(), Ok(Some(1113.0)));
        assert_eq!(gga.geoidal_separation(), Ok(Some(-21.3)));
        assert_eq!(gga.dgps_age(), Ok(Some(Duration::from_secs(42))));
        assert_eq!(gga.dgps_station_id(), Ok(Some(69)));
        assert_eq!(gga.trailing, vec![Field::from("X"), Field::from("Y")]);

        let position = gga.position().unwrap().unwrap();
        assert!((position.latitude - 44.069_006).abs() < 1e-6);
        assert!((position.longitude + 121.314_327).abs() < 1e-6);
    }

    #[test]
    fn test_gga_no_fix() {
        let fields = split_fields(",,,,,0,00,,,M,,M,,");
        let gga = GGA::from_fields(fields).unwrap();

        assert_eq!(gga.fix_time(), Ok(None));
        assert_eq!(gga.position(), Ok(None));
        assert_eq!(gga.fix_quality(), Ok(Some(Quality::NoFix)));
        assert_eq!(gga.satellite_count(), Ok(Some(0)));
        assert_eq!(gga.altitude(), Ok(None));
        assert_eq!(gga.dgps_age(), Ok(None));
        assert!(gga.trailing.is_empty());
    }
}
