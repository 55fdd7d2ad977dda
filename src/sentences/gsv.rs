#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DecodeError, Field, FieldSequence, FromFields, SentenceType};

/// Most satellites a single GSV sentence describes.
const SATELLITES_PER_SENTENCE: usize = 4;

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...*hh<CR><LF>
/// ```
///
/// A full report spans `total_messages` sentences, each describing up to four
/// satellites. The number of blocks a sentence carries follows from the
/// satellites-in-view count and the message number: the last sentence of a
/// report carries the remainder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSV {
    /// Total number of GSV sentences in this report
    pub total_messages: Field,
    /// Number of this sentence, from 1
    pub message_number: Field,
    /// Total number of satellites in view
    pub satellites_in_view: Field,
    /// Satellite blocks carried by this sentence
    pub satellites: heapless::Vec<Satellite, SATELLITES_PER_SENTENCE>,
    /// Fields past the satellite blocks
    pub trailing: FieldSequence,
}

/// Satellite information used in [`GSV`] sentences
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Satellite {
    /// Satellite PRN number
    pub prn: Field,
    /// Elevation in degrees, 90 maximum
    pub elevation: Field,
    /// Azimuth in degrees true, 000 to 359
    pub azimuth: Field,
    /// SNR in dB, 00 to 99, blank when not tracking
    pub snr: Field,
}

impl Satellite {
    /// Satellite PRN number.
    pub fn prn(&self) -> Result<Option<u8>, DecodeError> {
        self.prn.parse()
    }

    /// Elevation in degrees, 0 to 90.
    pub fn elevation(&self) -> Result<Option<u8>, DecodeError> {
        self.elevation.parse()
    }

    /// Azimuth in degrees true, 0 to 359.
    pub fn azimuth(&self) -> Result<Option<u16>, DecodeError> {
        self.azimuth.parse()
    }

    /// Signal to noise ratio in dB, `None` when not tracking.
    pub fn snr(&self) -> Result<Option<u8>, DecodeError> {
        self.snr.parse()
    }
}

impl FromFields for GSV {
    const SENTENCE_TYPE: SentenceType = SentenceType::GSV;

    /// Header and one satellite block. A sentence reporting no satellites in
    /// view only needs the header.
    const REQUIRED_FIELDS: usize = 7;

    fn from_fields(fields: FieldSequence) -> Result<Self, DecodeError> {
        let count = |index: usize| {
            fields
                .get(index)
                .and_then(|field| field.parse::<u8>().ok().flatten())
                .map(usize::from)
        };
        let in_view = count(2);
        let number = count(1);

        let required = if in_view == Some(0) { 3 } else { Self::REQUIRED_FIELDS };
        if fields.len() < required {
            return Err(DecodeError::FieldCount {
                sentence: Self::SENTENCE_TYPE,
                expected: required,
                found: fields.len(),
            });
        }

        let blocks = match (in_view, number) {
            (Some(in_view), Some(number)) if number > 0 => in_view
                .saturating_sub(SATELLITES_PER_SENTENCE * (number - 1))
                .min(SATELLITES_PER_SENTENCE),
            // Without a usable count, take whatever complete blocks are present.
            _ => ((fields.len() - 3) / 4).min(SATELLITES_PER_SENTENCE),
        };

        let mut fields = fields.into_iter();
        let total_messages = fields.next().unwrap_or_default();
        let message_number = fields.next().unwrap_or_default();
        let satellites_in_view = fields.next().unwrap_or_default();

        let mut satellites = heapless::Vec::new();
        for _ in 0..blocks {
            let satellite = Satellite {
                prn: fields.next().unwrap_or_default(),
                elevation: fields.next().unwrap_or_default(),
                azimuth: fields.next().unwrap_or_default(),
                snr: fields.next().unwrap_or_default(),
            };
            // blocks never exceeds the capacity
            let _ = satellites.push(satellite);
        }

        Ok(Self {
            total_messages,
            message_number,
            satellites_in_view,
            satellites,
            trailing: fields.collect(),
        })
    }
}

impl GSV {
    /// Number of GSV sentences in this cycle.
    pub fn total_messages(&self) -> Result<Option<u8>, DecodeError> {
        self.total_messages.parse()
    }

    /// Position of this sentence in the cycle, from 1.
    pub fn message_number(&self) -> Result<Option<u8>, DecodeError> {
        self.message_number.parse()
    }

    /// Total number of satellites in view.
    pub fn satellites_in_view(&self) -> Result<Option<u8>, DecodeError> {
        self.satellites_in_view.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_fields;

    #[test]
    fn test_gsv_from_fields() {
        let cases = [
            ("1,1,00", 0),
            ("1,1,00,", 0),
            ("1,1,01,05,45,120,38", 1),
            ("1,1,01,05,45,120,", 1),
            ("1,1,01,11,,,", 1),
            ("1,1,04,01,60,150,45,02,30,090,30,03,70,270,50,04,10,010,20", 4),
            ("1,1,03,01,60,150,45,02,30,,30,03,,270,", 3),
            ("3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00", 4),
            ("3,3,11,22,42,067,42,24,14,311,43,27,05,244,00", 3),
        ];

        for (input, blocks) in cases {
            let gsv = GSV::from_fields(split_fields(input)).unwrap();
            assert_eq!(gsv.satellites.len(), blocks, "Failed: {input:?}");
            assert!(gsv.trailing.iter().all(Field::is_empty), "Failed: {input:?}");
        }
    }

    #[test]
    fn test_gsv_satellites() {
        let gsv = GSV::from_fields(split_fields(
            "2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45",
        ))
        .unwrap();

        assert_eq!(gsv.total_messages(), Ok(Some(2)));
        assert_eq!(gsv.message_number(), Ok(Some(1)));
        assert_eq!(gsv.satellites_in_view(), Ok(Some(8)));

        let satellite = &gsv.satellites[2];
        assert_eq!(satellite.prn(), Ok(Some(12)));
        assert_eq!(satellite.elevation(), Ok(Some(7)));
        assert_eq!(satellite.azimuth(), Ok(Some(344)));
        assert_eq!(satellite.snr(), Ok(Some(39)));
    }

    #[test]
    fn test_gsv_truncated_blocks() {
        // Four satellites declared, one and a half transmitted.
        let gsv = GSV::from_fields(split_fields("1,1,04,05,45,120,38,06,30")).unwrap();

        assert_eq!(gsv.satellites.len(), 4);
        assert_eq!(gsv.satellites[1].prn, "06");
        assert!(gsv.satellites[1].azimuth.is_empty());
        assert_eq!(gsv.satellites[3], Satellite::default());
    }

    #[test]
    fn test_gsv_trailing() {
        // NMEA 4.11 signal ID after the last block
        let gsv = GSV::from_fields(split_fields("3,3,09,22,42,067,42,1")).unwrap();

        assert_eq!(gsv.satellites.len(), 1);
        assert_eq!(gsv.trailing, vec![Field::from("1")]);
    }

    #[test]
    fn test_gsv_field_count() {
        let cases = [("1,1,01,05,45,120", 7, 6), ("1,1", 7, 2), ("1,1,", 7, 3)];

        for (input, expected, found) in cases {
            assert_eq!(
                GSV::from_fields(split_fields(input)),
                Err(DecodeError::FieldCount {
                    sentence: SentenceType::GSV,
                    expected,
                    found,
                }),
                "Failed: {input:?}"
            );
        }
    }
}
