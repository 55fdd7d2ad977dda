//! # Sentence Records
//!
//! One record per supported sentence type, built from the data fields of a
//! validated sentence. Record members keep the raw [`Field`]s in transmission
//! order; accessor methods convert them on demand, so a blank field only
//! fails the accessor that asks for it.
//!
//! The closed code sets used by the records ([`Status`], [`Quality`],
//! [`SelectionMode`], [`FixMode`] and [`ModeIndicator`]) implement
//! [`NmeaParse`] and are read with [`Field::parse`].

mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod vtg;
mod zda;

pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gsv::{GSV, Satellite};
pub use rmc::RMC;
pub use vtg::VTG;
pub use zda::ZDA;

use std::fmt;

use nom::{Parser, error::ErrorKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError, Field, FieldSequence, IResult, NmeaParse, Timestamp,
    parsing::{consumed, digits},
};

/// Builds a sentence record from the data fields of a sentence.
///
/// The field sequence holds the data fields only, the address field is split
/// off by the decoder. Usually derived with `#[derive(FromFields)]`; [`GSA`]
/// and [`GSV`] implement it by hand for their variable-length blocks.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{FromFields, split_fields, sentences::GLL};
///
/// let fields = split_fields("4916.45,N,12311.12,W,225444,A");
/// let gll = GLL::from_fields(fields).unwrap();
/// assert_eq!(gll.fix_time, "225444");
/// ```
pub trait FromFields: Sized {
    /// The sentence type this record decodes.
    const SENTENCE_TYPE: SentenceType;

    /// The least number of data fields a sentence of this type carries.
    const REQUIRED_FIELDS: usize;

    /// Assigns `fields` to the record members.
    ///
    /// Fields past the documented layout are kept in the record's `trailing`
    /// member, never dropped.
    fn from_fields(fields: FieldSequence) -> Result<Self, DecodeError>;

    /// Fails with [`DecodeError::FieldCount`] if `fields` is shorter than
    /// [`REQUIRED_FIELDS`](Self::REQUIRED_FIELDS).
    fn check_field_count(fields: &[Field]) -> Result<(), DecodeError> {
        if fields.len() < Self::REQUIRED_FIELDS {
            return Err(DecodeError::FieldCount {
                sentence: Self::SENTENCE_TYPE,
                expected: Self::REQUIRED_FIELDS,
                found: fields.len(),
            });
        }

        Ok(())
    }
}

/// The sentence type, read from characters 3 to 5 of the address field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global Positioning System Fix Data
    GGA,
    /// Geographic Position - Latitude/Longitude
    GLL,
    /// GPS DOP and active satellites
    GSA,
    /// Satellites in View
    GSV,
    /// Recommended Minimum Navigation Information
    RMC,
    /// Track made good and Ground speed
    VTG,
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA,
    /// Any other type code
    Unknown(String),
}

impl SentenceType {
    /// Reads the type code of an address field such as `GPRMC`.
    ///
    /// The first two characters are the talker identifier. A short address
    /// yields whatever part of the code is present, as [`SentenceType::Unknown`].
    ///
    /// ```rust
    /// use nmea0183_decoder::SentenceType;
    ///
    /// assert_eq!(SentenceType::from_address("GNGGA"), SentenceType::GGA);
    /// assert_eq!(
    ///     SentenceType::from_address("GPXTE"),
    ///     SentenceType::Unknown("XTE".to_owned())
    /// );
    /// ```
    pub fn from_address(address: &str) -> Self {
        let end = address.len().min(5);
        Self::from_code(address.get(2..end).unwrap_or_default())
    }

    /// Looks up a 3-character sentence code such as `RMC`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "GGA" => Self::GGA,
            "GLL" => Self::GLL,
            "GSA" => Self::GSA,
            "GSV" => Self::GSV,
            "RMC" => Self::RMC,
            "VTG" => Self::VTG,
            "ZDA" => Self::ZDA,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// The 3-character sentence code.
    pub fn code(&self) -> &str {
        match self {
            Self::GGA => "GGA",
            Self::GLL => "GLL",
            Self::GSA => "GSA",
            Self::GSV => "GSV",
            Self::RMC => "RMC",
            Self::VTG => "VTG",
            Self::ZDA => "ZDA",
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for SentenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A sentence of a type the decoder does not model, kept verbatim.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownSentence {
    /// Talker identifier, e.g. `GP`
    pub talker: String,
    /// The unrecognized type code
    pub code: String,
    /// The data fields, in transmission order
    pub fields: FieldSequence,
}

/// A decoded sentence, tagged by type.
///
/// ```rust
/// use nmea0183_decoder::{DecodedSentence, SentenceType, decode};
///
/// let sentence = decode("$GPGLL,4916.45,N,12311.12,W,225444,A*31").unwrap();
/// assert_eq!(sentence.sentence_type(), SentenceType::GLL);
///
/// if let DecodedSentence::GLL(gll) = sentence {
///     assert_eq!(gll.status, "A");
/// }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSentence {
    /// Global Positioning System Fix Data
    GGA(GGA),
    /// Geographic Position - Latitude/Longitude
    GLL(GLL),
    /// GPS DOP and active satellites
    GSA(GSA),
    /// Satellites in View
    GSV(GSV),
    /// Recommended Minimum Navigation Information
    RMC(RMC),
    /// Track made good and Ground speed
    VTG(VTG),
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA(ZDA),
    /// Valid sentence of an unmodelled type
    Unknown(UnknownSentence),
}

impl DecodedSentence {
    /// The type of the decoded sentence.
    pub fn sentence_type(&self) -> SentenceType {
        match self {
            Self::GGA(_) => SentenceType::GGA,
            Self::GLL(_) => SentenceType::GLL,
            Self::GSA(_) => SentenceType::GSA,
            Self::GSV(_) => SentenceType::GSV,
            Self::RMC(_) => SentenceType::RMC,
            Self::VTG(_) => SentenceType::VTG,
            Self::ZDA(_) => SentenceType::ZDA,
            Self::Unknown(unknown) => SentenceType::Unknown(unknown.code.clone()),
        }
    }

    /// The reconciled timestamp of RMC and ZDA sentences, when time and date
    /// were both present.
    pub fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::RMC(rmc) => rmc.timestamp.as_ref(),
            Self::ZDA(zda) => zda.timestamp.as_ref(),
            _ => None,
        }
    }

    /// Fields transmitted past the documented layout of the sentence type.
    ///
    /// Every data field of an unknown sentence is trailing.
    pub fn trailing(&self) -> &[Field] {
        match self {
            Self::GGA(gga) => &gga.trailing,
            Self::GLL(gll) => &gll.trailing,
            Self::GSA(gsa) => &gsa.trailing,
            Self::GSV(gsv) => &gsv.trailing,
            Self::RMC(rmc) => &rmc.trailing,
            Self::VTG(vtg) => &vtg.trailing,
            Self::ZDA(zda) => &zda.trailing,
            Self::Unknown(unknown) => &unknown.fields,
        }
    }

    /// Turns an unknown sentence into [`DecodeError::UnknownSentenceType`].
    ///
    /// ```rust
    /// use nmea0183_decoder::{DecodeError, decode};
    ///
    /// let sentence = decode("$GPXTE,A,A,0.67,L,N*6F").unwrap();
    /// assert!(matches!(
    ///     sentence.require_known(),
    ///     Err(DecodeError::UnknownSentenceType(unknown)) if unknown.code == "XTE"
    /// ));
    /// ```
    pub fn require_known(self) -> Result<Self, DecodeError> {
        match self {
            Self::Unknown(unknown) => Err(DecodeError::UnknownSentenceType(unknown)),
            known => Ok(known),
        }
    }
}

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The character transmitted for this value.
            pub fn code(&self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl NmeaParse for $name {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

code_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

code_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GPSFix,
        /// 2 - Differential GPS fix
        '2' => DGPSFix,
        /// 3 - PPS fix
        '3' => PPSFix,
        /// 4 - Real Time Kinematic
        '4' => RTK,
        /// 5 - Float RTK
        '5' => FloatRTK,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

code_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
    }
}

code_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

code_enum! {
    /// VTG Mode Indicator
    pub enum ModeIndicator {
        /// A - Autonomous mode
        'A' => Autonomous,
        /// D - Differential mode
        'D' => Differential,
        /// E - Estimated (dead reckoning) mode
        'E' => Estimated,
        /// M - Manual input mode
        'M' => Manual,
        /// S - Simulator mode
        'S' => Simulator,
        /// N - Data not valid
        'N' => DataNotValid,
    }
}

/// A geographic position in signed decimal degrees.
///
/// South latitudes and west longitudes are negative.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees, -90 to 90
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180
    pub longitude: f64,
}

/// Reads a position from `ddmm.mm,N,dddmm.mm,E` fields.
///
/// All four fields blank means no position. A partial position is an error.
pub(crate) fn position(
    latitude: &Field,
    latitude_hemisphere: &Field,
    longitude: &Field,
    longitude_hemisphere: &Field,
) -> Result<Option<Position>, DecodeError> {
    let fields = [latitude, latitude_hemisphere, longitude, longitude_hemisphere];
    if fields.iter().all(|field| field.is_empty()) {
        return Ok(None);
    }

    Ok(Some(Position {
        latitude: coordinate(latitude, latitude_hemisphere, 2, 90.0, ('N', 'S'))?,
        longitude: coordinate(longitude, longitude_hemisphere, 3, 180.0, ('E', 'W'))?,
    }))
}

fn coordinate(
    value: &Field,
    hemisphere: &Field,
    degree_digits: u8,
    limit: f64,
    (positive, negative): (char, char),
) -> Result<f64, DecodeError> {
    let (_, (degrees, minutes)) = consumed((digits(degree_digits), f64::parse), ErrorKind::Eof)
        .parse(value.as_str())
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            DecodeError::InvalidField(value.to_string())
        })?;

    let degrees = degrees as f64 + minutes / 60.0;
    if !(0.0..60.0).contains(&minutes) || degrees > limit {
        return Err(DecodeError::InvalidField(value.to_string()));
    }

    match hemisphere.parse::<char>()? {
        Some(c) if c == positive => Ok(degrees),
        Some(c) if c == negative => Ok(-degrees),
        _ => Err(DecodeError::InvalidField(hemisphere.to_string())),
    }
}

/// Reads a signed value from a magnitude field and an `E`/`W` direction field.
///
/// West is negative. Both fields blank means no value.
pub(crate) fn east_west(value: &Field, direction: &Field) -> Result<Option<f32>, DecodeError> {
    let Some(magnitude) = value.parse::<f32>()? else {
        return match direction.value() {
            None => Ok(None),
            Some(direction) => Err(DecodeError::InvalidField(direction.to_owned())),
        };
    };

    match direction.parse::<char>()? {
        Some('E') => Ok(Some(magnitude)),
        Some('W') => Ok(Some(-magnitude)),
        _ => Err(DecodeError::InvalidField(direction.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &str) -> Field {
        Field::from(value)
    }

    #[test]
    fn test_sentence_type() {
        let cases = [
            ("GPGGA", SentenceType::GGA),
            ("GNRMC", SentenceType::RMC),
            ("IIVTG", SentenceType::VTG),
            ("GPXTE", SentenceType::Unknown("XTE".to_owned())),
            ("GPGS", SentenceType::Unknown("GS".to_owned())),
            ("GPGSVX", SentenceType::GSV),
        ];

        for (address, expected) in cases {
            assert_eq!(SentenceType::from_address(address), expected, "Failed: {address:?}");
        }

        assert_eq!(SentenceType::ZDA.to_string(), "ZDA");
    }

    #[test]
    fn test_code_enums() {
        assert_eq!(field("A").parse::<Status>(), Ok(Some(Status::Valid)));
        assert_eq!(field("V").parse::<Status>(), Ok(Some(Status::Invalid)));
        assert!(field("X").parse::<Status>().is_err());

        assert_eq!(field("1").parse::<Quality>(), Ok(Some(Quality::GPSFix)));
        assert_eq!(field("8").parse::<Quality>(), Ok(Some(Quality::Simulation)));
        assert!(field("9").parse::<Quality>().is_err());

        assert_eq!(field("3").parse::<FixMode>(), Ok(Some(FixMode::Fix3D)));
        assert_eq!(field("M").parse::<SelectionMode>(), Ok(Some(SelectionMode::Manual)));

        for code in ['A', 'D', 'E', 'M', 'S', 'N'] {
            let mode = field(&code.to_string()).parse::<ModeIndicator>().unwrap().unwrap();
            assert_eq!(mode.code(), code);
        }
        assert!(field("AD").parse::<ModeIndicator>().is_err());
    }

    #[test]
    fn test_position() {
        let position = position(
            &field("4807.038"),
            &field("N"),
            &field("01131.000"),
            &field("E"),
        )
        .unwrap()
        .unwrap();
        assert!((position.latitude - 48.1173).abs() < 1e-9);
        assert!((position.longitude - 11.516_666_666_666_667).abs() < 1e-9);

        let position = super::position(
            &field("4916.45"),
            &field("S"),
            &field("12311.12"),
            &field("W"),
        )
        .unwrap()
        .unwrap();
        assert!((position.latitude + 49.274_166_666_666_67).abs() < 1e-9);
        assert!((position.longitude + 123.185_333_333_333_33).abs() < 1e-9);
    }

    #[test]
    fn test_position_absent_or_invalid() {
        let blank = Field::default();
        assert_eq!(position(&blank, &blank, &blank, &blank), Ok(None));

        let cases = [
            ("4807.038", "", "01131.000", "E", ""),
            ("4807.038", "N", "01131.000", "X", "X"),
            ("4860.000", "N", "01131.000", "E", "4860.000"),
            ("48x7.038", "N", "01131.000", "E", "48x7.038"),
            ("", "N", "01131.000", "E", ""),
        ];

        for (lat, lat_hem, lon, lon_hem, offending) in cases {
            assert_eq!(
                position(&field(lat), &field(lat_hem), &field(lon), &field(lon_hem)),
                Err(DecodeError::InvalidField(offending.to_owned())),
                "Failed: {lat},{lat_hem},{lon},{lon_hem}"
            );
        }
    }

    #[test]
    fn test_east_west() {
        assert_eq!(east_west(&field("003.1"), &field("W")), Ok(Some(-3.1)));
        assert_eq!(east_west(&field("003.1"), &field("E")), Ok(Some(3.1)));
        assert_eq!(east_west(&field(""), &field("")), Ok(None));
        assert!(east_west(&field("003.1"), &field("")).is_err());
        assert!(east_west(&field(""), &field("W")).is_err());
    }
}
