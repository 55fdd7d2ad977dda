#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    self as nmea0183_decoder, DecodeError, Field, FieldSequence, FromFields, SentenceType,
    sentences::ModeIndicator,
};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8 9
///          |  |  |  |  |  |  |  | |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K,m*hh<CR><LF>
/// ```
///
/// The mode indicator (field 9) is read when the sentence is decoded; a value
/// outside `A`, `D`, `E`, `M`, `S`, `N` rejects the sentence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, FromFields)]
#[nmea(sentence(SentenceType::VTG))]
pub struct VTG {
    /// Course over ground, degrees true
    pub course_true: Field,
    /// `T`
    pub course_true_reference: Field,
    /// Course over ground, degrees magnetic
    pub course_magnetic: Field,
    /// `M`
    pub course_magnetic_reference: Field,
    /// Speed over ground in knots
    pub speed_knots: Field,
    /// `N`
    pub speed_knots_unit: Field,
    /// Speed over ground in km/h
    pub speed_kph: Field,
    /// `K`
    pub speed_kph_unit: Field,
    /// Mode indicator, `None` when blank
    #[nmea(with(mode_indicator))]
    pub mode: Option<ModeIndicator>,
    /// Fields past the documented layout
    #[nmea(trailing)]
    pub trailing: FieldSequence,
}

impl VTG {
    /// Course over ground, degrees true.
    pub fn course_over_ground_true(&self) -> Result<Option<f32>, DecodeError> {
        self.course_true.parse()
    }

    /// Course over ground, degrees magnetic.
    pub fn course_over_ground_magnetic(&self) -> Result<Option<f32>, DecodeError> {
        self.course_magnetic.parse()
    }

    /// Speed over ground in knots, derived from the km/h field when the knots
    /// field is blank.
    pub fn speed_over_ground(&self) -> Result<Option<f32>, DecodeError> {
        match self.speed_knots.parse::<f32>()? {
            Some(knots) => Ok(Some(knots)),
            None => Ok(self.speed_kph.parse::<f32>()?.map(|kph| kph / 1.852)),
        }
    }
}

fn mode_indicator(field: Field) -> Result<Option<ModeIndicator>, DecodeError> {
    field
        .parse()
        .map_err(|_| DecodeError::InvalidModeIndicator(field.into_string()))
}
