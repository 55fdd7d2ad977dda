#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    DecodeError, Field, FieldSequence, FromFields, SentenceType,
    sentences::{FixMode, SelectionMode},
};

/// Number of PRN slots in the satellite block.
const PRN_SLOTS: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// Some receivers truncate the PRN block instead of sending blank slots. The
/// three DOP fields are then the last three fields and the missing slots are
/// blank.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct GSA {
    /// Selection mode, `A` or `M`
    pub selection_mode: Field,
    /// Fix mode, 1 to 3
    pub fix_mode: Field,
    /// PRNs of the satellites used in the solution, blank slots unused
    pub prns: [Field; PRN_SLOTS],
    /// Position Dilution of Precision
    pub pdop: Field,
    /// Horizontal Dilution of Precision
    pub hdop: Field,
    /// Vertical Dilution of Precision
    pub vdop: Field,
    /// Fields past the documented layout
    pub trailing: FieldSequence,
}

impl FromFields for GSA {
    const SENTENCE_TYPE: SentenceType = SentenceType::GSA;

    /// Selection mode, fix mode and the three DOPs; the PRN block may be cut short.
    const REQUIRED_FIELDS: usize = 5;

    fn from_fields(fields: FieldSequence) -> Result<Self, DecodeError> {
        Self::check_field_count(&fields)?;

        let prn_count = (fields.len() - 5).min(PRN_SLOTS);
        let mut fields = fields.into_iter();

        let selection_mode = fields.next().unwrap_or_default();
        let fix_mode = fields.next().unwrap_or_default();

        let mut prns: [Field; PRN_SLOTS] = Default::default();
        for (slot, prn) in prns.iter_mut().zip(fields.by_ref().take(prn_count)) {
            *slot = prn;
        }

        Ok(Self {
            selection_mode,
            fix_mode,
            prns,
            pdop: fields.next().unwrap_or_default(),
            hdop: fields.next().unwrap_or_default(),
            vdop: fields.next().unwrap_or_default(),
            trailing: fields.collect(),
        })
    }
}

impl GSA {
    /// Manual or automatic 2D/3D selection.
    pub fn selection_mode(&self) -> Result<Option<SelectionMode>, DecodeError> {
        self.selection_mode.parse()
    }

    /// No fix, 2D or 3D.
    pub fn fix_mode(&self) -> Result<Option<FixMode>, DecodeError> {
        self.fix_mode.parse()
    }

    /// PRNs of the satellites used in the solution, skipping blank slots.
    pub fn fix_satellites(&self) -> Result<heapless::Vec<u8, PRN_SLOTS>, DecodeError> {
        let mut satellites = heapless::Vec::new();
        for prn in &self.prns {
            if let Some(prn) = prn.parse::<u8>()? {
                // At most PRN_SLOTS values come out of PRN_SLOTS slots.
                let _ = satellites.push(prn);
            }
        }

        Ok(satellites)
    }

    /// Position dilution of precision.
    pub fn pdop(&self) -> Result<Option<f32>, DecodeError> {
        self.pdop.parse()
    }

    /// Horizontal dilution of precision.
    pub fn hdop(&self) -> Result<Option<f32>, DecodeError> {
        self.hdop.parse()
    }

    /// Vertical dilution of precision.
    pub fn vdop(&self) -> Result<Option<f32>, DecodeError> {
        self.vdop.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_fields;

    #[test]
    fn test_gsa_from_fields() {
        let gsa = GSA::from_fields(split_fields("A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1")).unwrap();

        assert_eq!(gsa.selection_mode(), Ok(Some(SelectionMode::Automatic)));
        assert_eq!(gsa.fix_mode(), Ok(Some(FixMode::Fix3D)));
        assert_eq!(gsa.prns[0], "04");
        assert!(gsa.prns[2].is_empty());
        assert_eq!(gsa.fix_satellites().unwrap().as_slice(), &[4, 5, 9, 12, 24]);
        assert_eq!(gsa.pdop(), Ok(Some(2.5)));
        assert_eq!(gsa.hdop(), Ok(Some(1.3)));
        assert_eq!(gsa.vdop(), Ok(Some(2.1)));
        assert!(gsa.trailing.is_empty());
    }

    #[test]
    fn test_gsa_truncated_prn_block() {
        let gsa = GSA::from_fields(split_fields("A,3,04,05,09,2.5,1.3,2.1")).unwrap();

        assert_eq!(gsa.fix_satellites().unwrap().as_slice(), &[4, 5, 9]);
        assert!(gsa.prns[3..].iter().all(Field::is_empty));
        assert_eq!(gsa.pdop(), Ok(Some(2.5)));
        assert_eq!(gsa.vdop(), Ok(Some(2.1)));

        let gsa = GSA::from_fields(split_fields("M,1,,,")).unwrap();
        assert!(gsa.prns.iter().all(Field::is_empty));
        assert_eq!(gsa.fix_mode(), Ok(Some(FixMode::NoFix)));
        assert_eq!(gsa.hdop(), Ok(None));
    }

    #[test]
    fn test_gsa_trailing() {
        // NMEA 4.11 system ID
        let gsa =
            GSA::from_fields(split_fields("A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1,1")).unwrap();

        assert_eq!(gsa.vdop(), Ok(Some(2.1)));
        assert_eq!(gsa.trailing, vec![Field::from("1")]);
    }

    #[test]
    fn test_gsa_field_count() {
        assert_eq!(
            GSA::from_fields(split_fields("A,3,1.3,2.1")),
            Err(DecodeError::FieldCount {
                sentence: SentenceType::GSA,
                expected: 5,
                found: 4,
            })
        );
    }
}
