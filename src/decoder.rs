use time::UtcOffset;

use crate::{
    DecodeError, DecodedSentence, FieldSequence, FromFields, SentenceType, TimeReconciler,
    frame::frame,
    sentences::{GGA, GLL, GSA, GSV, RMC, UnknownSentence, VTG, ZDA},
    split_fields, verify_checksum,
};

/// Decodes single lines into [`DecodedSentence`]s.
///
/// A line goes through framing, checksum verification, field splitting and
/// per-type extraction, in that order. RMC and ZDA sentences additionally get
/// a [`Timestamp`](crate::Timestamp) from the decoder's [`TimeReconciler`].
///
/// The decoder holds no state between lines.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{DecodedSentence, Decoder};
/// use time::UtcOffset;
///
/// let decoder = Decoder::new(UtcOffset::from_hms(-5, 0, 0).unwrap());
/// let sentence = decoder
///     .decode("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A")
///     .unwrap();
///
/// let timestamp = sentence.timestamp().unwrap();
/// assert_eq!(timestamp.local.hour(), 7);
/// assert!(matches!(sentence, DecodedSentence::RMC(_)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    reconciler: TimeReconciler,
}

impl Decoder {
    /// Creates a decoder reporting local time at `local_offset`.
    ///
    /// See [`local_offset()`](crate::local_offset) for the offset of the
    /// running process.
    pub fn new(local_offset: UtcOffset) -> Self {
        Decoder {
            reconciler: TimeReconciler::new(local_offset),
        }
    }

    /// The reconciler used for RMC and ZDA timestamps.
    pub fn reconciler(&self) -> &TimeReconciler {
        &self.reconciler
    }

    /// Decodes one line.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; the error concerns this line only. A valid
    /// sentence of an unsupported type is not an error, it decodes to
    /// [`DecodedSentence::Unknown`].
    pub fn decode(&self, line: &str) -> Result<DecodedSentence, DecodeError> {
        let candidate = frame(line)?;
        verify_checksum(candidate.body, candidate.checksum)?;

        let mut fields = split_fields(candidate.body).into_iter();
        let address = fields.next().unwrap_or_default();

        self.decode_fields(address.as_str(), fields.collect())
    }

    /// Decodes the data fields of a checksum-verified sentence.
    ///
    /// `address` is the address field (`GPRMC`), `fields` are the fields that
    /// follow it.
    pub fn decode_fields(
        &self,
        address: &str,
        fields: FieldSequence,
    ) -> Result<DecodedSentence, DecodeError> {
        let sentence = match SentenceType::from_address(address) {
            SentenceType::GGA => DecodedSentence::GGA(GGA::from_fields(fields)?),
            SentenceType::GLL => DecodedSentence::GLL(GLL::from_fields(fields)?),
            SentenceType::GSA => DecodedSentence::GSA(GSA::from_fields(fields)?),
            SentenceType::GSV => DecodedSentence::GSV(GSV::from_fields(fields)?),
            SentenceType::RMC => {
                let mut rmc = RMC::from_fields(fields)?;
                rmc.timestamp = self.reconciler.reconcile_rmc(&rmc.fix_time, &rmc.date)?;
                DecodedSentence::RMC(rmc)
            }
            SentenceType::VTG => DecodedSentence::VTG(VTG::from_fields(fields)?),
            SentenceType::ZDA => {
                let mut zda = ZDA::from_fields(fields)?;
                zda.timestamp =
                    self.reconciler
                        .reconcile_zda(&zda.time, &zda.day, &zda.month, &zda.year)?;
                DecodedSentence::ZDA(zda)
            }
            SentenceType::Unknown(code) => DecodedSentence::Unknown(UnknownSentence {
                talker: address.get(..2).unwrap_or(address).to_owned(),
                code,
                fields,
            }),
        };

        Ok(sentence)
    }
}

/// Decodes one line, reporting local time in UTC.
///
/// Shorthand for `Decoder::default().decode(line)`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{DecodeError, decode};
///
/// let sentence = decode("$GPGGA,123456,data*41");
/// assert!(matches!(sentence, Err(DecodeError::FieldCount { .. })));
///
/// let sentence = decode("$GPGGA,123456,data*42");
/// assert!(matches!(sentence, Err(DecodeError::ChecksumMismatch { .. })));
/// ```
pub fn decode(line: &str) -> Result<DecodedSentence, DecodeError> {
    Decoder::default().decode(line)
}

#[cfg(test)]
mod tests {
    use time::macros::{datetime, offset};

    use super::*;
    use crate::{Field, FrameError, sentences::Status};

    #[test]
    fn test_decode_rmc() {
        let decoder = Decoder::new(offset!(+2));
        let sentence = decoder
            .decode("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n")
            .unwrap();

        let timestamp = sentence.timestamp().unwrap();
        assert_eq!(timestamp.utc, datetime!(1994-03-23 12:35:19 UTC));
        assert_eq!(timestamp.local, datetime!(1994-03-23 14:35:19 +2));
        assert_eq!(timestamp.local.offset(), offset!(+2));

        let DecodedSentence::RMC(rmc) = sentence else {
            panic!("Unexpected sentence type");
        };
        assert_eq!(rmc.status(), Ok(Some(Status::Valid)));
        assert_eq!(rmc.latitude, "4807.038");
        assert_eq!(rmc.latitude_hemisphere, "N");
        assert_eq!(rmc.longitude, "01131.000");
        assert_eq!(rmc.longitude_hemisphere, "E");
        assert_eq!(rmc.date, "230394");
    }

    #[test]
    fn test_decode_gsa() {
        let DecodedSentence::GSA(gsa) =
            decode("$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39").unwrap()
        else {
            panic!("Unexpected sentence type");
        };

        assert!(gsa.prns[2].is_empty());
        assert_eq!(gsa.prns[3], "09");
        assert!(gsa.prns[11].is_empty());
        assert_eq!(gsa.vdop, "2.1");
    }

    #[test]
    fn test_decode_unknown() {
        let sentence = decode("$GPXTE,A,A,0.67,L,N*6F").unwrap();

        assert_eq!(
            sentence,
            DecodedSentence::Unknown(UnknownSentence {
                talker: "GP".to_owned(),
                code: "XTE".to_owned(),
                fields: ["A", "A", "0.67", "L", "N"].into_iter().map(Field::from).collect(),
            })
        );
        assert_eq!(sentence.sentence_type(), SentenceType::Unknown("XTE".to_owned()));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode("$GPGGA,123456,data*41"),
            Err(DecodeError::FieldCount {
                sentence: SentenceType::GGA,
                expected: 14,
                found: 2,
            })
        );
        assert_eq!(
            decode("$GPGGA,123456,data*40"),
            Err(DecodeError::ChecksumMismatch {
                computed: 0x41,
                transmitted: 0x40,
            })
        );
        assert_eq!(
            decode("$GPGGA,123456,data*4"),
            Err(DecodeError::Frame(FrameError::MalformedChecksum))
        );
        assert_eq!(
            decode("GPGGA,123456,data*41"),
            Err(DecodeError::Frame(FrameError::MissingStartMarker))
        );
    }

    #[test]
    fn test_decode_fields() {
        let decoder = Decoder::default();
        let fields = crate::split_fields("160012.71,11,03,2004,-1,00");

        let sentence = decoder.decode_fields("GPZDA", fields).unwrap();
        let timestamp = sentence.timestamp().unwrap();
        assert_eq!(timestamp.utc, datetime!(2004-03-11 16:00:12.71 UTC));
    }
}
