//! # Checksum Validator
//!
//! The NMEA 0183 checksum is the XOR of every byte between the `$` start
//! marker and the `*` delimiter, transmitted as two hexadecimal digits.

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::hex_digit1,
    error::ErrorKind,
    number::complete::hex_u32,
};

use crate::{DecodeError, FrameError, IResult, parsing::consumed};

/// Calculates the NMEA 0183 checksum for the given sentence body.
///
/// The body is everything between the `$` prefix and the `*` delimiter,
/// excluding both.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::checksum;
///
/// let body = "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W";
/// assert_eq!(checksum(body), 0x6A);
/// ```
pub fn checksum(body: &str) -> u8 {
    body.as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Verifies the transmitted checksum of a sentence body.
///
/// # Arguments
///
/// * `body` - Sentence body, without `$` and `*`
/// * `transmitted` - The characters following the `*` delimiter
///
/// # Errors
///
/// * [`FrameError::MalformedChecksum`] if `transmitted` is not exactly two
///   hexadecimal digits
/// * [`FrameError::EmptyBody`] if `body` is empty
/// * [`DecodeError::ChecksumMismatch`] if the values differ
pub fn verify_checksum(body: &str, transmitted: &str) -> Result<(), DecodeError> {
    let (_, transmitted) =
        hex_checksum(transmitted).map_err(|_| FrameError::MalformedChecksum)?;

    if body.is_empty() {
        return Err(FrameError::EmptyBody.into());
    }

    let computed = checksum(body);
    if computed != transmitted {
        return Err(DecodeError::ChecksumMismatch {
            computed,
            transmitted,
        });
    }

    Ok(())
}

/// Parses exactly two hexadecimal digits.
fn hex_checksum(i: &str) -> IResult<&str, u8> {
    consumed(take(2u8), ErrorKind::Count)
        .and_then(consumed(hex_digit1, ErrorKind::IsA))
        .and_then(hex_u32)
        .map(|cc| cc as u8)
        .parse(i)
}
