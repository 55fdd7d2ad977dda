//! # Stream Framer
//!
//! Decides whether a raw line is a sentence candidate at all, and splits it
//! into the checksummed body and the transmitted checksum:
//!
//! ```text
//! $GPRMC,123519,A,...,003.1,W*6A\r\n
//!  \__________________________/ \/
//!              body          checksum
//! ```
//!
//! Lines are framed one at a time; nothing carries over between lines.

use nom::{
    AsChar, Parser,
    bytes::complete::{take_until, take_while_m_n},
    character::complete::char,
};

use crate::FrameError;

type FrameResult<'a, O> = crate::IResult<&'a str, O>;

/// A line that looks like a sentence but has not been checksum-verified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Two-character talker identifier, e.g. `GP`
    pub talker: &'a str,
    /// Everything between `$` and `*`, address field included
    pub body: &'a str,
    /// The characters after `*`
    pub checksum: &'a str,
}

/// Qualifies `line` as a sentence candidate.
///
/// Trailing control characters (the `\r\n` line terminator) are ignored.
///
/// # Errors
///
/// The checks run in this order, the first failing one is reported:
///
/// * [`FrameError::NonAscii`] - the line holds non-ASCII bytes
/// * [`FrameError::MissingStartMarker`] - the line does not begin with `$`
/// * [`FrameError::Proprietary`] - a `$P` proprietary sentence
/// * [`FrameError::MalformedAddress`] - `$` is not followed by an
///   alphanumeric 2-character talker identifier
/// * [`FrameError::MissingChecksumDelimiter`] - no `*`
/// * [`FrameError::DuplicateChecksumDelimiter`] - more than one `*`
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{FrameError, frame::frame};
///
/// let candidate = frame("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n").unwrap();
/// assert_eq!(candidate.talker, "GP");
/// assert_eq!(candidate.body, "GPGLL,4916.45,N,12311.12,W,225444,A");
/// assert_eq!(candidate.checksum, "31");
///
/// assert_eq!(frame("GPGLL,4916.45*31"), Err(FrameError::MissingStartMarker));
/// assert_eq!(frame("$GPGLL,4916.45"), Err(FrameError::MissingChecksumDelimiter));
/// ```
pub fn frame(line: &str) -> Result<Candidate<'_>, FrameError> {
    let line = line.trim_end_matches(|c: char| c.is_ascii_control());

    if !line.is_ascii() {
        return Err(FrameError::NonAscii);
    }

    let (sentence, _) = start_marker(line).map_err(|_| FrameError::MissingStartMarker)?;

    if sentence.starts_with('P') {
        return Err(FrameError::Proprietary);
    }

    let (_, talker) = talker(sentence).map_err(|_| FrameError::MalformedAddress)?;

    let (checksum, body) =
        checksum_delimiter(sentence).map_err(|_| FrameError::MissingChecksumDelimiter)?;

    if checksum.contains('*') {
        return Err(FrameError::DuplicateChecksumDelimiter);
    }

    Ok(Candidate {
        talker,
        body,
        checksum,
    })
}

fn start_marker(i: &str) -> FrameResult<'_, char> {
    char('$').parse(i)
}

fn talker(i: &str) -> FrameResult<'_, &str> {
    take_while_m_n(2, 2, AsChar::is_alphanum).parse(i)
}

/// Splits at the first `*`, consuming it.
fn checksum_delimiter(i: &str) -> FrameResult<'_, &str> {
    let (i, body) = take_until("*").parse(i)?;
    let (i, _) = char('*').parse(i)?;
    Ok((i, body))
}
