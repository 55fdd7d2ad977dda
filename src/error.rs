//! # Error Types
//!
//! This module defines the error types used throughout the decoder.
//!
//! Every [`DecodeError`] is local to the line that produced it: the stream
//! pipeline reports it and moves on to the next line. Only a failing line
//! source ([`StreamError`]) ends a stream.

use std::io;

use thiserror::Error;

use crate::sentences::{SentenceType, UnknownSentence};

/// Holds the result of the internal nom parsers.
///
/// The `Ok` side is a pair containing the remainder of the input and the produced
/// value. Parsers working on a single field are run through
/// [`consumed`](crate::parsing::consumed) so that a partially matched field is an
/// error rather than a silently truncated value.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, E>;

/// Represents all possible errors that can occur while decoding one line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The line is not a well-formed sentence candidate.
    ///
    /// Covers noise, partial reads and sentences the decoder does not frame,
    /// see [`FrameError`] for the reasons.
    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the checksum calculated from the sentence body and the
    /// checksum transmitted after the `*` delimiter.
    #[error("checksum mismatch: computed {computed:02X}, transmitted {transmitted:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence body
        computed: u8,
        /// The checksum found in the sentence
        transmitted: u8,
    },

    /// The sentence carries fewer fields than its type requires.
    #[error("{sentence} sentence has {found} fields, at least {expected} required")]
    FieldCount {
        /// Type of the sentence being decoded
        sentence: SentenceType,
        /// Minimum number of data fields for this type
        expected: usize,
        /// Number of data fields present
        found: usize,
    },

    /// A time or date field was present but could not be interpreted.
    ///
    /// Contains the offending field content.
    #[error("malformed timestamp field {0:?}")]
    MalformedTimestamp(String),

    /// The VTG mode indicator is not one of `A`, `D`, `E`, `M`, `S` or `N`.
    #[error("invalid mode indicator {0:?}")]
    InvalidModeIndicator(String),

    /// The sentence type is not one the decoder models.
    ///
    /// Only produced on request, see
    /// [`DecodedSentence::require_known`](crate::DecodedSentence::require_known);
    /// the decoder itself returns [`DecodedSentence::Unknown`](crate::DecodedSentence::Unknown).
    #[error("unknown sentence type {:?}", .0.code)]
    UnknownSentenceType(UnknownSentence),

    /// A field could not be converted to the requested type.
    ///
    /// Contains the field content that failed to convert.
    #[error("invalid field value {0:?}")]
    InvalidField(String),
}

/// Reasons a line is rejected before checksum validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The line contains non-ASCII characters.
    ///
    /// NMEA sentences must be ASCII-only for checksum calculation.
    #[error("line contains non-ASCII characters")]
    NonAscii,

    /// The line does not begin with `$`.
    #[error("missing '$' start marker")]
    MissingStartMarker,

    /// The `$` is not followed by a two-character talker ID.
    #[error("missing or malformed talker ID")]
    MalformedAddress,

    /// A proprietary `$P...` sentence, which the decoder does not model.
    #[error("proprietary sentence")]
    Proprietary,

    /// No `*` checksum delimiter.
    #[error("missing '*' checksum delimiter")]
    MissingChecksumDelimiter,

    /// More than one `*` checksum delimiter.
    #[error("more than one '*' checksum delimiter")]
    DuplicateChecksumDelimiter,

    /// The transmitted checksum is not exactly two hexadecimal digits.
    #[error("checksum is not two hexadecimal digits")]
    MalformedChecksum,

    /// Nothing between `$` and `*`.
    #[error("empty sentence body")]
    EmptyBody,
}

/// Errors that end a [`SentenceStream`](crate::stream::SentenceStream).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The line source failed, e.g. the device was disconnected.
    ///
    /// The caller decides whether to reconnect and start a new stream.
    #[error("line source failed: {0}")]
    Source(#[from] io::Error),
}
