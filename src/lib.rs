//! # NMEA 0183 Decoder
//!
//! This library turns a line-oriented NMEA 0183 stream, as produced by GPS
//! receivers, into typed sentence records with the format:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! Every line goes through the same pipeline:
//!
//! 1. [`frame`](frame::frame) decides whether the line is a sentence candidate
//! 2. [`verify_checksum`] checks the XOR checksum of the body
//! 3. [`split_fields`] splits the body into comma-separated [`Field`]s
//! 4. the address selects a sentence type, whose record is built with
//!    [`FromFields`]
//! 5. RMC and ZDA time fields are reconciled into a [`Timestamp`]
//!
//! Sentences of types the decoder does not know are still returned, as
//! [`DecodedSentence::Unknown`]. Failures only ever concern the line that
//! produced them.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_decoder::{DecodedSentence, decode};
//!
//! let sentence = decode("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n").unwrap();
//!
//! if let DecodedSentence::GLL(gll) = sentence {
//!     let position = gll.position().unwrap().unwrap();
//!     assert!((position.latitude - 49.274_166).abs() < 1e-5);
//!     assert!((position.longitude + 123.185_333).abs() < 1e-5);
//! }
//! ```
//!
//! Reading a whole stream:
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use nmea0183_decoder::stream::{Event, ReaderSource, SentenceStreamBuilder};
//!
//! let input = "$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n\
//!              garbage\r\n\
//!              $GPXTE,A,A,0.67,L,N*6F\r\n";
//!
//! let stream = SentenceStreamBuilder::new(ReaderSource::new(Cursor::new(input))).build();
//!
//! let mut sentences = 0;
//! let mut diagnostics = 0;
//! for event in stream {
//!     match event.unwrap() {
//!         Event::Sentence(_) => sentences += 1,
//!         Event::Diagnostic(_) => diagnostics += 1,
//!     }
//! }
//!
//! assert_eq!((sentences, diagnostics), (2, 1));
//! ```

mod checksum;
mod decoder;
pub mod error;
mod fields;
pub mod frame;
mod parse;
pub mod parsing;
pub mod sentences;
pub mod stream;
mod timestamp;

pub use checksum::{checksum, verify_checksum};
pub use decoder::{Decoder, decode};
pub use error::{DecodeError, FrameError, IResult, StreamError};
pub use fields::{Field, FieldSequence, split_fields};
pub use nmea0183_decoder_derive::FromFields;
pub use parse::NmeaParse;
pub use sentences::{DecodedSentence, FromFields, SentenceType};
pub use timestamp::{TimeReconciler, Timestamp, local_offset};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;

#[cfg(test)]
mod tests {
    mod decode;
    mod properties;
}
