//! # Field Splitter
//!
//! A validated sentence body is a comma-separated list of fields. The splitter
//! performs no interpretation: field position carries the meaning, and an
//! empty field (two consecutive delimiters) means "not provided".

use std::fmt;

use nom::{Parser, error::ErrorKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DecodeError, NmeaParse, parsing::consumed};

/// Ordered fields of a sentence, in transmission order.
pub type FieldSequence = Vec<Field>;

/// The raw content of one sentence field.
///
/// An empty field is a field the receiver did not provide. Conversions to
/// numbers and codes happen on demand through [`Field::parse`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Field(String);

impl Field {
    /// Returns the raw field content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the receiver left this field blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the content, or `None` for a blank field.
    pub fn value(&self) -> Option<&str> {
        Some(self.0.as_str()).filter(|value| !value.is_empty())
    }

    /// Converts the field content to `T`.
    ///
    /// A blank field yields `Ok(None)`. A field that does not parse as `T` in
    /// its entirety yields [`DecodeError::InvalidField`].
    ///
    /// ```rust
    /// use nmea0183_decoder::{DecodeError, Field};
    ///
    /// assert_eq!(Field::from("1.3").parse::<f32>(), Ok(Some(1.3)));
    /// assert_eq!(Field::from("").parse::<f32>(), Ok(None));
    /// assert_eq!(
    ///     Field::from("1.3.1").parse::<f32>(),
    ///     Err(DecodeError::InvalidField("1.3.1".to_owned()))
    /// );
    /// ```
    pub fn parse<T: NmeaParse>(&self) -> Result<Option<T>, DecodeError> {
        if self.is_empty() {
            return Ok(None);
        }

        consumed(T::parse, ErrorKind::Eof)
            .parse(self.0.as_str())
            .map(|(_, value)| Some(value))
            .map_err(|_| DecodeError::InvalidField(self.0.clone()))
    }

    /// Consumes the field, returning its raw content.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field(value.to_owned())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field(value)
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Field {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits a sentence body on `,`.
///
/// The result always holds at least one field, and holds one more field than
/// the body has delimiters.
///
/// ```rust
/// use nmea0183_decoder::split_fields;
///
/// let fields = split_fields("GPGSA,A,3,04,,09");
/// assert_eq!(fields.len(), 6);
/// assert_eq!(fields[0], "GPGSA");
/// assert!(fields[4].is_empty());
/// ```
pub fn split_fields(body: &str) -> FieldSequence {
    body.split(',').map(Field::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields() {
        let fields = split_fields("GPGGA,,,");
        assert_eq!(
            fields,
            vec![
                Field::from("GPGGA"),
                Field::default(),
                Field::default(),
                Field::default()
            ]
        );

        let fields = split_fields("GPTXT");
        assert_eq!(fields, vec![Field::from("GPTXT")]);

        let fields = split_fields("");
        assert_eq!(fields.len(), 1);
        assert!(fields[0].is_empty());
    }

    #[test]
    fn test_field_value() {
        assert_eq!(Field::from("A").value(), Some("A"));
        assert_eq!(Field::default().value(), None);
        assert_eq!(Field::from("4807.038"), "4807.038");
        assert_eq!(Field::from("N").to_string(), "N");
    }
}
