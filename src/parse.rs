//! # Field Conversion
//!
//! Turns the text of a single field into a typed value on demand.

use nom::{Parser, character::complete::anychar};

use crate::{IResult, timestamp::time_of_day};

/// Trait for converting the content of a single NMEA 0183 field.
///
/// Decoding keeps numeric fields as text, because receivers blank fields they
/// cannot fill (no fix yet) and a blank must not fail the whole sentence.
/// `NmeaParse` is what turns a field into a typed value once the caller asks for
/// it, usually through [`Field::parse`](crate::Field::parse), which also takes
/// care of empty fields and of rejecting trailing garbage.
///
/// Implementations are provided for the primitive integer and float types,
/// `char`, `time::Time` and the closed code enumerations of the
/// [`sentences`](crate::sentences) module.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::{IResult, NmeaParse};
///
/// let result: IResult<_, _> = u8::parse("42");
/// assert_eq!(result, Ok(("", 42)));
///
/// let result: IResult<_, _> = f32::parse("1.3");
/// assert_eq!(result, Ok(("", 1.3)));
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_decoder::{Field, IResult, NmeaParse};
/// use nom::{Parser, character::complete::one_of};
///
/// #[derive(Debug, PartialEq)]
/// enum Unit {
///     Meters,
///     Feet,
/// }
///
/// impl NmeaParse for Unit {
///     fn parse(i: &str) -> IResult<&str, Self> {
///         one_of("Mf")
///             .map(|c| if c == 'M' { Unit::Meters } else { Unit::Feet })
///             .parse(i)
///     }
/// }
///
/// assert_eq!(Field::from("M").parse::<Unit>(), Ok(Some(Unit::Meters)));
/// assert_eq!(Field::from("").parse::<Unit>(), Ok(None));
/// assert!(Field::from("x").parse::<Unit>().is_err());
/// ```
pub trait NmeaParse: Sized {
    /// Parses the input and returns a result.
    ///
    /// # Arguments
    ///
    /// * `input` - The field content to parse into `Self`.
    ///
    /// # Returns
    ///
    /// Returns an [`IResult`] containing:
    /// - On success: A tuple of `(remaining_input, parsed_value)`.
    /// - On failure: a nom error pointing at the offending input.
    fn parse(i: &str) -> IResult<&str, Self>;
}

macro_rules! impl_ints_type {
    ($($t:tt),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::character::complete::$t.parse(i)
            }
        }
    )*)
}

impl_ints_type!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_float_type {
    ($($t:ty, $p:ident),*) => ($(
        impl NmeaParse for $t {
            fn parse(i: &str) -> IResult<&str, Self> {
                nom::number::complete::$p.parse(i)
            }
        }
    )*)
}

impl_float_type!(f32, float, f64, double);

impl NmeaParse for char {
    fn parse(i: &str) -> IResult<&str, Self> {
        anychar.parse(i)
    }
}

impl NmeaParse for time::Time {
    fn parse(i: &str) -> IResult<&str, Self> {
        time_of_day(i)
    }
}
