//! # Parsing Utilities
//!
//! nom combinators shared by the checksum validator, the on-demand field
//! conversions and the time reconciler.

use nom::{
    AsChar, Err, Input, Mode, OutputMode, PResult, Parser, ToUsize,
    bytes::complete::take,
    error::{ErrorKind, ParseError},
};

/// Ensures that the parser consumes all input.
///
/// Fields are parsed one at a time, so a parser that leaves input behind has
/// only matched a prefix of the field (`"12x"` parsed as `u8`) and must fail.
///
/// # Arguments
///
/// * `f` - The parser to run
/// * `e` - Error kind to return if input is not fully consumed
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::parsing::consumed;
/// use nom::{IResult, Parser, bytes::complete::take, error::ErrorKind};
///
/// // Parse all 3 bytes
/// let mut parser = consumed(take(3u8), ErrorKind::Eof);
/// let result: IResult<_, _> = parser.parse("abc");
/// assert!(result.is_ok());
///
/// // This would fail because not all input is consumed
/// let result = parser.parse("abcd");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}

/// Parses exactly `count` ASCII decimal digits into a number.
///
/// Unlike `nom::character::complete::u32`, the width is fixed: `"0930"` read
/// with `digits(2)` yields `9` and leaves `"30"`. Used for the packed
/// `hhmmss` and `ddmmyy` layouts and the degree part of coordinates.
///
/// # Examples
///
/// ```rust
/// use nmea0183_decoder::parsing::digits;
/// use nom::{IResult, Parser};
///
/// let result: IResult<_, _> = digits(2u8).parse("0930");
/// assert_eq!(result, Ok(("30", 9)));
///
/// let result: IResult<_, u32> = digits(2u8).parse("9");
/// assert!(result.is_err());
/// ```
pub fn digits<I, E, C>(count: C) -> impl Parser<I, Output = u32, Error = E>
where
    I: Input,
    <I as Input>::Item: AsChar,
    E: ParseError<I>,
    C: ToUsize,
{
    let count = count.to_usize();
    move |i: I| -> nom::IResult<I, u32, E> {
        let (rest, digits) = take::<_, I, E>(count).parse(i.clone())?;

        digits
            .iter_elements()
            .try_fold(0u32, |value, c| {
                c.as_char()
                    .to_digit(10)
                    .map(|digit| value * 10 + digit)
            })
            .map(|value| (rest, value))
            .ok_or_else(|| Err::Error(E::from_error_kind(i, ErrorKind::Digit)))
    }
}
