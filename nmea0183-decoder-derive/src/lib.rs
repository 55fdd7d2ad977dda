//! # Derive macro for NMEA 0183 sentence records
//!
//! `nmea0183-decoder-derive` provides `#[derive(FromFields)]`, which maps the
//! comma-separated data fields of a sentence onto the members of a record
//! struct, in declaration order. It is meant to be used through
//! [`nmea0183-decoder`], which re-exports it.
//!
//! ## Attributes
//!
//! * `#[nmea(sentence(expr))]` (struct) - the `SentenceType` the record decodes.
//! * `#[nmea(with(path))]` (member) - convert the field with
//!   `fn(Field) -> Result<T, DecodeError>` instead of storing it as is.
//! * `#[nmea(ignore)]` (member) - not transmitted; filled in with
//!   `Default::default()`.
//! * `#[nmea(trailing)]` (member) - collects the fields past the documented
//!   layout. Must follow every positional member.
//!
//! The generated `from_fields` rejects sequences shorter than the number of
//! positional members with `DecodeError::FieldCount`.
//!
//! [`nmea0183-decoder`]: https://crates.io/crates/nmea0183-decoder

use generate::generate_from_fields_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod config;
mod generate;
mod meta;

#[proc_macro_derive(FromFields, attributes(nmea))]
pub fn derive_from_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_from_fields_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
