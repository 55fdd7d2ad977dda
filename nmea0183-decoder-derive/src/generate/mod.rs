use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Result};

use crate::generate::structs::Struct;

mod structs;

// Usage:
// #[derive(FromFields)]
// #[nmea(sentence(SentenceType::VTG))]
// pub struct VTG {
//     pub course_true: Field,
//     #[nmea(with(mode_indicator))]
//     pub mode: Option<ModeIndicator>,
//     #[nmea(ignore)]
//     pub computed: Option<u32>,
//     #[nmea(trailing)]
//     pub trailing: FieldSequence,
// }

pub fn generate_from_fields_impl(input: &DeriveInput) -> Result<TokenStream> {
    let generated = match &input.data {
        Data::Struct(datastruct) => {
            Struct::from_datastruct(&input.ident, datastruct, &input.attrs)?
        }
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new(
                input.ident.span(),
                "nmea0183-decoder-derive: FromFields can only be derived for structs",
            ));
        }
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.ident.span(),
            "nmea0183-decoder-derive: Generic sentence records are not supported",
        ));
    }

    let name = &input.ident;
    let sentence = &generated.config.sentence;
    let required = generated.required_fields();
    let body = generated.generate_from_fields_body();
    let fields_name = &generated.config.fields_name;

    Ok(quote! {
        impl nmea0183_decoder::FromFields for #name {
            const SENTENCE_TYPE: nmea0183_decoder::SentenceType = #sentence;
            const REQUIRED_FIELDS: usize = #required;

            fn from_fields(
                #fields_name: nmea0183_decoder::FieldSequence,
            ) -> ::core::result::Result<Self, nmea0183_decoder::DecodeError> {
                #body
            }
        }
    })
}
