use proc_macro2::{Span, TokenStream};
use syn::{Error, Ident, Result};

use crate::meta::{MetaAttribute, MetaAttributeType};

pub struct Config {
    pub fields_name: Ident,
    pub sentence: TokenStream,
}

impl Config {
    pub fn from_meta_attributes(name: &Ident, attribute_list: &[MetaAttribute]) -> Result<Self> {
        let sentence = attribute_list
            .iter()
            .find(|meta| meta.r#type == MetaAttributeType::Sentence)
            .and_then(|meta| meta.arg().cloned())
            .ok_or_else(|| {
                Error::new(
                    name.span(),
                    "nmea0183-decoder-derive: Missing `#[nmea(sentence(...))]` attribute",
                )
            })?;

        Ok(Self {
            fields_name: Ident::new("nmea_fields", Span::call_site()),
            sentence,
        })
    }
}
