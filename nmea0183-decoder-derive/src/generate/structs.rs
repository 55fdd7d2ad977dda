use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DataStruct, Error, Fields, Ident, Result, spanned::Spanned};

use crate::{
    config::Config,
    meta::{self, MetaAttributeType},
};

/// Where a struct member takes its value from.
enum Source {
    /// The next field, as is.
    Field,
    /// The next field, passed through a conversion function.
    With(TokenStream),
    /// Not transmitted; starts out as `Default::default()`.
    Ignore,
    /// Every field left after the documented layout.
    Trailing,
}

struct Member {
    name: Ident,
    source: Source,
}

pub struct Struct {
    pub config: Config,
    members: Vec<Member>,
}

impl Struct {
    pub fn from_datastruct(
        name: &Ident,
        datastruct: &DataStruct,
        attributes: &[Attribute],
    ) -> Result<Self> {
        let attributes = meta::parse_top_level_attributes(attributes)?;
        let config = Config::from_meta_attributes(name, &attributes)?;

        let Fields::Named(fields) = &datastruct.fields else {
            return Err(Error::new(
                name.span(),
                "nmea0183-decoder-derive: FromFields requires a struct with named fields",
            ));
        };

        let mut members = Vec::with_capacity(fields.named.len());
        let mut trailing_seen = false;

        for field in &fields.named {
            let attributes = meta::parse_field_level_attributes(&field.attrs)?;
            let source = match attributes.first() {
                None => Source::Field,
                Some(attribute) => match attribute.r#type {
                    MetaAttributeType::Ignore => Source::Ignore,
                    MetaAttributeType::Trailing => Source::Trailing,
                    MetaAttributeType::With => {
                        Source::With(attribute.arg().cloned().unwrap_or_default())
                    }
                    MetaAttributeType::Sentence => unreachable!("rejected at field level"),
                },
            };

            match source {
                Source::Trailing if trailing_seen => {
                    return Err(Error::new(
                        field.span(),
                        "nmea0183-decoder-derive: Only one member can be marked `trailing`",
                    ));
                }
                Source::Trailing => trailing_seen = true,
                Source::Field | Source::With(_) if trailing_seen => {
                    return Err(Error::new(
                        field.span(),
                        "nmea0183-decoder-derive: The `trailing` member must come after every field member",
                    ));
                }
                _ => {}
            }

            // Named fields always carry an identifier.
            let Some(name) = field.ident.clone() else {
                return Err(Error::new(field.span(), "nmea0183-decoder-derive: Unnamed field"));
            };

            members.push(Member { name, source });
        }

        Ok(Self { config, members })
    }

    /// Number of members filled from positional fields.
    pub fn required_fields(&self) -> usize {
        self.members
            .iter()
            .filter(|member| matches!(member.source, Source::Field | Source::With(_)))
            .count()
    }

    pub fn generate_from_fields_body(&self) -> TokenStream {
        let fields_name = &self.config.fields_name;

        let assignments = self.members.iter().map(|member| {
            let name = &member.name;
            match &member.source {
                Source::Field => quote! {
                    let #name = #fields_name.next().unwrap_or_default();
                },
                Source::With(function) => quote! {
                    let #name = (#function)(#fields_name.next().unwrap_or_default())?;
                },
                Source::Ignore => quote! {
                    let #name = ::core::default::Default::default();
                },
                Source::Trailing => quote! {
                    let #name = #fields_name.by_ref().collect();
                },
            }
        });
        let names = self.members.iter().map(|member| &member.name);

        quote! {
            <Self as nmea0183_decoder::FromFields>::check_field_count(&#fields_name)?;

            #[allow(unused_mut)]
            let mut #fields_name = #fields_name.into_iter();
            #(#assignments)*

            ::core::result::Result::Ok(Self { #(#names),* })
        }
    }
}
