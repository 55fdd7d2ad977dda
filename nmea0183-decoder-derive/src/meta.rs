use std::fmt::Display;

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{
    Attribute, Error, Expr, Ident, Lit, Result, Token, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Paren,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetaAttributeType {
    Ignore,
    Sentence,
    Trailing,
    With,
}

impl MetaAttributeType {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "ignore" => Some(Self::Ignore),
            "sentence" => Some(Self::Sentence),
            "trailing" => Some(Self::Trailing),
            "with" => Some(Self::With),
            _ => None,
        }
    }

    fn takes_argument(&self) -> bool {
        matches!(self, Self::Sentence | Self::With)
    }
}

impl Display for MetaAttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ignore => "ignore",
            Self::Sentence => "sentence",
            Self::Trailing => "trailing",
            Self::With => "with",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct MetaAttribute {
    pub r#type: MetaAttributeType,
    arg: Option<TokenStream>,
    span: Span,
}

impl MetaAttribute {
    pub fn is_top_level(&self) -> bool {
        self.r#type == MetaAttributeType::Sentence
    }

    pub fn arg(&self) -> Option<&TokenStream> {
        self.arg.as_ref()
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl Parse for MetaAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        let r#type = MetaAttributeType::from_ident(&ident).ok_or_else(|| {
            Error::new(ident.span(), "nmea0183-decoder-derive: Unknown nmea attribute")
        })?;

        let arg = if r#type.takes_argument() {
            Some(parse_argument::<Expr>(input)?)
        } else {
            None
        };

        Ok(Self {
            r#type,
            arg,
            span: ident.span(),
        })
    }
}

struct List<T: Parse>(Vec<T>);

impl<T: Parse> Parse for List<T> {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(List(
            Punctuated::<T, Token![,]>::parse_terminated(input)?
                .into_iter()
                .collect(),
        ))
    }
}

// Accepts `name = "value"` or `name(value)`.
fn parse_argument<P>(input: ParseStream) -> Result<TokenStream>
where
    P: Parse + ToTokens,
{
    if input.peek(Token![=]) {
        let _: Token![=] = input.parse()?;
        let value = Lit::parse(input)?;

        match value {
            Lit::Str(string) => {
                let parsed: P = string.parse()?;
                Ok(quote! { #parsed })
            }
            _ => Err(Error::new(
                value.span(),
                "nmea0183-decoder-derive: Unexpected type for nmea attribute content",
            )),
        }
    } else if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        let parsed: P = content.parse()?;
        Ok(quote! { #parsed })
    } else {
        Err(Error::new(
            input.span(),
            "nmea0183-decoder-derive: Expected '= <value>' or '(<value>)' for nmea attribute",
        ))
    }
}

fn collect_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    Ok(attrs
        .iter()
        .filter(|attr| attr.path().is_ident("nmea"))
        .map(|attr| attr.parse_args::<List<MetaAttribute>>())
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flat_map(|list| list.0)
        .collect())
}

pub fn parse_top_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    let mut seen = std::collections::HashSet::new();

    collect_attributes(attrs)?
        .into_iter()
        .map(|meta_attr| {
            if !meta_attr.is_top_level() {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-decoder-derive: Attribute `{}` is not allowed at the top level",
                        meta_attr.r#type
                    ),
                ));
            }

            if !seen.insert(meta_attr.r#type) {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-decoder-derive: Duplicate nmea attribute `{}`",
                        meta_attr.r#type
                    ),
                ));
            }

            Ok(meta_attr)
        })
        .collect()
}

pub fn parse_field_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    let attributes = collect_attributes(attrs)?;

    if let Some(meta_attr) = attributes.iter().find(|meta_attr| meta_attr.is_top_level()) {
        return Err(Error::new(
            meta_attr.span(),
            format!(
                "nmea0183-decoder-derive: Attribute `{}` is not allowed at the field level",
                meta_attr.r#type
            ),
        ));
    }

    // A field takes its value from exactly one place.
    if let [_, second, ..] = attributes.as_slice() {
        return Err(Error::new(
            second.span(),
            format!(
                "nmea0183-decoder-derive: Attribute `{}` cannot be combined with other nmea attributes",
                second.r#type
            ),
        ));
    }

    Ok(attributes)
}
