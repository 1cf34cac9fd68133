use syn::{Attribute, LitStr};

use crate::JSON_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttrs

/// Container-level `#[json(...)]` attributes.
#[derive(Default)]
pub(crate) struct TypeAttrs {
    pub no_default: bool,
    pub from_str: bool,
    pub from_scalar: Option<syn::Path>,
}

impl TypeAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(JSON_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("no_default") {
                    out.no_default = true;
                } else if meta.path.is_ident("from_str") {
                    out.from_str = true;
                } else if meta.path.is_ident("from_scalar") {
                    out.from_scalar = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unknown container attribute"));
                }
                Ok(())
            })?;
        }
        if out.from_str && out.from_scalar.is_some() {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`from_str` and `from_scalar` are mutually exclusive",
            ));
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// FieldAttrs

/// Field-level `#[json(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub aliases: Vec<String>,
    pub skip_serializing: bool,
    pub skip_deserializing: bool,
    pub date_format: Option<String>,
    pub adapter: Option<syn::Path>,
}

impl FieldAttrs {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(JSON_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("alias") {
                    out.aliases.push(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("skip") {
                    out.skip_serializing = true;
                    out.skip_deserializing = true;
                } else if meta.path.is_ident("skip_serializing") {
                    out.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    out.skip_deserializing = true;
                } else if meta.path.is_ident("date_format") {
                    out.date_format = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("adapter") {
                    out.adapter = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("unknown field attribute"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}
