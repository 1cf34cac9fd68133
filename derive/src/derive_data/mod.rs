//! Parsed derive input: the container shape plus its `#[json(...)]`
//! attributes, separated from the code generation in `impls`.

mod attributes;

pub(crate) use attributes::{FieldAttrs, TypeAttrs};

use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

// -----------------------------------------------------------------------------
// ReflectDerive

pub(crate) enum ReflectDerive {
    Struct(ReflectStruct),
    Enum(ReflectEnum),
}

pub(crate) struct ReflectMeta {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: TypeAttrs,
}

pub(crate) struct StructField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

pub(crate) struct ReflectStruct {
    pub meta: ReflectMeta,
    pub fields: Vec<StructField>,
}

pub(crate) struct ReflectEnum {
    pub meta: ReflectMeta,
    pub variants: Vec<syn::Ident>,
}

impl ReflectDerive {
    pub(crate) fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let meta = ReflectMeta {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            attrs: TypeAttrs::parse(&input.attrs)?,
        };

        match &input.data {
            Data::Struct(data) => {
                let Fields::Named(named) = &data.fields else {
                    return Err(syn::Error::new(
                        input.span(),
                        "`#[derive(Reflect)]` supports structs with named fields only",
                    ));
                };
                let fields = named
                    .named
                    .iter()
                    .map(|field| {
                        Ok(StructField {
                            // Named fields always have an ident.
                            ident: field.ident.clone().expect("named field"),
                            ty: field.ty.clone(),
                            attrs: FieldAttrs::parse(&field.attrs)?,
                        })
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Struct(ReflectStruct { meta, fields }))
            }
            Data::Enum(data) => {
                let variants = data
                    .variants
                    .iter()
                    .map(|variant| match &variant.fields {
                        Fields::Unit => Ok(variant.ident.clone()),
                        _ => Err(syn::Error::new(
                            variant.span(),
                            "`#[derive(Reflect)]` supports unit enum variants only",
                        )),
                    })
                    .collect::<syn::Result<Vec<_>>>()?;
                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(_) => Err(syn::Error::new(
                input.span(),
                "`#[derive(Reflect)]` does not support unions",
            )),
        }
    }
}
