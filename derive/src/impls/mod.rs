//! Code generation for the reflection traits.

mod enum_kind;
mod struct_kind;

pub(crate) use enum_kind::impl_enum;
pub(crate) use struct_kind::impl_struct;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse_quote;

use crate::derive_data::ReflectMeta;

/// Returns the container generics with reflection bounds added to every
/// type parameter.
pub(crate) fn reflect_generics(meta: &ReflectMeta) -> syn::Generics {
    let mut generics = meta.generics.clone();
    let params: Vec<syn::Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    if !params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::jsonbind::Reflect + ::jsonbind::info::Typed));
        }
    }
    generics
}

/// Generates the `Typed` implementation, storing the info in the cell
/// matching the container's genericity.
pub(crate) fn impl_trait_typed(
    meta: &ReflectMeta,
    generics: &syn::Generics,
    info_expr: TokenStream,
) -> TokenStream {
    let ident = &meta.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Const parameters also monomorphize, so any parameter at all means the
    // per-instantiation cell.
    let cell_body = if meta.generics.params.is_empty() {
        quote! {
            static CELL: ::jsonbind::impls::NonGenericTypeInfoCell =
                ::jsonbind::impls::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| #info_expr)
        }
    } else {
        quote! {
            static CELL: ::jsonbind::impls::GenericTypeInfoCell =
                ::jsonbind::impls::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| #info_expr)
        }
    };

    quote! {
        impl #impl_generics ::jsonbind::info::Typed for #ident #ty_generics #where_clause {
            fn type_info() -> &'static ::jsonbind::info::TypeInfo {
                #cell_body
            }
        }
    }
}

/// Generates the `Reflect` implementation for the given kind.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    generics: &syn::Generics,
    kind: &str,
) -> TokenStream {
    let ident = &meta.ident;
    let kind = format_ident!("{kind}");
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::jsonbind::Reflect for #ident #ty_generics #where_clause {
            fn type_info(&self) -> &'static ::jsonbind::info::TypeInfo {
                <Self as ::jsonbind::info::Typed>::type_info()
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #[inline]
            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }

            #[inline]
            fn reflect_ref(&self) -> ::jsonbind::ops::ReflectRef<'_> {
                ::jsonbind::ops::ReflectRef::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ::jsonbind::ops::ReflectMut<'_> {
                ::jsonbind::ops::ReflectMut::#kind(self)
            }

            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn ::jsonbind::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::jsonbind::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }
        }
    }
}
