use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed, reflect_generics};
use crate::derive_data::ReflectEnum;

/// Implements `Typed`, `Reflect` and `Enum` for a unit-variant enum.
pub(crate) fn impl_enum(input: &ReflectEnum) -> TokenStream {
    let meta = &input.meta;
    let generics = reflect_generics(meta);

    let names: Vec<String> = input
        .variants
        .iter()
        .map(|variant| variant.to_string())
        .collect();
    let variants = &input.variants;

    let info_expr = quote! {
        ::jsonbind::info::TypeInfo::Enum(::jsonbind::info::EnumInfo::new::<Self>(
            &[#(#names),*],
            |name| match name {
                #( #names => ::core::option::Option::Some(
                    ::std::boxed::Box::new(Self::#variants) as ::std::boxed::Box<dyn ::jsonbind::Reflect>,
                ), )*
                _ => ::core::option::Option::None,
            },
        ))
    };

    let typed_tokens = impl_trait_typed(meta, &generics, info_expr);
    let reflect_tokens = impl_trait_reflect(meta, &generics, "Enum");

    let ident = &meta.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let indices: Vec<usize> = (0..input.variants.len()).collect();

    quote! {
        #typed_tokens

        #reflect_tokens

        impl #impl_generics ::jsonbind::ops::Enum for #ident #ty_generics #where_clause {
            fn variant_name(&self) -> &'static str {
                match self {
                    #( Self::#variants => #names, )*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #( Self::#variants => #indices, )*
                }
            }
        }
    }
}
