use proc_macro2::TokenStream;
use quote::quote;

use super::{impl_trait_reflect, impl_trait_typed, reflect_generics};
use crate::derive_data::{ReflectStruct, StructField};

/// Implements `Typed`, `Reflect` and `Struct` for a named-field struct.
pub(crate) fn impl_struct(input: &ReflectStruct) -> TokenStream {
    let meta = &input.meta;
    let generics = reflect_generics(meta);

    let typed_tokens = impl_trait_typed(meta, &generics, struct_info_expr(input));
    let reflect_tokens = impl_trait_reflect(meta, &generics, "Struct");
    let struct_tokens = impl_trait_struct(input, &generics);

    quote! {
        #typed_tokens

        #reflect_tokens

        #struct_tokens
    }
}

/// The `TypeInfo::Struct(...)` expression: the field table plus the
/// construction hooks.
fn struct_info_expr(input: &ReflectStruct) -> TokenStream {
    let field_infos = input.fields.iter().map(field_info_expr);

    let with_default = if input.meta.attrs.no_default {
        TokenStream::new()
    } else {
        quote! {
            let info = info.with_default(|| {
                ::std::boxed::Box::new(<Self as ::core::default::Default>::default())
            });
        }
    };

    let with_from_scalar = if input.meta.attrs.from_str {
        quote! {
            let info = info.with_from_scalar(|value, _context| match value {
                ::jsonbind::json::JsonValue::Str(text) => {
                    <Self as ::core::str::FromStr>::from_str(text).ok().map(|parsed| {
                        ::std::boxed::Box::new(parsed) as ::std::boxed::Box<dyn ::jsonbind::Reflect>
                    })
                }
                _ => ::core::option::Option::None,
            });
        }
    } else if let Some(hook) = &input.meta.attrs.from_scalar {
        quote! {
            let info = info.with_from_scalar(|value, context| {
                #hook(value, context).map(|built| {
                    ::std::boxed::Box::new(built) as ::std::boxed::Box<dyn ::jsonbind::Reflect>
                })
            });
        }
    } else {
        TokenStream::new()
    };

    quote! {
        ::jsonbind::info::TypeInfo::Struct({
            let info = ::jsonbind::info::StructInfo::new::<Self>(
                ::std::vec![ #(#field_infos),* ],
            );
            #with_default
            #with_from_scalar
            info
        })
    }
}

/// One `FieldInfo::new::<Ty>("name")` expression with its attribute
/// builders chained on.
fn field_info_expr(field: &StructField) -> TokenStream {
    let ty = &field.ty;
    let name = field.ident.to_string();
    let mut expr = quote!(::jsonbind::info::FieldInfo::new::<#ty>(#name));

    let attrs = &field.attrs;
    if let Some(rename) = &attrs.rename {
        expr = quote!(#expr.with_rename(#rename));
    }
    if !attrs.aliases.is_empty() {
        let aliases = &attrs.aliases;
        expr = quote!(#expr.with_aliases(&[#(#aliases),*]));
    }
    if attrs.skip_serializing {
        expr = quote!(#expr.skip_serializing());
    }
    if attrs.skip_deserializing {
        expr = quote!(#expr.skip_deserializing());
    }
    if let Some(pattern) = &attrs.date_format {
        expr = quote!(#expr.with_date_format(#pattern));
    }
    if let Some(adapter) = &attrs.adapter {
        expr = quote! {
            #expr.with_adapter({
                fn __field_adapter() -> &'static ::jsonbind::registry::ErasedAdapter {
                    static CELL: ::std::sync::OnceLock<::jsonbind::registry::ErasedAdapter> =
                        ::std::sync::OnceLock::new();
                    CELL.get_or_init(|| {
                        ::jsonbind::registry::ErasedAdapter::new(
                            <#adapter as ::core::default::Default>::default(),
                        )
                    })
                }
                __field_adapter
            })
        };
    }
    expr
}

fn impl_trait_struct(input: &ReflectStruct, generics: &syn::Generics) -> TokenStream {
    let ident = &input.meta.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let names: Vec<String> = input
        .fields
        .iter()
        .map(|field| field.ident.to_string())
        .collect();
    let idents: Vec<&syn::Ident> = input.fields.iter().map(|field| &field.ident).collect();
    let indices: Vec<usize> = (0..input.fields.len()).collect();
    let len = input.fields.len();

    quote! {
        impl #impl_generics ::jsonbind::ops::Struct for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::jsonbind::Reflect> {
                match name {
                    #( #names => ::core::option::Option::Some(&self.#idents), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn ::jsonbind::Reflect> {
                match name {
                    #( #names => ::core::option::Option::Some(&mut self.#idents), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn ::jsonbind::Reflect> {
                match index {
                    #( #indices => ::core::option::Option::Some(&self.#idents), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_len(&self) -> usize {
                #len
            }
        }
    }
}
