//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of `tagtable::Record` whose
//! `record_type()` lists every non-skipped field, its `#[col(...)]` tags and,
//! for group fields, the nested record's descriptor.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_col_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_tokens: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let col_attrs = parse_col_attrs(&field.attrs)?;
        if col_attrs.skip {
            continue;
        }

        let key = col_attrs
            .key
            .clone()
            .unwrap_or_else(|| field_name.to_string());

        let tag_calls = col_attrs
            .tags()
            .into_iter()
            .map(|(name, value)| quote! { .tag(#name, #value) });

        // Only group fields need the nested descriptor; requiring `Record`
        // for every nested field type would reject plain structs.
        let nested = if col_attrs.is_group() {
            let ty = &field.ty;
            quote! { .nested(<#ty as ::tagtable::Record>::record_type) }
        } else {
            quote! {}
        };

        field_tokens.push(quote! {
            ::tagtable::FieldDef::new(#key) #(#tag_calls)* #nested
        });
    }

    let expanded = quote! {
        impl #impl_generics ::tagtable::Record for #struct_name #ty_generics #where_clause {
            fn record_type() -> ::tagtable::RecordType {
                ::tagtable::RecordType::new(::core::any::type_name::<Self>())
                    #(.field(#field_tokens))*
            }
        }
    };

    Ok(expanded)
}
