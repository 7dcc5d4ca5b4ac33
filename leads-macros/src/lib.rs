//! Procedural macros for the leads service
//!
//! - `#[derive(Record)]` - expose a struct's fields as `(column, SqlValue)` pairs

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type, parse_macro_input,
};

/// Derive `leads::db::Record` for a struct with named fields.
///
/// Every field becomes a column named after the field. `Option` fields holding
/// `None` are left out of the record entirely, which is what makes a struct of
/// options usable as a partial record for updates.
///
/// # Attributes
///
/// - `#[record(rename = "column")]` - use a different column name
/// - `#[record(skip)]` - never emit this field
///
/// # Usage
///
/// ```ignore
/// #[derive(Record)]
/// pub struct LeadPatch {
///     pub name: Option<String>,
///     #[record(rename = "service")]
///     pub service_kind: Option<LeadService>,
/// }
/// ```
///
/// # Generated Code
///
/// ```ignore
/// impl ::leads::db::Record for LeadPatch {
///     fn fields(&self) -> Vec<(&'static str, ::leads::db::SqlValue)> {
///         let mut fields = Vec::with_capacity(2);
///         if let Some(value) = &self.name {
///             fields.push(("name", ::leads::db::ToSqlValue::to_sql_value(value)));
///         }
///         if let Some(value) = &self.service_kind {
///             fields.push(("service", ::leads::db::ToSqlValue::to_sql_value(value)));
///         }
///         fields
///     }
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut pushes = Vec::new();
    for field in fields {
        let options = FieldOptions::parse(field)?;
        if options.skip {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let column = options.rename.unwrap_or_else(|| ident.to_string());

        let push = if is_option(&field.ty) {
            quote! {
                if let Some(value) = &self.#ident {
                    fields.push((#column, ::leads::db::ToSqlValue::to_sql_value(value)));
                }
            }
        } else {
            quote! {
                fields.push((#column, ::leads::db::ToSqlValue::to_sql_value(&self.#ident)));
            }
        };
        pushes.push(push);
    }

    let capacity = pushes.len();
    Ok(quote! {
        impl #impl_generics ::leads::db::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> Vec<(&'static str, ::leads::db::SqlValue)> {
                let mut fields = Vec::with_capacity(#capacity);
                #(#pushes)*
                fields
            }
        }
    })
}

/// Parsed `#[record(...)]` options for one field
#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

impl FieldOptions {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut options = FieldOptions::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported record attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        Ok(options)
    }
}

/// Whether the type is spelled `Option<T>` (including `std::option::Option<T>`)
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.qself.is_none()
        && path.path.segments.last().is_some_and(|segment| {
            segment.ident == "Option"
                && matches!(
                    &segment.arguments,
                    PathArguments::AngleBracketed(args)
                        if matches!(args.args.first(), Some(GenericArgument::Type(_)))
                )
        })
}
