//! Input parsing for the `Injectable` derive macro.
//!
//! This module gathers the struct identifier, fields, and attribute metadata
//! in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Gathers information from the user-provided struct.
///
/// The returned tuple contains:
/// - `ident`: the struct identifier
/// - `fields`: the struct's named fields
/// - `struct_attrs`: parsed struct-level attributes
/// - `field_attrs`: parsed field-level attributes, one per field
///
/// Generic structs are rejected: each type owns a single static descriptor
/// table, which cannot depend on type parameters.
pub(crate) fn parse_input(
    input: &DeriveInput,
) -> Result<(syn::Ident, Vec<syn::Field>, StructAttrs, Vec<FieldAttrs>), syn::Error> {
    let ident = input.ident.clone();
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Injectable cannot be derived for generic types",
        ));
    }
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Injectable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Injectable can only be derived for structs",
            ));
        }
    };

    let mut field_attrs = Vec::with_capacity(fields.len());
    let mut parent: Option<&syn::Field> = None;
    for field in &fields {
        let attrs = parse_field_attrs(field)?;
        if attrs.parent {
            if parent.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field may be marked `#[injectable(parent)]`",
                ));
            }
            parent = Some(field);
        }
        field_attrs.push(attrs);
    }
    Ok((ident, fields, struct_attrs, field_attrs))
}
