//! Parsing utilities for the `Injectable` derive macro.
//!
//! Unknown keys are rejected rather than skipped: a misspelt marker would
//! otherwise leave a member silently unmatched.

use quote::ToTokens;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Token};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::parse_input;
use literals::lit_str;

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[injectable(crate = "fixtures")]`, generated code
    /// references types through `fixtures::` instead of `fixture_inject::`.
    pub crate_path: Option<syn::Path>,
}

/// Identity declared by a `resource` marker; unset keys stay empty.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResourceAttrs {
    pub name: String,
    pub mapped_name: String,
    pub lookup: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConfigPropertyAttrs {
    pub name: String,
    /// Empty when the marker declares no default.
    pub default: String,
}

/// Field-level attributes recognised by `#[derive(Injectable)]`.
///
/// - `inject` and `qualifier` describe a qualified injection point.
/// - `resource` and `config_property` carry their declared identities.
/// - `parent` links to the base type and `skip` hides the field; neither
///   may be combined with markers.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub inject: bool,
    pub qualifiers: Vec<String>,
    pub resource: Option<ResourceAttrs>,
    pub config_property: Option<ConfigPropertyAttrs>,
    pub parent: bool,
    pub skip: bool,
}

impl FieldAttrs {
    fn has_markers(&self) -> bool {
        self.inject
            || !self.qualifiers.is_empty()
            || self.resource.is_some()
            || self.config_property.is_some()
    }

    /// Whether the field is listed in the descriptor table.
    pub(crate) const fn is_member(&self) -> bool {
        !self.parent && !self.skip
    }
}

/// Iterate all `#[injectable(...)]` attributes once and apply a callback.
fn parse_injectable<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("injectable")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn key_of(meta: &ParseNestedMeta) -> String {
    meta.path
        .get_ident()
        .map_or_else(String::new, ToString::to_string)
}

fn unknown(meta: &ParseNestedMeta) -> syn::Error {
    let path = meta.path.to_token_stream().to_string().replace(' ', "");
    meta.error(format!("unknown injectable attribute `{path}`"))
}

fn duplicate(meta: &ParseNestedMeta, key: &str) -> syn::Error {
    meta.error(format!("duplicate `{key}` attribute"))
}

fn set_flag(flag: &mut bool, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if meta.input.peek(Token![=]) || meta.input.peek(syn::token::Paren) {
        return Err(meta.error(format!("`{key}` takes no value")));
    }
    if std::mem::replace(flag, true) {
        return Err(duplicate(meta, key));
    }
    Ok(())
}

fn set_str(target: &mut Option<String>, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    let value = lit_str(meta, key)?.value();
    if target.replace(value).is_some() {
        return Err(duplicate(meta, key));
    }
    Ok(())
}

/// Extracts `#[injectable(...)]` metadata applied to a struct.
///
/// Only the `crate` key is recognised.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_injectable(attrs, |meta| {
        if key_of(meta) != "crate" {
            return Err(unknown(meta));
        }
        let s = lit_str(meta, "crate")?;
        let path: syn::Path =
            syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
        if out.crate_path.replace(path).is_some() {
            return Err(duplicate(meta, "crate"));
        }
        Ok(())
    })?;
    Ok(out)
}

fn parse_resource(meta: &ParseNestedMeta) -> syn::Result<ResourceAttrs> {
    if meta.input.peek(Token![=]) {
        return Err(meta.error("`resource` takes a list, e.g. `resource(name = \"...\")`"));
    }
    if !meta.input.peek(syn::token::Paren) {
        return Ok(ResourceAttrs::default());
    }
    let (mut name, mut mapped_name, mut lookup) = (None, None, None);
    meta.parse_nested_meta(|nested| match key_of(&nested).as_str() {
        "name" => set_str(&mut name, &nested, "name"),
        "mapped_name" => set_str(&mut mapped_name, &nested, "mapped_name"),
        "lookup" => set_str(&mut lookup, &nested, "lookup"),
        _ => Err(unknown(&nested)),
    })?;
    Ok(ResourceAttrs {
        name: name.unwrap_or_default(),
        mapped_name: mapped_name.unwrap_or_default(),
        lookup: lookup.unwrap_or_default(),
    })
}

fn parse_config_property(meta: &ParseNestedMeta) -> syn::Result<ConfigPropertyAttrs> {
    if !meta.input.peek(syn::token::Paren) {
        return Err(meta.error("`config_property` requires `(name = \"...\")`"));
    }
    let (mut name, mut default) = (None, None);
    meta.parse_nested_meta(|nested| match key_of(&nested).as_str() {
        "name" => set_str(&mut name, &nested, "name"),
        "default" => set_str(&mut default, &nested, "default"),
        _ => Err(unknown(&nested)),
    })?;
    let name = name
        .filter(|declared| !declared.is_empty())
        .ok_or_else(|| meta.error("`config_property` requires a non-empty `name`"))?;
    Ok(ConfigPropertyAttrs {
        name,
        default: default.unwrap_or_default(),
    })
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    match key_of(meta).as_str() {
        "inject" => set_flag(&mut out.inject, meta, "inject"),
        "qualifier" => {
            out.qualifiers.push(lit_str(meta, "qualifier")?.value());
            Ok(())
        }
        "resource" => {
            let resource = parse_resource(meta)?;
            if out.resource.replace(resource).is_some() {
                return Err(duplicate(meta, "resource"));
            }
            Ok(())
        }
        "config_property" => {
            let property = parse_config_property(meta)?;
            if out.config_property.replace(property).is_some() {
                return Err(duplicate(meta, "config_property"));
            }
            Ok(())
        }
        "parent" => set_flag(&mut out.parent, meta, "parent"),
        "skip" => set_flag(&mut out.skip, meta, "skip"),
        _ => Err(unknown(meta)),
    }
}

/// Parses field-level `#[injectable(...)]` attributes.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_injectable(&field.attrs, |meta| apply_field_attr(meta, &mut out))?;
    if out.parent && (out.skip || out.has_markers()) {
        return Err(syn::Error::new_spanned(
            field,
            "`parent` cannot be combined with other injectable attributes",
        ));
    }
    if out.skip && out.has_markers() {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with injection markers",
        ));
    }
    Ok(out)
}
