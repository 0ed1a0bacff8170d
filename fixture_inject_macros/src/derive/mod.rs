//! Expansion of `#[derive(Injectable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

mod generate;
mod parse;

/// Parses `input` and emits the `Injectable` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (ident, fields, struct_attrs, field_attrs) = parse::parse_input(input)?;
    let krate = runtime_path(struct_attrs.crate_path.as_ref());
    generate::injectable_impl(&krate, &ident, &fields, &field_attrs)
}

/// Path the expansion names the runtime crate by.
///
/// `#[injectable(crate = "...")]` overrides it for callers that depend on
/// `fixture_inject` under another name or re-export it.
fn runtime_path(alias: Option<&syn::Path>) -> TokenStream {
    match alias {
        Some(path) => quote! { #path },
        None => quote! { fixture_inject },
    }
}
