//! Procedural macros for `fixture_inject`.
//!
//! `#[derive(Injectable)]` builds the descriptor table that the injection
//! engine matches against. Each named field becomes a member with its
//! declared type, its markers, and a setter; a field marked
//! `#[injectable(parent)]` links the struct to its base type instead.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `fixture_inject::Injectable`.
///
/// Field attributes:
///
/// - `inject` marks a qualified injection point.
/// - `qualifier = "name"` adds a qualifier tag; repeat it for more.
/// - `resource` or `resource(name = "..", mapped_name = "..", lookup = "..")`
///   marks a named resource.
/// - `config_property(name = "..", default = "..")` marks a configuration
///   property.
/// - `parent` designates the embedded base value.
/// - `skip` leaves the field out of the descriptor.
///
/// The struct attribute `crate = "path"` renames the runtime crate.
#[proc_macro_derive(Injectable, attributes(injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
