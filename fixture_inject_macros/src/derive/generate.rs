//! Code generation for `#[derive(Injectable)]`.
//!
//! The impl owns a `static` descriptor table built on first use. Each member
//! entry carries a non-capturing setter closure that downcasts the target,
//! converts the value through the field's `Slot` impl, and stores it.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

use super::parse::{ConfigPropertyAttrs, FieldAttrs, ResourceAttrs};

/// Emits `impl Injectable for #ident`.
pub(crate) fn injectable_impl(
    krate: &TokenStream,
    ident: &syn::Ident,
    fields: &[syn::Field],
    field_attrs: &[FieldAttrs],
) -> syn::Result<TokenStream> {
    let type_name = ident.unraw().to_string();
    let mut members = Vec::new();
    let mut parent = None;
    for (field, attrs) in fields.iter().zip(field_attrs) {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Injectable requires named fields"));
        };
        if attrs.parent {
            parent = Some(parent_methods(krate, field_ident));
        } else if attrs.is_member() {
            members.push(member_entry(krate, ident, field_ident, &field.ty, attrs));
        }
    }

    Ok(quote! {
        impl #krate::Injectable for #ident {
            fn descriptor(&self) -> &'static #krate::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::LazyLock<#krate::TypeDescriptor> =
                    ::std::sync::LazyLock::new(|| {
                        #krate::TypeDescriptor::new(#type_name, ::std::vec![#(#members),*])
                    });
                &DESCRIPTOR
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            #parent
        }
    })
}

fn member_entry(
    krate: &TokenStream,
    owner: &syn::Ident,
    field: &syn::Ident,
    ty: &syn::Type,
    attrs: &FieldAttrs,
) -> TokenStream {
    let name = field.unraw().to_string();
    let markers = markers_chain(krate, attrs);
    quote! {
        #krate::Member::new(
            #name,
            <#ty as #krate::Slot>::slot_type(),
            <#ty as #krate::Slot>::NULLABLE,
            #markers,
            |target: &mut dyn ::core::any::Any,
             value: ::core::option::Option<#krate::Value>|
             -> ::core::result::Result<(), #krate::AssignError> {
                let owner = #krate::__private::downcast_target::<#owner>(target)?;
                owner.#field = <#ty as #krate::Slot>::from_value(value)?;
                ::core::result::Result::Ok(())
            },
        )
    }
}

fn markers_chain(krate: &TokenStream, attrs: &FieldAttrs) -> TokenStream {
    let mut chain = quote! { #krate::Markers::new() };
    if attrs.inject {
        chain = quote! { #chain.with_inject() };
    }
    if !attrs.qualifiers.is_empty() {
        let qualifiers = &attrs.qualifiers;
        chain = quote! { #chain.with_qualifiers(&[#(#qualifiers),*]) };
    }
    if let Some(resource) = &attrs.resource {
        let identity = resource_identity(krate, resource);
        chain = quote! { #chain.with_resource(#identity) };
    }
    if let Some(ConfigPropertyAttrs { name, default }) = &attrs.config_property {
        chain = quote! {
            #chain.with_config_property(#krate::ConfigProperty::new(#name, #default))
        };
    }
    chain
}

fn resource_identity(krate: &TokenStream, resource: &ResourceAttrs) -> TokenStream {
    let ResourceAttrs {
        name,
        mapped_name,
        lookup,
    } = resource;
    quote! { #krate::ResourceIdentity::new(#name, #mapped_name, #lookup) }
}

fn parent_methods(krate: &TokenStream, field: &syn::Ident) -> TokenStream {
    quote! {
        fn parent(&self) -> ::core::option::Option<&dyn #krate::Injectable> {
            ::core::option::Option::Some(&self.#field)
        }

        fn parent_mut(&mut self) -> ::core::option::Option<&mut dyn #krate::Injectable> {
            ::core::option::Option::Some(&mut self.#field)
        }
    }
}
