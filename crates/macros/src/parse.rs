//! Attribute parsing for HostClass derive macro

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Ident, Type};

/// Parsed #[host(...)] attributes on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(host), supports(struct_named))]
pub struct HostClassArgs {
    /// Struct identifier
    pub ident: Ident,

    /// Struct fields
    pub data: darling::ast::Data<(), HostFieldArgs>,

    /// Type name used in error messages (e.g., "Vector")
    #[darling(rename = "class")]
    pub class_name: String,

    /// Host function reading a field (e.g., "Vector_GetAttr")
    #[darling(default)]
    pub get: Option<String>,

    /// Host function writing a field; absent means read-only
    #[darling(default)]
    pub set: Option<String>,

    /// Host function dispatching method calls
    #[darling(default)]
    pub call: Option<String>,
}

/// Parsed #[host(...)] attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(host))]
pub struct HostFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Host field name (e.g., "iShip")
    /// If not specified, the Rust field name is used
    #[darling(rename = "field")]
    pub field_name: Option<String>,
}

impl HostFieldArgs {
    /// Check if this is the handle field
    pub fn is_handle_field(&self) -> bool {
        self.ident.as_ref().map(|i| i == "handle").unwrap_or(false)
    }

    /// Host-side name of this field
    pub fn host_name(&self) -> Option<String> {
        self.field_name
            .clone()
            .or_else(|| self.ident.as_ref().map(|i| i.to_string()))
    }
}

/// Parse a DeriveInput into HostClassArgs
pub fn parse_host_class(input: &DeriveInput) -> darling::Result<HostClassArgs> {
    HostClassArgs::from_derive_input(input)
}
