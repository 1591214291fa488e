//! HostClass derive macro implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, GenericArgument, PathArguments, Type};

use crate::parse::{parse_host_class, HostClassArgs, HostFieldArgs};

/// Extract the inner type from `PhantomData<T>` if present, otherwise return the type as-is
fn extract_inner_type(ty: &Type) -> &Type {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "PhantomData" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return inner;
                    }
                }
            }
        }
    }
    ty
}

/// Check if a type is PhantomData
fn is_phantom_data(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "PhantomData";
        }
    }
    false
}

/// A schema field after validation
struct FieldSpec<'a> {
    ident: &'a syn::Ident,
    host_name: String,
    native_ty: &'a Type,
    index: u32,
}

impl FieldSpec<'_> {
    /// Rust-facing name with any leading underscore stripped
    fn clean_name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix('_').unwrap_or(&name).to_string()
    }
}

/// Generate the HostClass implementation
pub fn derive_host_class(input: DeriveInput) -> TokenStream {
    match parse_host_class(&input) {
        Ok(args) => generate_impl(args),
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: HostClassArgs) -> TokenStream {
    let struct_name = &args.ident;
    let class_name = &args.class_name;

    let fields = match &args.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return syn::Error::new_spanned(&args.ident, "HostClass can only be derived for structs")
                .to_compile_error()
        }
    };

    if !fields.iter().any(HostFieldArgs::is_handle_field) {
        return syn::Error::new_spanned(
            &args.ident,
            "HostClass requires a `handle: Handle` field",
        )
        .to_compile_error();
    }

    let specs: Vec<FieldSpec> = fields
        .iter()
        .filter(|f| !f.is_handle_field())
        .filter_map(|f| Some((f.ident.as_ref()?, f.host_name()?, f)))
        .enumerate()
        .map(|(index, (ident, host_name, f))| FieldSpec {
            ident,
            host_name,
            native_ty: extract_inner_type(&f.ty),
            index: index as u32,
        })
        .collect();

    let schema_static = format_ident!("__{}_SCHEMA", struct_name.to_string().to_uppercase());

    let schema = generate_schema_static(&schema_static, &args, &specs);
    let constants = generate_constants(class_name, &specs);
    let accessors = generate_accessors(&schema_static, &args, &specs);
    let dispatcher = generate_dispatcher(&schema_static, &args);
    let host_class_impl = generate_host_class_impl(struct_name, &schema_static, fields);
    let script_object_impl = generate_script_object_impl(struct_name, &schema_static);

    quote! {
        #schema

        impl #struct_name {
            #constants
            #accessors
            #dispatcher
        }

        #host_class_impl

        #script_object_impl
    }
}

fn option_tokens(value: &Option<String>) -> TokenStream {
    match value {
        Some(name) => quote! { ::std::option::Option::Some(#name) },
        None => quote! { ::std::option::Option::None },
    }
}

fn generate_schema_static(
    schema_static: &syn::Ident,
    args: &HostClassArgs,
    specs: &[FieldSpec],
) -> TokenStream {
    let class_name = &args.class_name;
    let names = specs.iter().map(|s| &s.host_name);
    let get = option_tokens(&args.get);
    let set = option_tokens(&args.set);
    let call = option_tokens(&args.call);

    quote! {
        #[doc(hidden)]
        static #schema_static: ::flhook_core::proxy::ClassSchema = ::flhook_core::proxy::ClassSchema {
            class_name: #class_name,
            fields: &[#(#names),*],
            get_function: #get,
            set_function: #set,
            call_function: #call,
        };
    }
}

fn generate_constants(class_name: &str, specs: &[FieldSpec]) -> TokenStream {
    let names = specs.iter().map(|s| &s.host_name);

    let field_constants = specs.iter().map(|spec| {
        let clean_name = spec.clean_name();
        let host_name = &spec.host_name;
        let index = spec.index;

        let const_name = format_ident!("{}_FIELD", clean_name.to_uppercase());
        let const_index = format_ident!("{}_INDEX", clean_name.to_uppercase());

        let field_doc = format!("Host field name for `{}`", clean_name);
        let index_doc = format!("Host field index of `{}`", host_name);

        quote! {
            #[doc = #field_doc]
            pub const #const_name: &'static str = #host_name;

            #[doc = #index_doc]
            pub const #const_index: u32 = #index;
        }
    });

    quote! {
        /// Type name used in error messages
        pub const CLASS_NAME: &'static str = #class_name;

        /// Host field names in index order
        pub const FIELDS: &'static [&'static str] = &[#(#names),*];

        #(#field_constants)*
    }
}

fn generate_accessors(
    schema_static: &syn::Ident,
    args: &HostClassArgs,
    specs: &[FieldSpec],
) -> TokenStream {
    let writable = args.set.is_some();

    let accessors = specs.iter().map(|spec| {
        let clean_name = spec.clean_name();
        let host_name = &spec.host_name;
        let native_ty = spec.native_ty;
        let native = quote!(#native_ty).to_string();

        let getter_name = format_ident!("{}", clean_name);
        let setter_name = format_ident!("set_{}", clean_name);
        let const_name = format_ident!("{}_FIELD", clean_name.to_uppercase());

        let getter_doc = format!("Read `{}` (native `{}`)", host_name, native);
        let setter_doc = format!("Write `{}` (native `{}`)", host_name, native);

        let getter = quote! {
            #[doc = #getter_doc]
            #[inline]
            pub fn #getter_name(&self) -> ::std::result::Result<::flhook_core::sdk::Value, ::flhook_core::sdk::AttributeError> {
                ::flhook_core::proxy::get_attr(&#schema_static, self.handle, Self::#const_name)
            }
        };

        // Read-only types get no setters at all
        let setter = if writable {
            quote! {
                #[doc = #setter_doc]
                #[inline]
                pub fn #setter_name(
                    &self,
                    value: impl ::std::convert::Into<::flhook_core::sdk::Value>,
                ) -> ::std::result::Result<::flhook_core::sdk::Value, ::flhook_core::sdk::AttributeError> {
                    ::flhook_core::proxy::set_attr(
                        &#schema_static,
                        self.handle,
                        Self::#const_name,
                        value.into(),
                    )
                }
            }
        } else {
            quote! {}
        };

        quote! {
            #getter
            #setter
        }
    });

    quote! {
        #(#accessors)*
    }
}

fn generate_dispatcher(schema_static: &syn::Ident, args: &HostClassArgs) -> TokenStream {
    if args.call.is_none() {
        return quote! {};
    }

    quote! {
        /// Invoke a host method by id
        ///
        /// `args` is sent as-is; zero-argument methods pass `(None,)`.
        pub fn call(
            &self,
            method_id: u32,
            args: ::flhook_core::sdk::Value,
        ) -> ::std::result::Result<::flhook_core::sdk::Value, ::flhook_core::sdk::AttributeError> {
            ::flhook_core::proxy::call_method(&#schema_static, self.handle, method_id, args)
        }
    }
}

fn generate_host_class_impl(
    struct_name: &syn::Ident,
    schema_static: &syn::Ident,
    fields: &[HostFieldArgs],
) -> TokenStream {
    let field_inits: Vec<_> = fields
        .iter()
        .filter(|f| !f.is_handle_field())
        .filter_map(|f| {
            let ident = f.ident.as_ref()?;
            if is_phantom_data(&f.ty) {
                Some(quote! { #ident: ::std::marker::PhantomData })
            } else {
                Some(quote! { #ident: ::std::default::Default::default() })
            }
        })
        .collect();

    quote! {
        impl ::flhook_core::proxy::HostClass for #struct_name {
            fn from_handle(handle: ::flhook_core::sdk::Handle) -> Self {
                Self {
                    handle,
                    #(#field_inits),*
                }
            }

            fn schema() -> &'static ::flhook_core::proxy::ClassSchema {
                &#schema_static
            }
        }
    }
}

fn generate_script_object_impl(struct_name: &syn::Ident, schema_static: &syn::Ident) -> TokenStream {
    quote! {
        impl ::flhook_core::sdk::ScriptObject for #struct_name {
            fn class_name(&self) -> &'static str {
                #schema_static.class_name
            }

            fn handle(&self) -> ::flhook_core::sdk::Handle {
                self.handle
            }

            fn get_attr(
                &self,
                name: &str,
            ) -> ::std::result::Result<::flhook_core::sdk::Value, ::flhook_core::sdk::AttributeError> {
                ::flhook_core::proxy::get_attr(&#schema_static, self.handle, name)
            }

            fn set_attr(
                &self,
                name: &str,
                value: ::flhook_core::sdk::Value,
            ) -> ::std::result::Result<::flhook_core::sdk::Value, ::flhook_core::sdk::AttributeError> {
                ::flhook_core::proxy::set_attr(&#schema_static, self.handle, name, value)
            }

            fn del_attr(&self, name: &str) -> ::std::result::Result<(), ::flhook_core::sdk::AttributeError> {
                ::flhook_core::proxy::del_attr(&#schema_static, name)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    }
}
