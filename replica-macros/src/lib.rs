//! # replica-macros
//!
//! `#[derive(Reflect)]` for the `replica` deep-cloning library.
//!
//! The derive emits the type's static shape — an ordered field table with
//! per-field setters — plus the `Reflect` and `StructOps` implementations
//! the reflective walker drives. See the `replica` crate for the full
//! story; this crate is an implementation detail re-exported from there.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, Index, parse_macro_input};

/// Derives `replica::Reflect` for a non-generic struct.
///
/// The type must implement `Default`: cloned aggregates start from their
/// default value, and `#[reflect(skip)]` fields are left there.
///
/// Container attributes:
/// - `#[reflect(cloneable)]` — register the type's `replica::Cloneable`
///   implementation as its capability hook.
///
/// Field attributes:
/// - `#[reflect(skip)]` — treat the field as private: never read, never
///   written, left at its default in every clone.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let name = ident.to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Reflect)] does not support generic types",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Reflect)] supports structs only",
        ));
    };

    let cloneable = has_flag(&input.attrs, "cloneable")?;

    let fields = collect_fields(&data.fields)?;

    // Skipped fields never touch their type: no `Reflect` bound, no
    // setter body, and the walker never reads them (it checks `public`
    // before asking for the field).
    let setter_fns = fields.iter().map(|field| {
        let setter = &field.setter;
        if field.skipped {
            return quote! {
                fn #setter(
                    _parent: &mut dyn ::replica::Reflect,
                    _value: ::std::boxed::Box<dyn ::replica::Reflect>,
                ) -> bool {
                    false
                }
            };
        }
        let ty = &field.ty;
        let member = &field.member;
        quote! {
            fn #setter(
                parent: &mut dyn ::replica::Reflect,
                value: ::std::boxed::Box<dyn ::replica::Reflect>,
            ) -> bool {
                let ::core::option::Option::Some(parent) =
                    ::replica::Reflect::as_any_mut(parent).downcast_mut::<#ident>()
                else {
                    return false;
                };
                let ::core::option::Option::Some(value) = ::replica::take::<#ty>(value) else {
                    return false;
                };
                parent.#member = value;
                true
            }
        }
    });

    let field_count = fields.len();

    let field_defs = fields.iter().map(|field| {
        let field_name = &field.name;
        let public = !field.skipped;
        let setter = &field.setter;
        let shape = if field.skipped {
            quote!(<() as ::replica::Reflect>::shape)
        } else {
            let ty = &field.ty;
            quote!(<#ty as ::replica::Reflect>::shape)
        };
        quote! {
            ::replica::FieldDef {
                name: #field_name,
                shape: #shape,
                public: #public,
                set: #setter,
            },
        }
    });

    let field_arms = fields.iter().enumerate().map(|(index, field)| {
        if field.skipped {
            quote! {
                #index => &SKIPPED_FIELD,
            }
        } else {
            let member = &field.member;
            quote! {
                #index => &self.#member,
            }
        }
    });

    let skipped_field_static = if fields.iter().any(|field| field.skipped) {
        quote!(static SKIPPED_FIELD: () = ();)
    } else {
        quote!()
    };

    let (hook_fn, cloneable_expr) = if cloneable {
        (
            quote! {
                fn cloneable_hook(
                    value: &dyn ::replica::Reflect,
                ) -> ::core::option::Option<::std::boxed::Box<dyn ::replica::Reflect>> {
                    ::replica::Reflect::as_any(value)
                        .downcast_ref::<#ident>()
                        .map(::replica::Cloneable::clone_value)
                }
            },
            quote!(::core::option::Option::Some(cloneable_hook)),
        )
    } else {
        (quote!(), quote!(::core::option::Option::None))
    };

    Ok(quote! {
        const _: () = {
            #skipped_field_static

            #(#setter_fns)*

            #hook_fn

            static FIELDS: [::replica::FieldDef; #field_count] = [
                #(#field_defs)*
            ];

            static SHAPE: ::replica::Shape = ::replica::Shape {
                name: #name,
                kind: ::replica::Kind::Struct(::replica::StructDef { fields: &FIELDS }),
                cloneable: #cloneable_expr,
            };

            #[automatically_derived]
            impl ::replica::Reflect for #ident {
                fn shape() -> &'static ::replica::Shape {
                    &SHAPE
                }

                fn value_shape(&self) -> &'static ::replica::Shape {
                    &SHAPE
                }

                fn view(&self) -> ::replica::View<'_> {
                    ::replica::View::Struct(self)
                }

                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                    self
                }

                fn into_any(
                    self: ::std::boxed::Box<Self>,
                ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                    self
                }
            }

            #[automatically_derived]
            impl ::replica::StructOps for #ident {
                fn type_key(&self) -> ::core::any::TypeId {
                    ::core::any::TypeId::of::<#ident>()
                }

                fn fields(&self) -> &'static [::replica::FieldDef] {
                    &FIELDS
                }

                fn make(&self) -> ::std::boxed::Box<dyn ::replica::Reflect> {
                    ::std::boxed::Box::new(<#ident as ::core::default::Default>::default())
                }

                fn field(&self, index: usize) -> &dyn ::replica::Reflect {
                    match index {
                        #(#field_arms)*
                        _ => ::core::unreachable!("field index out of range"),
                    }
                }
            }
        };
    })
}

struct FieldInfo {
    name: String,
    ty: syn::Type,
    member: proc_macro2::TokenStream,
    skipped: bool,
    setter: Ident,
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    let mut out = Vec::new();
    match fields {
        Fields::Unit => {}
        Fields::Named(named) => {
            for (index, field) in named.named.iter().enumerate() {
                let ident = field.ident.as_ref().expect("named field has an ident");
                out.push(FieldInfo {
                    name: ident.to_string(),
                    ty: field.ty.clone(),
                    member: quote!(#ident),
                    skipped: has_flag(&field.attrs, "skip")?,
                    setter: format_ident!("set_field_{index}"),
                });
            }
        }
        Fields::Unnamed(unnamed) => {
            for (index, field) in unnamed.unnamed.iter().enumerate() {
                let tuple_index = Index {
                    index: index as u32,
                    span: Span::call_site(),
                };
                out.push(FieldInfo {
                    name: index.to_string(),
                    ty: field.ty.clone(),
                    member: quote!(#tuple_index),
                    skipped: has_flag(&field.attrs, "skip")?,
                    setter: format_ident!("set_field_{index}"),
                });
            }
        }
    }
    Ok(out)
}

fn has_flag(attrs: &[syn::Attribute], flag: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(flag) {
                found = true;
                Ok(())
            } else {
                Err(meta.error("unrecognized reflect attribute"))
            }
        })?;
    }
    Ok(found)
}
