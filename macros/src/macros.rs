//! Procedural macros for the emitron event emitter.
//!
//! - `#[derive(Event)]`: for an enum `Foo`, generates a field-less `FooKey`
//!   enum with the same variants and implements `emitron::Event` so that
//!   every variant is published under its own key.
//!
//! Usage:
//! ```rust,ignore
//! use emitron::{Event, EventBus};
//!
//! #[derive(Debug, Event)]
//! enum Ui { Click { x: i32, y: i32 }, Scroll(Option<f32>), Close }
//!
//! let bus = EventBus::<Ui>::new();
//! bus.on(UiKey::Close, |_, _| Ok(()));
//! bus.emit(Ui::Close)?;
//! ```
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(Event)]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;
    let vis = &input.vis;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(ident, "#[derive(Event)] is only supported on enums")
            .to_compile_error()
            .into();
    };

    let key_ident = format_ident!("{}Key", ident);
    let variants: Vec<_> = data_enum.variants.iter().map(|v| &v.ident).collect();
    let names = variants.iter().map(|v| v.to_string());

    // Handle different field types (unit, tuple, struct)
    let key_arms = data_enum.variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let pattern = match &variant.fields {
            Fields::Unit => quote! { Self::#variant_ident },
            Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
            Fields::Named(_) => quote! { Self::#variant_ident { .. } },
        };
        quote! { #pattern => #key_ident::#variant_ident }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let key_doc = format!("Keys of [`{ident}`] events, one per variant.");

    let expanded = quote! {
        #[doc = #key_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #key_ident {
            #(#variants),*
        }

        impl ::std::fmt::Display for #key_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match *self {
                    #(#key_ident::#variants => #names),*
                })
            }
        }

        impl #impl_generics ::emitron::Event for #ident #ty_generics #where_clause {
            type Key = #key_ident;

            fn key(&self) -> #key_ident {
                match *self {
                    #(#key_arms),*
                }
            }
        }
    };
    TokenStream::from(expanded)
}
