use darling::{FromDeriveInput, FromVariant, ast};
use heck::{ToShoutySnakeCase, ToSnakeCase};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct JoinInput {
    ident: syn::Ident,
    data: ast::Data<JoinVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(join))]
struct JoinVariant {
    ident: syn::Ident,
    // sql keyword, defaults to the shouty variant name
    #[darling(default)]
    keyword: Option<String>,
}

pub fn join_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match JoinInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;
    let variants = match enum_info.data.take_enum() {
        Some(variants) => variants,
        None => {
            return syn::Error::new_spanned(&input.ident, "JoinMethods only supports enums")
                .to_compile_error()
                .into();
        }
    };

    let keywords = variants.iter().map(|var| {
        let var_name = &var.ident;
        let keyword = var
            .keyword
            .clone()
            .unwrap_or_else(|| var_name.to_string().to_shouty_snake_case().replace('_', " "));
        quote! {
            #enum_name::#var_name => #keyword,
        }
    });

    let methods = variants.iter().map(|var| {
        let var_name = &var.ident;
        let join_fn = format_ident!("{}_join", var_name.to_string().to_snake_case());

        quote! {
            pub fn #join_fn<T, F>(&mut self, table: T, join: F) -> &mut Self
            where
                T: crate::IntoTable,
                F: FnOnce(&mut crate::JoinClause),
            {
                self.join_clause(#enum_name::#var_name, table, join)
            }
        }
    });

    quote! {
        impl #enum_name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#keywords)*
                }
            }
        }

        impl crate::Select {
            #(#methods)*
        }
    }
    .into()
}
