use proc_macro::TokenStream;

mod join;

#[proc_macro_derive(JoinMethods, attributes(join))]
pub fn join_methods(input: TokenStream) -> TokenStream {
    join::join_methods_impl(input)
}
