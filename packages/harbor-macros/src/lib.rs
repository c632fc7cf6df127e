#![warn(clippy::use_self)]

mod generate;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemFn};

use crate::parse::MainArgs;

#[proc_macro_attribute]
pub fn main(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as MainArgs);
    let input = parse_macro_input!(input as ItemFn);

    generate::main(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
