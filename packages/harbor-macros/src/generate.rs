use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{Error, ItemFn, Result};

use crate::parse::MainArgs;

pub fn main(args: MainArgs, input: ItemFn) -> Result<TokenStream> {
    let sig = &input.sig;
    if sig.ident == "main" {
        return Err(Error::new_spanned(
            &sig.ident,
            "the root component cannot be named `main`",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "the root component cannot be async",
        ));
    }
    if !sig.inputs.is_empty() {
        return Err(Error::new_spanned(
            &sig.inputs,
            "the root component cannot take arguments",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "the root component cannot be generic",
        ));
    }

    let ident = &sig.ident;

    // config first, so an explicit target still wins
    let config = args.config.map(|path| {
        quote_spanned! {path.span() =>
            let bootstrap = bootstrap.config(
                ::harbor::__private::config(::std::include_str!(#path))
            );
        }
    });
    let target = args.target.map(|target| {
        quote! {
            let bootstrap = bootstrap.target(#target);
        }
    });
    let stylesheets = args.stylesheets.iter().map(|path| {
        quote_spanned! {path.span() =>
            let bootstrap = bootstrap.stylesheet(
                ::harbor::Stylesheet::new(::std::include_str!(#path))
            );
        }
    });

    Ok(quote! {
        #input

        fn main() {
            let bootstrap = ::harbor::Bootstrap::new(#ident);
            #config
            #target
            #(#stylesheets)*
            ::harbor::__private::main(bootstrap);
        }
    })
}
