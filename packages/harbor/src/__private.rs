//! Support code for `#[harbor::main]`.

use crate::{Bootstrap, Config};

pub fn config(contents: &str) -> Config {
    Config::from_toml(contents)
        .unwrap_or_else(|err| panic!("invalid config for #[harbor::main]: {err}"))
}

#[cfg(all(feature = "web", target_family = "wasm"))]
pub fn main<C>(bootstrap: Bootstrap<C>)
where
    C: crate::Component<harbor_web::DomNode>,
{
    console_error_panic_hook::set_once();

    bootstrap.start(&harbor_web::WebDocument::current());
}

#[cfg(not(all(feature = "web", target_family = "wasm")))]
pub fn main<C>(_bootstrap: Bootstrap<C>) {
    eprintln!(
        "This binary is intended for the browser. Build it for wasm32-unknown-unknown with the `web` feature enabled."
    );
}
