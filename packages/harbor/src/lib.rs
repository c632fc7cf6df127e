#![warn(clippy::use_self)]

mod app;
mod bootstrap;
mod component;
mod config;
mod mount;
mod style;

#[doc(hidden)]
pub mod __private;

pub use harbor_nodes as nodes;

#[cfg(feature = "web")]
pub use harbor_web as web;

#[cfg(feature = "render")]
pub use harbor_render as render;

/// Turns a root component function into the program entry point.
///
/// ```ignore
/// #[harbor::main(target = "app", stylesheet = "app.css")]
/// fn app() -> DomNode {
///     element!("h1"; text!("Hello"))
/// }
/// ```
///
/// Accepted options are `target` (host element id), `stylesheet` (a CSS file path,
/// repeatable) and `config` (a TOML file path). Paths are relative to the file the
/// attribute appears in.
pub use harbor_macros::main;

pub use crate::{
    app::{app, is_started, teardown},
    bootstrap::{bootstrap, Bootstrap, BootstrapError},
    component::Component,
    config::{Config, ConfigError},
    mount::{Attach, Mount, MountHandle},
    style::Stylesheet,
};

pub mod prelude {
    pub use harbor_nodes::{element, fragment, text, Environment, Node, NodeType};

    pub use crate::{Bootstrap, Component, MountHandle, Stylesheet};

    #[cfg(feature = "web")]
    pub use harbor_web::{DomNode, WebDocument};
}
