#![warn(clippy::use_self)]


mod macros;

/// A node in a document tree that a harbor application can be mounted into.
///
/// Implemented once per backend: an in-memory tree for headless rendering and tests,
/// and a browser DOM tree.
pub trait Node: Clone + PartialEq + Sized + 'static {
    fn element(namespace: Option<&str>, name: &str) -> Self;

    fn text() -> Self;

    /// A virtual container whose children are placed directly into its parent.
    fn fragment() -> Self;

    fn ty(&self) -> NodeType;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self>;

    fn next_sibling(&self) -> Option<Self>;

    fn insert(&self, child: &Self, before: Option<&Self>);

    fn remove(&self, child: &Self);

    fn set_text(&self, content: &str);

    fn attr(&self, name: &str) -> Option<String>;

    fn set_attr(&self, name: &str, value: &str);

    fn remove_attr(&self, name: &str);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    Element,
    Text,
    Fragment,
}

/// The document a harbor application starts in.
pub trait Environment {
    type Node: Node;

    /// Resolves a host anchor by its element id.
    fn lookup(&self, key: &str) -> Option<Self::Node>;

    /// The node global stylesheets are attached to.
    fn head(&self) -> Option<Self::Node>;
}
