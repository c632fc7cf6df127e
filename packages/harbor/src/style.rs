use std::borrow::Cow;

use harbor_nodes::Node;

/// Global CSS applied to the document before the root component is mounted.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Stylesheet(Cow<'static, str>);

impl Stylesheet {
    pub fn new<S>(css: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self(css.into())
    }

    pub fn css(&self) -> &str {
        &self.0
    }

    /// Appends a `<style>` element to `head` and returns it.
    pub(crate) fn apply<N: Node>(&self, head: &N) -> N {
        let style = N::element(None, "style");
        let text = N::text();
        text.set_text(&self.0);
        style.insert(&text, None);
        head.insert(&style, None);
        style
    }
}

impl From<&'static str> for Stylesheet {
    fn from(css: &'static str) -> Self {
        Self::new(css)
    }
}

impl From<String> for Stylesheet {
    fn from(css: String) -> Self {
        Self::new(css)
    }
}

#[cfg(test)]
mod tests {
    use harbor_nodes::{element, Node};
    use harbor_render::NodeRef;

    use super::Stylesheet;

    #[test]
    fn apply_appends_style_element() {
        let head: NodeRef = element!("head");
        let style = Stylesheet::from("body { margin: 0; }").apply(&head);

        assert_eq!(head.children(), vec![style.clone()]);
        assert_eq!(style.text_content(), "body { margin: 0; }");
        assert_eq!(head.to_string(), "<head>\n  <style>\n    body { margin: 0; }\n  </style>\n</head>");
    }
}
