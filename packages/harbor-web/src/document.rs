use harbor_nodes::Environment;
use wasm_bindgen::JsCast;

use crate::DomNode;

/// The live browser document.
///
/// Every lookup wraps the native element in a fresh [`DomNode`].
#[derive(Clone, Debug)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }

    /// The document of the current page.
    pub fn current() -> Self {
        Self(crate::document())
    }

    pub fn native(&self) -> &web_sys::Document {
        &self.0
    }
}

impl Environment for WebDocument {
    type Node = DomNode;

    fn lookup(&self, key: &str) -> Option<DomNode> {
        self.0
            .get_element_by_id(key)
            .map(|element| DomNode::from_native(element.unchecked_into()))
    }

    fn head(&self) -> Option<DomNode> {
        self.0
            .head()
            .map(|head| DomNode::from_native(head.unchecked_into()))
    }
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use harbor_nodes::{Environment, Node};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use super::WebDocument;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn lookup_resolves_elements_by_id() {
        let doc = WebDocument::current();
        let native = doc.native().create_element("div").unwrap();
        native.set_id("lookup-target");
        doc.native()
            .body()
            .unwrap()
            .append_child(native.unchecked_ref())
            .unwrap();

        let anchor = doc.lookup("lookup-target").unwrap();
        assert_eq!(anchor.attr("id").as_deref(), Some("lookup-target"));
        assert!(doc.lookup("lookup-missing").is_none());

        native.remove();
    }

    #[wasm_bindgen_test]
    fn head_is_available() {
        assert!(WebDocument::current().head().is_some());
    }
}
