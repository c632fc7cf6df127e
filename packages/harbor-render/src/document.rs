use std::fmt;

use harbor_nodes::{Environment, Node, NodeType};

use crate::NodeRef;

/// An in-memory HTML document.
///
/// Starts out as `<html><head></head><body></body></html>`; callers populate the body
/// with whatever static structure the page would ship with.
#[derive(Clone, Debug)]
pub struct Document {
    root: NodeRef,
    head: NodeRef,
    body: NodeRef,
}

impl Document {
    pub fn new() -> Self {
        let head = NodeRef::element(None, "head");
        let body = NodeRef::element(None, "body");
        let root = NodeRef::element(None, "html");
        root.insert(&head, None);
        root.insert(&body, None);

        Self { root, head, body }
    }

    /// The `<html>` element.
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn head(&self) -> &NodeRef {
        &self.head
    }

    pub fn body(&self) -> &NodeRef {
        &self.body
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        find_by_id(&self.root, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Document {
    type Node = NodeRef;

    fn lookup(&self, key: &str) -> Option<NodeRef> {
        self.get_element_by_id(key)
    }

    fn head(&self) -> Option<NodeRef> {
        Some(self.head.clone())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!DOCTYPE html>\n{}", self.root)
    }
}

fn find_by_id(node: &NodeRef, id: &str) -> Option<NodeRef> {
    if node.ty() == NodeType::Element && node.attr("id").as_deref() == Some(id) {
        return Some(node.clone());
    }

    node.children()
        .iter()
        .find_map(|child| find_by_id(child, id))
}
