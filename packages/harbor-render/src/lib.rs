#![warn(clippy::use_self)]

mod document;

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt::{self, Write},
    rc::{Rc, Weak},
};

use harbor_nodes::{Node, NodeType};
use indexmap::IndexMap;

pub use document::Document;

// Reference: https://developer.mozilla.org/en-US/docs/Glossary/Void_element
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

// Text inside these is never entity-decoded by browsers.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Renders the node produced by `f` to an HTML string.
pub fn render_to_string<F>(f: F) -> String
where
    F: FnOnce() -> NodeRef,
{
    f().to_string()
}

#[derive(Clone, Debug)]
pub struct NodeRef(Rc<RefCell<Inner>>);

type WeakNode = Weak<RefCell<Inner>>;

struct Inner {
    parent: Option<WeakNode>,
    kind: NodeKind,
}

#[derive(Debug)]
pub enum NodeKind {
    Element {
        namespace: Option<String>,
        name: String,
        attrs: IndexMap<String, String>,
        children: Vec<NodeRef>,
    },
    Fragment(Vec<NodeRef>),
    Text(String),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        match &inner.kind {
            NodeKind::Element {
                namespace,
                name,
                attrs,
                children,
            } => {
                let tag = namespace
                    .as_ref()
                    .map(|ns| format!("{ns}:{name}"))
                    .unwrap_or(name.clone());

                let raw = RAW_TEXT_ELEMENTS.contains(&name.to_lowercase().as_str());
                let mut buf = String::new();
                for child in children {
                    match child.raw_text().filter(|_| raw) {
                        Some(text) => writeln!(&mut buf, "{text}")?,
                        None => writeln!(&mut buf, "{child}")?,
                    }
                }
                let indented = buf
                    .lines()
                    .map(|line| format!("  {line}"))
                    .collect::<Vec<_>>()
                    .join("\n");

                let attrs = attrs
                    .iter()
                    .map(|(name, value)| format!(" {name}=\"{}\"", escape(value)))
                    .collect::<Vec<_>>()
                    .join("");

                if !indented.is_empty() {
                    write!(f, "<{tag}{attrs}>\n{indented}\n</{tag}>")
                } else if VOID_ELEMENTS.contains(&tag.to_lowercase().as_str()) {
                    write!(f, "<{tag}{attrs}>")
                } else {
                    write!(f, "<{tag}{attrs}></{tag}>")
                }
            }
            NodeKind::Fragment(children) => {
                let rendered = children
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                f.write_str(&rendered)
            }
            NodeKind::Text(text) => f.write_str(&escape(text)),
        }
    }
}

impl NodeRef {
    fn new(kind: NodeKind) -> Self {
        let inner = Inner { parent: None, kind };
        Self(Rc::new(RefCell::new(inner)))
    }

    /// Element name, if this is an element.
    pub fn name(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Text content of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        match &self.0.borrow().kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { children, .. } | NodeKind::Fragment(children) => {
                children.iter().map(Self::text_content).collect()
            }
        }
    }

    fn raw_text(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn children_ref(&self) -> Option<Ref<Vec<Self>>> {
        let inner = self.0.borrow();
        Ref::filter_map(inner, |inner| match &inner.kind {
            NodeKind::Element { children, .. } => Some(children),
            NodeKind::Fragment(children) => Some(children),
            _ => None,
        })
        .ok()
    }

    fn children_mut(&self) -> Option<RefMut<Vec<Self>>> {
        let inner = self.0.borrow_mut();
        RefMut::filter_map(inner, |inner| match &mut inner.kind {
            NodeKind::Element { children, .. } => Some(children),
            NodeKind::Fragment(children) => Some(children),
            _ => None,
        })
        .ok()
    }
}

impl Node for NodeRef {
    fn element(namespace: Option<&str>, name: &str) -> Self {
        let kind = NodeKind::Element {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            attrs: IndexMap::new(),
            children: vec![],
        };
        Self::new(kind)
    }

    fn text() -> Self {
        Self::new(NodeKind::Text(String::new()))
    }

    fn fragment() -> Self {
        Self::new(NodeKind::Fragment(vec![]))
    }

    fn ty(&self) -> NodeType {
        match self.0.borrow().kind {
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Fragment(_) => NodeType::Fragment,
            NodeKind::Text(_) => NodeType::Text,
        }
    }

    fn parent(&self) -> Option<Self> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(NodeRef)
    }

    fn children(&self) -> Vec<Self> {
        self.children_ref()
            .map(|children| children.clone())
            .unwrap_or_default()
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let children = parent.children_ref()?;

        let idx = children.iter().position(|node| node == self)?;
        children.get(idx + 1).cloned()
    }

    fn insert(&self, child: &Self, before: Option<&Self>) {
        if let Some(old) = child.parent() {
            old.remove(child);
        }

        let mut children = self
            .children_mut()
            .expect("only element and fragment nodes can have children");
        let idx = if let Some(before) = before {
            children
                .iter()
                .position(|node| node == before)
                .expect("not a parent of insertion point node")
        } else {
            children.len()
        };
        children.insert(idx, child.clone());

        child.0.borrow_mut().parent.replace(Rc::downgrade(&self.0));
    }

    fn remove(&self, child: &Self) {
        let mut children = self
            .children_mut()
            .expect("only element and fragment nodes can have children");
        let idx = children
            .iter()
            .position(|node| node == child)
            .expect("not a parent of child node");
        children.remove(idx);

        child.0.borrow_mut().parent.take();
    }

    fn set_text(&self, content: &str) {
        match &mut self.0.borrow_mut().kind {
            NodeKind::Text(text) => {
                *text = content.to_string();
            }
            _ => panic!("can only set text content of text nodes"),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.borrow().kind {
            attrs.get(name).cloned()
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn set_attr(&self, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.insert(name.to_string(), value.to_string());
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn remove_attr(&self, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.0.borrow_mut().kind {
            attrs.shift_remove(name);
        } else {
            panic!("attributes only exist on element nodes");
        }
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for NodeRef {}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind, f)
    }
}

// Reference: https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn escape(text: &str) -> String {
    let mut output = String::new();
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}
