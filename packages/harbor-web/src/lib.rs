#![warn(clippy::use_self)]

mod document;

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    thread_local,
};

use harbor_nodes::{Node, NodeType};
use wasm_bindgen::{intern, prelude::*};

pub use document::WebDocument;

thread_local! {
    static WINDOW: web_sys::Window = web_sys::window().expect("JavaScript window undefined");

    static DOCUMENT: web_sys::Document = WINDOW.with(|window| {
        window
            .document()
            .expect("JavaScript window.document undefined")
    });
}

pub fn window() -> web_sys::Window {
    WINDOW.with(Clone::clone)
}

pub fn document() -> web_sys::Document {
    DOCUMENT.with(Clone::clone)
}

#[derive(Clone, Debug)]
pub struct DomNode(Rc<Inner>);

type WeakNode = Weak<Inner>;

#[derive(Debug)]
struct Inner {
    native: web_sys::Node,
    ty: NodeType,

    parent: RefCell<Option<WeakNode>>,
    children: RefCell<Vec<DomNode>>,
}

impl DomNode {
    fn new(native: web_sys::Node, ty: NodeType) -> Self {
        Self(Rc::new(Inner {
            native,
            ty,
            parent: RefCell::default(),
            children: RefCell::default(),
        }))
    }

    /// Wraps a node that already lives in the page, such as a host anchor.
    ///
    /// Existing native children are left untouched and are not tracked.
    pub fn from_native(native: web_sys::Node) -> Self {
        let ty = if native.has_type::<web_sys::Element>() {
            NodeType::Element
        } else if native.has_type::<web_sys::Text>() {
            NodeType::Text
        } else {
            let name = js_sys::Reflect::get_prototype_of(&native)
                .map(|proto| String::from(proto.constructor().name()))
                .unwrap_or_else(|_| "unknown".to_string());
            panic!("cannot wrap native node of type {name}");
        };

        Self::new(native, ty)
    }

    pub fn native(&self) -> &web_sys::Node {
        &self.0.native
    }

    fn is_virtual(&self) -> bool {
        self.ty() == NodeType::Fragment
    }

    fn native_target(&self) -> Option<web_sys::Node> {
        if self.is_virtual() {
            self.0.native.parent_node()
        } else {
            Some(self.0.native.clone())
        }
    }

    // Fragment children are placed before the fragment's marker comment.
    fn first_node(&self) -> web_sys::Node {
        if self.is_virtual() {
            if let Some(first) = self.0.children.borrow().first() {
                return first.first_node();
            }
        }

        self.0.native.clone()
    }

    fn mount_to_native(&self, target: &web_sys::Node, before: Option<&web_sys::Node>) {
        if self.is_virtual() {
            for child in &*self.0.children.borrow() {
                child.mount_to_native(target, before);
            }
        }

        target
            .insert_before(&self.0.native, before)
            .expect("failed to insert native node");
    }

    fn remove_from_native(&self, target: &web_sys::Node) {
        if self.is_virtual() {
            for child in &*self.0.children.borrow() {
                child.remove_from_native(target);
            }
        }

        target
            .remove_child(&self.0.native)
            .expect("failed to remove native node");
    }
}

impl Node for DomNode {
    fn element(namespace: Option<&str>, name: &str) -> Self {
        let native = DOCUMENT
            .with(|document| {
                if namespace.is_some() {
                    document.create_element_ns(namespace, intern(name))
                } else {
                    document.create_element(intern(name))
                }
            })
            .expect("invalid element name");

        Self::new(native.unchecked_into(), NodeType::Element)
    }

    fn text() -> Self {
        let native = web_sys::Text::new().expect("failed to create text node");

        Self::new(native.unchecked_into(), NodeType::Text)
    }

    fn fragment() -> Self {
        let native = web_sys::Comment::new().expect("failed to create comment node");

        Self::new(native.unchecked_into(), NodeType::Fragment)
    }

    fn ty(&self) -> NodeType {
        self.0.ty
    }

    fn parent(&self) -> Option<Self> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(DomNode)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        children
            .iter()
            .position(|node| node == self)
            .and_then(|idx| children.get(idx + 1).cloned())
    }

    fn insert(&self, child: &Self, before: Option<&Self>) {
        if let Some(old) = child.parent() {
            old.remove(child);
        }

        let mut children = self.0.children.borrow_mut();
        let idx = if let Some(before) = before {
            children
                .iter()
                .position(|node| node == before)
                .expect("not a parent of insertion point node")
        } else {
            children.len()
        };
        children.insert(idx, child.clone());
        drop(children);

        child.0.parent.borrow_mut().replace(Rc::downgrade(&self.0));

        if let Some(target) = self.native_target() {
            let before = before.map(Self::first_node).or_else(|| {
                if self.is_virtual() {
                    Some(self.0.native.clone())
                } else {
                    None
                }
            });

            child.mount_to_native(&target, before.as_ref());
        }
    }

    fn remove(&self, child: &Self) {
        let mut children = self.0.children.borrow_mut();
        let idx = children
            .iter()
            .position(|node| node == child)
            .expect("not a parent of child node");
        children.remove(idx);
        drop(children);

        child.0.parent.borrow_mut().take();

        if let Some(target) = self.native_target() {
            child.remove_from_native(&target);
        }
    }

    fn set_text(&self, content: &str) {
        match self.ty() {
            NodeType::Text => {
                self.0.native.set_text_content(Some(content));
            }
            _ => panic!("can only set text content of text nodes"),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        if self.ty() == NodeType::Element {
            self.0
                .native
                .unchecked_ref::<web_sys::Element>()
                .get_attribute(name)
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn set_attr(&self, name: &str, value: &str) {
        if self.ty() == NodeType::Element {
            self.0
                .native
                .unchecked_ref::<web_sys::Element>()
                .set_attribute(intern(name), value)
                .expect("invalid attribute name");
        } else {
            panic!("attributes only exist on element nodes");
        }
    }

    fn remove_attr(&self, name: &str) {
        if self.ty() == NodeType::Element {
            self.0
                .native
                .unchecked_ref::<web_sys::Element>()
                .remove_attribute(intern(name))
                .expect("invalid attribute name");
        } else {
            panic!("attributes only exist on element nodes");
        }
    }
}

impl PartialEq for DomNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for DomNode {}
