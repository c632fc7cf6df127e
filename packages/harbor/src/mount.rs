use std::{cell::Cell, convert::Infallible, error::Error, fmt, rc::Rc};

use harbor_nodes::Node;

use crate::component::Component;

/// The capability that instantiates a root component inside a host anchor.
pub trait Mount<N: Node> {
    type Error: Error + Send + Sync + 'static;

    fn mount<C>(&self, root: C, target: &N) -> Result<MountHandle<N>, Self::Error>
    where
        C: Component<N>;
}

/// Renders the component once and appends the result to the target.
#[derive(Clone, Copy, Default, Debug)]
pub struct Attach;

impl<N: Node> Mount<N> for Attach {
    type Error = Infallible;

    fn mount<C>(&self, root: C, target: &N) -> Result<MountHandle<N>, Infallible>
    where
        C: Component<N>,
    {
        let node = root.render();
        target.insert(&node, None);
        Ok(MountHandle::new(target.clone(), node))
    }
}

/// Lifecycle handle of a mounted root component.
///
/// Clones share the same state; use [`MountHandle::ptr_eq`] to compare identity.
pub struct MountHandle<N: Node>(Rc<Mounted<N>>);

struct Mounted<N> {
    target: N,
    root: N,
    mounted: Cell<bool>,
}

impl<N: Node> MountHandle<N> {
    pub fn new(target: N, root: N) -> Self {
        Self(Rc::new(Mounted {
            target,
            root,
            mounted: Cell::new(true),
        }))
    }

    /// The host anchor the component was mounted into.
    pub fn target(&self) -> &N {
        &self.0.target
    }

    pub fn root(&self) -> &N {
        &self.0.root
    }

    pub fn is_mounted(&self) -> bool {
        self.0.mounted.get()
    }

    /// Detaches the root subtree. Returns `false` if it was already unmounted.
    pub fn unmount(&self) -> bool {
        if !self.0.mounted.replace(false) {
            return false;
        }

        if let Some(parent) = self.0.root.parent() {
            parent.remove(&self.0.root);
        }
        true
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<N: Node> Clone for MountHandle<N> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<N: Node> fmt::Debug for MountHandle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountHandle")
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}
