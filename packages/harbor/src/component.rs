use harbor_nodes::Node;

/// A root unit definition: something that produces the node tree to mount.
///
/// Implemented for every `FnOnce() -> N`, so plain component functions can be passed
/// directly.
pub trait Component<N: Node> {
    fn render(self) -> N;
}

impl<N, F> Component<N> for F
where
    N: Node,
    F: FnOnce() -> N,
{
    fn render(self) -> N {
        self()
    }
}
