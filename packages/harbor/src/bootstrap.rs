use std::error::Error;

use harbor_nodes::{Environment, Node};
use thiserror::Error;

use crate::{
    app,
    component::Component,
    config::Config,
    mount::{Attach, Mount, MountHandle},
    style::Stylesheet,
};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("no host element with id `{key}`")]
    HostNotFound { key: String },
    #[error("document has no head to attach stylesheets to")]
    HeadNotFound,
    #[error("failed to mount root component")]
    Mount(#[source] Box<dyn Error + Send + Sync>),
    #[error("application already started")]
    AlreadyStarted,
}

/// Mounts `root` into the element of `env` identified by `key`.
///
/// The host is resolved before the mount capability is invoked, so a missing host
/// leaves the environment untouched.
pub fn bootstrap<E, M, C>(
    env: &E,
    mounter: &M,
    root: C,
    key: &str,
) -> Result<MountHandle<E::Node>, BootstrapError>
where
    E: Environment,
    M: Mount<E::Node>,
    C: Component<E::Node>,
{
    let target = resolve(env, key)?;
    mount(mounter, root, &target)
}

fn resolve<E: Environment>(env: &E, key: &str) -> Result<E::Node, BootstrapError> {
    tracing::debug!(key, "resolving host element");
    env.lookup(key).ok_or_else(|| BootstrapError::HostNotFound {
        key: key.to_string(),
    })
}

fn mount<N, M, C>(mounter: &M, root: C, target: &N) -> Result<MountHandle<N>, BootstrapError>
where
    N: Node,
    M: Mount<N>,
    C: Component<N>,
{
    let handle = mounter
        .mount(root, target)
        .map_err(|err| BootstrapError::Mount(Box::new(err)))?;
    tracing::info!("root component mounted");
    Ok(handle)
}

/// One-time application startup.
///
/// Steps run in a fixed order: refuse a second start, resolve the host element,
/// apply stylesheets, mount the root component, then export the handle (see
/// [`app`](crate::app)). A failed mount removes the stylesheets it applied.
pub struct Bootstrap<C> {
    root: C,
    config: Config,
    stylesheets: Vec<Stylesheet>,
}

impl<C> Bootstrap<C> {
    pub fn new(root: C) -> Self {
        Self {
            root,
            config: Config::default(),
            stylesheets: vec![],
        }
    }

    /// Replaces the whole config, including any target set before.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn target<S: Into<String>>(mut self, key: S) -> Self {
        self.config.target = key.into();
        self
    }

    pub fn stylesheet<S: Into<Stylesheet>>(mut self, stylesheet: S) -> Self {
        self.stylesheets.push(stylesheet.into());
        self
    }

    pub fn try_start<E>(self, env: &E) -> Result<MountHandle<E::Node>, BootstrapError>
    where
        E: Environment,
        C: Component<E::Node>,
    {
        self.try_start_with(env, &Attach)
    }

    pub fn try_start_with<E, M>(
        self,
        env: &E,
        mounter: &M,
    ) -> Result<MountHandle<E::Node>, BootstrapError>
    where
        E: Environment,
        M: Mount<E::Node>,
        C: Component<E::Node>,
    {
        if app::is_started() {
            return Err(BootstrapError::AlreadyStarted);
        }

        let Self {
            root,
            config,
            stylesheets,
        } = self;

        let target = resolve(env, &config.target)?;

        // Held until the mount settles: backends may only keep a weak link to it.
        let head = if config.styles && !stylesheets.is_empty() {
            Some(env.head().ok_or(BootstrapError::HeadNotFound)?)
        } else {
            None
        };
        let styles: Vec<E::Node> = match &head {
            Some(head) => stylesheets
                .iter()
                .map(|stylesheet| stylesheet.apply(head))
                .collect(),
            None => vec![],
        };

        let handle = match mount(mounter, root, &target) {
            Ok(handle) => handle,
            Err(err) => {
                if let Some(head) = &head {
                    for style in &styles {
                        head.remove(style);
                    }
                }
                return Err(err);
            }
        };

        app::export(handle.clone());
        tracing::info!(host = %config.target, "application started");
        Ok(handle)
    }

    /// Like [`try_start`](Self::try_start), but aborts startup on failure.
    pub fn start<E>(self, env: &E) -> MountHandle<E::Node>
    where
        E: Environment,
        C: Component<E::Node>,
    {
        self.try_start(env).unwrap_or_else(|err| {
            tracing::error!(error = %err, "startup aborted");
            panic!("failed to bootstrap application: {err}")
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, convert::Infallible, error::Error, fmt};

    use harbor_nodes::{element, text, Environment, Node};
    use harbor_render::{Document, NodeRef};

    use super::{bootstrap, Bootstrap, BootstrapError};
    use crate::{
        app,
        component::Component,
        config::Config,
        mount::{Attach, Mount, MountHandle},
        teardown,
    };

    #[derive(Default)]
    struct Counting {
        calls: Cell<usize>,
    }

    impl Mount<NodeRef> for Counting {
        type Error = Infallible;

        fn mount<C>(&self, root: C, target: &NodeRef) -> Result<MountHandle<NodeRef>, Infallible>
        where
            C: Component<NodeRef>,
        {
            self.calls.set(self.calls.get() + 1);
            Attach.mount(root, target)
        }
    }

    #[derive(Debug)]
    struct Rejected;

    impl fmt::Display for Rejected {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("malformed root component")
        }
    }

    impl Error for Rejected {}

    struct Rejecting;

    impl Mount<NodeRef> for Rejecting {
        type Error = Rejected;

        fn mount<C>(&self, _root: C, _target: &NodeRef) -> Result<MountHandle<NodeRef>, Rejected>
        where
            C: Component<NodeRef>,
        {
            Err(Rejected)
        }
    }

    struct Headless(Document);

    impl Environment for Headless {
        type Node = NodeRef;

        fn lookup(&self, key: &str) -> Option<NodeRef> {
            self.0.lookup(key)
        }

        fn head(&self) -> Option<NodeRef> {
            None
        }
    }

    struct Page {
        doc: Document,
        header: NodeRef,
        anchor: NodeRef,
        footer: NodeRef,
    }

    fn page() -> Page {
        let doc = Document::new();
        let header: NodeRef = element!("header", id = "nav"; text!("Home"));
        let anchor: NodeRef = element!("div", id = "app");
        let footer: NodeRef = element!("footer"; text!("(c) harbor"));
        doc.body().insert(&header, None);
        doc.body().insert(&anchor, None);
        doc.body().insert(&footer, None);

        Page {
            doc,
            header,
            anchor,
            footer,
        }
    }

    fn root() -> NodeRef {
        element!("main"; element!("h1"; text!("Hello")))
    }

    #[test]
    fn mounts_into_host_element() {
        let page = page();

        let handle = bootstrap(&page.doc, &Attach, root, "app").unwrap();

        assert_eq!(page.anchor.children(), vec![handle.root().clone()]);
        assert_eq!(handle.target(), &page.anchor);
        assert!(handle.is_mounted());
        assert_eq!(handle.root().text_content(), "Hello");
    }

    #[test]
    fn missing_host_fails_before_mounting() {
        let page = page();
        let before = page.doc.to_string();
        let counting = Counting::default();

        let err = bootstrap(&page.doc, &counting, root, "missing").unwrap_err();

        assert!(matches!(err, BootstrapError::HostNotFound { ref key } if key == "missing"));
        assert_eq!(err.to_string(), "no host element with id `missing`");
        assert_eq!(counting.calls.get(), 0);
        assert_eq!(page.doc.to_string(), before);
    }

    #[test]
    fn leaves_other_nodes_untouched() {
        let page = page();
        let header = page.header.to_string();
        let footer = page.footer.to_string();
        let head = page.doc.head().to_string();

        bootstrap(&page.doc, &Attach, root, "app").unwrap();

        assert_eq!(
            page.doc.body().children(),
            vec![page.header.clone(), page.anchor.clone(), page.footer.clone()]
        );
        assert_eq!(page.header.to_string(), header);
        assert_eq!(page.footer.to_string(), footer);
        assert_eq!(page.doc.head().to_string(), head);
    }

    #[test]
    fn mount_errors_keep_their_source() {
        let page = page();

        let err = bootstrap(&page.doc, &Rejecting, root, "app").unwrap_err();

        assert!(matches!(err, BootstrapError::Mount(_)));
        let source = err.source().unwrap();
        assert!(source.downcast_ref::<Rejected>().is_some());
        assert!(page.anchor.children().is_empty());
    }

    #[test]
    fn start_exports_the_returned_handle() {
        let page = page();

        let handle = Bootstrap::new(root).try_start(&page.doc).unwrap();
        let exported = app::<NodeRef>().unwrap();

        assert!(handle.ptr_eq(&exported));
        assert!(crate::is_started());
    }

    #[test]
    fn start_mounts_exactly_once() {
        let page = page();
        let counting = Counting::default();

        Bootstrap::new(root)
            .try_start_with(&page.doc, &counting)
            .unwrap();
        let err = Bootstrap::new(root)
            .try_start_with(&page.doc, &counting)
            .unwrap_err();

        assert!(matches!(err, BootstrapError::AlreadyStarted));
        assert_eq!(counting.calls.get(), 1);
        assert_eq!(page.anchor.children().len(), 1);
    }

    #[test]
    fn teardown_allows_restart() {
        let page = page();

        let first = Bootstrap::new(root).try_start(&page.doc).unwrap();
        assert!(teardown::<NodeRef>());

        assert!(!first.is_mounted());
        assert!(page.anchor.children().is_empty());
        assert!(!crate::is_started());
        assert!(!teardown::<NodeRef>());

        let second = Bootstrap::new(root).try_start(&page.doc).unwrap();
        assert!(!second.ptr_eq(&first));
        assert_eq!(page.anchor.children().len(), 1);
    }

    #[test]
    fn applies_stylesheets_in_order() {
        let page = page();

        Bootstrap::new(root)
            .stylesheet("body { margin: 0; }")
            .stylesheet(String::from("main { color: red; }"))
            .try_start(&page.doc)
            .unwrap();

        let styles = page.doc.head().children();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].text_content(), "body { margin: 0; }");
        assert_eq!(styles[1].text_content(), "main { color: red; }");
    }

    #[test]
    fn rendered_stylesheets_keep_raw_css() {
        let page = page();

        Bootstrap::new(root)
            .stylesheet("a > b { content: \"x\"; }")
            .try_start(&page.doc)
            .unwrap();

        assert!(page
            .doc
            .to_string()
            .contains("<style>\n      a > b { content: \"x\"; }\n    </style>"));
    }

    #[test]
    fn styles_can_be_disabled() {
        let page = page();
        let config = Config {
            styles: false,
            ..Config::default()
        };

        Bootstrap::new(root)
            .config(config)
            .stylesheet("body { margin: 0; }")
            .try_start(&page.doc)
            .unwrap();

        assert!(page.doc.head().children().is_empty());
    }

    #[test]
    fn failed_start_removes_applied_styles() {
        let page = page();
        let before = page.doc.to_string();

        let err = Bootstrap::new(root)
            .stylesheet("body { margin: 0; }")
            .try_start_with(&page.doc, &Rejecting)
            .unwrap_err();

        assert!(matches!(err, BootstrapError::Mount(_)));
        assert_eq!(page.doc.to_string(), before);
        assert!(!crate::is_started());
    }

    #[test]
    fn missing_host_skips_styles() {
        let page = page();
        let before = page.doc.to_string();

        let err = Bootstrap::new(root)
            .target("missing")
            .stylesheet("body { margin: 0; }")
            .try_start(&page.doc)
            .unwrap_err();

        assert!(matches!(err, BootstrapError::HostNotFound { .. }));
        assert_eq!(page.doc.to_string(), before);
    }

    #[test]
    fn missing_head_fails_before_mounting() {
        let page = page();
        let counting = Counting::default();

        let err = Bootstrap::new(root)
            .stylesheet("body { margin: 0; }")
            .try_start_with(&Headless(page.doc.clone()), &counting)
            .unwrap_err();

        assert!(matches!(err, BootstrapError::HeadNotFound));
        assert_eq!(counting.calls.get(), 0);
        assert!(page.anchor.children().is_empty());
    }

    #[test]
    fn custom_target_is_used() {
        let page = page();

        let handle = Bootstrap::new(root)
            .target("nav")
            .try_start(&page.doc)
            .unwrap();

        assert_eq!(handle.target(), &page.header);
        assert!(page.anchor.children().is_empty());
    }

    #[test]
    #[should_panic(expected = "failed to bootstrap application: no host element with id `app`")]
    fn start_aborts_without_host() {
        let doc = Document::new();
        Bootstrap::new(root).start(&doc);
    }
}
