use std::{any::Any, cell::RefCell, thread_local};

use harbor_nodes::Node;

use crate::mount::MountHandle;

thread_local! {
    static APP: RefCell<Option<Box<dyn Any>>> = RefCell::default();
}

pub(crate) fn export<N: Node>(handle: MountHandle<N>) {
    APP.with_borrow_mut(|app| *app = Some(Box::new(handle)));
}

/// Whether an application has been started and not torn down.
pub fn is_started() -> bool {
    APP.with_borrow(Option::is_some)
}

/// The handle of the started application, if it was mounted into `N` nodes.
pub fn app<N: Node>() -> Option<MountHandle<N>> {
    APP.with_borrow(|app| {
        app.as_ref()?
            .downcast_ref::<MountHandle<N>>()
            .cloned()
    })
}

/// Unmounts the started application and clears it, allowing another start.
///
/// Returns `false` and leaves the application running if it was mounted into a node
/// type other than `N`.
pub fn teardown<N: Node>() -> bool {
    let exported = APP.with_borrow_mut(|app| {
        if app
            .as_ref()
            .is_some_and(|handle| handle.is::<MountHandle<N>>())
        {
            app.take()
        } else {
            None
        }
    });

    match exported.and_then(|handle| handle.downcast::<MountHandle<N>>().ok()) {
        Some(handle) => {
            handle.unmount();
            tracing::info!("application torn down");
            true
        }
        None => false,
    }
}
