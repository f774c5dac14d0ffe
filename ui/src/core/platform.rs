//! Platform glue for spawning detached work.

use std::future::Future;

/// Run a future on the UI scope without awaiting it.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}
