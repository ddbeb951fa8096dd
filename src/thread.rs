//! The offscreen render thread.

use std::thread;

use crate::context::OffscreenContext;
use crate::error::{Error, Result};

/// A worker thread bound to its own [`OffscreenContext`].
///
/// The context is created on the constructing thread, as a resource-sharing
/// sibling of that thread's current context. The worker then runs
/// `enable()`, the render callback, `disable()`, and terminates. Dropping
/// the handle joins the worker, blocking until the callback has returned.
///
/// There is no cancellation mechanism; a callback meant to stop early must
/// watch its own stop signal.
#[derive(Debug)]
pub struct OffscreenThread {
    join_handle: Option<thread::JoinHandle<()>>,
}

impl OffscreenThread {
    /// Creates the offscreen context on the calling thread (which must have
    /// a current GL context) and spawns the render thread.
    ///
    /// Context creation errors are those of [`OffscreenContext::new`]. An
    /// error from `enable()` or `disable()` on the worker is an unrecovered
    /// failure of that thread: the worker panics, and the panic is reported
    /// when the handle is dropped. Install handling inside `render` if
    /// recovery matters to the embedding application.
    pub fn new<F>(render: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let context = OffscreenContext::new()?;
        let join_handle = thread::Builder::new()
            .name("offscreen-render".to_string())
            .spawn(move || {
                if let Err(e) = context.enable() {
                    panic!("failed to activate the offscreen context: {}", e);
                }
                render();
                if let Err(e) = context.disable() {
                    panic!("failed to deactivate the offscreen context: {}", e);
                }
            })
            .map_err(|e| Error::failed(format!("failed to spawn the render thread: {}", e)))?;
        Ok(Self { join_handle: Some(join_handle) })
    }
}

impl Drop for OffscreenThread {
    fn drop(&mut self) {
        // The sole join of the sole worker.
        if let Some(join_handle) = self.join_handle.take() {
            if join_handle.join().is_err() {
                error!("offscreen render thread panicked");
            }
        }
    }
}
