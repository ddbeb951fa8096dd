//! Offscreen, resource-sharing OpenGL contexts.
//!
//! This crate creates a second OpenGL context as a sibling of whichever
//! context is current on the calling thread, with resource sharing enabled:
//! textures, buffers and shader programs created under one context are
//! usable under the other. An [`OffscreenThread`] pairs such a context with
//! a dedicated worker thread that activates it, runs a render callback, and
//! deactivates it; dropping the handle joins the worker.
//!
//! Two backends exist, selected at compile time: WGL on Windows and GLX on
//! X11-based targets. This is deliberately not a windowing layer; the
//! embedding application is expected to have set up the primary, onscreen
//! context (through SDL2, winit, raw platform calls, ...) before using
//! anything here.
//!
//! ```no_run
//! # fn upload_textures() {}
//! use glshare::OffscreenThread;
//!
//! // On a thread with a current GL context:
//! let worker = OffscreenThread::new(|| {
//!     // Runs on the worker, with the offscreen context current.
//!     // Anything created here is visible to the onscreen context.
//!     upload_textures();
//! }).unwrap();
//!
//! // Dropping blocks until the callback has returned.
//! drop(worker);
//! ```

#![doc(html_root_url = "https://docs.rs/glshare/0.1.0")]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod error;
pub use error::{Error, ErrorKind};
pub mod context;
pub use context::OffscreenContext;
pub mod thread;
pub use thread::OffscreenThread;

mod os;
