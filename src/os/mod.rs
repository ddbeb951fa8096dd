//! Compile-time selection of the platform backend.
//!
//! Every backend exposes the same surface: an `OsOffscreenContext` with
//! `create()`, `make_current()`, `make_not_current()` and release-on-drop,
//! plus a free `probe_proc_address()` that resolves the probe GL function
//! under whichever context is current on the calling thread.
//!
//! Unit tests swap in a fake driver, since the real ones need a live display
//! and GL driver.

#[cfg(all(target_os = "windows", not(test)))]
mod windows;
#[cfg(all(target_os = "windows", not(test)))]
pub(crate) use self::windows::{probe_proc_address, OsOffscreenContext};

#[cfg(all(any(target_os = "linux", target_os = "freebsd", target_os = "dragonfly", target_os = "openbsd", target_os = "netbsd"), not(test)))]
mod x11;
#[cfg(all(any(target_os = "linux", target_os = "freebsd", target_os = "dragonfly", target_os = "openbsd", target_os = "netbsd"), not(test)))]
pub(crate) use self::x11::{probe_proc_address, OsOffscreenContext};

#[cfg(test)]
pub(crate) mod mock;
#[cfg(test)]
pub(crate) use self::mock::{probe_proc_address, OsOffscreenContext};

#[cfg(not(any(test, target_os = "windows", target_os = "linux", target_os = "freebsd", target_os = "dragonfly", target_os = "openbsd", target_os = "netbsd")))]
compile_error!("unsupported target: only WGL (Windows) and GLX (X11-based) backends exist");
