//! The offscreen rendering context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::os;

/// Address of the probe GL function, resolved under the context the first
/// `OffscreenContext` was derived from. Every later activation re-resolves
/// the probe and must reproduce this address.
static PROBE_BASELINE: OnceLock<usize> = OnceLock::new();

/// An offscreen OpenGL context that shares resources with the context that
/// was current when it was created.
///
/// The drawable behind it is a 1×1 pbuffer on GLX targets, and the caller's
/// own device context on WGL targets (where rendering to the default
/// framebuffer is off-limits while the offscreen context is active).
///
/// Create it on the thread that owns the onscreen context, then hand it to
/// the thread that will render; [`enable`](Self::enable) and
/// [`disable`](Self::disable) may only be called from that thread. The
/// context must never be current on two threads at once; a second `enable`
/// while one is in effect is refused. [`OffscreenThread`](crate::OffscreenThread)
/// wraps this whole discipline up.
#[derive(Debug)]
pub struct OffscreenContext {
    os: os::OsOffscreenContext,
    active: AtomicBool,
}

impl OffscreenContext {
    /// Creates an offscreen sibling of the context currently bound to the
    /// calling thread, with resource sharing enabled between the two.
    ///
    /// The caller's context is left current, even on the WGL fallback path
    /// that has to unbind it while establishing sharing.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::NoCurrentContext`](crate::ErrorKind::NoCurrentContext)
    ///   if the calling thread has no current context or drawable;
    /// - [`ErrorKind::ContextCreationFailed`](crate::ErrorKind::ContextCreationFailed)
    ///   if a driver call returns a null or failure handle. Anything acquired
    ///   up to that point is released before returning.
    pub fn new() -> Result<Self> {
        let os = os::OsOffscreenContext::create()?;
        // Resolved while the caller's context is still current; this anchors
        // the address that every later activation must reproduce.
        PROBE_BASELINE.get_or_init(os::probe_proc_address);
        Ok(Self { os, active: AtomicBool::new(false) })
    }

    /// Makes this context and its drawable current on the calling thread.
    ///
    /// Call this only from the thread that will render. After binding, the
    /// probe GL function is re-resolved and compared against the address
    /// cached at creation time; some drivers place entry points at different
    /// addresses per context, which would corrupt every call made through
    /// pointers resolved under the other context.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::ActivationFailed`](crate::ErrorKind::ActivationFailed)
    ///   if the context is already active, or if the driver refuses the bind;
    /// - [`ErrorKind::UnstableProcAddress`](crate::ErrorKind::UnstableProcAddress)
    ///   if the probe address differs; the context is deactivated again
    ///   before this is returned.
    pub fn enable(&self) -> Result<()> {
        if self.active.swap(true, Ordering::Acquire) {
            return Err(Error::activation("offscreen context is already active"));
        }
        if let Err(e) = self.os.make_current() {
            self.active.store(false, Ordering::Release);
            return Err(e);
        }
        let baseline = PROBE_BASELINE.get().copied().unwrap_or(0);
        let resolved = os::probe_proc_address();
        if resolved != baseline {
            if let Err(e) = self.os.make_not_current() {
                warn!("failed to deactivate context after a probe address mismatch: {}", e);
            }
            self.active.store(false, Ordering::Release);
            return Err(Error::unstable_proc_address(format!(
                "probe function resolved to {:#x} under the offscreen context, expected {:#x}",
                resolved, baseline,
            )));
        }
        Ok(())
    }

    /// Deactivates whatever context is current on the calling thread, by
    /// passing "no context" to the driver's make-current call.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DeactivationFailed`](crate::ErrorKind::DeactivationFailed)
    /// if the driver call fails; the context then still counts as active.
    pub fn disable(&self) -> Result<()> {
        self.os.make_not_current()?;
        self.active.store(false, Ordering::Release);
        Ok(())
    }
}
