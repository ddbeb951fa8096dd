//! WGL backend.
//!
//! The offscreen context renders into the caller's own device context;
//! while it is current, drawing to the default framebuffer is off-limits.
//! Creation prefers `wglCreateContextAttribsARB()`, which takes the share
//! context as a parameter. Without it, sharing has to be established with
//! `wglShareLists()` while neither context is bound, hence the
//! unbind/share/rebind sequence on the fallback path.

use std::mem;
use std::os::raw::c_int;
use std::ptr;

use winapi::shared::minwindef::FALSE;
use winapi::shared::windef::{HDC, HGLRC};
use winapi::um::wingdi::{
    wglCreateContext, wglDeleteContext, wglGetCurrentContext, wglGetCurrentDC,
    wglGetProcAddress, wglMakeCurrent, wglShareLists,
};

use crate::error::{Error, Result};

const PROBE_GL_FN: &[u8] = b"glActiveTexture\0";

// From WGL_ARB_create_context; winapi doesn't ship these.
const WGL_CONTEXT_FLAGS_ARB: c_int = 0x2094;
const WGL_CONTEXT_DEBUG_BIT_ARB: c_int = 0x0001;

static CONTEXT_ATTRIBS: [c_int; 3] = [WGL_CONTEXT_FLAGS_ARB, WGL_CONTEXT_DEBUG_BIT_ARB, 0];

#[allow(non_camel_case_types)]
type wglCreateContextAttribsARB = unsafe extern "system" fn(HDC, HGLRC, *const c_int) -> HGLRC;

#[derive(Debug)]
pub(crate) struct OsOffscreenContext {
    hdc: HDC,
    hglrc: HGLRC,
}

// Handed to the render thread whole; the make-current discipline is
// enforced by `OffscreenContext`, never by aliasing these handles.
unsafe impl Send for OsOffscreenContext {}

impl OsOffscreenContext {
    pub(crate) fn create() -> Result<Self> {
        unsafe {
            let share_with = wglGetCurrentContext();
            let hdc = wglGetCurrentDC();
            if share_with.is_null() || hdc.is_null() {
                return Err(Error::no_current_context(
                    "wglGetCurrentContext() or wglGetCurrentDC() returned NULL",
                ));
            }

            // Newer drivers: create and share in a single call.
            if let Some(create_context_attribs) = load_wgl_create_context_attribs() {
                let hglrc = create_context_attribs(hdc, share_with, CONTEXT_ATTRIBS.as_ptr());
                if !hglrc.is_null() {
                    info!("created offscreen WGL context via wglCreateContextAttribsARB()");
                    return Ok(Self { hdc, hglrc });
                }
                warn!("wglCreateContextAttribsARB() returned NULL, falling back to wglCreateContext()");
            }

            let hglrc = wglCreateContext(hdc);
            if hglrc.is_null() {
                return Err(Error::context_creation("wglCreateContext() returned NULL"));
            }

            // wglShareLists() wants both contexts unbound.
            if wglMakeCurrent(ptr::null_mut(), ptr::null_mut()) == FALSE {
                wglDeleteContext(hglrc);
                return Err(Error::context_creation("wglMakeCurrent(NULL, NULL) failed"));
            }
            if wglShareLists(share_with, hglrc) == FALSE {
                wglMakeCurrent(hdc, share_with);
                wglDeleteContext(hglrc);
                return Err(Error::context_creation("wglShareLists() failed"));
            }
            // Put the caller's context back the way we found it.
            if wglMakeCurrent(hdc, share_with) == FALSE {
                wglDeleteContext(hglrc);
                return Err(Error::context_creation(
                    "wglMakeCurrent() failed to restore the caller's context",
                ));
            }

            info!("created offscreen WGL context via wglShareLists()");
            Ok(Self { hdc, hglrc })
        }
    }

    pub(crate) fn make_current(&self) -> Result<()> {
        let is_ok = unsafe { wglMakeCurrent(self.hdc, self.hglrc) };
        if is_ok == FALSE {
            return Err(Error::activation("wglMakeCurrent() refused to bind the offscreen context"));
        }
        Ok(())
    }

    pub(crate) fn make_not_current(&self) -> Result<()> {
        let is_ok = unsafe { wglMakeCurrent(ptr::null_mut(), ptr::null_mut()) };
        if is_ok == FALSE {
            return Err(Error::deactivation("wglMakeCurrent(NULL, NULL) failed"));
        }
        Ok(())
    }
}

impl Drop for OsOffscreenContext {
    fn drop(&mut self) {
        // The HDC belongs to the caller's window; only the context is ours.
        let is_ok = unsafe { wglDeleteContext(self.hglrc) };
        if is_ok == FALSE {
            warn!("wglDeleteContext() failed during teardown");
        }
    }
}

// Only works while some context is current, which create() guarantees.
unsafe fn load_wgl_create_context_attribs() -> Option<wglCreateContextAttribsARB> {
    match wglGetProcAddress(b"wglCreateContextAttribsARB\0".as_ptr() as *const _) as usize {
        0 => None,
        f => Some(mem::transmute(f)),
    }
}

pub(crate) fn probe_proc_address() -> usize {
    unsafe { wglGetProcAddress(PROBE_GL_FN.as_ptr() as *const _) as usize }
}
