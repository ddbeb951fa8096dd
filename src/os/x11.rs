//! GLX backend.
//!
//! The offscreen drawable is a 1×1 pbuffer. The context comes from
//! `glXCreateNewContext()`, which takes the share context as a parameter, so
//! there is no unbind/share/rebind dance like on the WGL fallback path.

use std::os::raw::{c_int, c_void};
use std::ptr;

use x11::glx::*;
use x11::xlib as x;

use crate::error::{Error, Result};

const PROBE_GL_FN: &[u8] = b"glActiveTexture\0";

// 32-bit RGBA, 24-bit depth, 8-bit stencil, rendering to pbuffers.
static FBCONFIG_ATTRIBS: [c_int; 11] = [
    GLX_RENDER_TYPE,   GLX_RGBA_BIT,
    GLX_DRAWABLE_TYPE, GLX_PBUFFER_BIT,
    GLX_BUFFER_SIZE,   32,
    GLX_DEPTH_SIZE,    24,
    GLX_STENCIL_SIZE,  8,
    0,
];

// The smallest drawable GLX will give us; nothing is ever presented to it.
static PBUFFER_ATTRIBS: [c_int; 7] = [
    GLX_PBUFFER_WIDTH,      1,
    GLX_PBUFFER_HEIGHT,     1,
    GLX_PRESERVED_CONTENTS, x::False,
    0,
];

#[derive(Debug)]
pub(crate) struct OsOffscreenContext {
    display: *mut x::Display,
    pbuffer: GLXPbuffer,
    context: GLXContext,
}

// Handed to the render thread whole; the make-current discipline is
// enforced by `OffscreenContext`, never by aliasing these pointers.
unsafe impl Send for OsOffscreenContext {}

impl OsOffscreenContext {
    pub(crate) fn create() -> Result<Self> {
        unsafe {
            let share_with = glXGetCurrentContext();
            if share_with.is_null() {
                return Err(Error::no_current_context("glXGetCurrentContext() returned NULL"));
            }
            let display = glXGetCurrentDisplay();
            if display.is_null() {
                return Err(Error::no_current_context("glXGetCurrentDisplay() returned NULL"));
            }

            let screen = x::XDefaultScreen(display);
            let mut num_configs = 0;
            let configs = glXChooseFBConfig(display, screen, FBCONFIG_ATTRIBS.as_ptr(), &mut num_configs);
            if configs.is_null() || num_configs == 0 {
                if !configs.is_null() {
                    x::XFree(configs as *mut c_void);
                }
                return Err(Error::context_creation("glXChooseFBConfig() found no matching fbconfig"));
            }
            let config = *configs;
            x::XFree(configs as *mut c_void);

            let pbuffer = glXCreatePbuffer(display, config, PBUFFER_ATTRIBS.as_ptr());
            if pbuffer == 0 {
                return Err(Error::context_creation("glXCreatePbuffer() returned 0"));
            }

            let context = glXCreateNewContext(display, config, GLX_RGBA_TYPE, share_with, x::True);
            if context.is_null() {
                glXDestroyPbuffer(display, pbuffer);
                return Err(Error::context_creation("glXCreateNewContext() returned NULL"));
            }

            info!("created offscreen GLX context {:?}, sharing with {:?}", context, share_with);
            Ok(Self { display, pbuffer, context })
        }
    }

    pub(crate) fn make_current(&self) -> Result<()> {
        let is_ok = unsafe { glXMakeCurrent(self.display, self.pbuffer, self.context) };
        if is_ok == x::False {
            return Err(Error::activation("glXMakeCurrent() refused to bind the pbuffer context"));
        }
        Ok(())
    }

    pub(crate) fn make_not_current(&self) -> Result<()> {
        let is_ok = unsafe { glXMakeCurrent(self.display, 0, ptr::null_mut()) };
        if is_ok == x::False {
            return Err(Error::deactivation("glXMakeCurrent(dpy, None, NULL) failed"));
        }
        Ok(())
    }
}

impl Drop for OsOffscreenContext {
    fn drop(&mut self) {
        // Failures surface as asynchronous X errors at worst; there is
        // nothing useful to do with them during teardown.
        unsafe {
            glXDestroyContext(self.display, self.context);
            glXDestroyPbuffer(self.display, self.pbuffer);
        }
    }
}

pub(crate) fn probe_proc_address() -> usize {
    unsafe { glXGetProcAddressARB(PROBE_GL_FN.as_ptr()).map_or(0, |f| f as usize) }
}
