//! `Error` and `Result` types for this crate.
use std::fmt::{self, Display, Formatter};

pub(crate) type CowStr = std::borrow::Cow<'static, str>;

/// Different kinds of errors reported by most faillible operations.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// No OpenGL context was current on the calling thread when one was
    /// required.
    ///
    /// Offscreen contexts are derived from the current one, so the embedding
    /// application must have created and bound the primary context first.
    NoCurrentContext,
    /// The driver refused to create the context, its drawable, or the
    /// framebuffer configuration. The `reason` names the failing call.
    ContextCreationFailed,
    /// The make-current call failed, or the context was already active.
    ActivationFailed,
    /// The make-not-current call failed.
    DeactivationFailed,
    /// The probe GL function resolved to a different address under the
    /// offscreen context than under the context it was created from.
    ///
    /// Calls made through pre-resolved function pointers would silently
    /// target the wrong entry points, so activation is refused.
    UnstableProcAddress,
    /// The operation failed for reasons unrelated to the graphics driver;
    /// for instance, the OS refused to spawn a thread.
    Failed,
}

/// An `ErrorKind` packed with an optional `reason` string.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// A hopefully useful reason string, or `None` if unknown or not meaningful.
    pub reason: Option<CowStr>,
}

/// Alias to `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl ErrorKind {
    pub(crate) fn describe_quick(&self) -> &'static str {
        match *self {
            ErrorKind::NoCurrentContext => "No OpenGL context is current on the calling thread",
            ErrorKind::ContextCreationFailed => "Offscreen context creation has failed",
            ErrorKind::ActivationFailed => "Activating the offscreen context has failed",
            ErrorKind::DeactivationFailed => "Deactivating the context has failed",
            ErrorKind::UnstableProcAddress => "GL function addresses differ across contexts",
            ErrorKind::Failed => "Operation has failed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.describe_quick())
    }
}

impl std::error::Error for ErrorKind {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.describe_quick())?;
        match self.reason {
            None => write!(f, " (no reason given)"),
            Some(ref s) => write!(f, ": {}", s),
        }
    }
}

impl std::error::Error for Error {}

mod utils {
    #![allow(dead_code)]
    use super::*;

    impl Error {
        pub(crate) fn no_current_context<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::NoCurrentContext, reason: Some(s.into()) }
        }
        pub(crate) fn context_creation<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::ContextCreationFailed, reason: Some(s.into()) }
        }
        pub(crate) fn activation<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::ActivationFailed, reason: Some(s.into()) }
        }
        pub(crate) fn deactivation<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::DeactivationFailed, reason: Some(s.into()) }
        }
        pub(crate) fn unstable_proc_address<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::UnstableProcAddress, reason: Some(s.into()) }
        }
        pub(crate) fn failed<S: Into<CowStr>>(s: S) -> Self {
            Self { kind: ErrorKind::Failed, reason: Some(s.into()) }
        }
    }
}
