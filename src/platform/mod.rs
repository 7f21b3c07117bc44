//! OS loader shim.
//!
//! Four operations implemented once per target OS: [`open`], [`close`],
//! [`resolve`], and [`last_error`]. Everything above this module is
//! platform-agnostic; no other module calls into the OS loader directly.
//!
//! All four are infallible at the type level: `open` and `resolve` report
//! failure as a null pointer, and the caller turns that into an error using
//! the text from [`last_error`].

use std::ffi::c_void;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{close, last_error, open, resolve};

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::{close, last_error, open, resolve};

/// Opaque handle to a module mapped into this process.
///
/// `HMODULE` on Windows, the `void *` returned by `dlopen` elsewhere. Null
/// means "no module". The value is only meaningful inside the process that
/// produced it.
pub type RawHandle = *mut c_void;
