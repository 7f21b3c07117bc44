//! Dynload - Cross-Platform Dynamic Library Loading
//!
//! Opens shared objects / DLLs through the host operating system's loader,
//! resolves exported functions and variables to typed pointers, invokes them
//! (optionally through a per-library symbol cache), and releases the module
//! deterministically.
//!
//! # Features
//!
//! - **One handle type across platforms**: POSIX `dlopen`/`dlsym`/`dlerror`
//!   and Windows `LoadLibraryW`/`GetProcAddress`/`GetLastError` behind a
//!   single owning [`DynamicLibrary`]
//! - **Typed resolution**: [`get`]/[`try_get`] for functions,
//!   [`get_variable`]/[`try_get_variable`] for in-place access to exported
//!   data
//! - **Cached invocation**: [`invoke`] resolves each symbol name at most
//!   once per loaded module; [`invoke_uncached`] resolves fresh every call
//! - **Ownership-correct lifecycle**: move-only handles, idempotent
//!   [`unload`], [`reload`], and release-on-drop
//!
//! # Architecture
//!
//! ```text
//! caller
//!   │  load / get / invoke / unload
//!   ▼
//! DynamicLibrary ───── SymbolCache (name → address, lock-guarded)
//!   │
//!   ▼
//! platform shim (selected per target OS at build time)
//!   │  dlopen / dlsym / dlerror        LoadLibraryW / GetProcAddress / GetLastError
//!   ▼
//! OS loader
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dynload::DynamicLibrary;
//!
//! type IntAdd = extern "C" fn(i32, i32) -> i32;
//!
//! # fn main() -> dynload::Result<()> {
//! let lib = DynamicLibrary::load("libpayload.so")?;
//!
//! // Resolve once, call many times.
//! let add = unsafe { lib.get::<IntAdd>("intAdd")? };
//! assert_eq!((*add)(2, 3), 5);
//!
//! // Or invoke by name through the symbol cache.
//! let sum = unsafe { lib.invoke::<IntAdd>("intAdd", (2, 3))? };
//! assert_eq!(sum, 5);
//!
//! // Exported variables are accessed in place.
//! let counter = unsafe { lib.get_variable::<i32>("g_counter")? };
//! let value = unsafe { counter.read() };
//! # let _ = value;
//! # Ok(())
//! # }
//! ```
//!
//! # Safety
//!
//! The OS cannot verify a caller-declared type against what a module really
//! exports, so every typed access is `unsafe` and every access point takes
//! the full intended type. See [`DynamicLibrary`] for the exact contract.
//!
//! [`get`]: DynamicLibrary::get
//! [`try_get`]: DynamicLibrary::try_get
//! [`get_variable`]: DynamicLibrary::get_variable
//! [`try_get_variable`]: DynamicLibrary::try_get_variable
//! [`invoke`]: DynamicLibrary::invoke
//! [`invoke_uncached`]: DynamicLibrary::invoke_uncached
//! [`unload`]: DynamicLibrary::unload
//! [`reload`]: DynamicLibrary::reload

mod cache;
mod error;
mod library;
mod platform;
mod symbol;

pub use error::{Error, Result};
pub use library::DynamicLibrary;
pub use platform::RawHandle;
pub use symbol::{FnSignature, Symbol, Variable};
