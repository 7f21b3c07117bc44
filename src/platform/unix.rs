//! POSIX loader shim (`dlopen` / `dlsym` / `dlerror`).

use std::ffi::{c_void, CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use super::RawHandle;

/// Map the module at `path` into the process. Null on failure.
pub fn open(path: &Path) -> RawHandle {
    let Ok(path) = CString::new(path.as_os_str().as_bytes()) else {
        // An interior NUL can never name a real file.
        return ptr::null_mut();
    };
    unsafe { libc::dlopen(path.as_ptr(), libc::RTLD_LAZY) }
}

/// Unmap the module. No-op on null.
pub fn close(handle: RawHandle) {
    if !handle.is_null() {
        unsafe {
            libc::dlclose(handle);
        }
    }
}

/// Look up an exported symbol by exact name. Null if absent.
pub fn resolve(handle: RawHandle, name: &CStr) -> *mut c_void {
    unsafe {
        // Clear any stale error so last_error() reflects only this lookup.
        libc::dlerror();
        libc::dlsym(handle, name.as_ptr())
    }
}

/// Human-readable text for the most recent loader failure on this thread.
pub fn last_error() -> String {
    let err = unsafe { libc::dlerror() };
    if err.is_null() {
        "Unknown error".to_string()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}
