//! Windows loader shim (`LoadLibraryW` / `GetProcAddress` / `GetLastError`).

#![allow(non_snake_case)]

use std::ffi::{c_char, c_void, CStr};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use super::RawHandle;

const FORMAT_MESSAGE_ALLOCATE_BUFFER: u32 = 0x0000_0100;
const FORMAT_MESSAGE_FROM_SYSTEM: u32 = 0x0000_1000;
const FORMAT_MESSAGE_IGNORE_INSERTS: u32 = 0x0000_0200;

// kernel32 is linked by default on Windows targets.
extern "system" {
    fn LoadLibraryW(lpLibFileName: *const u16) -> RawHandle;
    fn FreeLibrary(hLibModule: RawHandle) -> i32;
    fn GetProcAddress(hModule: RawHandle, lpProcName: *const c_char) -> *mut c_void;
    fn GetLastError() -> u32;
    fn FormatMessageW(
        dwFlags: u32,
        lpSource: *const c_void,
        dwMessageId: u32,
        dwLanguageId: u32,
        lpBuffer: *mut u16,
        nSize: u32,
        Arguments: *mut c_void,
    ) -> u32;
    fn LocalFree(hMem: *mut c_void) -> *mut c_void;
}

/// Map the module at `path` into the process. Null on failure.
pub fn open(path: &Path) -> RawHandle {
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
    unsafe { LoadLibraryW(wide.as_ptr()) }
}

/// Unmap the module. No-op on null.
pub fn close(handle: RawHandle) {
    if !handle.is_null() {
        unsafe {
            FreeLibrary(handle);
        }
    }
}

/// Look up an exported symbol by exact name. Null if absent.
pub fn resolve(handle: RawHandle, name: &CStr) -> *mut c_void {
    unsafe { GetProcAddress(handle, name.as_ptr()) }
}

/// Human-readable text for the most recent loader failure on this thread.
pub fn last_error() -> String {
    let code = unsafe { GetLastError() };
    if code == 0 {
        return "No error".to_string();
    }

    // The system allocates the buffer, so the text is never truncated no
    // matter how long the message is. With ALLOCATE_BUFFER, lpBuffer
    // receives a pointer to the allocation.
    let mut buffer: *mut u16 = ptr::null_mut();
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_ALLOCATE_BUFFER
                | FORMAT_MESSAGE_FROM_SYSTEM
                | FORMAT_MESSAGE_IGNORE_INSERTS,
            ptr::null(),
            code,
            0,
            &mut buffer as *mut *mut u16 as *mut u16,
            0,
            ptr::null_mut(),
        )
    };
    if len == 0 || buffer.is_null() {
        return format!("Unknown error {code}");
    }

    let message = unsafe {
        let text = std::slice::from_raw_parts(buffer, len as usize);
        let text = String::from_utf16_lossy(text);
        LocalFree(buffer.cast());
        text
    };
    format!("error {code}: {}", message.trim_end())
}
