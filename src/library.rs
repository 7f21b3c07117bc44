//! Owning handle over one loaded module.

use std::ffi::{c_void, CString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use crate::cache::SymbolCache;
use crate::error::{Error, Result};
use crate::platform::{self, RawHandle};
use crate::symbol::{FnSignature, Symbol, Variable};

/// A dynamically loaded library.
///
/// Owns exactly one platform handle plus a cache of resolved symbol
/// addresses. The handle is nullable: a freshly [`load`]ed library is
/// "loaded", while [`unloaded`], a failed [`reload`], or an explicit
/// [`unload`] leave it "empty". Dropping the handle releases the module.
///
/// Copying is statically impossible; moving the value transfers the platform
/// handle and the cache together, and the moved-from binding can no longer
/// be used.
///
/// # Thread safety
///
/// Any number of threads may resolve and invoke symbols through a shared
/// reference concurrently; the cache is lock-guarded and the lock is never
/// held across a foreign call. Operations that change which module is loaded
/// ([`reload`], [`unload`], moves, drop) take the handle exclusively, so the
/// borrow checker serializes them against all other use.
///
/// # Safety contract
///
/// The loader cannot verify caller-declared types against the module. A
/// symbol accessed under the wrong type, a data export accessed as a
/// function (or vice versa), or an [`invoke`] whose declared signature
/// differs from an earlier cached one for the same name is undefined
/// behavior. Each access point takes the full intended type for exactly this
/// reason.
///
/// [`load`]: DynamicLibrary::load
/// [`unloaded`]: DynamicLibrary::unloaded
/// [`reload`]: DynamicLibrary::reload
/// [`unload`]: DynamicLibrary::unload
/// [`invoke`]: DynamicLibrary::invoke
pub struct DynamicLibrary {
    handle: RawHandle,
    path: Option<PathBuf>,
    cache: SymbolCache,
}

// The handle names a process-global resource and is only mutated through
// &mut self; the cache is lock-guarded.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl DynamicLibrary {
    /// Load the library at the given path.
    ///
    /// On failure nothing is acquired and the error carries the path plus
    /// the platform diagnostic.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Loading runs arbitrary module initializers; we trust the caller's
        // choice of library the same way the OS loader does.
        let handle = platform::open(&path);
        if handle.is_null() {
            return Err(Error::Load {
                path,
                reason: platform::last_error(),
            });
        }

        Ok(Self {
            handle,
            path: Some(path),
            cache: SymbolCache::new(),
        })
    }

    /// An empty handle holding no module.
    pub fn unloaded() -> Self {
        Self {
            handle: std::ptr::null_mut(),
            path: None,
            cache: SymbolCache::new(),
        }
    }

    /// True while a module is loaded.
    pub fn is_loaded(&self) -> bool {
        !self.handle.is_null()
    }

    /// Path of the currently loaded module, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The raw platform handle, for advanced interop.
    ///
    /// The caller must not close or free it; ownership stays with this
    /// handle. Null when empty.
    pub fn native_handle(&self) -> RawHandle {
        self.handle
    }

    /// Number of symbol addresses currently cached by [`invoke`].
    ///
    /// [`invoke`]: DynamicLibrary::invoke
    pub fn cached_symbol_count(&self) -> usize {
        self.cache.len()
    }

    /// Resolve `name` to a non-null address, without touching the cache.
    fn resolve_raw(&self, name: &str) -> Result<NonNull<c_void>> {
        if self.handle.is_null() {
            // dlsym on a null handle would search the global namespace
            // instead of failing; report the real state.
            return Err(Error::SymbolNotFound {
                name: name.to_string(),
                reason: "library is not loaded".to_string(),
            });
        }

        let c_name = CString::new(name).map_err(|_| Error::SymbolNotFound {
            name: name.to_string(),
            reason: "symbol name contains an interior NUL byte".to_string(),
        })?;

        NonNull::new(platform::resolve(self.handle, &c_name)).ok_or_else(|| {
            Error::SymbolNotFound {
                name: name.to_string(),
                reason: platform::last_error(),
            }
        })
    }

    /// Resolve a symbol and reinterpret its address as a `T`.
    ///
    /// `T` is a function-pointer type for function exports, or a raw pointer
    /// type to take the address of a data export. Never consults or fills
    /// the cache.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the export; see the type-level
    /// safety contract.
    pub unsafe fn get<T>(&self, name: &str) -> Result<Symbol<'_, T>> {
        let addr = self.resolve_raw(name)?;
        Ok(Symbol::from_raw(addr))
    }

    /// Like [`get`], but reports failure as `None` instead of an error.
    ///
    /// # Safety
    ///
    /// Same contract as [`get`].
    ///
    /// [`get`]: DynamicLibrary::get
    pub unsafe fn try_get<T>(&self, name: &str) -> Option<Symbol<'_, T>> {
        self.resolve_raw(name).ok().map(Symbol::from_raw)
    }

    /// Resolve a data export and view its storage in place as a `T`.
    ///
    /// The returned [`Variable`] reads and writes the module's own storage,
    /// so mutations are visible to the library and to every other accessor.
    ///
    /// # Safety
    ///
    /// The export must really be a `T`-typed variable; see the type-level
    /// safety contract.
    pub unsafe fn get_variable<T>(&self, name: &str) -> Result<Variable<'_, T>> {
        let addr = self.resolve_raw(name)?;
        Ok(Variable::from_raw(addr.cast()))
    }

    /// Like [`get_variable`], but reports failure as `None`.
    ///
    /// # Safety
    ///
    /// Same contract as [`get_variable`].
    ///
    /// [`get_variable`]: DynamicLibrary::get_variable
    pub unsafe fn try_get_variable<T>(&self, name: &str) -> Option<Variable<'_, T>> {
        self.resolve_raw(name)
            .ok()
            .map(|addr| Variable::from_raw(addr.cast()))
    }

    /// True if the module exports `name`. Never fails, and leaves the error
    /// state seen by later lookups untouched.
    pub fn has_symbol(&self, name: &str) -> bool {
        self.resolve_raw(name).is_ok()
    }

    /// Call the exported function `name` with the declared signature `F`,
    /// resolving through the cache.
    ///
    /// The first call per name resolves and caches the address; later calls
    /// reuse it, so each name is resolved at most once until [`unload`] or
    /// [`reload`] clears the cache. The cache lock is released before the
    /// call itself.
    ///
    /// # Safety
    ///
    /// `F` must match the export's actual signature, and must match the
    /// signature any earlier `invoke` cached for the same name; the cache
    /// stores only the address, so a mismatched re-declaration goes
    /// unnoticed. Use [`invoke_uncached`] when one consistent signature per
    /// name cannot be guaranteed.
    ///
    /// [`unload`]: DynamicLibrary::unload
    /// [`reload`]: DynamicLibrary::reload
    /// [`invoke_uncached`]: DynamicLibrary::invoke_uncached
    pub unsafe fn invoke<F: FnSignature>(&self, name: &str, args: F::Args) -> Result<F::Output> {
        let addr = match self.cache.lookup(name) {
            Some(addr) => addr,
            None => {
                let addr = self.resolve_raw(name)?.as_ptr() as usize;
                // Racing threads may both miss and both insert; the loader
                // resolves deterministically, so the values are equal.
                self.cache.insert(name, addr);
                addr
            }
        };
        Ok(F::call_at(addr as *mut c_void, args))
    }

    /// Call the exported function `name`, resolving fresh every time.
    ///
    /// Never consults or fills the cache. Strictly slower than [`invoke`].
    ///
    /// # Safety
    ///
    /// `F` must match the export's actual signature.
    ///
    /// [`invoke`]: DynamicLibrary::invoke
    pub unsafe fn invoke_uncached<F: FnSignature>(
        &self,
        name: &str,
        args: F::Args,
    ) -> Result<F::Output> {
        let addr = self.resolve_raw(name)?;
        Ok(F::call_at(addr.as_ptr(), args))
    }

    /// Unload the current module (if any) and load the one at `path`.
    ///
    /// The cache is cleared first. On failure the handle is left empty and
    /// the error is the same as [`load`]'s.
    ///
    /// [`load`]: DynamicLibrary::load
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.unload();
        *self = Self::load(path)?;
        Ok(())
    }

    /// Release the module and clear the cache. Idempotent.
    pub fn unload(&mut self) {
        platform::close(self.handle);
        self.handle = std::ptr::null_mut();
        self.path = None;
        self.cache.clear();
    }
}

impl Default for DynamicLibrary {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        platform::close(self.handle);
    }
}

impl fmt::Debug for DynamicLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicLibrary")
            .field("handle", &self.handle)
            .field("path", &self.path)
            .field("cached_symbols", &self.cache.len())
            .finish()
    }
}
