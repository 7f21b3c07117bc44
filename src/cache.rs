//! Per-library symbol cache.

use std::collections::HashMap;

use parking_lot::Mutex;

/// Maps symbol names to resolved addresses for one loaded module.
///
/// The map is interior-mutable so resolution through a shared `&` handle can
/// populate it. The lock is held only across a single lookup or insert,
/// never across the foreign call itself, so a slow library call cannot stall
/// other threads' cache access.
#[derive(Default)]
pub(crate) struct SymbolCache {
    entries: Mutex<HashMap<String, usize>>,
}

impl SymbolCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<usize> {
        self.entries.lock().get(name).copied()
    }

    /// Last write wins. Two racing writers both resolved the same symbol
    /// through the same loader, so the addresses are equal.
    pub(crate) fn insert(&self, name: &str, addr: usize) {
        self.entries.lock().insert(name.to_string(), addr);
    }

    pub(crate) fn clear(&self) {
        self.entries.lock().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
