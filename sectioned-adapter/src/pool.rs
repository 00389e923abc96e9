use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use sectioned::ViewType;

#[cfg(feature = "std")]
type FreeLists<H> = HashMap<ViewType, Vec<H>>;
#[cfg(not(feature = "std"))]
type FreeLists<H> = BTreeMap<ViewType, Vec<H>>;

/// Free lists of detached holders, keyed by view type.
///
/// A holder is only ever handed back out for the view type it was created for.
pub struct HolderPool<H> {
    free: FreeLists<H>,
    max_per_type: usize,
}

impl<H> Default for HolderPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for HolderPool<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolderPool")
            .field("len", &self.len())
            .field("view_types", &self.free.len())
            .field("max_per_type", &self.max_per_type)
            .finish()
    }
}

impl<H> HolderPool<H> {
    pub const DEFAULT_MAX_PER_TYPE: usize = 5;

    pub fn new() -> Self {
        Self::with_max_per_type(Self::DEFAULT_MAX_PER_TYPE)
    }

    pub fn with_max_per_type(max_per_type: usize) -> Self {
        Self {
            free: FreeLists::<H>::new(),
            max_per_type,
        }
    }

    pub fn max_per_type(&self) -> usize {
        self.max_per_type
    }

    /// Changes the per-type bound, dropping holders above it.
    pub fn set_max_per_type(&mut self, max_per_type: usize) {
        self.max_per_type = max_per_type;
        for list in self.free.values_mut() {
            list.truncate(max_per_type);
        }
    }

    pub fn take(&mut self, view_type: ViewType) -> Option<H> {
        self.free.get_mut(&view_type)?.pop()
    }

    /// Returns a holder to the pool. Returns `false` (dropping it) if the list is full.
    pub fn put(&mut self, view_type: ViewType, holder: H) -> bool {
        let list = self.free.entry(view_type).or_default();
        if list.len() >= self.max_per_type {
            atrace!(view_type, "HolderPool: list full, dropping holder");
            return false;
        }
        list.push(holder);
        true
    }

    /// Keeps only the holders whose view type satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(ViewType) -> bool) {
        self.free.retain(|&view_type, _| keep(view_type));
    }

    pub fn len(&self) -> usize {
        self.free.values().map(Vec::len).sum()
    }

    pub fn len_of(&self, view_type: ViewType) -> usize {
        self.free.get(&view_type).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}
