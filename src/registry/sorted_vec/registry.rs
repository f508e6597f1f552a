use crate::error::RegistryError;
use crate::registry::{PackSizeRegistry, search_descending};
use crate::types::pack_size::PackSize;
use parking_lot::Mutex;

/// Sorted-vector registry: one mutex over a `Vec` kept strictly descending.
///
/// Insert is O(log n) search + O(n) shift, snapshot is an O(n) copy.
/// Every operation holds the lock for its whole duration, so no caller can
/// observe a partially shifted vector.
pub struct Registry {
    sizes: Mutex<Vec<PackSize>>,
}

impl PackSizeRegistry for Registry {
    fn new() -> Self {
        Self {
            sizes: Mutex::new(Vec::new()),
        }
    }

    fn insert(&self, size: PackSize) -> Result<(), RegistryError> {
        let mut sizes = self.sizes.lock();

        // Insert by position; the vector is never re-sorted
        match search_descending(&sizes, size) {
            Ok(_) => {
                tracing::debug!(%size, "rejected duplicate pack size");
                Err(RegistryError::DuplicateSize { size })
            }
            Err(index) => {
                sizes.insert(index, size);
                tracing::debug!(%size, count = sizes.len(), "inserted pack size");
                Ok(())
            }
        }
    }

    fn clear(&self) {
        let mut sizes = self.sizes.lock();
        let removed = sizes.len();
        sizes.clear();
        tracing::debug!(removed, "cleared pack sizes");
    }

    fn snapshot(&self) -> Vec<PackSize> {
        self.sizes.lock().clone()
    }

    fn len(&self) -> usize {
        self.sizes.lock().len()
    }

    fn contains(&self, size: PackSize) -> bool {
        search_descending(&self.sizes.lock(), size).is_ok()
    }
}

impl Default for Registry {
    fn default() -> Self {
        <Self as PackSizeRegistry>::new()
    }
}
