use crate::error::RegistryError;
use crate::registry::{PackSizeRegistry, search_descending};
use crate::types::pack_size::PackSize;
use parking_lot::RwLock;
use std::sync::Arc;

/// Copy-on-write registry: readers share an immutable published array,
/// writers build a new one and swap it in under the write lock.
///
/// Design:
/// - Snapshot holds the read lock only long enough to clone the `Arc`
/// - Insert/clear serialize on the write lock and never mutate a published array
/// - Suits workloads with many allocations and rare size changes
pub struct Registry {
    sizes: RwLock<Arc<[PackSize]>>,
}

impl Registry {
    /// Current published array, shared rather than copied.
    pub fn shared(&self) -> Arc<[PackSize]> {
        Arc::clone(&*self.sizes.read())
    }
}

impl PackSizeRegistry for Registry {
    fn new() -> Self {
        Self {
            sizes: RwLock::new(Arc::from(Vec::new())),
        }
    }

    fn insert(&self, size: PackSize) -> Result<(), RegistryError> {
        let mut published = self.sizes.write();

        let index = match search_descending(&published, size) {
            Ok(_) => {
                tracing::debug!(%size, "rejected duplicate pack size");
                return Err(RegistryError::DuplicateSize { size });
            }
            Err(index) => index,
        };

        let mut next = Vec::with_capacity(published.len() + 1);
        next.extend_from_slice(&published[..index]);
        next.push(size);
        next.extend_from_slice(&published[index..]);

        *published = Arc::from(next);
        tracing::debug!(%size, count = published.len(), "published pack sizes");
        Ok(())
    }

    fn clear(&self) {
        let mut published = self.sizes.write();
        let removed = published.len();
        *published = Arc::from(Vec::new());
        tracing::debug!(removed, "cleared pack sizes");
    }

    fn snapshot(&self) -> Vec<PackSize> {
        self.shared().to_vec()
    }

    fn len(&self) -> usize {
        self.sizes.read().len()
    }

    fn contains(&self, size: PackSize) -> bool {
        search_descending(&self.shared(), size).is_ok()
    }
}

impl Default for Registry {
    fn default() -> Self {
        <Self as PackSizeRegistry>::new()
    }
}
