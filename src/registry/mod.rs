use crate::error::RegistryError;
use crate::types::pack_size::PackSize;

/// Common trait that all pack-size stores must implement.
/// The allocator and the service only depend on this contract.
///
/// Implementations are internally synchronized: `insert`, `clear` and
/// `snapshot` are each atomic with respect to one another.
pub trait PackSizeRegistry: Send + Sync {
    /// Create a new empty registry
    fn new() -> Self
    where
        Self: Sized;

    /// Add a pack size, keeping sizes ordered largest first.
    /// Returns error if the size is already present; the registry is then unchanged.
    fn insert(&self, size: PackSize) -> Result<(), RegistryError>;

    /// Remove every size. Idempotent.
    fn clear(&self);

    /// Independent copy of the current sizes, strictly descending.
    fn snapshot(&self) -> Vec<PackSize>;

    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, size: PackSize) -> bool {
        self.snapshot().contains(&size)
    }
}

/// Position of `size` in a strictly descending slice, or where it would go.
pub(crate) fn search_descending(sizes: &[PackSize], size: PackSize) -> Result<usize, usize> {
    sizes.binary_search_by(|existing| size.cmp(existing))
}

pub mod copy_on_write;
pub mod sorted_vec;
