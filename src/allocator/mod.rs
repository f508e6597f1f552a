//! Exact pack allocation.
//!
//! Finds, for an order quantity and a set of pack sizes, the packs that ship
//! at least the ordered amount with the least excess, and among those the
//! fewest packs. Largest-first greedy is not enough once sizes are not
//! multiples of each other: with sizes {5, 12} an order of 15 is met exactly
//! by three 5s, while greedy ships 12 + 5.
//!
//! The search is a dynamic program over exact totals `0..=order + max_size`.
//! No optimal total can exceed that bound: dropping one largest pack from
//! such a total still covers the order.

use crate::error::ServiceError;
use crate::registry::PackSizeRegistry;
use crate::types::allocation::Allocation;
use crate::types::pack_size::PackSize;
use smallvec::SmallVec;

/// Best known way to reach one exact total.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    /// Fewest packs summing exactly to this total
    packs: u32,
    /// Index into the size slice of the last pack added
    via: u32,
}

impl Entry {
    const UNREACHABLE: Entry = Entry {
        packs: u32::MAX,
        via: u32::MAX,
    };

    fn is_reachable(&self) -> bool {
        self.packs != u32::MAX
    }
}

/// Stateless allocator. Every call works on its own copy of the sizes, so it
/// can run concurrently with other allocations and with registry mutations.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackAllocator;

impl PackAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocate against the registry's current sizes.
    /// The registry is read exactly once, at call start.
    pub fn allocate_from<R>(&self, registry: &R, order_quantity: u32) -> Allocation
    where
        R: PackSizeRegistry + ?Sized,
    {
        let sizes = registry.snapshot();
        self.allocate(order_quantity, &sizes)
    }

    /// Allocate `order_quantity` items over `sizes`, which must be distinct
    /// and strictly descending (the registry snapshot order).
    ///
    /// Never fails. An empty `sizes` yields [`Allocation::empty`], which the
    /// caller must interpret as "no allocation possible".
    ///
    /// # Memory
    ///
    /// Builds a table of `order_quantity + largest + 1` eight-byte entries,
    /// about 8 MB for a one-million order. Orders from untrusted input should
    /// go through [`PackAllocator::try_allocate`] or
    /// [`PackService`](crate::service::PackService), which cap the quantity.
    pub fn allocate(&self, order_quantity: u32, sizes: &[PackSize]) -> Allocation {
        debug_assert!(
            sizes.windows(2).all(|w| w[0] > w[1]),
            "pack sizes must be strictly descending"
        );

        let (Some(&largest), Some(&smallest)) = (sizes.first(), sizes.last()) else {
            tracing::debug!(order_quantity, "no pack sizes available");
            return Allocation::empty(order_quantity);
        };

        // One smallest pack beats every alternative on both excess and pack count
        if order_quantity < smallest.value() {
            return Allocation::from_counts(order_quantity, [(smallest, 1)]);
        }

        let table = Self::fill_table(order_quantity, largest, sizes);

        let reachable = (order_quantity as usize..table.len()).find(|&t| table[t].is_reachable());

        let allocation = match reachable {
            Some(total) => Self::reconstruct(order_quantity, total, &table, sizes),
            None => {
                // Unreachable while a size exists: ceil(order / largest) packs of
                // the largest size always land inside the searched range.
                let count = order_quantity.div_ceil(largest.value());
                tracing::warn!(
                    order_quantity,
                    largest = largest.value(),
                    count,
                    "no reachable total in range, falling back to largest packs"
                );
                Allocation::from_counts(order_quantity, [(largest, count)])
            }
        };

        tracing::debug!(
            order_quantity,
            total = allocation.total_items(),
            excess = allocation.excess(),
            packs = allocation.pack_count(),
            "allocated order"
        );
        allocation
    }

    /// [`PackAllocator::allocate`] with an upper bound on the order, checked
    /// before any table is built.
    pub fn try_allocate(
        &self,
        order_quantity: u32,
        sizes: &[PackSize],
        max_order_quantity: u32,
    ) -> Result<Allocation, ServiceError> {
        if order_quantity > max_order_quantity {
            return Err(ServiceError::OrderTooLarge {
                order: i64::from(order_quantity),
                max: max_order_quantity,
            });
        }
        Ok(self.allocate(order_quantity, sizes))
    }

    /// Fewest-pack entry for every exact total in `0..=order + largest`.
    fn fill_table(order_quantity: u32, largest: PackSize, sizes: &[PackSize]) -> Vec<Entry> {
        let limit = order_quantity as usize + largest.value() as usize;

        let mut table = vec![Entry::UNREACHABLE; limit + 1];
        table[0] = Entry { packs: 0, via: 0 };

        for total in 1..=limit {
            let mut best = Entry::UNREACHABLE;
            // Sizes arrive largest first; the strict comparison keeps the
            // larger size on ties, which makes results reproducible.
            for (index, size) in sizes.iter().enumerate() {
                let size = size.value() as usize;
                if size > total {
                    continue;
                }
                let prev = table[total - size];
                if prev.is_reachable() && prev.packs + 1 < best.packs {
                    best = Entry {
                        packs: prev.packs + 1,
                        via: index as u32,
                    };
                }
            }
            table[total] = best;
        }

        table
    }

    /// Walk the `via` links back from `total` to zero, counting packs per size.
    fn reconstruct(
        order_quantity: u32,
        mut total: usize,
        table: &[Entry],
        sizes: &[PackSize],
    ) -> Allocation {
        let mut counts: SmallVec<[u32; 8]> = SmallVec::from_elem(0, sizes.len());

        while total > 0 {
            let via = table[total].via as usize;
            counts[via] += 1;
            total -= sizes[via].value() as usize;
        }

        Allocation::from_counts(order_quantity, sizes.iter().copied().zip(counts))
    }
}
