use crate::types::pack_size::PackSize;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Pack counts keyed by size, largest size first. Most allocations touch
/// only a handful of sizes so they stay inline.
pub type Packs = SmallVec<[(PackSize, u32); 4]>;

/// Result of one allocation for one order against one size snapshot.
///
/// Only sizes with a non-zero count are stored. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    packs: Packs,
    order_quantity: u32,
    total_items: u64,
    pack_count: u64,
}

impl Allocation {
    /// The degenerate result for an empty registry: no packs, zero total
    /// and zero excess. Callers must treat it as "cannot fulfill".
    pub fn empty(order_quantity: u32) -> Self {
        Self {
            packs: Packs::new(),
            order_quantity,
            total_items: 0,
            pack_count: 0,
        }
    }

    /// Builds an allocation from `(size, count)` pairs. Zero counts are
    /// dropped and repeated sizes are merged.
    pub fn from_counts<I>(order_quantity: u32, counts: I) -> Self
    where
        I: IntoIterator<Item = (PackSize, u32)>,
    {
        let mut packs = Packs::new();
        for (size, count) in counts {
            if count == 0 {
                continue;
            }
            match packs.binary_search_by(|(existing, _)| size.cmp(existing)) {
                Ok(pos) => packs[pos].1 += count,
                Err(pos) => packs.insert(pos, (size, count)),
            }
        }

        let total_items = packs
            .iter()
            .map(|&(size, count)| u64::from(size.value()) * u64::from(count))
            .sum();
        let pack_count = packs.iter().map(|&(_, count)| u64::from(count)).sum();

        Self {
            packs,
            order_quantity,
            total_items,
            pack_count,
        }
    }

    /// `(size, count)` pairs, largest size first.
    pub fn packs(&self) -> &[(PackSize, u32)] {
        &self.packs
    }

    /// Number of packs of `size`, zero when the size is unused.
    pub fn count_of(&self, size: PackSize) -> u32 {
        self.packs
            .iter()
            .find(|(s, _)| *s == size)
            .map(|&(_, count)| count)
            .unwrap_or(0)
    }

    pub fn order_quantity(&self) -> u32 {
        self.order_quantity
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Items shipped beyond the order. Zero for the degenerate empty result.
    pub fn excess(&self) -> u64 {
        self.total_items.saturating_sub(u64::from(self.order_quantity))
    }

    pub fn pack_count(&self) -> u64 {
        self.pack_count
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Plain `size -> count` map.
    pub fn to_map(&self) -> BTreeMap<u32, u32> {
        self.packs
            .iter()
            .map(|&(size, count)| (size.value(), count))
            .collect()
    }

    pub fn summary(&self) -> AllocationSummary {
        AllocationSummary {
            order_quantity: self.order_quantity,
            total_items: self.total_items,
            excess: self.excess(),
            pack_count: self.pack_count,
            packs: self.to_map(),
        }
    }
}

/// Serializes as a `{"<size>": count}` object, largest size first.
impl Serialize for Allocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.packs.len()))?;
        for (size, count) in &self.packs {
            map.serialize_entry(&size.value(), count)?;
        }
        map.end()
    }
}

/// Detailed, serializable view of an [`Allocation`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct AllocationSummary {
    pub order_quantity: u32,
    pub total_items: u64,
    pub excess: u64,
    pub pack_count: u64,
    pub packs: BTreeMap<u32, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(value: u32) -> PackSize {
        PackSize::new(value).expect("non-zero")
    }

    #[test]
    fn test_from_counts_orders_and_merges() {
        let allocation = Allocation::from_counts(
            501,
            [(size(250), 1), (size(1000), 0), (size(500), 1), (size(250), 0)],
        );

        assert_eq!(allocation.packs(), &[(size(500), 1), (size(250), 1)]);
        assert_eq!(allocation.total_items(), 750);
        assert_eq!(allocation.excess(), 249);
        assert_eq!(allocation.pack_count(), 2);
        assert_eq!(allocation.count_of(size(1000)), 0);

        let merged = Allocation::from_counts(10, [(size(5), 1), (size(5), 2)]);
        assert_eq!(merged.packs(), &[(size(5), 3)]);
    }

    #[test]
    fn test_empty_allocation() {
        let allocation = Allocation::empty(42);

        assert!(allocation.is_empty());
        assert_eq!(allocation.total_items(), 0);
        assert_eq!(allocation.excess(), 0);
        assert_eq!(allocation.pack_count(), 0);
        assert_eq!(allocation.order_quantity(), 42);
    }

    #[test]
    fn test_serializes_as_size_count_object() {
        let allocation =
            Allocation::from_counts(12001, [(size(5000), 2), (size(2000), 1), (size(250), 1)]);

        let json = serde_json::to_value(&allocation).expect("serializes");
        assert_eq!(json, serde_json::json!({"5000": 2, "2000": 1, "250": 1}));

        let summary = allocation.summary();
        assert_eq!(summary.total_items, 12250);
        assert_eq!(summary.excess, 249);
        assert_eq!(summary.pack_count, 4);
        let json = serde_json::to_string(&summary).expect("serializes");
        let back: AllocationSummary = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, summary);
    }
}
