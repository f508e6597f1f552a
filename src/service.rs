//! Entry points for a transport layer (HTTP handlers, CLI, ...).
//!
//! Accepts raw signed integers as parsed from a request and maps them onto
//! the registry and allocator, validating on the way in. Rendering and
//! protocol status codes stay with the caller.

use crate::allocator::PackAllocator;
use crate::config::{DEFAULT_MAX_ORDER_QUANTITY, ServiceConfig};
use crate::error::{ConfigError, ServiceError};
use crate::registry::PackSizeRegistry;
use crate::registry::sorted_vec::registry::Registry;
use crate::types::allocation::Allocation;
use crate::types::pack_size::PackSize;

pub struct PackService<R: PackSizeRegistry = Registry> {
    registry: R,
    allocator: PackAllocator,
    max_order_quantity: u32,
}

impl PackService<Registry> {
    /// Service over an empty sorted-vector registry with default limits.
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
            allocator: PackAllocator::new(),
            max_order_quantity: DEFAULT_MAX_ORDER_QUANTITY,
        }
    }

    pub fn with_config(config: ServiceConfig) -> Result<Self, ConfigError> {
        Self::with_registry(Registry::default(), config)
    }
}

impl Default for PackService<Registry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PackSizeRegistry> PackService<R> {
    /// Wraps `registry` and inserts the configured pack sizes into it.
    pub fn with_registry(registry: R, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        for &size in &config.pack_sizes {
            registry.insert(PackSize::try_from(size)?)?;
        }
        tracing::info!(
            pack_sizes = config.pack_sizes.len(),
            max_order_quantity = config.max_order_quantity,
            "pack service ready"
        );

        Ok(Self {
            registry,
            allocator: PackAllocator::new(),
            max_order_quantity: config.max_order_quantity,
        })
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn max_order_quantity(&self) -> u32 {
        self.max_order_quantity
    }

    /// Adds one pack size. Fails with `InvalidSize` for `size <= 0` and with
    /// `DuplicateSize` if it is already registered.
    pub fn insert_pack_size(&self, size: i64) -> Result<(), ServiceError> {
        let size = PackSize::try_from(size)?;
        self.registry.insert(size)?;
        tracing::info!(%size, "pack size added");
        Ok(())
    }

    pub fn clear_pack_sizes(&self) {
        self.registry.clear();
        tracing::info!("pack sizes cleared");
    }

    /// Current sizes, largest first.
    pub fn list_pack_sizes(&self) -> Vec<u32> {
        self.registry.snapshot().into_iter().map(u32::from).collect()
    }

    /// Allocates `order` items against the current sizes.
    ///
    /// Unlike [`PackAllocator::allocate`], an empty registry is reported as
    /// [`ServiceError::EmptyRegistry`] instead of a degenerate allocation.
    pub fn calculate_allocation(&self, order: i64) -> Result<Allocation, ServiceError> {
        let order_quantity = self.validate_order(order)?;

        let sizes = self.registry.snapshot();
        if sizes.is_empty() {
            tracing::warn!(order, "allocation requested with no pack sizes");
            return Err(ServiceError::EmptyRegistry);
        }

        Ok(self.allocator.allocate(order_quantity, &sizes))
    }

    fn validate_order(&self, order: i64) -> Result<u32, ServiceError> {
        if order <= 0 {
            return Err(ServiceError::InvalidOrder { order });
        }
        match u32::try_from(order) {
            Ok(quantity) if quantity <= self.max_order_quantity => Ok(quantity),
            _ => Err(ServiceError::OrderTooLarge {
                order,
                max: self.max_order_quantity,
            }),
        }
    }
}
