//! Error types for the pack-size registry and the service built on it.
//!
//! Registry and service errors are caller-input problems, never transient
//! failures: they are returned as-is and nothing inside the crate retries.

use crate::types::pack_size::PackSize;
use thiserror::Error;

/// Errors returned by registry mutations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Size was zero, negative or does not fit a pack size.
    #[error("invalid pack size {size}: must be a positive integer")]
    InvalidSize {
        /// The rejected raw value
        size: i64,
    },

    /// Size is already registered. The registry is left unchanged.
    #[error("pack size {size} already exists")]
    DuplicateSize {
        /// The size that was already present
        size: PackSize,
    },
}

/// Errors surfaced by [`PackService`](crate::service::PackService).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Order quantity was zero or negative.
    #[error("invalid order quantity {order}: must be a positive integer")]
    InvalidOrder { order: i64 },

    /// Order quantity exceeds the configured maximum.
    #[error("order quantity {order} exceeds the maximum of {max}")]
    OrderTooLarge { order: i64, max: u32 },

    /// No pack sizes are configured, so no allocation is possible.
    #[error("no pack sizes configured")]
    EmptyRegistry,
}

/// Errors raised while loading a [`ServiceConfig`](crate::config::ServiceConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse service config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configured pack size: {0}")]
    PackSize(#[from] RegistryError),

    #[error("max_order_quantity must be positive")]
    ZeroMaxOrderQuantity,
}
