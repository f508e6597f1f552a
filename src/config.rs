use crate::error::ConfigError;
use crate::types::pack_size::PackSize;
use serde::Deserialize;

/// Largest order the service accepts unless configured otherwise.
/// The allocation table grows linearly with the order quantity.
pub const DEFAULT_MAX_ORDER_QUANTITY: u32 = 1_000_000;

/// Service settings, usually loaded from JSON.
///
/// ```json
/// { "pack_sizes": [250, 500, 1000], "max_order_quantity": 50000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Sizes inserted when the service starts, in any order
    pub pack_sizes: Vec<i64>,
    pub max_order_quantity: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            pack_sizes: Vec::new(),
            max_order_quantity: DEFAULT_MAX_ORDER_QUANTITY,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_pack_sizes(mut self, sizes: impl IntoIterator<Item = i64>) -> Self {
        self.pack_sizes = sizes.into_iter().collect();
        self
    }

    pub fn with_max_order_quantity(mut self, max: u32) -> Self {
        self.max_order_quantity = max;
        self
    }

    /// Checks every configured size is positive. Duplicates are reported
    /// when the sizes are inserted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_order_quantity == 0 {
            return Err(ConfigError::ZeroMaxOrderQuantity);
        }
        for &size in &self.pack_sizes {
            PackSize::try_from(size)?;
        }
        Ok(())
    }
}
