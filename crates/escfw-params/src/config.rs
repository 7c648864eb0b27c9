//! Storage layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::image::{ERASE_BLOCK_SIZE, IMAGE_LEN, WRITE_GRANULARITY};

/// Where the working table comes from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    /// Always start from the compiled table.
    Defaults,
    /// Start from the persisted image, falling back to the compiled table.
    #[default]
    Persisted,
}

/// Placement of the parameter image in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// First byte of the parameter region.
    ///
    /// Default: 0.
    pub region_base: u32,

    /// Bytes erased before every write. Must cover the whole image.
    ///
    /// Default: 2048 (one erase block).
    pub erase_size: u32,

    /// Programming unit of the medium.
    ///
    /// Default: 4.
    pub write_granularity: u32,

    /// Startup seeding policy.
    pub seed: Seed,
}

impl StoreConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the image would not be writable under this layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.write_granularity.is_power_of_two() {
            return Err(ConfigError("write_granularity must be a power of two"));
        }
        if !IMAGE_LEN.is_multiple_of(self.write_granularity as usize) {
            return Err(ConfigError(
                "write_granularity must divide the image length",
            ));
        }
        if !self.region_base.is_multiple_of(self.write_granularity) {
            return Err(ConfigError(
                "region_base must be aligned to write_granularity",
            ));
        }
        if (self.erase_size as usize) < IMAGE_LEN {
            return Err(ConfigError("erase_size must cover the image"));
        }
        if !self.erase_size.is_multiple_of(self.write_granularity) {
            return Err(ConfigError(
                "erase_size must be a multiple of write_granularity",
            ));
        }
        if self.region_base.checked_add(self.erase_size).is_none() {
            return Err(ConfigError("region exceeds the 32-bit address space"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region_base: 0,
            erase_size: ERASE_BLOCK_SIZE,
            write_granularity: WRITE_GRANULARITY,
            seed: Seed::default(),
        }
    }
}

/// Builder for [`StoreConfig`].
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the region base address.
    #[must_use]
    pub fn region_base(mut self, address: u32) -> Self {
        self.config.region_base = address;
        self
    }

    /// Set the erase size in bytes.
    #[must_use]
    pub fn erase_size(mut self, bytes: u32) -> Self {
        self.config.erase_size = bytes;
        self
    }

    /// Set the write granularity in bytes.
    #[must_use]
    pub fn write_granularity(mut self, bytes: u32) -> Self {
        self.config.write_granularity = bytes;
        self
    }

    /// Set the seeding policy.
    #[must_use]
    pub fn seed(mut self, seed: Seed) -> Self {
        self.config.seed = seed;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert_eq!(config.region_base, 0);
        assert_eq!(config.erase_size, 2048);
        assert_eq!(config.write_granularity, 4);
        assert_eq!(config.seed, Seed::Persisted);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder() -> Result<(), ConfigError> {
        let config = StoreConfig::builder()
            .region_base(0x0800)
            .erase_size(4096)
            .seed(Seed::Defaults)
            .build()?;
        assert_eq!(config.region_base, 0x0800);
        assert_eq!(config.erase_size, 4096);
        assert_eq!(config.seed, Seed::Defaults);
        Ok(())
    }

    #[test]
    fn test_rejects_bad_granularity() {
        for granularity in [0, 3, 16] {
            let result = StoreConfig::builder()
                .write_granularity(granularity)
                .build();
            assert!(
                matches!(result, Err(ConfigError(_))),
                "granularity {granularity} accepted"
            );
        }
        assert!(matches!(
            StoreConfig::builder().write_granularity(8).build(),
            Ok(_)
        ));
    }

    #[test]
    fn test_rejects_small_erase() {
        let result = StoreConfig::builder().erase_size(512).build();
        assert_eq!(result, Err(ConfigError("erase_size must cover the image")));
    }

    #[test]
    fn test_rejects_misaligned_base() {
        let result = StoreConfig::builder().region_base(2).build();
        assert_eq!(
            result,
            Err(ConfigError("region_base must be aligned to write_granularity"))
        );
    }

    #[test]
    fn test_rejects_region_overflow() {
        let result = StoreConfig::builder()
            .region_base(u32::MAX - 1023)
            .build();
        assert_eq!(
            result,
            Err(ConfigError("region exceeds the 32-bit address space"))
        );
    }
}
