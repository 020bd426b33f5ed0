//! network configuration

use crate::error::ConfigError;
use serde::Deserialize;
use std::num::NonZeroUsize;

pub const DEFAULT_BUCKET_COUNT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Tunables for a [`SocialNetwork`](crate::SocialNetwork).
///
/// # Example
///
/// ```
/// use socialgraph::NetworkConfig;
///
/// let config = NetworkConfig::from_toml("bucket_count = 16").unwrap();
/// assert_eq!(config.bucket_count.get(), 16);
///
/// // Missing fields fall back to their defaults.
/// let config = NetworkConfig::from_toml("").unwrap();
/// assert_eq!(config.bucket_count.get(), 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Number of buckets in the registry's bucketed view. Fixed for the life of the registry.
    pub bucket_count: NonZeroUsize,
}

impl NetworkConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_bucket_count(mut self, bucket_count: NonZeroUsize) -> Self {
        self.bucket_count = bucket_count;
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}
