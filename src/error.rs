//! error types

use crate::UserId;
use thiserror::Error;

/// An operation referenced something that isn't registered.
///
/// These are informational. Nothing is mutated when one of these is returned, and the network
/// stays usable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("user {0} does not exist")]
    UnknownUser(UserId),
    #[error("user {user} has no post at position {index}")]
    UnknownPost { user: UserId, index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid network config: {0}")]
    Parse(#[from] toml::de::Error),
}
