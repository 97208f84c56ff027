//! Errors which can happen when setting up gesture detection.

use thiserror::Error;

/// When building a gesture detector errors can occur.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The platform-supplied touch slop must be a positive, finite distance.
    #[error("touch slop must be positive and finite, got {0}")]
    InvalidTouchSlop(f64),
}
