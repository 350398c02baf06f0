//! Error types for the configurator core.
//!
//! Nothing here is fatal: every variant describes an input or transition the
//! [`Configurator`](crate::Configurator) recovers from locally (revert, clamp,
//! no-op, or omit a visual element).

use crate::features::{Feature, Placement};
use crate::assets::AssetId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Manual entry text did not parse as a finite number
    #[error("'{input}' is not a number")]
    NotANumber {
        /// The rejected text.
        input: String,
    },

    /// Manual entry below the supported minimum
    #[error("{value} mm is below the minimum of {min} mm")]
    BelowMinimum {
        /// The parsed value, rounded to whole millimeters.
        value: i64,
        /// The minimum accepted value.
        min: u32,
    },

    /// Placement or sub-parameter change while the feature is off
    #[error("{0:?} is disabled")]
    FeatureDisabled(Feature),

    /// The feature has no placement options at all
    #[error("{0:?} has no placement")]
    NotPlaceable(Feature),

    /// The placement is not one of the feature's candidates
    #[error("{placement:?} is not offered for {feature:?}")]
    PlacementNotOffered {
        /// The feature being placed.
        feature: Feature,
        /// The rejected placement.
        placement: Placement,
    },

    /// A model or texture could not be loaded
    #[error("asset {0:?} is unavailable")]
    AssetUnavailable(AssetId),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
