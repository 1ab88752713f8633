//! Error types for a matte run.

use thiserror::Error;

use crate::device::DeviceError;
use crate::models::MatteCatalog;

/// A matte specification that names no known type or color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Invalid matte type or color: {input}. Supported matte types are: [{type_list}], colors: [{color_list}]",
    type_list = .types.join(", "),
    color_list = .colors.join(", ")
)]
pub struct ValidationError {
    /// The raw user input
    pub input: String,
    /// Matte types the device supports
    pub types: Vec<String>,
    /// Matte colors the device supports
    pub colors: Vec<String>,
}

impl ValidationError {
    /// Builds the error for `input`, listing what `catalog` would accept.
    pub fn new(input: impl Into<String>, catalog: &MatteCatalog) -> Self {
        Self {
            input: input.into(),
            types: catalog.types().iter().map(ToString::to_string).collect(),
            colors: catalog.colors().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Run-level failures. Per-item problems never surface here; they are
/// recorded in the reconcile report instead.
#[derive(Debug, Error)]
pub enum MatteError {
    /// User input names an unrecognized matte
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The device could not report its matte capabilities
    #[error("Failed to fetch matte capabilities: {0}")]
    CapabilityFetch(#[source] DeviceError),

    /// The device could not list its artwork
    #[error("Failed to list artwork: {0}")]
    Inventory(#[source] DeviceError),

    /// A device failure other than a rejection, e.g. the connection dropped
    #[error("Device error: {0}")]
    Device(#[source] DeviceError),

    /// The run was cancelled from outside
    #[error("Interrupted")]
    Interrupted,
}

/// Convenience alias for run results.
pub type MatteResult<T> = Result<T, MatteError>;
