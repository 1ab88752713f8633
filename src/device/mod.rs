//! Device client abstraction.
//!
//! The matte logic talks to a display through [`ArtDevice`]. Every method
//! takes `&mut self`: a device session is one ordered channel and calls are
//! never issued concurrently.
//!
//! Implementations:
//!
//! - [`SamsungArtClient`]: websocket art channel of a Frame-style TV
//! - [`MockArtDevice`]: scripted in-memory device for tests

pub mod mock;
pub mod samsung;
pub mod token;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{ArtworkItem, MatteCatalog, MatteColor, MatteId, MatteType};

pub use mock::MockArtDevice;
pub use samsung::SamsungArtClient;
pub use token::TokenStore;

/// Errors raised by a device session.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device refused a request
    #[error("{request} rejected by device (error code {code})")]
    Rejected {
        /// Request name, e.g. "change_matte"
        request: String,
        /// Error code reported by the device
        code: String,
    },

    /// No reply arrived in time
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// The connection could not be established or was lost
    #[error("connection error: {0}")]
    Transport(String),

    /// The device replied with something we could not interpret
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// Local I/O failure (token file)
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The session was already closed
    #[error("session closed")]
    Closed,
}

/// One entry of the device's matte type list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatteTypeEntry {
    /// Matte type token
    pub matte_type: String,
}

/// One entry of the device's matte color list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatteColorEntry {
    /// Matte color token
    pub color: String,
}

/// Matte capabilities as reported by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatteList {
    /// Supported matte types
    pub types: Vec<MatteTypeEntry>,
    /// Supported matte colors (empty unless requested)
    pub colors: Vec<MatteColorEntry>,
}

impl MatteList {
    /// Builds a list from plain tokens.
    pub fn from_tokens<'a>(
        types: impl IntoIterator<Item = &'a str>,
        colors: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            types: types
                .into_iter()
                .map(|t| MatteTypeEntry {
                    matte_type: t.to_string(),
                })
                .collect(),
            colors: colors
                .into_iter()
                .map(|c| MatteColorEntry {
                    color: c.to_string(),
                })
                .collect(),
        }
    }
}

impl From<MatteList> for MatteCatalog {
    fn from(list: MatteList) -> Self {
        MatteCatalog::new(
            list.types.into_iter().map(|e| MatteType::new(e.matte_type)),
            list.colors.into_iter().map(|e| MatteColor::new(e.color)),
        )
    }
}

/// A matte change command for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatteChange {
    /// Device content id
    pub content_id: String,
    /// New landscape matte (always sent)
    pub landscape: MatteId,
    /// New portrait matte, `None` to leave the portrait matte alone
    pub portrait: Option<MatteId>,
}

/// A session with an art-capable display.
#[async_trait]
pub trait ArtDevice: Send {
    /// Returns whether the display supports art mode at all.
    async fn is_art_supported(&mut self) -> Result<bool, DeviceError>;

    /// Fetches the supported matte types, and colors when `include_color` is set.
    async fn matte_list(&mut self, include_color: bool) -> Result<MatteList, DeviceError>;

    /// Lists artwork in `category`, or all artwork when `category` is `None`.
    async fn list_artwork(
        &mut self,
        category: Option<&str>,
        timeout: Duration,
    ) -> Result<Vec<ArtworkItem>, DeviceError>;

    /// Applies a matte change to one item.
    async fn change_matte(&mut self, change: &MatteChange) -> Result<(), DeviceError>;

    /// Releases the connection. Calling it more than once is harmless.
    async fn close(&mut self) -> Result<(), DeviceError>;
}
