//! Scripted in-memory device for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::device::{ArtDevice, DeviceError, MatteChange, MatteList};
use crate::models::ArtworkItem;

/// Mock device that serves a fixed catalog and inventory.
///
/// Accepted changes are written back into `artwork`, so a second run against
/// the same mock sees the new state.
#[derive(Debug, Clone, Default)]
pub struct MockArtDevice {
    /// Whether art mode is reported as supported
    pub supported: bool,
    /// Matte capabilities served to the caller
    pub matte_list: MatteList,
    /// Artwork inventory, in enumeration order
    pub artwork: Vec<ArtworkItem>,
    /// Content ids whose changes are refused, with the error code to report
    pub rejections: HashMap<String, String>,
    /// Fail the capability fetch with a transport error
    pub fail_matte_list: bool,
    /// Drop the connection when a change is sent for this content id
    pub disconnect_on: Option<String>,
    /// Change commands received, in order (rejected ones included)
    pub changes: Vec<MatteChange>,
    /// Categories requested from `list_artwork`
    pub listed_categories: Vec<Option<String>>,
    /// Number of `close` calls
    pub close_calls: usize,
}

impl MockArtDevice {
    /// Creates a mock that supports art mode with the given catalog and inventory.
    #[must_use]
    pub fn new(matte_list: MatteList, artwork: Vec<ArtworkItem>) -> Self {
        Self {
            supported: true,
            matte_list,
            artwork,
            ..Self::default()
        }
    }

    /// Refuses every change for `content_id` with `code`.
    #[must_use]
    pub fn reject(mut self, content_id: &str, code: &str) -> Self {
        self.rejections
            .insert(content_id.to_string(), code.to_string());
        self
    }

    /// Returns true once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.close_calls > 0
    }

    fn ensure_open(&self) -> Result<(), DeviceError> {
        if self.is_closed() {
            Err(DeviceError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ArtDevice for MockArtDevice {
    async fn is_art_supported(&mut self) -> Result<bool, DeviceError> {
        self.ensure_open()?;
        Ok(self.supported)
    }

    async fn matte_list(&mut self, include_color: bool) -> Result<MatteList, DeviceError> {
        self.ensure_open()?;
        if self.fail_matte_list {
            return Err(DeviceError::Transport("mock capability failure".into()));
        }
        let mut list = self.matte_list.clone();
        if !include_color {
            list.colors.clear();
        }
        Ok(list)
    }

    async fn list_artwork(
        &mut self,
        category: Option<&str>,
        _timeout: Duration,
    ) -> Result<Vec<ArtworkItem>, DeviceError> {
        self.ensure_open()?;
        self.listed_categories.push(category.map(str::to_string));
        Ok(self
            .artwork
            .iter()
            .filter(|item| category.is_none() || item.category_id.as_deref() == category)
            .cloned()
            .collect())
    }

    async fn change_matte(&mut self, change: &MatteChange) -> Result<(), DeviceError> {
        self.ensure_open()?;
        self.changes.push(change.clone());

        if self.disconnect_on.as_deref() == Some(change.content_id.as_str()) {
            return Err(DeviceError::Transport("mock connection lost".into()));
        }
        if let Some(code) = self.rejections.get(&change.content_id) {
            return Err(DeviceError::Rejected {
                request: "change_matte".into(),
                code: code.clone(),
            });
        }

        if let Some(item) = self
            .artwork
            .iter_mut()
            .find(|item| item.content_id.as_deref() == Some(change.content_id.as_str()))
        {
            item.matte_id = Some(change.landscape.to_string());
            if let Some(portrait) = &change.portrait {
                item.portrait_matte_id = Some(portrait.to_string());
            }
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        self.close_calls += 1;
        Ok(())
    }
}
