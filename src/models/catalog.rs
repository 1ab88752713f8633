//! Capability catalog of matte types and colors supported by the device.

use serde::{Deserialize, Serialize};

use crate::models::matte::{MatteColor, MatteType};

/// The matte types and colors a device accepts.
///
/// Fetched once per run and read-only afterwards. Entries keep the order the
/// device reported them in, duplicates dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatteCatalog {
    types: Vec<MatteType>,
    colors: Vec<MatteColor>,
}

impl MatteCatalog {
    /// Builds a catalog from the device's type and color lists.
    pub fn new(
        types: impl IntoIterator<Item = MatteType>,
        colors: impl IntoIterator<Item = MatteColor>,
    ) -> Self {
        let mut catalog = Self::default();
        for matte_type in types {
            if !catalog.types.contains(&matte_type) {
                catalog.types.push(matte_type);
            }
        }
        for color in colors {
            if !catalog.colors.contains(&color) {
                catalog.colors.push(color);
            }
        }
        catalog
    }

    /// Looks up a matte type by its exact token.
    #[must_use]
    pub fn matte_type(&self, token: &str) -> Option<&MatteType> {
        self.types.iter().find(|t| t.as_str() == token)
    }

    /// Looks up a matte color by its exact token.
    #[must_use]
    pub fn color(&self, token: &str) -> Option<&MatteColor> {
        self.colors.iter().find(|c| c.as_str() == token)
    }

    /// Known matte types in device order.
    #[must_use]
    pub fn types(&self) -> &[MatteType] {
        &self.types
    }

    /// Known matte colors in device order.
    #[must_use]
    pub fn colors(&self) -> &[MatteColor] {
        &self.colors
    }

    /// Returns true when the device reported no types and no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.colors.is_empty()
    }
}
