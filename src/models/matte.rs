//! Matte value types: type and color tokens, composite ids and orientations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{MATTE_NONE, MATTE_SEPARATOR};

/// A border style family reported by the device (e.g. "shadowbox").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatteType(String);

impl MatteType {
    /// Wraps a matte type token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A matte color reported by the device (e.g. "polar").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatteColor(String);

impl MatteColor {
    /// Wraps a matte color token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite matte identifier as exchanged with the device.
///
/// Either the sentinel `none` or `<type>_<color>`. Ids built through
/// [`MatteId::compose`] always have two non-empty components; ids read from
/// the device are kept verbatim and may not decompose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatteId(String);

impl MatteId {
    /// The "no matte" id.
    #[must_use]
    pub fn none() -> Self {
        Self(MATTE_NONE.to_string())
    }

    /// Builds `<type>_<color>`.
    #[must_use]
    pub fn compose(matte_type: &MatteType, color: &MatteColor) -> Self {
        Self(format!("{matte_type}{MATTE_SEPARATOR}{color}"))
    }

    /// Wraps an id exactly as the device reported it.
    pub fn from_device(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true for the `none` sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == MATTE_NONE
    }

    /// Splits the id into its type and color.
    ///
    /// Returns `None` for the `none` sentinel and for ids that are not made
    /// of exactly two non-empty components.
    #[must_use]
    pub fn decompose(&self) -> Option<(MatteType, MatteColor)> {
        if self.is_none() {
            return None;
        }
        let (matte_type, color) = split_pair(&self.0)?;
        Some((MatteType::new(matte_type), MatteColor::new(color)))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Splits `value` on the matte separator into exactly two non-empty parts.
pub(crate) fn split_pair(value: &str) -> Option<(&str, &str)> {
    let mut parts = value.split(MATTE_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) if !first.is_empty() && !second.is_empty() => {
            Some((first, second))
        }
        _ => None,
    }
}

/// Display orientation. Each artwork keeps an independent matte per orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Landscape matte (`matte_id` on the device)
    Landscape,
    /// Portrait matte (`portrait_matte_id` on the device)
    Portrait,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landscape => write!(f, "landscape"),
            Self::Portrait => write!(f, "portrait"),
        }
    }
}
