//! Parsed user intent for one orientation's matte.

use serde::Serialize;

use crate::models::matte::{MatteColor, MatteType};

/// What the user asked for, per orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatteRequest {
    /// Keep whatever matte the item already has.
    ///
    /// `explicit` is true when the user passed `org` rather than omitting
    /// the option.
    Unchanged {
        /// Whether the user asked for this deliberately
        explicit: bool,
    },
    /// Remove the matte.
    ExplicitNone,
    /// Set the type, the color, or both. A missing component is taken from
    /// the item's current matte.
    Partial {
        /// Requested matte type
        matte_type: Option<MatteType>,
        /// Requested matte color
        color: Option<MatteColor>,
    },
}

impl MatteRequest {
    /// Request for a new type, keeping each item's color.
    #[must_use]
    pub fn with_type(matte_type: MatteType) -> Self {
        Self::Partial {
            matte_type: Some(matte_type),
            color: None,
        }
    }

    /// Request for a new color, keeping each item's type.
    #[must_use]
    pub fn with_color(color: MatteColor) -> Self {
        Self::Partial {
            matte_type: None,
            color: Some(color),
        }
    }

    /// Request for a complete matte.
    #[must_use]
    pub fn with_both(matte_type: MatteType, color: MatteColor) -> Self {
        Self::Partial {
            matte_type: Some(matte_type),
            color: Some(color),
        }
    }
}

impl Default for MatteRequest {
    fn default() -> Self {
        Self::Unchanged { explicit: false }
    }
}

impl std::fmt::Display for MatteRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unchanged { explicit: true } => write!(f, "original"),
            Self::Unchanged { explicit: false } => write!(f, "unchanged"),
            Self::ExplicitNone => write!(f, "none"),
            Self::Partial {
                matte_type: Some(matte_type),
                color: Some(color),
            } => write!(f, "{matte_type} {color}"),
            Self::Partial {
                matte_type: Some(matte_type),
                color: None,
            } => write!(f, "type {matte_type}"),
            Self::Partial {
                matte_type: None,
                color: Some(color),
            } => write!(f, "color {color}"),
            Self::Partial {
                matte_type: None,
                color: None,
            } => write!(f, "unchanged"),
        }
    }
}
