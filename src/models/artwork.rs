//! Artwork records as reported by the device.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::models::matte::MatteId;

/// One artwork entry from the device's content list.
///
/// Every field is optional because the device occasionally returns partial
/// records; [`ArtworkItem::snapshot`] checks the fields the matte logic needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkItem {
    /// Device content id (e.g. "MY_F0003")
    #[serde(default, deserialize_with = "lenient_text")]
    pub content_id: Option<String>,
    /// Collection the item belongs to (e.g. "MY-C0002")
    #[serde(default, deserialize_with = "lenient_text")]
    pub category_id: Option<String>,
    /// Current landscape matte
    #[serde(default, deserialize_with = "lenient_text")]
    pub matte_id: Option<String>,
    /// Current portrait matte
    #[serde(default, deserialize_with = "lenient_text")]
    pub portrait_matte_id: Option<String>,
    /// Image width in pixels
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub width: Option<u32>,
    /// Image height in pixels
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub height: Option<u32>,
}

/// The matte state of an item whose record carried every required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatteSnapshot {
    /// Device content id
    pub content_id: String,
    /// Current landscape matte
    pub landscape: MatteId,
    /// Current portrait matte
    pub portrait: MatteId,
}

/// A record that lacks fields the matte logic needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedItem {
    /// Content id, or a placeholder when the id itself is missing
    pub item: String,
    /// Names of the missing fields
    pub missing: Vec<&'static str>,
}

impl fmt::Display for MalformedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no mat for {}: missing {}", self.item, self.missing.join(", "))
    }
}

impl ArtworkItem {
    /// Builds an item from one raw content list entry.
    ///
    /// Never fails: fields of the wrong type are dropped, and an entry that
    /// is not an object yields an empty item, so [`ArtworkItem::snapshot`]
    /// reports it as malformed instead of losing the whole list.
    #[must_use]
    pub fn from_record(record: Value) -> Self {
        serde_json::from_value(record).unwrap_or_else(|err| {
            debug!("unreadable artwork record: {err}");
            Self::default()
        })
    }

    /// Label used in log lines and reports.
    #[must_use]
    pub fn label(&self) -> &str {
        self.content_id.as_deref().unwrap_or("<unknown item>")
    }

    /// Returns "WxH" when both dimensions are known.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(format!("{width}x{height}")),
            _ => None,
        }
    }

    /// Extracts the matte state, or reports which fields are missing.
    pub fn snapshot(&self) -> Result<MatteSnapshot, MalformedItem> {
        match (&self.content_id, &self.matte_id, &self.portrait_matte_id) {
            (Some(content_id), Some(landscape), Some(portrait)) => Ok(MatteSnapshot {
                content_id: content_id.clone(),
                landscape: MatteId::from_device(landscape.clone()),
                portrait: MatteId::from_device(portrait.clone()),
            }),
            _ => {
                let mut missing = Vec::new();
                if self.content_id.is_none() {
                    missing.push("content_id");
                }
                if self.matte_id.is_none() {
                    missing.push("matte_id");
                }
                if self.portrait_matte_id.is_none() {
                    missing.push("portrait_matte_id");
                }
                Err(MalformedItem {
                    item: self.label().to_string(),
                    missing,
                })
            }
        }
    }
}

/// Accepts a string field; any other JSON type is `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Accepts a dimension as a number or a numeric string; anything else is `None`.
fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
