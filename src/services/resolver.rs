//! Target matte resolution.
//!
//! Combines a [`MatteRequest`] with an item's current matte to produce the
//! matte the item should end up with. A request that carries only a type or
//! only a color borrows the missing half from the current matte; when the
//! current matte has nothing to borrow from, the item is left as it is and a
//! [`MatteWarning`] explains why.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::models::{MatteId, MatteRequest, Orientation};

/// Why a partial request could not be applied to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningReason {
    /// The item has no matte to take the missing component from
    NoBaseMatte,
    /// The item's matte id does not split into a type and a color
    UnrecognizedBaseMatte,
}

/// A partial request that was dropped for one item and orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatteWarning {
    /// Orientation the request applied to
    pub orientation: Orientation,
    /// Content id of the item
    pub item: String,
    /// The item's matte, which stays in place
    pub current: MatteId,
    /// The component the user asked for
    pub requested: String,
    /// Why it was not applied
    pub reason: WarningReason,
}

impl fmt::Display for MatteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "can't change color/type of {} mat: {} for {} to {}",
            self.orientation, self.current, self.item, self.requested
        )?;
        if self.reason == WarningReason::UnrecognizedBaseMatte {
            write!(f, " (matte id is not <type>_<color>)")?;
        }
        Ok(())
    }
}

/// Outcome of resolving one orientation of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The matte the item should have
    pub target: MatteId,
    /// Set when a partial request had to be dropped
    pub warning: Option<MatteWarning>,
}

impl Resolution {
    fn target(target: MatteId) -> Self {
        Self {
            target,
            warning: None,
        }
    }
}

/// Resolves the matte an item should have for one orientation.
pub fn resolve_target(
    request: &MatteRequest,
    current: &MatteId,
    orientation: Orientation,
    item: &str,
) -> Resolution {
    match request {
        MatteRequest::ExplicitNone => Resolution::target(MatteId::none()),
        MatteRequest::Unchanged { .. } => Resolution::target(current.clone()),
        MatteRequest::Partial {
            matte_type: Some(matte_type),
            color: Some(color),
        } => Resolution::target(MatteId::compose(matte_type, color)),
        MatteRequest::Partial {
            matte_type: None,
            color: None,
        } => {
            debug!("empty {orientation} matte request for {item}, leaving {current}");
            Resolution::target(current.clone())
        }
        MatteRequest::Partial { matte_type, color } => {
            let requested = matte_type
                .as_ref()
                .map(ToString::to_string)
                .or_else(|| color.as_ref().map(ToString::to_string))
                .unwrap_or_default();

            let reason = if current.is_none() {
                WarningReason::NoBaseMatte
            } else {
                match current.decompose() {
                    Some((current_type, current_color)) => {
                        let matte_type = matte_type.as_ref().unwrap_or(&current_type);
                        let color = color.as_ref().unwrap_or(&current_color);
                        return Resolution::target(MatteId::compose(matte_type, color));
                    }
                    None => WarningReason::UnrecognizedBaseMatte,
                }
            };

            Resolution {
                target: current.clone(),
                warning: Some(MatteWarning {
                    orientation,
                    item: item.to_string(),
                    current: current.clone(),
                    requested,
                    reason,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatteColor, MatteType};

    fn id(value: &str) -> MatteId {
        MatteId::from_device(value)
    }

    fn resolve(request: &MatteRequest, current: &str) -> Resolution {
        resolve_target(request, &id(current), Orientation::Landscape, "MY_F0001")
    }

    #[test]
    fn test_explicit_none_always_none() {
        for current in ["none", "frame_white", "odd"] {
            let resolution = resolve(&MatteRequest::ExplicitNone, current);
            assert!(resolution.target.is_none());
            assert!(resolution.warning.is_none());
        }
    }

    #[test]
    fn test_unchanged_is_identity() {
        for explicit in [false, true] {
            for current in ["none", "frame_white", "odd"] {
                let resolution = resolve(&MatteRequest::Unchanged { explicit }, current);
                assert_eq!(resolution.target, id(current));
                assert!(resolution.warning.is_none());
            }
        }
    }

    #[test]
    fn test_full_request_ignores_current() {
        let request =
            MatteRequest::with_both(MatteType::new("shadowbox"), MatteColor::new("black"));
        assert_eq!(resolve(&request, "none").target, id("shadowbox_black"));
        assert_eq!(resolve(&request, "frame_white").target, id("shadowbox_black"));
    }

    #[test]
    fn test_color_only_keeps_type() {
        let request = MatteRequest::with_color(MatteColor::new("black"));
        let resolution = resolve(&request, "frame_white");
        assert_eq!(resolution.target, id("frame_black"));
        assert!(resolution.warning.is_none());
    }

    #[test]
    fn test_type_only_keeps_color() {
        let request = MatteRequest::with_type(MatteType::new("shadowbox"));
        assert_eq!(resolve(&request, "frame_white").target, id("shadowbox_white"));
    }

    #[test]
    fn test_partial_onto_none_warns() {
        let request = MatteRequest::with_color(MatteColor::new("black"));
        let resolution = resolve_target(&request, &MatteId::none(), Orientation::Portrait, "MY_F0002");

        assert!(resolution.target.is_none());
        let warning = resolution.warning.unwrap();
        assert_eq!(warning.reason, WarningReason::NoBaseMatte);
        assert_eq!(warning.orientation, Orientation::Portrait);
        assert_eq!(warning.item, "MY_F0002");
        assert_eq!(warning.requested, "black");
        assert_eq!(
            warning.to_string(),
            "can't change color/type of portrait mat: none for MY_F0002 to black"
        );
    }

    #[test]
    fn test_partial_onto_unrecognized_keeps_current() {
        let request = MatteRequest::with_type(MatteType::new("frame"));
        let resolution = resolve(&request, "flexible");
        assert_eq!(resolution.target, id("flexible"));
        assert_eq!(
            resolution.warning.unwrap().reason,
            WarningReason::UnrecognizedBaseMatte
        );
    }

    #[test]
    fn test_empty_partial_is_unchanged() {
        let request = MatteRequest::Partial {
            matte_type: None,
            color: None,
        };
        let resolution = resolve(&request, "frame_white");
        assert_eq!(resolution.target, id("frame_white"));
        assert!(resolution.warning.is_none());
    }
}
