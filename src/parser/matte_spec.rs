//! Parsing of user matte specifications.
//!
//! A specification is one of:
//!
//! - absent: leave the orientation alone
//! - `none`: remove the matte
//! - `org`: keep the original matte
//! - a matte type (`shadowbox`): change the type, keep each item's color
//! - a matte color (`polar`): change the color, keep each item's type
//! - `<type>_<color>` (`shadowbox_polar`): set both
//!
//! Matching is exact and case-sensitive against the device's catalog.

use crate::constants::{MATTE_NONE, MATTE_ORIGINAL, MATTE_SEPARATOR};
use crate::error::ValidationError;
use crate::models::matte::split_pair;
use crate::models::{MatteCatalog, MatteColor, MatteRequest, MatteType};

/// Parses a matte specification against the device catalog.
///
/// For the `<type>_<color>` form only one of the two parts has to be known to
/// the catalog; the other is passed to the device as given.
///
/// # Errors
///
/// Returns [`ValidationError`] when the input names no known type or color,
/// or when a separated form does not split into exactly two non-empty parts.
pub fn parse_matte_spec(
    raw: Option<&str>,
    catalog: &MatteCatalog,
) -> Result<MatteRequest, ValidationError> {
    let Some(raw) = raw else {
        return Ok(MatteRequest::Unchanged { explicit: false });
    };

    if raw == MATTE_NONE {
        return Ok(MatteRequest::ExplicitNone);
    }
    if raw == MATTE_ORIGINAL {
        return Ok(MatteRequest::Unchanged { explicit: true });
    }
    if let Some(matte_type) = catalog.matte_type(raw) {
        return Ok(MatteRequest::with_type(matte_type.clone()));
    }
    if let Some(color) = catalog.color(raw) {
        return Ok(MatteRequest::with_color(color.clone()));
    }

    if raw.contains(MATTE_SEPARATOR) {
        if let Some((matte_type, color)) = split_pair(raw) {
            if catalog.matte_type(matte_type).is_some() || catalog.color(color).is_some() {
                return Ok(MatteRequest::with_both(
                    MatteType::new(matte_type),
                    MatteColor::new(color),
                ));
            }
        }
    }

    Err(ValidationError::new(raw, catalog))
}
