//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the device protocol tokens the
//! matte logic depends on.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "MatteSync";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "mattesync";

/// Matte id meaning "no matte".
pub const MATTE_NONE: &str = "none";

/// User token meaning "keep the original matte".
pub const MATTE_ORIGINAL: &str = "org";

/// Separator between matte type and color in a composite matte id.
pub const MATTE_SEPARATOR: char = '_';

/// Device category holding user uploaded photos ("My Photos").
pub const MY_PHOTOS_CATEGORY: &str = "MY-C0002";
