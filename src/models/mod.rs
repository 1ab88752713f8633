//! Data models for matte styling and device artwork.

pub mod artwork;
pub mod catalog;
pub mod matte;
pub mod request;

// Re-export commonly used types
pub use artwork::{ArtworkItem, MalformedItem, MatteSnapshot};
pub use catalog::MatteCatalog;
pub use matte::{MatteColor, MatteId, MatteType, Orientation};
pub use request::MatteRequest;
