//! Shared test fixtures for matte run tests.
#![allow(dead_code)]

use mattesync::device::{MatteList, MockArtDevice};
use mattesync::models::ArtworkItem;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Capability list of a typical Frame TV.
pub fn frame_matte_list() -> MatteList {
    MatteList::from_tokens(
        ["modernthin", "modern", "modernwide", "flexible", "shadowbox", "panoramic", "triptych", "mix", "squares"],
        ["seafoam", "black", "neutral", "antique", "warm", "polar", "sand", "sage", "burgandy", "navy", "apricot", "byzantine", "lavender", "redorange", "skyblue", "turqoise"],
    )
}

/// An uploaded photo with the given mattes.
pub fn photo(content_id: &str, landscape: &str, portrait: &str) -> ArtworkItem {
    ArtworkItem {
        content_id: Some(content_id.to_string()),
        category_id: Some("MY-C0002".to_string()),
        matte_id: Some(landscape.to_string()),
        portrait_matte_id: Some(portrait.to_string()),
        width: Some(3840),
        height: Some(2160),
    }
}

/// A store artwork item outside My Photos.
pub fn store_art(content_id: &str, landscape: &str) -> ArtworkItem {
    ArtworkItem {
        category_id: Some("MY-C0004".to_string()),
        ..photo(content_id, landscape, "none")
    }
}

/// Mixed inventory: mattes of both forms, no matte, and a malformed record.
pub fn mixed_inventory() -> Vec<ArtworkItem> {
    vec![
        photo("MY_F0001", "modern_apricot", "none"),
        photo("MY_F0002", "none", "none"),
        photo("MY_F0003", "shadowbox_polar", "flexible_black"),
        ArtworkItem {
            content_id: Some("MY_F0004".to_string()),
            category_id: Some("MY-C0002".to_string()),
            ..ArtworkItem::default()
        },
        store_art("SAM-S0001", "modern_warm"),
    ]
}

/// Mock TV with the typical catalog and `artwork`.
pub fn mock_tv(artwork: Vec<ArtworkItem>) -> MockArtDevice {
    MockArtDevice::new(frame_matte_list(), artwork)
}

/// Writes a config file in a temp dir, returning its path.
pub fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Token file path inside `dir`.
pub fn token_path(dir: &Path) -> PathBuf {
    dir.join("token_file.txt")
}
