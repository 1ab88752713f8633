//! MatteSync Library
//!
//! Core of the MatteSync tool: the matte capability catalog, the parser for
//! user matte specifications, the per-item target resolver and the
//! reconcile loop that drives an [`device::ArtDevice`].
//!
//! The device protocol sits behind the [`device::ArtDevice`] trait so the
//! matte logic can run against [`device::MockArtDevice`] in tests.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod session;
