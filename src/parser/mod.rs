//! Parsing of user supplied matte specifications.

pub mod matte_spec;

pub use matte_spec::parse_matte_spec;
