//! Configuration loading and schema types.
//!
//! The schema below drives runtime behavior; loading layers an optional
//! TOML file under environment overrides.

mod load;
mod schema;

pub use schema::*;
