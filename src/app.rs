//! Application module: exposes the page model used by the TUI and runtime.
//!
//! The `App` model holds the current result list, selection, search input
//! and health badges.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
