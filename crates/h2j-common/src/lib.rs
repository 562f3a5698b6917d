//! Common utilities for the html2js compiler.
//!
//! This crate provides shared infrastructure used by all compiler stages:
//! - **Warning System** - colored terminal output for recovered markup problems
//! - **Escaping** - the HTML escaping primitive used by both renderers

pub mod escape;
pub mod warning;

pub use escape::escape;
