//! Resolution of the effective run parameters.
//!
//! Three layers, weakest first: the built-in reference defaults, an optional
//! TOML parameter file, and command-line flags. The winner of each field is
//! fed through the core configuration builder, which owns validation.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
