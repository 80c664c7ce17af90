//! # Workflows Module
//!
//! High-level entry points that tie the engine, transport, and progress
//! reporting together into complete simulation runs.
//!
//! ## Overview
//!
//! A workflow owns the whole lifecycle of a run: initial-state generation
//! and distribution, the step loop, and the final summary. Callers hand in
//! a configuration, a connected transport endpoint, and an optional
//! progress callback, and get back the energy trace and timing breakdown.
//! The same call runs unchanged on a single worker or on every member of a
//! worker group.

pub mod run;

pub use run::run;
