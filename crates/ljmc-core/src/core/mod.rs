//! # Core Module
//!
//! Stateless building blocks for the Lennard-Jones Monte Carlo simulation.
//!
//! ## Overview
//!
//! Everything in this module is a pure function or a value type: the cubic
//! periodic-box geometry, the reduced-unit pair potential and its analytic
//! tail correction, the cutoff-truncated energy evaluator with its strided
//! domain decomposition, and the reproducible initial-state generator. The
//! stateful orchestration lives in [`crate::engine`].
//!
//! ## Key Components
//!
//! - [`geometry`] - Minimum-image displacements and canonical-cell wrapping
//! - [`potential`] - The Lennard-Jones pair potential and tail correction
//! - [`energy`] - Full-system and single-particle energy evaluation
//! - [`initial`] - Seeded random starting configurations
//! - [`models`] - Coordinate replicas and trial-move values

pub mod energy;
pub mod geometry;
pub mod initial;
pub mod models;
pub mod potential;
