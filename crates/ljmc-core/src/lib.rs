//! # ljmc Core Library
//!
//! A Metropolis Monte Carlo engine for a Lennard-Jones fluid in reduced units,
//! designed to run unchanged on a single worker or on a group of cooperating
//! workers that jointly evaluate per-particle energies.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless building blocks: the
//!   periodic-box geometry, the pair potential and its tail correction, the
//!   cutoff-truncated energy evaluator, and initial-state generation.
//!
//! - **[`transport`]: The Worker Fabric.** Defines the [`transport::ParallelRuntime`]
//!   capability (rank/size discovery, broadcast, all-reduce, point-to-point)
//!   consumed by the engine, with a single-process implementation and an
//!   in-process channel-backed worker group for multi-worker testing.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer owns the simulation
//!   state and drives the per-step propose/evaluate/decide/commit cycle,
//!   including the incremental energy bookkeeping and the adaptive
//!   displacement tuner.
//!
//! - **[`workflows`]: The Public API.** Ties the engine, transport, and
//!   progress reporting together into a complete simulation run and returns
//!   the energy trace for downstream analysis.

pub mod core;
pub mod engine;
pub mod transport;
pub mod workflows;
