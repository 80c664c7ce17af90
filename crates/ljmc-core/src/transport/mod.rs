//! # Transport Module
//!
//! The worker-fabric capability consumed by the Monte Carlo engine.
//!
//! ## Overview
//!
//! A simulation runs as a fixed group of cooperating workers. The engine
//! never talks to a communication library directly; it consumes the
//! [`ParallelRuntime`] trait, which provides rank/size discovery, blocking
//! collectives (broadcast, all-reduce-sum), tagged point-to-point transfers,
//! and a wall clock. Every collective is synchronous: no worker proceeds
//! past it until every worker has reached the matching call, and any failure
//! is fatal to the run.
//!
//! Two implementations ship with the crate:
//!
//! - [`LocalTransport`] - a single worker; collectives are identity
//!   pass-throughs. The engine produces the same accept/reject sequence over
//!   this as over any group of size one.
//! - [`ChannelGroup`] - an in-process group of connected
//!   [`ChannelTransport`] endpoints backed by mpsc channels, used to exercise
//!   the multi-worker contract (including the deterministic rank-ordered
//!   reduction) without spawning processes.

pub mod channel;
pub mod local;

pub use channel::{ChannelGroup, ChannelTransport};
pub use local::LocalTransport;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Broadcast from root {root} failed: {reason}")]
    Broadcast { root: usize, reason: String },

    #[error("All-reduce failed on rank {rank}: {reason}")]
    AllReduce { rank: usize, reason: String },

    #[error("Transfer from {from} to {dest} (tag {tag}) failed: {reason}")]
    PointToPoint {
        from: usize,
        dest: usize,
        tag: u32,
        reason: String,
    },

    #[error("Rank {rank} is outside a group of size {size}")]
    RankOutOfRange { rank: usize, size: usize },

    #[error("Operation requires a peer, but this group has a single worker")]
    NoPeer,

    #[error("Worker group disconnected")]
    Disconnected,
}

/// Collective and point-to-point transport shared by a fixed group of
/// cooperating workers.
///
/// All buffer-carrying operations are blocking. Implementations must
/// guarantee that `all_reduce_sum` folds contributions in rank order, so a
/// group of any size produces one deterministic result for one set of
/// inputs.
pub trait ParallelRuntime {
    /// This worker's rank, in `[0, size)`.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Overwrites `buffer` on every worker with the root's copy.
    fn broadcast(&mut self, buffer: &mut [f64], root: usize) -> Result<(), TransportError>;

    /// Overwrites `value` on every worker with the root's copy.
    fn broadcast_index(&mut self, value: &mut usize, root: usize) -> Result<(), TransportError>;

    /// Sums one scalar contribution per worker; every worker receives the
    /// total.
    fn all_reduce_sum(&mut self, value: f64) -> Result<f64, TransportError>;

    /// Sends `buffer` to `dest`, matched by `tag` on the receiving side.
    fn send(&mut self, buffer: &[f64], dest: usize, tag: u32) -> Result<(), TransportError>;

    /// Receives into `buffer` from `source`, matched by `tag`.
    fn recv(&mut self, buffer: &mut [f64], source: usize, tag: u32) -> Result<(), TransportError>;

    /// Monotonic wall-clock seconds since the transport was created.
    fn wall_time(&self) -> f64;
}
