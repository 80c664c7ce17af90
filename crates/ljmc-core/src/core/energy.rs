use super::geometry;
use super::models::CoordinateState;
use super::potential;
use itertools::Itertools;

/// The strided index subset one worker is responsible for: `{start, start +
/// stride, ...}`. With `start = rank` and `stride = size` the subsets of a
/// worker group tile the particle range exactly once; `Partition::FULL`
/// covers the whole range on a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub stride: usize,
}

impl Partition {
    pub const FULL: Partition = Partition {
        start: 0,
        stride: 1,
    };

    pub fn new(start: usize, stride: usize) -> Self {
        debug_assert!(stride >= 1);
        debug_assert!(start < stride);
        Self { start, stride }
    }
}

/// Cutoff-truncated pairwise energy evaluation over a coordinate replica.
#[derive(Debug, Clone, Copy)]
pub struct EnergyEvaluator {
    box_length: f64,
    cutoff_squared: f64,
}

impl EnergyEvaluator {
    pub fn new(box_length: f64, cutoff: f64) -> Self {
        Self {
            box_length,
            cutoff_squared: cutoff * cutoff,
        }
    }

    /// Full double sum over all unordered particle pairs.
    ///
    /// O(N^2); used once at initialization and as the correctness oracle for
    /// the incremental bookkeeping, never inside the step loop.
    pub fn total_pair_energy(&self, state: &CoordinateState) -> f64 {
        let positions = state.positions();
        (0..positions.len())
            .tuple_combinations()
            .map(|(i, j)| self.pair_energy(&positions[i], &positions[j]))
            .sum()
    }

    /// Interaction energy of one particle against the particles in a strided
    /// partition, skipping the particle itself.
    ///
    /// Summing this over the partitions of a worker group reproduces the full
    /// single-particle energy; that reduction is the transport's job.
    pub fn particle_energy(
        &self,
        state: &CoordinateState,
        particle: usize,
        partition: Partition,
    ) -> f64 {
        let positions = state.positions();
        let i_position = &positions[particle];

        (partition.start..positions.len())
            .step_by(partition.stride)
            .filter(|&j| j != particle)
            .map(|j| self.pair_energy(i_position, &positions[j]))
            .sum()
    }

    #[inline]
    fn pair_energy(&self, a: &nalgebra::Point3<f64>, b: &nalgebra::Point3<f64>) -> f64 {
        let r_squared = geometry::minimum_image_distance_squared(a, b, self.box_length);
        if r_squared < self.cutoff_squared {
            potential::lennard_jones(r_squared)
        } else {
            0.0
        }
    }
}
