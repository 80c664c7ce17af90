use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::config::{InitialStateMethod, SimulationConfig};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::{EnergyAccumulator, EnergyTrace, SimulationState, TuningCounters};
use super::tuner::DisplacementTuner;
use crate::core::energy::{EnergyEvaluator, Partition};
use crate::core::geometry;
use crate::core::initial;
use crate::core::models::{CoordinateState, MoveProposal};
use crate::core::potential;
use crate::transport::ParallelRuntime;

/// Rank that draws every random number and makes every accept/reject
/// decision for the run. All other workers receive those values by
/// broadcast and never touch a random source.
pub const COORDINATOR_RANK: usize = 0;

/// Clamped Metropolis acceptance probability.
///
/// Always lands in `[0, 1]`: extreme energy changes underflow to 0 or
/// saturate at 1 instead of leaking a non-finite value into the accept
/// decision. A NaN energy change rejects.
#[inline]
pub fn acceptance_probability(delta_e: f64, beta: f64) -> f64 {
    if delta_e.is_nan() {
        return 0.0;
    }
    if delta_e < 0.0 {
        return 1.0;
    }
    let p = (-beta * delta_e).exp();
    if p.is_nan() { 0.0 } else { p.min(1.0) }
}

/// Metropolis criterion for a pre-drawn uniform variate in `[0, 1)`.
#[inline]
pub fn metropolis_accept(delta_e: f64, beta: f64, draw: f64) -> bool {
    delta_e < 0.0 || draw < acceptance_probability(delta_e, beta)
}

/// Everything a finished run hands back to the caller.
///
/// The trace and the acceptance statistics are populated on the coordinator
/// only; other workers return them empty.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub trace: EnergyTrace,
    pub coordinates: CoordinateState,
    pub final_max_displacement: f64,
    pub total_trials: usize,
    pub total_accepted: usize,
    pub worker_count: usize,
    pub wall_seconds: f64,
    pub energy_seconds: f64,
    pub decision_seconds: f64,
}

impl RunSummary {
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_trials == 0 {
            return 0.0;
        }
        self.total_accepted as f64 / self.total_trials as f64
    }
}

/// The per-step propose/evaluate/decide/commit state machine.
///
/// One engine instance runs on every worker of the group. Whether this
/// worker is the coordinator is resolved once at construction: the
/// coordinator holds the only RNG, and the per-step code branches on that
/// capability rather than re-testing the rank inline.
pub struct MetropolisEngine<'a, R: ParallelRuntime> {
    config: &'a SimulationConfig,
    reporter: &'a ProgressReporter<'a>,
    runtime: R,
    evaluator: EnergyEvaluator,
    tuner: DisplacementTuner,
    partition: Partition,
    rng: Option<StdRng>,
    state: SimulationState,
    replica_buffer: Vec<f64>,
    step_index: usize,
    total_trials: usize,
    total_accepted: usize,
    started: f64,
    energy_seconds: f64,
    decision_seconds: f64,
}

impl<'a, R: ParallelRuntime> MetropolisEngine<'a, R> {
    pub fn new(
        config: &'a SimulationConfig,
        runtime: R,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        let partition = Partition::new(runtime.rank(), runtime.size());
        let rng = (runtime.rank() == COORDINATOR_RANK)
            .then(|| StdRng::seed_from_u64(config.seed));
        let state = SimulationState {
            coordinates: CoordinateState::zeroed(config.particle_count),
            energy: EnergyAccumulator::new(0.0, 0.0, config.particle_count),
            counters: TuningCounters::default(),
            trace: EnergyTrace::with_capacity(config.step_count),
            max_displacement: config.initial_max_displacement,
        };
        let started = runtime.wall_time();

        Self {
            config,
            reporter,
            evaluator: EnergyEvaluator::new(config.box_length(), config.cutoff),
            tuner: DisplacementTuner::for_box(config.box_length()),
            partition,
            rng,
            runtime,
            state,
            replica_buffer: vec![0.0; 3 * config.particle_count],
            step_index: 0,
            total_trials: 0,
            total_accepted: 0,
            started,
            energy_seconds: 0.0,
            decision_seconds: 0.0,
        }
    }

    pub fn is_coordinator(&self) -> bool {
        self.rng.is_some()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Generates the starting configuration on the coordinator, distributes
    /// it to every replica, and scores it from scratch.
    ///
    /// The O(N^2) total computed here seeds the incremental accumulator;
    /// nothing inside the step loop ever recomputes it.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if let Some(rng) = self.rng.as_mut() {
            let coordinates = match self.config.initial_state_method {
                InitialStateMethod::Random => initial::random_configuration(
                    self.config.particle_count,
                    self.config.box_length(),
                    rng,
                ),
            };
            self.state.coordinates = coordinates;
        }

        self.state.coordinates.write_flat(&mut self.replica_buffer);
        self.runtime
            .broadcast(&mut self.replica_buffer, COORDINATOR_RANK)
            .map_err(|source| EngineError::Setup { source })?;
        self.state.coordinates.read_flat(&self.replica_buffer);

        let pair_total = self.evaluator.total_pair_energy(&self.state.coordinates);
        let tail = potential::tail_correction(
            self.config.particle_count,
            self.config.box_length(),
            self.config.cutoff,
        );
        self.state.energy =
            EnergyAccumulator::new(pair_total, tail, self.config.particle_count);

        if self.is_coordinator() {
            info!(
                pair_total,
                tail_correction = tail,
                workers = self.runtime.size(),
                "initial state distributed and scored"
            );
        }
        Ok(())
    }

    /// Advances the run by one trial move.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let step = self.step_index;

        // Propose: the coordinator draws, everyone else receives.
        let mut particle = 0usize;
        let mut displacement = [0.0f64; 3];
        if let Some(rng) = self.rng.as_mut() {
            particle = rng.gen_range(0..self.config.particle_count);
            for component in &mut displacement {
                *component = (2.0 * rng.r#gen::<f64>() - 1.0) * self.state.max_displacement;
            }
        }
        self.runtime
            .broadcast_index(&mut particle, COORDINATOR_RANK)
            .map_err(|source| EngineError::Transport { step, source })?;
        self.runtime
            .broadcast(&mut displacement, COORDINATOR_RANK)
            .map_err(|source| EngineError::Transport { step, source })?;

        // Overwrite every replica with the coordinator's committed state.
        self.state.coordinates.write_flat(&mut self.replica_buffer);
        self.runtime
            .broadcast(&mut self.replica_buffer, COORDINATOR_RANK)
            .map_err(|source| EngineError::Transport { step, source })?;
        self.state.coordinates.read_flat(&self.replica_buffer);

        let proposal = MoveProposal {
            particle,
            displacement: Vector3::new(displacement[0], displacement[1], displacement[2]),
        };

        // Evaluate the moved particle before and after, each as a strided
        // partial sum reduced across the group.
        let energy_started = self.runtime.wall_time();
        let current_partial =
            self.evaluator
                .particle_energy(&self.state.coordinates, proposal.particle, self.partition);
        let current_energy = self
            .runtime
            .all_reduce_sum(current_partial)
            .map_err(|source| EngineError::Transport { step, source })?;

        let candidate = geometry::wrap(
            &(*self.state.coordinates.position(proposal.particle) + proposal.displacement),
            self.config.box_length(),
        );
        let mut proposed = self.state.coordinates.clone();
        proposed.set_position(proposal.particle, candidate);
        let proposed_partial =
            self.evaluator
                .particle_energy(&proposed, proposal.particle, self.partition);
        let proposed_energy = self
            .runtime
            .all_reduce_sum(proposed_partial)
            .map_err(|source| EngineError::Transport { step, source })?;
        self.energy_seconds += self.runtime.wall_time() - energy_started;

        if let Some(mut rng) = self.rng.take() {
            self.decide_and_record(
                step,
                &mut rng,
                proposal,
                candidate,
                proposed_energy - current_energy,
            );
            self.rng = Some(rng);
        }

        self.reporter.report(Progress::StepComplete);
        self.step_index += 1;
        Ok(())
    }

    /// Coordinator-only tail of the step: decide, commit or discard, record,
    /// and periodically tune.
    fn decide_and_record(
        &mut self,
        step: usize,
        rng: &mut StdRng,
        proposal: MoveProposal,
        candidate: Point3<f64>,
        delta_e: f64,
    ) {
        let decision_started = self.runtime.wall_time();
        self.state.counters.record_trial();
        self.total_trials += 1;

        let accept = if delta_e < 0.0 {
            true
        } else {
            // The draw happens only on uphill moves, keeping the decision
            // stream identical across worker counts.
            metropolis_accept(delta_e, self.config.beta(), rng.r#gen::<f64>())
        };

        if accept {
            self.state.energy.apply_delta(delta_e);
            self.state.counters.record_acceptance();
            self.total_accepted += 1;
            self.state.coordinates.set_position(proposal.particle, candidate);
        }

        self.state.trace.record(self.state.energy.reduced_energy());

        if (step + 1) % self.config.tune_frequency == 0 {
            let reduced_energy = self.state.energy.reduced_energy();
            self.reporter.report(Progress::Sample {
                step: step + 1,
                reduced_energy,
                acceptance_rate: self.state.counters.acceptance_rate(),
                max_displacement: self.state.max_displacement,
            });
            info!(
                step = step + 1,
                reduced_energy,
                acceptance_rate = self.state.counters.acceptance_rate(),
                "trajectory sample"
            );

            if self.config.tune_displacement {
                self.state.max_displacement =
                    self.tuner.tune(&self.state.counters, self.state.max_displacement);
                self.state.counters.reset();
            }
        }

        self.decision_seconds += self.runtime.wall_time() - decision_started;
    }

    /// Consumes the engine and returns the run's results and timings.
    pub fn finish(self) -> RunSummary {
        let wall_seconds = self.runtime.wall_time() - self.started;
        RunSummary {
            trace: self.state.trace,
            coordinates: self.state.coordinates,
            final_max_displacement: self.state.max_displacement,
            total_trials: self.total_trials,
            total_accepted: self.total_accepted,
            worker_count: self.runtime.size(),
            wall_seconds,
            energy_seconds: self.energy_seconds,
            decision_seconds: self.decision_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::test_config;
    use crate::transport::LocalTransport;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn downhill_moves_always_accept() {
        assert_eq!(acceptance_probability(-1.0, 1.0), 1.0);
        assert!(metropolis_accept(-1.0, 1.0, 0.999_999));
    }

    #[test]
    fn uphill_moves_accept_with_the_boltzmann_probability() {
        let p = acceptance_probability(1.0, 1.0);
        assert!((p - (-1.0_f64).exp()).abs() < TOLERANCE);
        // exp(-1) is about 0.368, so a pinned draw of 0.5 rejects.
        assert!(!metropolis_accept(1.0, 1.0, 0.5));
        assert!(metropolis_accept(1.0, 1.0, 0.3));
    }

    #[test]
    fn extreme_energy_changes_clamp_instead_of_propagating_non_finite_values() {
        assert_eq!(acceptance_probability(f64::INFINITY, 1.0), 0.0);
        assert_eq!(acceptance_probability(f64::NEG_INFINITY, 1.0), 1.0);
        assert_eq!(acceptance_probability(f64::NAN, 1.0), 0.0);
        assert_eq!(acceptance_probability(1e6, 100.0), 0.0);
        assert_eq!(acceptance_probability(0.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn zero_energy_change_draws_and_accepts_below_probability_one() {
        let p = acceptance_probability(0.0, 2.0);
        assert_eq!(p, 1.0);
        assert!(metropolis_accept(0.0, 2.0, 0.5));
    }

    #[test]
    fn single_worker_engine_is_the_coordinator() {
        let config = test_config(8, 10);
        let reporter = ProgressReporter::new();
        let engine = MetropolisEngine::new(&config, LocalTransport::new(), &reporter);
        assert!(engine.is_coordinator());
    }

    #[test]
    fn initialize_scores_the_replica_from_scratch() {
        let config = test_config(12, 10);
        let reporter = ProgressReporter::new();
        let mut engine = MetropolisEngine::new(&config, LocalTransport::new(), &reporter);
        engine.initialize().unwrap();

        let evaluator = EnergyEvaluator::new(config.box_length(), config.cutoff);
        let recomputed = evaluator.total_pair_energy(&engine.state().coordinates);
        assert!((engine.state().energy.pair_total() - recomputed).abs() < TOLERANCE);
    }

    #[test]
    fn every_step_records_exactly_one_trace_entry() {
        let config = test_config(8, 25);
        let reporter = ProgressReporter::new();
        let mut engine = MetropolisEngine::new(&config, LocalTransport::new(), &reporter);
        engine.initialize().unwrap();
        for _ in 0..config.step_count {
            engine.step().unwrap();
        }
        let summary = engine.finish();
        assert_eq!(summary.trace.len(), 25);
        assert!(summary.trace.samples().iter().all(|e| e.is_finite()));
        assert_eq!(summary.total_trials, 25);
    }

    #[test]
    fn committed_positions_stay_inside_the_canonical_cell() {
        let config = test_config(10, 50);
        let reporter = ProgressReporter::new();
        let mut engine = MetropolisEngine::new(&config, LocalTransport::new(), &reporter);
        engine.initialize().unwrap();
        for _ in 0..config.step_count {
            engine.step().unwrap();
        }
        let half = config.box_length() / 2.0;
        for p in engine.state().coordinates.positions() {
            for k in 0..3 {
                assert!(p[k].abs() <= half + 1e-9);
            }
        }
    }
}
