use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use crate::engine::metropolis::MetropolisEngine;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::transport::ParallelRuntime;
use tracing::{info, instrument};

pub use crate::engine::metropolis::RunSummary;

/// Runs a complete Metropolis Monte Carlo simulation over the given
/// transport endpoint.
///
/// Every worker of a group calls this with its own endpoint; the
/// coordinator's summary carries the energy trace and statistics, the
/// others return with empty ones. For a group of one this is the entire
/// simulation.
#[instrument(skip_all, name = "monte_carlo_run")]
pub fn run<R: ParallelRuntime>(
    config: &SimulationConfig,
    runtime: R,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError> {
    info!(
        particles = config.particle_count,
        steps = config.step_count,
        workers = runtime.size(),
        "starting Metropolis run"
    );

    let mut engine = MetropolisEngine::new(config, runtime, reporter);
    engine.initialize()?;

    reporter.report(Progress::RunStart {
        step_count: config.step_count,
    });
    for _ in 0..config.step_count {
        engine.step()?;
    }
    reporter.report(Progress::RunFinish);

    let was_coordinator = engine.is_coordinator();
    let summary = engine.finish();
    if was_coordinator {
        info!(
            wall_seconds = summary.wall_seconds,
            energy_seconds = summary.energy_seconds,
            decision_seconds = summary.decision_seconds,
            acceptance_rate = summary.acceptance_rate(),
            "run complete"
        );
    }
    Ok(summary)
}
