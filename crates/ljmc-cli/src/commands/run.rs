use crate::cli::RunArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ljmc::engine::progress::ProgressReporter;
use ljmc::transport::LocalTransport;
use ljmc::workflows;
use ljmc::workflows::run::RunSummary;
use std::path::Path;
use tracing::info;

pub fn execute(args: RunArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => config::file::load(path)?,
        None => Default::default(),
    };
    let simulation = config::builder::resolve(&args, file)?;

    info!(
        temperature = simulation.reduced_temperature,
        density = simulation.reduced_density,
        particles = simulation.particle_count,
        steps = simulation.step_count,
        box_length = simulation.box_length(),
        "resolved run parameters"
    );

    let summary = if args.no_progress {
        workflows::run(&simulation, LocalTransport::new(), &ProgressReporter::new())?
    } else {
        let handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(handler.callback());
        workflows::run(&simulation, LocalTransport::new(), &reporter)?
    };

    print_summary(&summary);

    if let Some(path) = &args.trace_output {
        write_trace(path, &summary)?;
        info!("Energy trace written to {}", path.display());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("-----------------------------------------------------------");
    println!("Total simulation time: {:.3} s", summary.wall_seconds);
    println!("    Energy time:       {:.3} s", summary.energy_seconds);
    println!("    Decision time:     {:.3} s", summary.decision_seconds);
    println!(
        "Accepted {} of {} trial moves ({:.1}%), final max displacement {:.4}",
        summary.total_accepted,
        summary.total_trials,
        100.0 * summary.acceptance_rate(),
        summary.final_max_displacement
    );
    if let Some(energy) = summary.trace.last() {
        println!("Final reduced energy:  {:.6}", energy);
    }
    println!("-----------------------------------------------------------");
}

fn write_trace(path: &Path, summary: &RunSummary) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["step", "reduced_energy"])?;
    for (step, energy) in summary.trace.samples().iter().enumerate() {
        writer.write_record([(step + 1).to_string(), format!("{energy:.12}")])?;
    }
    writer.flush()?;
    Ok(())
}
