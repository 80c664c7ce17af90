use super::defaults::DefaultsConfig;
use super::models::FileParameters;
use crate::cli::RunArgs;
use crate::error::Result;
use ljmc::engine::config::{InitialStateMethod, SimulationConfig};

/// Resolves the effective run parameters: flags beat the file, the file
/// beats the built-in defaults. Validation happens in the core builder.
pub fn resolve(args: &RunArgs, file: FileParameters) -> Result<SimulationConfig> {
    let defaults = DefaultsConfig::default();

    let method = match args
        .initial_state
        .as_deref()
        .or(file.initial_state_method.as_deref())
    {
        Some(tag) => tag.parse::<InitialStateMethod>()?,
        None => InitialStateMethod::default(),
    };

    let tune_displacement = if args.no_tune {
        false
    } else {
        file.tune_displacement.unwrap_or(defaults.tune_displacement)
    };

    let config = SimulationConfig::builder()
        .reduced_temperature(
            args.temperature
                .or(file.reduced_temperature)
                .unwrap_or(defaults.reduced_temperature),
        )
        .reduced_density(
            args.density
                .or(file.reduced_density)
                .unwrap_or(defaults.reduced_density),
        )
        .particle_count(
            args.particles
                .or(file.particle_count)
                .unwrap_or(defaults.particle_count),
        )
        .step_count(args.steps.or(file.step_count).unwrap_or(defaults.step_count))
        .tune_frequency(
            args.tune_frequency
                .or(file.tune_frequency)
                .unwrap_or(defaults.tune_frequency),
        )
        .cutoff(args.cutoff.or(file.cutoff).unwrap_or(defaults.cutoff))
        .initial_max_displacement(
            args.max_displacement
                .or(file.initial_max_displacement)
                .unwrap_or(defaults.initial_max_displacement),
        )
        .tune_displacement(tune_displacement)
        .initial_state_method(method)
        .seed(args.seed.or(file.seed).unwrap_or(defaults.seed))
        .build()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use ljmc::engine::config::ConfigError;
    use ljmc::engine::error::EngineError;

    #[test]
    fn empty_inputs_resolve_to_the_reference_defaults() {
        let config = resolve(&RunArgs::default(), FileParameters::default()).unwrap();
        assert_eq!(config.reduced_temperature, 0.9);
        assert_eq!(config.reduced_density, 0.9);
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.step_count, 10_000);
        assert_eq!(config.tune_frequency, 1000);
        assert_eq!(config.cutoff, 3.0);
        assert_eq!(config.initial_max_displacement, 0.1);
        assert!(config.tune_displacement);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn file_values_override_the_defaults() {
        let file = FileParameters {
            particle_count: Some(64),
            step_count: Some(200),
            ..Default::default()
        };
        let config = resolve(&RunArgs::default(), file).unwrap();
        assert_eq!(config.particle_count, 64);
        assert_eq!(config.step_count, 200);
        assert_eq!(config.cutoff, 3.0);
    }

    #[test]
    fn flags_override_the_file() {
        let file = FileParameters {
            step_count: Some(200),
            seed: Some(5),
            ..Default::default()
        };
        let args = RunArgs {
            steps: Some(999),
            ..Default::default()
        };
        let config = resolve(&args, file).unwrap();
        assert_eq!(config.step_count, 999);
        assert_eq!(config.seed, 5);
    }

    #[test]
    fn no_tune_flag_wins_over_the_file() {
        let file = FileParameters {
            tune_displacement: Some(true),
            ..Default::default()
        };
        let args = RunArgs {
            no_tune: true,
            ..Default::default()
        };
        let config = resolve(&args, file).unwrap();
        assert!(!config.tune_displacement);
    }

    #[test]
    fn an_unsupported_method_tag_fails_before_the_run() {
        let args = RunArgs {
            initial_state: Some("lattice".to_string()),
            ..Default::default()
        };
        let result = resolve(&args, FileParameters::default());
        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Config {
                source: ConfigError::UnsupportedMethod(_)
            }))
        ));
    }

    #[test]
    fn invalid_parameters_surface_the_core_validation_error() {
        let args = RunArgs {
            temperature: Some(-1.0),
            ..Default::default()
        };
        let result = resolve(&args, FileParameters::default());
        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::Config {
                source: ConfigError::NotPositive { .. }
            }))
        ));
    }
}
