use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Tune frequency must be at least 1")]
    ZeroTuneFrequency,

    #[error("Unsupported initial-state method: '{0}' (supported: 'random')")]
    UnsupportedMethod(String),
}

/// How the starting configuration is produced.
///
/// Parsing is the single gate for method tags: an unrecognized tag is a
/// configuration error before the run begins, never a silently empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialStateMethod {
    #[default]
    Random,
}

impl FromStr for InitialStateMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitialStateMethod::Random),
            other => Err(ConfigError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for InitialStateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialStateMethod::Random => write!(f, "random"),
        }
    }
}

/// Immutable parameters of one simulation run, in reduced Lennard-Jones
/// units, plus the quantities derived from them once at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub reduced_temperature: f64,
    pub reduced_density: f64,
    pub particle_count: usize,
    pub step_count: usize,
    pub tune_frequency: usize,
    pub cutoff: f64,
    pub initial_max_displacement: f64,
    pub tune_displacement: bool,
    pub initial_state_method: InitialStateMethod,
    pub seed: u64,

    box_length: f64,
    beta: f64,
    cutoff_squared: f64,
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Cubic box edge length, `(N / rho)^(1/3)`.
    #[inline]
    pub fn box_length(&self) -> f64 {
        self.box_length
    }

    /// Inverse reduced temperature.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    #[inline]
    pub fn cutoff_squared(&self) -> f64 {
        self.cutoff_squared
    }
}

#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    reduced_temperature: Option<f64>,
    reduced_density: Option<f64>,
    particle_count: Option<usize>,
    step_count: Option<usize>,
    tune_frequency: Option<usize>,
    cutoff: Option<f64>,
    initial_max_displacement: Option<f64>,
    tune_displacement: Option<bool>,
    initial_state_method: Option<InitialStateMethod>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduced_temperature(mut self, value: f64) -> Self {
        self.reduced_temperature = Some(value);
        self
    }
    pub fn reduced_density(mut self, value: f64) -> Self {
        self.reduced_density = Some(value);
        self
    }
    pub fn particle_count(mut self, value: usize) -> Self {
        self.particle_count = Some(value);
        self
    }
    pub fn step_count(mut self, value: usize) -> Self {
        self.step_count = Some(value);
        self
    }
    pub fn tune_frequency(mut self, value: usize) -> Self {
        self.tune_frequency = Some(value);
        self
    }
    pub fn cutoff(mut self, value: f64) -> Self {
        self.cutoff = Some(value);
        self
    }
    pub fn initial_max_displacement(mut self, value: f64) -> Self {
        self.initial_max_displacement = Some(value);
        self
    }
    pub fn tune_displacement(mut self, value: bool) -> Self {
        self.tune_displacement = Some(value);
        self
    }
    pub fn initial_state_method(mut self, value: InitialStateMethod) -> Self {
        self.initial_state_method = Some(value);
        self
    }
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let reduced_temperature = self
            .reduced_temperature
            .ok_or(ConfigError::MissingParameter("reduced_temperature"))?;
        let reduced_density = self
            .reduced_density
            .ok_or(ConfigError::MissingParameter("reduced_density"))?;
        let particle_count = self
            .particle_count
            .ok_or(ConfigError::MissingParameter("particle_count"))?;
        let step_count = self
            .step_count
            .ok_or(ConfigError::MissingParameter("step_count"))?;
        let tune_frequency = self
            .tune_frequency
            .ok_or(ConfigError::MissingParameter("tune_frequency"))?;
        let cutoff = self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?;
        let initial_max_displacement = self
            .initial_max_displacement
            .ok_or(ConfigError::MissingParameter("initial_max_displacement"))?;

        check_positive("reduced_temperature", reduced_temperature)?;
        check_positive("reduced_density", reduced_density)?;
        check_positive("particle_count", particle_count as f64)?;
        check_positive("cutoff", cutoff)?;
        check_positive("initial_max_displacement", initial_max_displacement)?;
        if tune_frequency == 0 {
            return Err(ConfigError::ZeroTuneFrequency);
        }

        let box_length = (particle_count as f64 / reduced_density).cbrt();
        if cutoff > box_length / 2.0 {
            // The reference parameter set (N=100, rho=0.9, rc=3.0) already
            // exceeds the half-box bound; minimum imaging stays well defined,
            // so this is worth a warning but not a rejection.
            warn!(
                cutoff,
                half_box = box_length / 2.0,
                "cutoff exceeds half the box edge; truncation is anisotropic"
            );
        }

        Ok(SimulationConfig {
            reduced_temperature,
            reduced_density,
            particle_count,
            step_count,
            tune_frequency,
            cutoff,
            initial_max_displacement,
            tune_displacement: self.tune_displacement.unwrap_or(true),
            initial_state_method: self.initial_state_method.unwrap_or_default(),
            seed: self.seed.unwrap_or(1),
            box_length,
            beta: 1.0 / reduced_temperature,
            cutoff_squared: cutoff * cutoff,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
pub(crate) fn test_config(particle_count: usize, step_count: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .reduced_temperature(0.9)
        .reduced_density(0.9)
        .particle_count(particle_count)
        .step_count(step_count)
        .tune_frequency(100)
        .cutoff(3.0)
        .initial_max_displacement(0.1)
        .build()
        .unwrap()
}
