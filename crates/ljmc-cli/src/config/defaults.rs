/// Built-in parameter set: the dense liquid state point commonly used to
/// exercise Lennard-Jones samplers.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub reduced_temperature: f64,
    pub reduced_density: f64,
    pub particle_count: usize,
    pub step_count: usize,
    pub tune_frequency: usize,
    pub cutoff: f64,
    pub initial_max_displacement: f64,
    pub tune_displacement: bool,
    pub seed: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            reduced_temperature: 0.9,
            reduced_density: 0.9,
            particle_count: 100,
            step_count: 10_000,
            tune_frequency: 1000,
            cutoff: 3.0,
            initial_max_displacement: 0.1,
            tune_displacement: true,
            seed: 1,
        }
    }
}
