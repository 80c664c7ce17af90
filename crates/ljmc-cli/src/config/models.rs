use serde::Deserialize;

/// On-disk run parameters.
///
/// Every field is optional so a file only has to state what it overrides;
/// unknown keys are rejected rather than silently ignored.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileParameters {
    pub reduced_temperature: Option<f64>,
    pub reduced_density: Option<f64>,
    pub particle_count: Option<usize>,
    pub step_count: Option<usize>,
    pub tune_frequency: Option<usize>,
    pub cutoff: Option<f64>,
    pub initial_max_displacement: Option<f64>,
    pub tune_displacement: Option<bool>,
    pub initial_state_method: Option<String>,
    pub seed: Option<u64>,
}
