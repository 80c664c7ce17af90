use super::models::FileParameters;
use crate::error::{CliError, Result};
use std::path::Path;
use tracing::debug;

pub fn load(path: &Path) -> Result<FileParameters> {
    debug!("Loading parameter file from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: anyhow::Error::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn a_complete_parameter_file_parses() {
        let (_dir, path) = write_temp_file(
            r#"
reduced-temperature = 1.2
reduced-density = 0.8
particle-count = 64
step-count = 500
tune-frequency = 50
cutoff = 2.5
initial-max-displacement = 0.2
tune-displacement = false
initial-state-method = "random"
seed = 17
"#,
        );
        let parameters = load(&path).unwrap();
        assert_eq!(parameters.reduced_temperature, Some(1.2));
        assert_eq!(parameters.particle_count, Some(64));
        assert_eq!(parameters.tune_displacement, Some(false));
        assert_eq!(parameters.initial_state_method.as_deref(), Some("random"));
        assert_eq!(parameters.seed, Some(17));
    }

    #[test]
    fn a_partial_file_leaves_the_rest_unset() {
        let (_dir, path) = write_temp_file("step-count = 42\n");
        let parameters = load(&path).unwrap();
        assert_eq!(parameters.step_count, Some(42));
        assert_eq!(parameters.reduced_temperature, None);
        assert_eq!(parameters.cutoff, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_temp_file("number-of-atoms = 100\n");
        let result = load(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn a_missing_file_is_an_io_error() {
        let result = load(Path::new("/nonexistent/run.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
