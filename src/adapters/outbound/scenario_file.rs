use crate::common::{DomainError, DomainResult};
use crate::domains::simulation::ports::ScenarioSource;
use crate::domains::simulation::scenario::Scenario;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Reads TOML scenarios from a base directory. Absolute names bypass the base.
pub struct FilesystemScenarioSource {
    base: PathBuf,
}

impl FilesystemScenarioSource {
    /// Uses `base` if given, else `AUTODRIVE_SCENARIO_DIR`, else the current directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            env::var("AUTODRIVE_SCENARIO_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        Self { base }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }

    pub fn save_scenario(&self, name: &str, scenario: &Scenario) -> DomainResult<()> {
        let path = self.resolve(name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        }
        let text = toml::to_string(scenario)
            .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        fs::write(&path, text).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))
    }
}

impl ScenarioSource for FilesystemScenarioSource {
    fn load_scenario(&self, name: &str) -> DomainResult<Scenario> {
        let path = self.resolve(name);
        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::ScenarioNotFound {
                name: path.display().to_string(),
            },
            _ => DomainError::InfrastructureError(format!("{}: {}", path.display(), e)),
        })?;
        Scenario::from_toml(&text)
    }
}
