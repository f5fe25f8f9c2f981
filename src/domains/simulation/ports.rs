use super::scenario::Scenario;
use crate::common::DomainResult;

/// Port the simulation domain uses to obtain batch scenarios.
/// Adapters provide filesystem or in-memory sources.
pub trait ScenarioSource: Send + Sync {
    fn load_scenario(&self, name: &str) -> DomainResult<Scenario>;
}
