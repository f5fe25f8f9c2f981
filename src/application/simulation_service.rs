use crate::common::{AggregateRoot, ApplicationResult, DomainError, EventEnvelope, EventMetadata};
use crate::config::OutputFormat;
use crate::domains::logger::DynLogger;
use crate::domains::simulation::{CarReport, ScenarioSource, Scenario};
use serde::Serialize;
use std::sync::Arc;

pub struct SimulationService {
    logger: DynLogger,
    source: Arc<dyn ScenarioSource>,
}

/// Result of one batch run: the per-car reports plus the field's event trail.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub field_id: String,
    pub reports: Vec<CarReport>,
    pub events: Vec<EventEnvelope>,
}

#[derive(Serialize)]
struct ResultLine<'a> {
    name: &'a str,
    result: String,
}

impl SimulationOutcome {
    pub fn lines(&self) -> Vec<String> {
        self.reports.iter().map(|r| r.to_string()).collect()
    }

    pub fn render(&self, format: OutputFormat) -> ApplicationResult<String> {
        match format {
            OutputFormat::Text => Ok(self.lines().join("\n")),
            OutputFormat::Json => {
                let rows: Vec<ResultLine> = self
                    .reports
                    .iter()
                    .map(|r| ResultLine {
                        name: &r.name,
                        result: r.outcome.to_string(),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows).map_err(DomainError::from)?)
            }
        }
    }
}

impl SimulationService {
    pub fn new(logger: DynLogger, source: Arc<dyn ScenarioSource>) -> Self {
        Self { logger, source }
    }

    pub fn run_named(&self, name: &str) -> ApplicationResult<SimulationOutcome> {
        self.logger.info(&format!("Loading scenario {}", name));
        let scenario = self.source.load_scenario(name).map_err(|e| {
            self.logger.error(&format!("Failed to load scenario {}: {}", name, e));
            e
        })?;
        self.run_scenario(&scenario)
    }

    pub fn run_scenario(&self, scenario: &Scenario) -> ApplicationResult<SimulationOutcome> {
        let mut field = scenario.build_field().map_err(|e| {
            self.logger.error(&format!("Rejected scenario: {}", e));
            e
        })?;
        self.logger.info(&format!(
            "Simulating {} car(s) on a {} field",
            field.cars.len(),
            field.size
        ));

        let reports = field.run_simulation()?;
        for report in reports.iter().filter(|r| r.is_incident()) {
            self.logger.warn(&report.to_string());
        }

        let metadata = EventMetadata::from_source("simulation-service");
        let events = field
            .uncommitted_events()
            .iter()
            .map(|e| EventEnvelope::new(e, "Field", metadata.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;
        field.mark_events_as_committed();

        Ok(SimulationOutcome {
            field_id: field.id.clone(),
            reports,
            events,
        })
    }
}
