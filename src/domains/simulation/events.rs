use super::car::Car;
use super::report::CarReport;
use super::types::FieldSize;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FieldEvent {
    FieldCreated {
        field_id: String,
        size: FieldSize,
        timestamp: DateTime<Utc>,
    },
    CarAdded {
        field_id: String,
        car: Car,
        timestamp: DateTime<Utc>,
    },
    SimulationCompleted {
        field_id: String,
        reports: Vec<CarReport>,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for FieldEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FieldEvent::FieldCreated { .. } => "FieldCreated",
            FieldEvent::CarAdded { .. } => "CarAdded",
            FieldEvent::SimulationCompleted { .. } => "SimulationCompleted",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            FieldEvent::FieldCreated { field_id, .. } => field_id,
            FieldEvent::CarAdded { field_id, .. } => field_id,
            FieldEvent::SimulationCompleted { field_id, .. } => field_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            FieldEvent::FieldCreated { timestamp, .. } => *timestamp,
            FieldEvent::CarAdded { timestamp, .. } => *timestamp,
            FieldEvent::SimulationCompleted { timestamp, .. } => *timestamp,
        }
    }
}
