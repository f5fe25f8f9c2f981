use super::scanner::CollisionLog;
use super::types::{Pose, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a car's run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Arrived { pose: Pose },
    HitWall { position: Position, step: usize },
    Collided { with: Vec<String>, position: Position, step: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Arrived { pose } => write!(f, "{}", pose),
            Outcome::HitWall { position, step } => {
                write!(f, "hits the wall at {} at step {}", position, step)
            }
            Outcome::Collided { with, position, step } => write!(
                f,
                "collides with {} at {} at step {}",
                with.join(", "),
                position,
                step
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarReport {
    pub name: String,
    pub outcome: Outcome,
}

impl CarReport {
    pub fn new(name: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    pub fn is_incident(&self) -> bool {
        !matches!(self.outcome, Outcome::Arrived { .. })
    }
}

impl fmt::Display for CarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}, {}", self.name, self.outcome)
    }
}

/// Turns the collision log into one incident per wrecked car.
///
/// Events at a cell are read in step order. A car's "other cars" are the rest
/// of its own event followed by everyone wrecked at that cell earlier; with no
/// other cars the incident is a wall strike.
pub fn build_reports(log: &CollisionLog) -> HashMap<String, Outcome> {
    let mut reports = HashMap::new();

    for (position, events) in log.sites() {
        let mut wrecks: Vec<String> = Vec::new();

        for event in events {
            for car in &event.cars {
                let with: Vec<String> = event
                    .cars
                    .iter()
                    .filter(|other| *other != car)
                    .chain(wrecks.iter())
                    .cloned()
                    .collect();

                let outcome = if with.is_empty() {
                    Outcome::HitWall { position, step: event.step }
                } else {
                    Outcome::Collided { with, position, step: event.step }
                };
                reports.insert(car.clone(), outcome);
            }
            wrecks.extend(event.cars.iter().cloned());
        }
    }

    reports
}
