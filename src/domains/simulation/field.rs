use super::car::Car;
use super::engine::simulate;
use super::events::FieldEvent;
use super::parse::parse_commands;
use super::report::CarReport;
use super::types::{Command, FieldSize, Pose};
use crate::common::{replay, AggregateRoot, DomainError, DomainResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The simulation field and the cars registered on it.
///
/// Registration is where input is checked: names must be unique and every car
/// must start inside the field. The simulation itself trusts what it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub size: FieldSize,
    pub cars: Vec<Car>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<FieldEvent>,
}

impl Field {
    pub fn new(size: FieldSize) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), size)
    }

    pub fn with_id(id: String, size: FieldSize) -> Self {
        let mut field = Self::blank();
        let event = FieldEvent::FieldCreated {
            field_id: id,
            size,
            timestamp: Utc::now(),
        };
        field.add_event(event.clone());
        field.apply_created(&event);
        field
    }

    /// Rebuilds a field from its recorded events.
    pub fn from_history(events: &[FieldEvent]) -> DomainResult<Self> {
        replay(Self::blank(), events)
    }

    fn blank() -> Self {
        Self {
            id: String::new(),
            size: FieldSize::new(0, 0),
            cars: Vec::new(),
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    fn apply_created(&mut self, event: &FieldEvent) {
        if let FieldEvent::FieldCreated { field_id, size, .. } = event {
            self.id = field_id.clone();
            self.size = *size;
            self.cars.clear();
            self.version += 1;
        }
    }

    pub fn width(&self) -> i64 {
        self.size.width
    }

    pub fn height(&self) -> i64 {
        self.size.height
    }

    pub fn is_car_name_used(&self, name: &str) -> bool {
        self.cars.iter().any(|c| c.name == name)
    }

    pub fn add_car(&mut self, name: &str, pose: Pose, commands: Vec<Command>) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidInput {
                reason: "car name must not be blank".to_string(),
            });
        }
        if self.is_car_name_used(name) {
            return Err(DomainError::DuplicateCarName {
                name: name.to_string(),
            });
        }
        if !self.size.contains(pose.position) {
            return Err(DomainError::OutOfBounds {
                x: pose.position.x,
                y: pose.position.y,
                width: self.size.width,
                height: self.size.height,
            });
        }

        let event = FieldEvent::CarAdded {
            field_id: self.id.clone(),
            car: Car::new(name, pose, commands),
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)
    }

    /// Same as [`Field::add_car`] but takes the textual forms, e.g. `"1 2 N"`
    /// and `"FFRL"`.
    pub fn add_car_from_text(&mut self, name: &str, position: &str, commands: &str) -> DomainResult<()> {
        let pose: Pose = position.parse()?;
        let commands = parse_commands(commands)?;
        self.add_car(name, pose, commands)
    }

    /// One line per car, e.g. `- A, (1, 2) N, FFRFFFFRRL`.
    pub fn car_details(&self) -> Vec<String> {
        self.cars
            .iter()
            .map(|c| format!("- {}, {}, {}", c.name, c.initial_pose, c.command_string()))
            .collect()
    }

    pub fn run_simulation(&mut self) -> DomainResult<Vec<CarReport>> {
        let reports = simulate(&self.cars, self.size);
        let event = FieldEvent::SimulationCompleted {
            field_id: self.id.clone(),
            reports: reports.clone(),
            timestamp: Utc::now(),
        };
        self.add_event(event.clone());
        self.apply(&event)?;
        Ok(reports)
    }

    pub fn simulated_results(&mut self) -> DomainResult<Vec<String>> {
        Ok(self
            .run_simulation()?
            .iter()
            .map(|r| r.to_string())
            .collect())
    }
}

impl AggregateRoot for Field {
    type Event = FieldEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            FieldEvent::FieldCreated { .. } => {
                self.apply_created(event);
                return Ok(());
            }
            FieldEvent::CarAdded { car, .. } => {
                if self.is_car_name_used(&car.name) {
                    return Err(DomainError::DuplicateCarName {
                        name: car.name.clone(),
                    });
                }
                self.cars.push(car.clone());
            }
            FieldEvent::SimulationCompleted { .. } => {}
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
