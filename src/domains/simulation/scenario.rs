use super::field::Field;
use super::types::FieldSize;
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// A batch run described in TOML:
///
/// ```toml
/// [field]
/// width = 10
/// height = 10
///
/// [[cars]]
/// name = "A"
/// position = "1 2 N"
/// commands = "FFRFFFFRRL"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub field: ScenarioField,
    #[serde(default)]
    pub cars: Vec<ScenarioCar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioField {
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCar {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub commands: String,
}

impl Scenario {
    pub fn from_toml(source: &str) -> DomainResult<Self> {
        toml::from_str(source).map_err(|e| DomainError::InvalidInput {
            reason: format!("malformed scenario: {}", e),
        })
    }

    /// Registers every car on a fresh field, applying the same checks as
    /// interactive input.
    pub fn build_field(&self) -> DomainResult<Field> {
        if self.field.width <= 0 || self.field.height <= 0 {
            return Err(DomainError::InvalidInput {
                reason: format!(
                    "field width and height must be positive, got {} x {}",
                    self.field.width, self.field.height
                ),
            });
        }

        let mut field = Field::new(FieldSize::new(self.field.width, self.field.height));
        for car in &self.cars {
            field.add_car_from_text(&car.name, &car.position, &car.commands)?;
        }
        Ok(field)
    }
}
