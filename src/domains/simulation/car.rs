use super::motion::{final_pose, simulate_path};
use super::types::{Command, Path, Pose};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub name: String,
    pub initial_pose: Pose,
    pub commands: Vec<Command>,
}

impl Car {
    pub fn new(name: impl Into<String>, initial_pose: Pose, commands: Vec<Command>) -> Self {
        Self {
            name: name.into(),
            initial_pose,
            commands,
        }
    }

    pub fn path(&self) -> Path {
        simulate_path(self.initial_pose, &self.commands)
    }

    /// Pose after every command has run, ignoring walls and other cars.
    pub fn destination(&self) -> Pose {
        final_pose(self.initial_pose, &self.commands)
    }

    pub fn command_string(&self) -> String {
        self.commands.iter().map(|c| c.symbol()).collect()
    }
}
