use super::types::{Command, Path, Pose};

/// Pose after executing a single command.
pub fn step(pose: Pose, command: Command) -> Pose {
    match command {
        Command::Forward => Pose {
            position: pose.position.advance(pose.direction),
            ..pose
        },
        Command::TurnLeft => Pose {
            direction: pose.direction.turn_left(),
            ..pose
        },
        Command::TurnRight => Pose {
            direction: pose.direction.turn_right(),
            ..pose
        },
    }
}

/// Every position the car occupies, starting pose included. The result always
/// holds `commands.len() + 1` entries and is not clipped at any boundary.
pub fn simulate_path(start: Pose, commands: &[Command]) -> Path {
    let mut pose = start;
    let mut path = Vec::with_capacity(commands.len() + 1);
    path.push(pose.position);
    for &command in commands {
        pose = step(pose, command);
        path.push(pose.position);
    }
    path
}

pub fn final_pose(start: Pose, commands: &[Command]) -> Pose {
    commands.iter().fold(start, |pose, &command| step(pose, command))
}
