//! Text forms accepted from users and scenario files: `"10 10"` for a field,
//! `"1 2 N"` for a pose and `"FFRL"` for a command string. Letters are
//! case-insensitive.

use super::types::{Command, Direction, FieldSize, Pose};
use crate::common::DomainError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;
use thiserror::Error;

static FIELD_SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+) (\d+)$").unwrap());
static POSE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+) (\d+) ([nsewNSEW])$").unwrap());
static COMMANDS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[flrFLR]*$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid field size {0:?}, expected \"width height\" (i.e. \"10 10\")")]
    FieldSize(String),

    #[error("field width and height must be positive, got {0:?}")]
    EmptyField(String),

    #[error("invalid position {0:?}, expected \"x y Direction\" (i.e. \"1 2 N\")")]
    Pose(String),

    #[error("invalid direction {0:?}, expected one of N, E, S, W")]
    Direction(String),

    #[error("invalid commands {0:?}, valid commands are: F L R")]
    Commands(String),

    #[error("coordinate {0:?} is too large")]
    Coordinate(String),
}

impl From<ParseError> for DomainError {
    fn from(e: ParseError) -> Self {
        DomainError::InvalidInput {
            reason: e.to_string(),
        }
    }
}

fn coordinate(text: &str) -> Result<i64, ParseError> {
    text.parse()
        .map_err(|_| ParseError::Coordinate(text.to_string()))
}

impl TryFrom<char> for Direction {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Direction::North),
            'E' => Ok(Direction::East),
            'S' => Ok(Direction::South),
            'W' => Ok(Direction::West),
            _ => Err(ParseError::Direction(c.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::try_from(c),
            _ => Err(ParseError::Direction(s.to_string())),
        }
    }
}

impl TryFrom<char> for Command {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'F' => Ok(Command::Forward),
            'L' => Ok(Command::TurnLeft),
            'R' => Ok(Command::TurnRight),
            _ => Err(ParseError::Commands(c.to_string())),
        }
    }
}

/// Parses a whole command string; the empty string is a valid, empty program.
pub fn parse_commands(s: &str) -> Result<Vec<Command>, ParseError> {
    if !COMMANDS_PATTERN.is_match(s) {
        return Err(ParseError::Commands(s.to_string()));
    }
    s.chars().map(Command::try_from).collect()
}

impl FromStr for Pose {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = POSE_PATTERN
            .captures(s)
            .ok_or_else(|| ParseError::Pose(s.to_string()))?;
        let direction: Direction = caps[3].parse()?;
        Ok(Pose::new(coordinate(&caps[1])?, coordinate(&caps[2])?, direction))
    }
}

impl FromStr for FieldSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = FIELD_SIZE_PATTERN
            .captures(s)
            .ok_or_else(|| ParseError::FieldSize(s.to_string()))?;
        let size = FieldSize::new(coordinate(&caps[1])?, coordinate(&caps[2])?);
        if size.width == 0 || size.height == 0 {
            return Err(ParseError::EmptyField(s.to_string()));
        }
        Ok(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::simulation::types::Position;

    #[test]
    fn pose_accepts_lower_case_direction() {
        let pose: Pose = "1 2 n".parse().unwrap();
        assert_eq!(pose.position, Position::new(1, 2));
        assert_eq!(pose.direction, Direction::North);
        assert_eq!("7 8 W".parse::<Pose>().unwrap(), Pose::new(7, 8, Direction::West));
    }

    #[test]
    fn pose_rejects_malformed_text() {
        for bad in ["", "1 2", "1 2 X", "1  2 N", "-1 2 N", "1 2 N ", "a b N"] {
            assert!(matches!(bad.parse::<Pose>(), Err(ParseError::Pose(_))), "{:?}", bad);
        }
    }

    #[test]
    fn huge_coordinates_are_rejected() {
        assert!(matches!(
            "99999999999999999999 1 N".parse::<Pose>(),
            Err(ParseError::Coordinate(_))
        ));
    }

    #[test]
    fn commands_are_case_insensitive_and_may_be_empty() {
        assert_eq!(
            parse_commands("fLr").unwrap(),
            vec![Command::Forward, Command::TurnLeft, Command::TurnRight]
        );
        assert!(parse_commands("").unwrap().is_empty());
        assert!(matches!(parse_commands("FXF"), Err(ParseError::Commands(_))));
        assert!(matches!(parse_commands("F F"), Err(ParseError::Commands(_))));
    }

    #[test]
    fn field_size_needs_two_positive_numbers() {
        assert_eq!("10 10".parse::<FieldSize>().unwrap(), FieldSize::new(10, 10));
        assert!(matches!("10".parse::<FieldSize>(), Err(ParseError::FieldSize(_))));
        assert!(matches!("0 5".parse::<FieldSize>(), Err(ParseError::EmptyField(_))));
    }

    #[test]
    fn parse_errors_become_invalid_input() {
        let err: DomainError = ParseError::Direction("Q".to_string()).into();
        match err {
            DomainError::InvalidInput { reason } => assert!(reason.contains("\"Q\"")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
