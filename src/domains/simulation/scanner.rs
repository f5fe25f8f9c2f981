use super::sync::TrackedPath;
use super::types::{FieldSize, Position};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Cars that were wrecked together at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub cars: Vec<String>,
    pub step: usize,
}

impl CollisionEvent {
    pub fn new(cars: Vec<String>, step: usize) -> Self {
        Self { cars, step }
    }
}

/// Collision events grouped by the grid cell they happened at.
///
/// Cells iterate in the order they were first recorded and each cell's events
/// stay in the order they were appended, which the scanner guarantees is
/// increasing step order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionLog {
    sites: Vec<(Position, Vec<CollisionEvent>)>,
    index: HashMap<Position, usize>,
}

impl CollisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, site: Position, event: CollisionEvent) {
        match self.index.get(&site) {
            Some(&i) => self.sites[i].1.push(event),
            None => {
                self.index.insert(site, self.sites.len());
                self.sites.push((site, vec![event]));
            }
        }
    }

    pub fn events_at(&self, site: Position) -> &[CollisionEvent] {
        self.index
            .get(&site)
            .map(|&i| self.sites[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn sites(&self) -> impl Iterator<Item = (Position, &[CollisionEvent])> + '_ {
        self.sites.iter().map(|(site, events)| (*site, events.as_slice()))
    }

    /// Number of distinct cells holding at least one event.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    fn has_wreck_before(&self, site: Position, step: usize) -> bool {
        self.events_at(site).iter().any(|e| e.step < step)
    }
}

/// Walks synchronized paths step by step and records every wall strike and
/// every co-location of cars.
///
/// All paths must be at least `max_steps` long. A car stops being considered
/// from the step of its first incident onwards. Wall strikes are filed under
/// the cell the car occupied on the previous step, so nothing is ever recorded
/// at a cell outside the field. A car already outside at step 0 is dropped
/// from the scan without an event.
pub fn detect_collisions(paths: &[TrackedPath], max_steps: usize, field: FieldSize) -> CollisionLog {
    let mut log = CollisionLog::new();
    let mut active: Vec<&TrackedPath> = paths.iter().collect();

    // Step 0 is scanned too, so cars sharing a start cell collide before moving.
    for step in 0..max_steps {
        if active.is_empty() {
            break;
        }

        let mut frozen: HashSet<&str> = HashSet::new();
        for (position, group) in group_by_position(&active, step) {
            if !field.contains(position) && step == 0 {
                // no previous cell to file a wall strike under
                debug!(site = %position, cars = ?names(&group), "start outside field ignored");
                frozen.extend(group.iter().map(|c| c.car.as_str()));
            } else if !field.contains(position) {
                for (previous, leavers) in group_by_position(&group, step - 1) {
                    let cars = names(&leavers);
                    debug!(step, site = %previous, cars = ?cars, "wall strike");
                    frozen.extend(leavers.iter().map(|c| c.car.as_str()));
                    log.record(previous, CollisionEvent::new(cars, step));
                }
            } else if group.len() > 1 || log.has_wreck_before(position, step) {
                let cars = names(&group);
                debug!(step, site = %position, cars = ?cars, "collision");
                frozen.extend(group.iter().map(|c| c.car.as_str()));
                log.record(position, CollisionEvent::new(cars, step));
            }
        }

        active.retain(|c| !frozen.contains(c.car.as_str()));
    }

    log
}

/// Groups cars by their position at `step`. Groups keep the order of their
/// first member and members keep the input order.
fn group_by_position<'a>(cars: &[&'a TrackedPath], step: usize) -> Vec<(Position, Vec<&'a TrackedPath>)> {
    let mut groups: Vec<(Position, Vec<&'a TrackedPath>)> = Vec::new();
    let mut index: HashMap<Position, usize> = HashMap::new();

    for &car in cars {
        let position = car.path[step];
        match index.get(&position) {
            Some(&i) => groups[i].1.push(car),
            None => {
                index.insert(position, groups.len());
                groups.push((position, vec![car]));
            }
        }
    }

    groups
}

fn names(cars: &[&TrackedPath]) -> Vec<String> {
    cars.iter().map(|c| c.car.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::simulation::sync::{max_steps, synchronize};
    use crate::domains::simulation::types::Path;

    fn path(points: &[(i64, i64)]) -> Path {
        points.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn scan(paths: Vec<TrackedPath>, width: i64, height: i64) -> CollisionLog {
        let steps = max_steps(&paths);
        let synced = synchronize(&paths);
        detect_collisions(&synced, steps, FieldSize::new(width, height))
    }

    fn event(cars: &[&str], step: usize) -> CollisionEvent {
        CollisionEvent::new(cars.iter().map(|c| c.to_string()).collect(), step)
    }

    #[test]
    fn later_arrival_at_a_wreck_is_a_separate_event() {
        let log = scan(
            vec![
                TrackedPath::new(
                    "A",
                    path(&[(1, 2), (1, 3), (1, 4), (1, 4), (2, 4), (3, 4), (4, 4), (5, 4), (5, 4), (5, 4), (5, 4)]),
                ),
                TrackedPath::new(
                    "B",
                    path(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (5, 1), (5, 2), (5, 3), (5, 4)]),
                ),
                TrackedPath::new("C", path(&[(9, 8), (9, 9), (8, 8), (7, 7), (6, 6), (5, 5), (5, 4)])),
            ],
            10,
            10,
        );

        assert_eq!(log.len(), 1);
        assert_eq!(
            log.events_at(Position::new(5, 4)),
            &[event(&["A", "C"], 7), event(&["B"], 9)]
        );
    }

    #[test]
    fn wall_strike_is_filed_under_the_last_cell_inside() {
        let log = scan(
            vec![
                TrackedPath::new("Drumstick", path(&[(9, 9), (9, 10), (9, 11)])),
                TrackedPath::new("Chicken", path(&[(7, 9), (8, 9), (9, 9)])),
            ],
            10,
            10,
        );

        assert_eq!(
            log.events_at(Position::new(9, 9)),
            &[event(&["Drumstick"], 1), event(&["Chicken"], 2)]
        );
        assert!(log.events_at(Position::new(9, 10)).is_empty());
    }

    #[test]
    fn cars_that_never_meet_leave_an_empty_log() {
        let log = scan(
            vec![
                TrackedPath::new(
                    "Drumstick",
                    path(&[(3, 2), (3, 2), (4, 2), (5, 2), (5, 2), (5, 2), (4, 2), (3, 2), (2, 2), (2, 2), (2, 1)]),
                ),
                TrackedPath::new(
                    "Chicken",
                    path(&[(4, 4), (4, 4), (5, 4), (6, 4), (6, 4), (6, 5), (6, 6), (6, 6), (5, 6), (4, 6), (4, 6)]),
                ),
            ],
            10,
            10,
        );
        assert!(log.is_empty());
    }

    #[test]
    fn frozen_cars_do_not_collide_again() {
        // A and B crash at step 1; C drives through the same cell at step 2 and
        // is wrecked there, but A and B are not recorded a second time.
        let log = scan(
            vec![
                TrackedPath::new("A", path(&[(0, 1), (1, 1), (1, 2)])),
                TrackedPath::new("B", path(&[(2, 1), (1, 1), (1, 0)])),
                TrackedPath::new("C", path(&[(1, 3), (1, 2), (1, 1)])),
            ],
            5,
            5,
        );

        assert_eq!(
            log.events_at(Position::new(1, 1)),
            &[event(&["A", "B"], 1), event(&["C"], 2)]
        );
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn simultaneous_wall_strikes_from_different_cells_are_filed_separately() {
        let log = scan(
            vec![
                TrackedPath::new("A", path(&[(0, 0), (-1, 0)])),
                TrackedPath::new("B", path(&[(4, 4), (4, 5)])),
            ],
            5,
            5,
        );

        assert_eq!(log.events_at(Position::new(0, 0)), &[event(&["A"], 1)]);
        assert_eq!(log.events_at(Position::new(4, 4)), &[event(&["B"], 1)]);
        let sites: Vec<Position> = log.sites().map(|(p, _)| p).collect();
        assert_eq!(sites, vec![Position::new(0, 0), Position::new(4, 4)]);
    }

    #[test]
    fn cars_sharing_a_start_cell_collide_at_step_zero() {
        let log = scan(
            vec![
                TrackedPath::new("A", path(&[(2, 2), (2, 3)])),
                TrackedPath::new("B", path(&[(2, 2), (3, 2)])),
            ],
            5,
            5,
        );
        assert_eq!(log.events_at(Position::new(2, 2)), &[event(&["A", "B"], 0)]);
    }

    #[test]
    fn start_outside_the_field_is_not_recorded() {
        let log = scan(
            vec![
                TrackedPath::new("A", path(&[(12, 0), (12, 1)])),
                TrackedPath::new("B", path(&[(1, 1), (1, 1)])),
                TrackedPath::new("C", path(&[(0, 1), (1, 1)])),
            ],
            10,
            10,
        );

        assert!(log.events_at(Position::new(12, 0)).is_empty());
        assert!(log.events_at(Position::new(12, 1)).is_empty());
        assert_eq!(log.events_at(Position::new(1, 1)), &[event(&["B", "C"], 1)]);
        assert_eq!(log.len(), 1);
    }
}
