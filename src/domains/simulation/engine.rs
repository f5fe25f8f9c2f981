use super::car::Car;
use super::report::{build_reports, CarReport, Outcome};
use super::scanner::detect_collisions;
use super::sync::{max_steps, synchronize, TrackedPath};
use super::types::{FieldSize, Path};
use tracing::{debug, info};

/// First step at which the path leaves the field.
pub fn first_out_of_bounds_step(path: &Path, field: FieldSize) -> Option<usize> {
    path.iter().position(|&p| !field.contains(p))
}

/// Runs every car on the field and returns one report per car, in the order
/// the cars were given.
pub fn simulate(cars: &[Car], field: FieldSize) -> Vec<CarReport> {
    let reports = match cars {
        [] => Vec::new(),
        [car] => vec![simulate_single(car, field)],
        _ => simulate_many(cars, field),
    };

    info!(
        cars = cars.len(),
        incidents = reports.iter().filter(|r| r.is_incident()).count(),
        "simulation finished on {} field",
        field
    );
    reports
}

/// No other car can be hit, so only the walls matter. The wall is reported at
/// the first position outside the field.
fn simulate_single(car: &Car, field: FieldSize) -> CarReport {
    let path = car.path();
    let outcome = match first_out_of_bounds_step(&path, field) {
        Some(step) => Outcome::HitWall {
            position: path[step],
            step,
        },
        None => Outcome::Arrived {
            pose: car.destination(),
        },
    };
    CarReport::new(car.name.clone(), outcome)
}

fn simulate_many(cars: &[Car], field: FieldSize) -> Vec<CarReport> {
    let paths: Vec<TrackedPath> = cars
        .iter()
        .map(|car| TrackedPath::new(car.name.clone(), car.path()))
        .collect();

    let steps = max_steps(&paths);
    let synced = synchronize(&paths);
    let log = detect_collisions(&synced, steps, field);
    debug!(steps, sites = log.len(), "collision scan complete");

    let mut incidents = build_reports(&log);
    cars.iter()
        .map(|car| {
            let outcome = incidents.remove(&car.name).unwrap_or_else(|| Outcome::Arrived {
                pose: car.destination(),
            });
            CarReport::new(car.name.clone(), outcome)
        })
        .collect()
}
