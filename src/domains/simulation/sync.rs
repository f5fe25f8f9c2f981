use super::types::Path;

/// A car's path tagged with the car's name. Slices of these keep the order in
/// which cars were added to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPath {
    pub car: String,
    pub path: Path,
}

impl TrackedPath {
    pub fn new(car: impl Into<String>, path: Path) -> Self {
        Self {
            car: car.into(),
            path,
        }
    }
}

/// Length of the longest path, or 0 when there are none.
pub fn max_steps(paths: &[TrackedPath]) -> usize {
    paths.iter().map(|p| p.path.len()).max().unwrap_or(0)
}

/// Pads every path to the longest length by parking the car on its last
/// position, so all cars can be compared at the same step index.
pub fn synchronize(paths: &[TrackedPath]) -> Vec<TrackedPath> {
    let target = max_steps(paths);
    paths
        .iter()
        .map(|tracked| {
            let mut path = tracked.path.clone();
            if let Some(&last) = path.last() {
                path.resize(target, last);
            }
            TrackedPath::new(tracked.car.clone(), path)
        })
        .collect()
}
