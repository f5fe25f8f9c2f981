use crate::common::{DomainEvent, DomainResult};
use serde::{Deserialize, Serialize};

pub trait AggregateRoot: Send + Sync + Clone {
    type Event: DomainEvent + Serialize + for<'de> Deserialize<'de>;

    fn aggregate_id(&self) -> &str;
    fn version(&self) -> u64;

    /// Apply an event to update the aggregate state
    fn apply(&mut self, event: &Self::Event) -> DomainResult<()>;

    /// Events recorded since the last commit
    fn uncommitted_events(&self) -> &[Self::Event];

    fn mark_events_as_committed(&mut self);

    fn add_event(&mut self, event: Self::Event);
}

/// Rebuild an aggregate by replaying a recorded event history onto a blank instance.
pub fn replay<T: AggregateRoot>(mut aggregate: T, events: &[T::Event]) -> DomainResult<T> {
    for event in events {
        aggregate.apply(event)?;
    }
    Ok(aggregate)
}
