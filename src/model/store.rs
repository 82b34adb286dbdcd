use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::model::event::{EventId, Position, TimelineEvent};
use crate::parse::date::year_start_timestamp;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate event id: {0}")]
    DuplicateId(EventId),
    #[error("event not found: {0}")]
    NotFound(EventId),
}

/// A partial update for a `TimelineEvent`.
///
/// Outer `None` leaves the field untouched. For the two clearable fields
/// (`timestamp`, `position`) the inner `Option` is the new value, so
/// `Some(None)` clears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<Option<i64>>,
    pub date_confirmed: Option<bool>,
    pub position: Option<Option<Position>>,
}

impl EventPatch {
    pub fn title(title: impl Into<String>) -> Self {
        EventPatch {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        EventPatch {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    pub fn position(position: Position) -> Self {
        EventPatch {
            position: Some(Some(position)),
            ..Default::default()
        }
    }

    /// Year, derived timestamp and confirmation as one atomic patch, so a
    /// confirmed year can never be applied half-way.
    pub fn confirmed_year(year: &str) -> Self {
        let ts = year.parse::<i32>().ok().and_then(year_start_timestamp);
        EventPatch {
            year: Some(year.to_string()),
            timestamp: Some(ts),
            date_confirmed: Some(ts.is_some()),
            ..Default::default()
        }
    }
}

/// Ordered collection of timeline events. The sole writer of event state;
/// every other component reads a snapshot and issues mutations back here.
///
/// Exposed order is always: dated events ascending by timestamp, then
/// undated events, ties keeping their prior relative order. `reorder` is the
/// one deliberate exception.
#[derive(Debug, Default)]
pub struct EventStore {
    events: IndexMap<EventId, TimelineEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&TimelineEvent> {
        self.events.get(&id)
    }

    /// Events in exposed (chronological) order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TimelineEvent> {
        self.events.values()
    }

    /// Insert a new event and re-sort. Fails if the id is already present.
    pub fn add(&mut self, event: TimelineEvent) -> Result<(), StoreError> {
        if self.events.contains_key(&event.id) {
            return Err(StoreError::DuplicateId(event.id));
        }
        self.events.insert(event.id, event);
        self.sort();
        Ok(())
    }

    /// Merge a patch into the event matching `id`, then re-sort (the patch
    /// may have changed `timestamp`). All fields of the patch land at once.
    ///
    /// `NotFound` is not a failure worth surfacing: the event may have been
    /// legitimately deleted while an inference call was in flight. Callers
    /// treat it as a no-op.
    pub fn update(&mut self, id: EventId, patch: EventPatch) -> Result<(), StoreError> {
        let event = self.events.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(year) = patch.year {
            event.year = year;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(timestamp) = patch.timestamp {
            event.timestamp = timestamp;
        }
        if let Some(date_confirmed) = patch.date_confirmed {
            event.date_confirmed = date_confirmed;
        }
        if let Some(position) = patch.position {
            event.position = position;
        }
        self.sort();
        Ok(())
    }

    /// Remove an event. No-op if absent.
    pub fn delete(&mut self, id: EventId) {
        self.events.shift_remove(&id);
    }

    /// Replace the collection wholesale, bypassing the automatic sort.
    /// This is the explicit manual-ordering override; anything that wants
    /// timestamp order must go through `add`/`update` instead.
    pub fn reorder(&mut self, new_sequence: Vec<TimelineEvent>) {
        self.events = new_sequence.into_iter().map(|e| (e.id, e)).collect();
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Dated events in exposed order — the chain the canvas connects.
    pub fn dated(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.events.values().filter(|e| e.timestamp.is_some())
    }

    fn sort(&mut self) {
        // IndexMap::sort_by is stable: undated events and equal timestamps
        // keep their prior relative order.
        self.events
            .sort_by(|_, a, _, b| cmp_timestamps(a.timestamp, b.timestamp));
    }
}

fn cmp_timestamps(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dated(title: &str, ts: i64) -> TimelineEvent {
        let mut ev = TimelineEvent::titled(title, Position::new(0.0, 0.0));
        ev.timestamp = Some(ts);
        ev.date_confirmed = true;
        ev
    }

    fn undated(title: &str) -> TimelineEvent {
        TimelineEvent::titled(title, Position::new(0.0, 0.0))
    }

    fn titles(store: &EventStore) -> Vec<&str> {
        store.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn add_keeps_timestamp_order() {
        let mut store = EventStore::new();
        store.add(dated("c", 300)).unwrap();
        store.add(dated("a", 100)).unwrap();
        store.add(dated("b", 200)).unwrap();
        assert_eq!(titles(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn undated_sorts_after_dated() {
        let mut store = EventStore::new();
        store.add(undated("x")).unwrap();
        store.add(dated("a", 100)).unwrap();
        store.add(undated("y")).unwrap();
        store.add(dated("b", 200)).unwrap();
        // x and y keep their relative order at the end
        assert_eq!(titles(&store), vec!["a", "b", "x", "y"]);
    }

    #[test]
    fn ties_are_stable() {
        let mut store = EventStore::new();
        store.add(dated("first", 100)).unwrap();
        store.add(dated("second", 100)).unwrap();
        store.add(dated("third", 100)).unwrap();
        assert_eq!(titles(&store), vec!["first", "second", "third"]);

        // An unrelated update doesn't shuffle the tie
        let id = store.iter().next().unwrap().id;
        store.update(id, EventPatch::title("first")).unwrap();
        assert_eq!(titles(&store), vec!["first", "second", "third"]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut store = EventStore::new();
        let ev = dated("a", 100);
        let dup = ev.clone();
        store.add(ev).unwrap();
        let err = store.add(dup).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_resorts_on_timestamp_change() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        store.add(dated("b", 200)).unwrap();
        let a = store.iter().next().unwrap().id;

        let mut patch = EventPatch::default();
        patch.timestamp = Some(Some(300));
        store.update(a, patch).unwrap();
        assert_eq!(titles(&store), vec!["b", "a"]);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        let ghost = EventId::new();
        let err = store.update(ghost, EventPatch::title("x")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(titles(&store), vec!["a"]);
    }

    #[test]
    fn patch_lands_atomically() {
        let mut store = EventStore::new();
        store.add(undated("pending")).unwrap();
        let id = store.iter().next().unwrap().id;

        store.update(id, EventPatch::confirmed_year("1969")).unwrap();
        let ev = store.get(id).unwrap();
        assert_eq!(ev.year, "1969");
        assert!(ev.date_confirmed);
        assert_eq!(ev.timestamp, year_start_timestamp(1969));
    }

    #[test]
    fn confirmed_year_resorts_against_siblings() {
        let mut store = EventStore::new();
        store
            .add(dated("moon", year_start_timestamp(1972).unwrap()))
            .unwrap();
        store.add(undated("pending")).unwrap();
        let pending = store.iter().last().unwrap().id;

        store
            .update(pending, EventPatch::confirmed_year("1969"))
            .unwrap();
        assert_eq!(titles(&store), vec!["pending", "moon"]);
    }

    #[test]
    fn sort_never_touches_position() {
        let mut store = EventStore::new();
        let mut ev = dated("a", 100);
        ev.position = Some(Position::new(55.0, 7.0));
        let id = ev.id;
        store.add(ev).unwrap();
        store.add(dated("b", 50)).unwrap();

        assert_eq!(store.get(id).unwrap().position, Some(Position::new(55.0, 7.0)));
    }

    #[test]
    fn delete_is_noop_when_absent() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        store.delete(EventId::new());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reorder_bypasses_sort() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        store.add(dated("b", 200)).unwrap();

        let mut reversed: Vec<TimelineEvent> = store.iter().cloned().collect();
        reversed.reverse();
        store.reorder(reversed);
        assert_eq!(titles(&store), vec!["b", "a"]);
    }

    #[test]
    fn clear_empties() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn dated_filters_undated() {
        let mut store = EventStore::new();
        store.add(dated("a", 100)).unwrap();
        store.add(undated("x")).unwrap();
        let chain: Vec<&str> = store.dated().map(|e| e.title.as_str()).collect();
        assert_eq!(chain, vec!["a"]);
    }
}
