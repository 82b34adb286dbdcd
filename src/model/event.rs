use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title shown on an event card while inference is still in flight
pub const PLACEHOLDER_TITLE: &str = "generating…";

/// Opaque event identifier, unique within a store. Assigned at creation,
/// never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A point in canvas-space. Canvas coordinates are terminal cells treated as
/// f64; they are decoupled from chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A single timeline event.
///
/// `timestamp` orders the event; `position` places it on the canvas. The two
/// are independent: dragging a card never changes where it sorts, and a
/// date edit never moves the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: EventId,
    /// Display year; empty until resolved. Freely editable, so not
    /// guaranteed numeric.
    pub year: String,
    pub title: String,
    /// The original free-text input
    pub description: String,
    /// Epoch milliseconds; None means unordered/unknown date
    pub timestamp: Option<i64>,
    /// True once a year has been set by inference or by the user
    pub date_confirmed: bool,
    /// Canvas placement; None in layouts that compute position implicitly
    pub position: Option<Position>,
}

impl TimelineEvent {
    /// Create a provisional event the instant a description is submitted:
    /// placeholder title, no date yet. The network call that fills it in
    /// happens later.
    pub fn provisional(description: impl Into<String>, position: Position) -> Self {
        TimelineEvent {
            id: EventId::new(),
            year: String::new(),
            title: PLACEHOLDER_TITLE.to_string(),
            description: description.into(),
            timestamp: None,
            date_confirmed: false,
            position: Some(position),
        }
    }

    /// Create an undated event with a user-supplied default title
    /// (the add-adjacent affordance).
    pub fn titled(title: impl Into<String>, position: Position) -> Self {
        TimelineEvent {
            id: EventId::new(),
            year: String::new(),
            title: title.into(),
            description: String::new(),
            timestamp: None,
            date_confirmed: false,
            position: Some(position),
        }
    }

    /// Whether the card should carry the "needs a date" marker
    pub fn needs_date(&self) -> bool {
        !self.date_confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisional_starts_unresolved() {
        let ev = TimelineEvent::provisional("we shipped it", Position::new(10.0, 4.0));
        assert_eq!(ev.title, PLACEHOLDER_TITLE);
        assert_eq!(ev.year, "");
        assert_eq!(ev.timestamp, None);
        assert!(!ev.date_confirmed);
        assert!(ev.needs_date());
        assert_eq!(ev.position, Some(Position::new(10.0, 4.0)));
    }

    #[test]
    fn ids_are_unique() {
        let a = TimelineEvent::provisional("a", Position::new(0.0, 0.0));
        let b = TimelineEvent::provisional("a", Position::new(0.0, 0.0));
        assert_ne!(a.id, b.id);
    }
}
