use crate::canvas::transform::ViewTransform;
use crate::canvas::zoom::Zoom;
use crate::model::event::{EventId, Position, TimelineEvent};
use crate::model::store::{EventPatch, EventStore};
use crate::parse::date::is_valid_year;
use crate::util::text::{next_grapheme_boundary, prev_grapheme_boundary};

/// Canvas-space size of an event card, in cells at zoom 1
pub const CARD_WIDTH: f64 = 26.0;
pub const CARD_HEIGHT: f64 = 6.0;

/// Error type for inline edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("not a 4-digit year: {0:?}")]
    InvalidYearInput(String),
}

/// Which event field an inline edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Title,
    Year,
    Description,
}

impl EventField {
    /// Only the description accepts line breaks while editing
    pub fn is_multiline(self) -> bool {
        matches!(self, EventField::Description)
    }
}

/// The pointer state machine. One variant at a time, so dragging while
/// editing (or any other illegal combination) cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerState {
    Idle,
    /// `anchor` is the canvas point grabbed at pointer-down; panning keeps
    /// it under the cursor
    PanningCanvas {
        anchor: Position,
        start: Position,
        moved: bool,
    },
    /// `grab` is the cursor's offset from the card origin in canvas units,
    /// so the grip point survives the whole drag
    DraggingEvent {
        id: EventId,
        grab: Position,
        start: Position,
        moved: bool,
    },
    EditingField {
        id: EventId,
        field: EventField,
        buffer: String,
        cursor: usize,
    },
}

/// Pointer-driven interaction state for the canvas surface: pan, per-card
/// drag, selection and inline edits, all against screen coordinates in
/// terminal cells. Selection is an overlay on top of the machine — a card
/// stays selected across pans and edits until something clears it.
#[derive(Debug)]
pub struct CanvasController {
    pub state: PointerState,
    pub selected: Option<EventId>,
    pub transform: ViewTransform,
    pub zoom: Zoom,
    adjacent_offset: f64,
}

impl CanvasController {
    pub fn new(adjacent_offset: f64) -> Self {
        CanvasController {
            state: PointerState::Idle,
            selected: None,
            transform: ViewTransform::default(),
            zoom: Zoom::default(),
            adjacent_offset,
        }
    }

    /// Topmost card containing the canvas point. Cards capture the pointer
    /// before the canvas background, and later-drawn cards win overlaps.
    pub fn hit_test(&self, store: &EventStore, canvas: Position) -> Option<EventId> {
        store
            .iter()
            .rev()
            .find(|e| e.position.is_some_and(|p| card_contains(p, canvas)))
            .map(|e| e.id)
    }

    pub fn pointer_down(&mut self, store: &mut EventStore, screen: Position) {
        let canvas = self.transform.screen_to_canvas(screen, self.zoom.level());

        let editing_id = match &self.state {
            PointerState::EditingField { id, .. } => Some(*id),
            _ => None,
        };
        if let Some(editing_id) = editing_id {
            // Clicking the card under edit must not start a drag
            if self.hit_test(store, canvas) == Some(editing_id) {
                return;
            }
            // Anywhere else is a blur. A rejected year keeps the edit open
            // and swallows the click.
            if self.commit_edit(store).is_err() {
                return;
            }
        }

        match self.hit_test(store, canvas) {
            Some(id) => {
                let Some(position) = store.get(id).and_then(|e| e.position) else {
                    return;
                };
                let grab = Position::new(canvas.x - position.x, canvas.y - position.y);
                self.state = PointerState::DraggingEvent {
                    id,
                    grab,
                    start: screen,
                    moved: false,
                };
            }
            None => {
                self.selected = None;
                self.state = PointerState::PanningCanvas {
                    anchor: canvas,
                    start: screen,
                    moved: false,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, store: &mut EventStore, screen: Position) {
        let zoom = self.zoom.level();
        match &mut self.state {
            PointerState::PanningCanvas {
                anchor,
                start,
                moved,
            } => {
                if screen != *start {
                    *moved = true;
                }
                let anchor = *anchor;
                self.transform.pin(anchor, screen, zoom);
            }
            PointerState::DraggingEvent {
                id,
                grab,
                start,
                moved,
            } => {
                if screen == *start && !*moved {
                    return;
                }
                *moved = true;
                let id = *id;
                let grab = *grab;
                let canvas = self.transform.screen_to_canvas(screen, zoom);
                // Live update on every move, not only on release
                let _ = store.update(
                    id,
                    EventPatch::position(Position::new(canvas.x - grab.x, canvas.y - grab.y)),
                );
            }
            _ => {}
        }
    }

    /// A down/up pair with no net movement is a click: it selects instead of
    /// ending a drag or pan.
    pub fn pointer_up(&mut self, screen: Position) {
        match &self.state {
            PointerState::DraggingEvent {
                id, start, moved, ..
            } => {
                let click = !*moved && screen == *start;
                let id = *id;
                self.state = PointerState::Idle;
                if click {
                    self.selected = Some(id);
                }
            }
            PointerState::PanningCanvas { .. } => {
                self.state = PointerState::Idle;
            }
            _ => {}
        }
    }

    /// Drag and pan end cleanly when the pointer leaves the canvas surface,
    /// otherwise re-entry would resume a stale grab.
    pub fn pointer_leave(&mut self) {
        if matches!(
            self.state,
            PointerState::DraggingEvent { .. } | PointerState::PanningCanvas { .. }
        ) {
            self.state = PointerState::Idle;
        }
    }

    pub fn double_click(&mut self, store: &EventStore, screen: Position) {
        let canvas = self.transform.screen_to_canvas(screen, self.zoom.level());
        if let Some((id, field)) = self.field_at(store, canvas) {
            self.begin_edit(store, id, field);
        }
    }

    /// Capture the field's current value into an edit buffer
    pub fn begin_edit(&mut self, store: &EventStore, id: EventId, field: EventField) {
        let Some(event) = store.get(id) else {
            return;
        };
        let buffer = match field {
            EventField::Title => event.title.clone(),
            EventField::Year => event.year.clone(),
            EventField::Description => event.description.clone(),
        };
        let cursor = buffer.len();
        self.selected = Some(id);
        self.state = PointerState::EditingField {
            id,
            field,
            buffer,
            cursor,
        };
    }

    /// Commit the edit buffer to the store. Year edits must pass the
    /// 4-digit check; a failed check leaves the edit open and the store
    /// untouched. Absent Idle/editing state this is a no-op.
    pub fn commit_edit(&mut self, store: &mut EventStore) -> Result<(), EditError> {
        let PointerState::EditingField {
            id, field, buffer, ..
        } = &self.state
        else {
            return Ok(());
        };
        let id = *id;
        let patch = match field {
            EventField::Year => {
                let year = buffer.trim().to_string();
                if !is_valid_year(&year) {
                    return Err(EditError::InvalidYearInput(year));
                }
                EventPatch::confirmed_year(&year)
            }
            EventField::Title => EventPatch::title(buffer.clone()),
            EventField::Description => EventPatch::description(buffer.clone()),
        };
        // A commit can race a deletion the same way inference does;
        // an absent id is a silent no-op
        let _ = store.update(id, patch);
        self.selected = Some(id);
        self.state = PointerState::Idle;
        Ok(())
    }

    /// Discard the edit buffer. No store mutation.
    pub fn cancel_edit(&mut self) {
        if matches!(self.state, PointerState::EditingField { .. }) {
            self.state = PointerState::Idle;
        }
    }

    /// Create a new event one fixed horizontal step from the selected one
    /// and move selection to it. Available only while exactly one event is
    /// selected and nothing is mid-drag or mid-edit.
    pub fn add_adjacent(&mut self, store: &mut EventStore) -> Option<EventId> {
        if !matches!(self.state, PointerState::Idle) {
            return None;
        }
        let selected = self.selected?;
        let base = store.get(selected)?.position?;
        let event = TimelineEvent::titled(
            "New event",
            Position::new(base.x + self.adjacent_offset, base.y),
        );
        let id = event.id;
        store.add(event).ok()?;
        self.selected = Some(id);
        Some(id)
    }

    pub fn delete_selected(&mut self, store: &mut EventStore) -> Option<EventId> {
        if !matches!(self.state, PointerState::Idle) {
            return None;
        }
        let id = self.selected.take()?;
        store.delete(id);
        Some(id)
    }

    pub fn editing(&self) -> Option<(EventId, EventField)> {
        match &self.state {
            PointerState::EditingField { id, field, .. } => Some((*id, *field)),
            _ => None,
        }
    }

    pub fn edit_buffer(&self) -> Option<(&str, usize)> {
        match &self.state {
            PointerState::EditingField { buffer, cursor, .. } => Some((buffer, *cursor)),
            _ => None,
        }
    }

    // ── edit buffer ops ────────────────────────────────────────────

    pub fn edit_insert(&mut self, c: char) {
        if let PointerState::EditingField { buffer, cursor, .. } = &mut self.state {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
    }

    pub fn edit_backspace(&mut self) {
        if let PointerState::EditingField { buffer, cursor, .. } = &mut self.state
            && let Some(prev) = prev_grapheme_boundary(buffer, *cursor)
        {
            buffer.replace_range(prev..*cursor, "");
            *cursor = prev;
        }
    }

    pub fn edit_left(&mut self) {
        if let PointerState::EditingField { buffer, cursor, .. } = &mut self.state
            && let Some(prev) = prev_grapheme_boundary(buffer, *cursor)
        {
            *cursor = prev;
        }
    }

    pub fn edit_right(&mut self) {
        if let PointerState::EditingField { buffer, cursor, .. } = &mut self.state
            && let Some(next) = next_grapheme_boundary(buffer, *cursor)
        {
            *cursor = next;
        }
    }

    pub fn edit_home(&mut self) {
        if let PointerState::EditingField { cursor, .. } = &mut self.state {
            *cursor = 0;
        }
    }

    pub fn edit_end(&mut self) {
        if let PointerState::EditingField { buffer, cursor, .. } = &mut self.state {
            *cursor = buffer.len();
        }
    }

    fn field_at(&self, store: &EventStore, canvas: Position) -> Option<(EventId, EventField)> {
        let id = self.hit_test(store, canvas)?;
        let position = store.get(id)?.position?;
        // Card rows: border, year, title, description…, border
        let field = match (canvas.y - position.y).floor() as i64 {
            ..=1 => EventField::Year,
            2 => EventField::Title,
            _ => EventField::Description,
        };
        Some((id, field))
    }
}

fn card_contains(top_left: Position, point: Position) -> bool {
    point.x >= top_left.x
        && point.x < top_left.x + CARD_WIDTH
        && point.y >= top_left.y
        && point.y < top_left.y + CARD_HEIGHT
}
