use crate::model::event::Position;

/// Pan offset binding screen cells to canvas coordinates.
///
/// With offset `(ox, oy)` and zoom `z`:
/// screen → canvas is `c = s / z - o`; canvas → screen is `s = (c + o) * z`.
/// The two are exact inverses up to floating-point tolerance for any `z > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewTransform {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    pub fn screen_to_canvas(&self, screen: Position, zoom: f64) -> Position {
        Position {
            x: screen.x / zoom - self.offset_x,
            y: screen.y / zoom - self.offset_y,
        }
    }

    pub fn canvas_to_screen(&self, canvas: Position, zoom: f64) -> Position {
        Position {
            x: (canvas.x + self.offset_x) * zoom,
            y: (canvas.y + self.offset_y) * zoom,
        }
    }

    /// Re-anchor the pan so that canvas point `canvas` sits exactly under
    /// screen point `screen`. This is what keeps the grabbed point fixed
    /// while panning.
    pub fn pin(&mut self, canvas: Position, screen: Position, zoom: f64) {
        self.offset_x = screen.x / zoom - canvas.x;
        self.offset_y = screen.y / zoom - canvas.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::zoom::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

    const TOLERANCE: f64 = 1e-9;

    fn close(a: Position, b: Position) -> bool {
        (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
    }

    #[test]
    fn round_trip_across_zoom_domain() {
        let transform = ViewTransform {
            offset_x: 13.5,
            offset_y: -42.25,
        };
        let points = [
            Position::new(0.0, 0.0),
            Position::new(100.0, 33.0),
            Position::new(-57.5, 1019.0),
        ];

        let mut zoom = MIN_ZOOM;
        while zoom <= MAX_ZOOM + TOLERANCE {
            for p in points {
                let there = transform.canvas_to_screen(p, zoom);
                let back = transform.screen_to_canvas(there, zoom);
                assert!(close(p, back), "round trip drifted at zoom {}", zoom);
            }
            zoom += ZOOM_STEP;
        }
    }

    #[test]
    fn identity_at_default() {
        let transform = ViewTransform::default();
        let p = Position::new(12.0, 7.0);
        assert!(close(transform.screen_to_canvas(p, 1.0), p));
        assert!(close(transform.canvas_to_screen(p, 1.0), p));
    }

    #[test]
    fn pin_keeps_point_under_cursor() {
        let mut transform = ViewTransform::default();
        let anchor = transform.screen_to_canvas(Position::new(40.0, 12.0), 2.0);

        // Cursor moves; the anchored canvas point must follow it exactly
        transform.pin(anchor, Position::new(55.0, 3.0), 2.0);
        let now_under = transform.screen_to_canvas(Position::new(55.0, 3.0), 2.0);
        assert!(close(anchor, now_under));
    }
}
