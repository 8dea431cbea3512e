//! Integer rasterization: which points a shape covers, independent of
//! where (or whether) they end up on screen.
//!
//! Coordinates are widened to `i64` so shapes near the edges of the `i32`
//! range can be walked without overflow; clipping happens later.

/// The points of a straight line, both endpoints included (Bresenham).
///
/// Endpoints are put in a canonical order first, so a line and its
/// reverse cover exactly the same pixels.
pub struct Line {
    x: i64,
    y: i64,
    end: (i64, i64),
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Line {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        let (x0, y0) = (i64::from(start.0), i64::from(start.1));
        let (x1, y1) = (i64::from(end.0), i64::from(end.1));

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Line {
            x: x0,
            y: y0,
            end: (x1, y1),
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let point = (self.x, self.y);
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(point)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A horizontal run of pixels on row `y`, from `x0` to `x1` inclusive.
pub struct Span {
    pub y: i64,
    pub x0: i64,
    pub x1: i64,
}

/// The horizontal spans covering a filled disc (midpoint circle).
///
/// Each step of the circle walk yields four spans, one per pair of
/// symmetric octants. Rows may repeat; spans on the same row overlap.
pub struct Disc {
    cx: i64,
    cy: i64,
    x: i64,
    y: i64,
    d: i64,
    // Spans of the current step not handed out yet.
    pending: [Span; 4],
    remaining: usize,
}

impl Disc {
    pub fn new(center: (i32, i32), radius: i32) -> Disc {
        let radius = i64::from(radius);
        Disc {
            cx: i64::from(center.0),
            cy: i64::from(center.1),
            x: 0,
            y: radius,
            d: 1 - radius,
            pending: [Span { y: 0, x0: 0, x1: 0 }; 4],
            remaining: 0,
        }
    }

    // Queue this step's spans and advance the decision variable.
    fn step(&mut self) -> bool {
        if self.x > self.y {
            return false;
        }

        let (cx, cy, x, y) = (self.cx, self.cy, self.x, self.y);
        self.pending = [
            Span { y: cy + y, x0: cx - x, x1: cx + x },
            Span { y: cy - y, x0: cx - x, x1: cx + x },
            Span { y: cy + x, x0: cx - y, x1: cx + y },
            Span { y: cy - x, x0: cx - y, x1: cx + y },
        ];
        self.remaining = self.pending.len();

        if self.d < 0 {
            self.d += 2 * x + 3;
        } else {
            self.d += 2 * (x - y) + 5;
            self.y -= 1;
        }
        self.x += 1;
        true
    }
}

impl Iterator for Disc {
    type Item = Span;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 && !self.step() {
            return None;
        }

        let span = self.pending[self.pending.len() - self.remaining];
        self.remaining -= 1;
        Some(span)
    }
}
