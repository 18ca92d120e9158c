//! Geometric primitives shared by every stage of the pipeline.
//!
//! Coordinates are screen-space: x grows to the right, y grows downward,
//! so [`Direction::Up`] decreases y.

use serde::{Deserialize, Serialize};

/// A position on the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Coordinate along `axis` (x for horizontal, y for vertical).
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy of this point with the coordinate along `axis` replaced.
    pub fn with_along(&self, axis: Axis, value: f32) -> Point {
        match axis {
            Axis::Horizontal => Point::new(value, self.y),
            Axis::Vertical => Point::new(self.x, value),
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

/// An ordered centerline; first point is the walk start, last is its end.
pub type Path = Vec<Point>;

/// A travel axis. A lane leg's primary axis is its "main" axis; the
/// perpendicular one is its "side" axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn perpendicular(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The two directions travelling along this axis.
    pub fn directions(&self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }
}

/// A single compass step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit offset of one step.
    pub fn delta(&self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Sign of movement along [`Direction::axis`].
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Up | Direction::Left => -1.0,
            Direction::Down | Direction::Right => 1.0,
        }
    }

    /// Direction along `axis` that moves a coordinate from `from` toward `to`.
    /// `None` when the two are already equal.
    pub fn toward(axis: Axis, from: f32, to: f32) -> Option<Direction> {
        if to == from {
            return None;
        }
        let [negative, positive] = axis.directions();
        Some(if to < from { negative } else { positive })
    }

    /// Classify the step from `a` to `b`, if it is a pure single-axis move.
    pub fn between(a: Point, b: Point) -> Option<Direction> {
        match (a.x == b.x, a.y == b.y) {
            (true, false) => Direction::toward(Axis::Vertical, a.y, b.y),
            (false, true) => Direction::toward(Axis::Horizontal, a.x, b.x),
            _ => None,
        }
    }
}

/// Orientation of a merged run of path steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
    Diagonal,
}

impl Orientation {
    /// Classify a pair of points. Equal y wins over equal x, so a
    /// zero-length pair reads as horizontal.
    pub fn of(a: Point, b: Point) -> Orientation {
        if a.y == b.y {
            Orientation::Horizontal
        } else if a.x == b.x {
            Orientation::Vertical
        } else {
            Orientation::Diagonal
        }
    }

    /// The travel axis, if the orientation is axis-aligned.
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Orientation::Horizontal => Some(Axis::Horizontal),
            Orientation::Vertical => Some(Axis::Vertical),
            Orientation::Diagonal => None,
        }
    }
}

/// A maximal straight run of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub orientation: Orientation,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Size class of a placed rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Room,
    Corridor,
}

/// A room or corridor placed along a lane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: RoomKind,
}

impl RoomRect {
    pub fn from_rect(rect: Rect, kind: RoomKind) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.rect().right()
    }

    pub fn bottom(&self) -> f32 {
        self.rect().bottom()
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Leading edge along `axis` (x or y).
    pub fn start_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Extent along `axis` (width or height).
    pub fn extent_on(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    pub fn end_on(&self, axis: Axis) -> f32 {
        self.start_on(axis) + self.extent_on(axis)
    }

    pub(crate) fn set_span(&mut self, axis: Axis, start: f32, extent: f32) {
        match axis {
            Axis::Horizontal => {
                self.x = start;
                self.width = extent;
            }
            Axis::Vertical => {
                self.y = start;
                self.height = extent;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_round_trip() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().axis(), d.axis());
        }
    }

    #[test]
    fn test_up_decreases_y() {
        assert_eq!(Direction::Up.delta(), (0.0, -1.0));
        assert_eq!(Direction::Up.sign(), -1.0);
    }

    #[test]
    fn test_toward() {
        assert_eq!(
            Direction::toward(Axis::Vertical, 1000.0, 200.0),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::toward(Axis::Horizontal, 10.0, 40.0),
            Some(Direction::Right)
        );
        assert_eq!(Direction::toward(Axis::Horizontal, 5.0, 5.0), None);
    }

    #[test]
    fn test_between_rejects_diagonal() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(Direction::between(a, Point::new(0.0, 10.0)), Some(Direction::Down));
        assert_eq!(Direction::between(a, Point::new(-3.0, 0.0)), Some(Direction::Left));
        assert_eq!(Direction::between(a, Point::new(3.0, 3.0)), None);
        assert_eq!(Direction::between(a, a), None);
    }

    #[test]
    fn test_orientation_classification() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(Orientation::of(a, Point::new(5.0, 0.0)), Orientation::Horizontal);
        assert_eq!(Orientation::of(a, Point::new(0.0, 5.0)), Orientation::Vertical);
        assert_eq!(Orientation::of(a, Point::new(5.0, 5.0)), Orientation::Diagonal);
    }

    #[test]
    fn test_segment_length_and_midpoint() {
        let s = Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 200.0),
            orientation: Orientation::Vertical,
        };
        assert_eq!(s.length(), 200.0);
        assert_eq!(s.midpoint(), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_rect_centered() {
        let r = Rect::centered(Point::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.bottom(), 55.0);
        assert!(r.contains(Point::new(50.0, 50.0)));
        assert!(!r.contains(Point::new(61.0, 50.0)));
    }

    #[test]
    fn test_room_rect_spans() {
        let mut r = RoomRect::from_rect(Rect::new(10.0, 20.0, 30.0, 40.0), RoomKind::Room);
        assert_eq!(r.end_on(Axis::Horizontal), 40.0);
        assert_eq!(r.end_on(Axis::Vertical), 60.0);
        r.set_span(Axis::Vertical, 15.0, 50.0);
        assert_eq!(r.rect(), Rect::new(10.0, 15.0, 30.0, 50.0));
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 65.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));
    }
}
