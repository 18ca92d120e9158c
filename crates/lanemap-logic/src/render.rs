//! Drawing contract for a generated map.
//!
//! The library never draws itself. A [`Renderer`] receives filled
//! rectangles and polylines in a fixed order, and [`DrawRecorder`] captures
//! that stream for tests or for serialising to another format.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, RoomKind};
use crate::pipeline::MapLayout;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BACKGROUND: Color = Color::rgb(0x30, 0x30, 0x30);
    pub const ROOM: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const CORRIDOR: Color = Color::rgb(0x5a, 0x5a, 0x5a);
    pub const CENTERLINE: Color = Color::rgb(0, 0, 0);
    pub const BOTTOM_SPAWN: Color = Color::rgb(0xff, 0, 0);
    pub const TOP_SPAWN: Color = Color::rgb(0, 0, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn for_room(kind: RoomKind) -> Self {
        match kind {
            RoomKind::Room => Self::ROOM,
            RoomKind::Corridor => Self::CORRIDOR,
        }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Drawing surface supplied by the caller.
pub trait Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_polyline(&mut self, points: &[Point], color: Color);
}

/// A single recorded primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCall {
    FillRect { rect: Rect, color: Color },
    Polyline { points: Vec<Point>, color: Color },
}

/// Renderer that keeps every call in order.
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    pub calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay the recorded stream into another renderer.
    pub fn replay(&self, target: &mut dyn Renderer) {
        for call in &self.calls {
            match call {
                DrawCall::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCall::Polyline { points, color } => target.draw_polyline(points, *color),
            }
        }
    }
}

impl Renderer for DrawRecorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn draw_polyline(&mut self, points: &[Point], color: Color) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            color,
        });
    }
}

/// Side of a spawn marker as a fraction of the shorter canvas side.
pub const SPAWN_MARKER_RATIO: f32 = 0.03;

/// Draw `layout`: background, rooms, centerlines, then spawn markers.
pub fn render_map<T: Renderer + ?Sized>(layout: &MapLayout, renderer: &mut T) {
    let map = layout.config;
    renderer.fill_rect(Rect::new(0.0, 0.0, map.width, map.height), Color::BACKGROUND);

    for lane in &layout.lanes {
        for room in &lane.rooms {
            renderer.fill_rect(room.rect(), Color::for_room(room.kind));
        }
    }
    for lane in &layout.lanes {
        if lane.path.len() >= 2 {
            renderer.draw_polyline(&lane.path, Color::CENTERLINE);
        }
    }

    let marker = map.min_side() * SPAWN_MARKER_RATIO;
    renderer.fill_rect(
        Rect::centered(layout.bottom_spawn, marker, marker),
        Color::BOTTOM_SPAWN,
    );
    renderer.fill_rect(
        Rect::centered(layout.top_spawn, marker, marker),
        Color::TOP_SPAWN,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapConfig, MapGenConfig};
    use crate::pipeline::generate_map;
    use crate::rng::RngSource;

    fn layout() -> MapLayout {
        generate_map(
            &MapConfig::square(1000.0),
            &MapGenConfig::default(),
            &mut RngSource::seeded(5),
        )
        .unwrap()
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::BACKGROUND.to_hex(), "#303030");
        assert_eq!(Color::CORRIDOR.to_hex(), "#5a5a5a");
        assert_eq!(Color::TOP_SPAWN.to_hex(), "#0000ff");
    }

    #[test]
    fn test_draw_order() {
        let layout = layout();
        let mut rec = DrawRecorder::new();
        render_map(&layout, &mut rec);

        let rooms = layout.total_rooms();
        assert_eq!(rec.calls.len(), 1 + rooms + 3 + 2);
        assert!(matches!(
            rec.calls[0],
            DrawCall::FillRect { color: Color::BACKGROUND, .. }
        ));
        for call in &rec.calls[1..=rooms] {
            match call {
                DrawCall::FillRect { color, .. } => {
                    assert!(*color == Color::ROOM || *color == Color::CORRIDOR)
                }
                other => panic!("expected room fill, got {other:?}"),
            }
        }
        for call in &rec.calls[rooms + 1..rooms + 4] {
            assert!(matches!(
                call,
                DrawCall::Polyline { color: Color::CENTERLINE, .. }
            ));
        }
        let n = rec.calls.len();
        assert!(matches!(
            rec.calls[n - 2],
            DrawCall::FillRect { color: Color::BOTTOM_SPAWN, .. }
        ));
        match &rec.calls[n - 1] {
            DrawCall::FillRect { rect, color } => {
                assert_eq!(*color, Color::TOP_SPAWN);
                assert!(rect.contains(layout.top_spawn));
            }
            other => panic!("expected spawn marker, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_matches() {
        let mut first = DrawRecorder::new();
        render_map(&layout(), &mut first);
        let mut second = DrawRecorder::new();
        first.replay(&mut second);
        assert_eq!(first.calls, second.calls);
    }
}
