//! Full map generation: lanes → segments → rooms → closed gaps.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, MapConfig, MapGenConfig};
use crate::gaps::close_gaps;
use crate::geometry::{Path, Point, RoomKind, RoomRect, Segment};
use crate::lanes::{build_lanes, LaneKind, Waypoints};
use crate::rng::RandomSource;
use crate::rooms;
use crate::segments::decompose;

/// One fully processed lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    /// Centerline, all legs joined.
    pub path: Path,
    /// Indices into `path` where consecutive legs meet.
    pub joints: Vec<usize>,
    pub segments: Vec<Segment>,
    /// Rooms and corridors after gap closing.
    pub rooms: Vec<RoomRect>,
}

impl Lane {
    pub fn room_count(&self, kind: RoomKind) -> usize {
        self.rooms.iter().filter(|r| r.kind == kind).count()
    }
}

/// A generated map, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    pub config: MapConfig,
    pub bottom_spawn: Point,
    pub top_spawn: Point,
    /// Middle, left, right.
    pub lanes: Vec<Lane>,
}

impl MapLayout {
    pub fn lane(&self, kind: LaneKind) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.kind == kind)
    }

    pub fn total_rooms(&self) -> usize {
        self.lanes.iter().map(|l| l.rooms.len()).sum()
    }
}

/// Generate a whole map. Fails only on an invalid `map` or `config`.
pub fn generate_map<R: RandomSource + ?Sized>(
    map: &MapConfig,
    config: &MapGenConfig,
    rng: &mut R,
) -> Result<MapLayout, ConfigError> {
    map.validate()?;
    config.validate()?;

    let lanes = build_lanes(map, config, rng)?;
    let points = Waypoints::for_map(map);

    let mut out = Vec::with_capacity(LaneKind::ALL.len());
    for kind in LaneKind::ALL {
        let mut lane = process_lane(kind, lanes.lane_path(kind), map, config, rng);
        lane.joints = lanes.joints(kind);
        out.push(lane);
    }

    let layout = MapLayout {
        config: *map,
        bottom_spawn: points.bottom_spawn,
        top_spawn: points.top_spawn,
        lanes: out,
    };
    log::info!(
        "Generated {}×{} map: {} lanes, {} rooms, {} path points",
        map.width,
        map.height,
        layout.lanes.len(),
        layout.total_rooms(),
        layout.lanes.iter().map(|l| l.path.len()).sum::<usize>()
    );
    Ok(layout)
}

/// Segments, rooms and gap closing for a single centerline.
pub fn process_lane<R: RandomSource + ?Sized>(
    kind: LaneKind,
    path: Path,
    map: &MapConfig,
    config: &MapGenConfig,
    rng: &mut R,
) -> Lane {
    let segments = decompose(&path);
    let mut rooms = rooms::generate(&segments, map, &config.rooms, rng);
    let closed = close_gaps(&mut rooms, config.gaps.threshold);
    log::debug!(
        "{:?} lane: {} points, {} segments, {} rects, {} gaps closed",
        kind,
        path.len(),
        segments.len(),
        rooms.len(),
        closed
    );
    Lane {
        kind,
        path,
        joints: Vec::new(),
        segments,
        rooms,
    }
}
