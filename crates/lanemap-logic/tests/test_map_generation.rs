//! Integration tests for the full map generation pipeline.
//!
//! Exercises: WalkConfig → walk → decompose → rooms → close_gaps, and the
//! three-lane layout built on top of them.
//!
//! All tests are pure logic: no renderer, no I/O.

use lanemap_logic::config::{CrossBounds, MapConfig, MapGenConfig, RoomConfig, WalkConfig};
use lanemap_logic::gaps::close_gaps;
use lanemap_logic::geometry::{Axis, Direction, Orientation, Point, RoomKind};
use lanemap_logic::lanes::LaneKind;
use lanemap_logic::pipeline::generate_map;
use lanemap_logic::render::{render_map, DrawCall, DrawRecorder};
use lanemap_logic::rng::RngSource;
use lanemap_logic::rooms;
use lanemap_logic::segments::decompose;
use lanemap_logic::validation::{count_errors, validate_layout};
use lanemap_logic::walker::walk;
use proptest::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

fn example_walk_config() -> WalkConfig {
    WalkConfig {
        step_size: 100.0,
        max_side_moves: 2,
        bounds: CrossBounds::new(100.0, 900.0),
        main_bias: 0.3,
        side_bias: 0.7,
        allow_random_side_steps: true,
        primary_axis: Axis::Vertical,
        ..Default::default()
    }
}

fn step_dirs(path: &[Point]) -> Vec<Option<Direction>> {
    path.windows(2)
        .map(|w| Direction::between(w[0], w[1]))
        .collect()
}

// ── Worked examples ────────────────────────────────────────────────────

#[test]
fn example_walk_starts_and_ends_exactly() {
    let start = Point::new(500.0, 1000.0);
    let end = Point::new(500.0, 200.0);
    for seed in [0, 1, 42, 1234, u64::MAX] {
        let path = walk(start, end, &example_walk_config(), &mut RngSource::seeded(seed)).unwrap();
        assert_eq!(path[0], start);
        assert_eq!(*path.last().unwrap(), end);
        assert!(path.iter().all(|p| (100.0..=900.0).contains(&p.x)));
    }
}

#[test]
fn example_decompose_single_horizontal() {
    let path = vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(200.0, 0.0),
    ];
    let segs = decompose(&path);
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].start, Point::new(0.0, 0.0));
    assert_eq!(segs[0].end, Point::new(200.0, 0.0));
    assert_eq!(segs[0].orientation, Orientation::Horizontal);
}

// ── Pipeline coherence ─────────────────────────────────────────────────

#[test]
fn walk_to_rooms_chain() {
    let path = walk(
        Point::new(500.0, 1000.0),
        Point::new(500.0, 200.0),
        &example_walk_config(),
        &mut RngSource::seeded(9),
    )
    .unwrap();
    let segs = decompose(&path);
    let mut rects = rooms::generate(
        &segs,
        &MapConfig::square(1000.0),
        &RoomConfig::default(),
        &mut RngSource::seeded(9),
    );
    assert_eq!(rects.len(), segs.len());
    close_gaps(&mut rects, 20.0);
    assert!(rects.iter().all(|r| r.width > 0.0 && r.height > 0.0));
}

#[test]
fn same_seed_same_layout() {
    let map = MapConfig::new(1280.0, 720.0);
    let cfg = MapGenConfig::default();
    let a = generate_map(&map, &cfg, &mut RngSource::seeded(2024)).unwrap();
    let b = generate_map(&map, &cfg, &mut RngSource::seeded(2024)).unwrap();
    assert_eq!(a, b);
    let c = generate_map(&map, &cfg, &mut RngSource::seeded(2025)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn side_lanes_stay_on_their_half() {
    let map = MapConfig::square(1000.0);
    for seed in 0..30 {
        let layout = generate_map(&map, &MapGenConfig::default(), &mut RngSource::seeded(seed)).unwrap();
        let left = layout.lane(LaneKind::Left).unwrap();
        let right = layout.lane(LaneKind::Right).unwrap();
        assert!(left.path.iter().all(|p| p.x <= 500.0 + 1e-3), "seed {seed}");
        assert!(right.path.iter().all(|p| p.x >= 500.0 - 1e-3), "seed {seed}");
    }
}

#[test]
fn layouts_validate_across_canvas_shapes() {
    let cfg = MapGenConfig::default();
    for map in [
        MapConfig::square(600.0),
        MapConfig::new(1920.0, 1080.0),
        MapConfig::new(800.0, 1400.0),
    ] {
        for seed in 0..10 {
            let layout = generate_map(&map, &cfg, &mut RngSource::seeded(seed)).unwrap();
            let errors = validate_layout(&layout, &cfg);
            assert_eq!(count_errors(&errors), 0, "{map:?} seed {seed}: {errors:?}");
        }
    }
}

#[test]
fn every_lane_has_rooms_and_corridors_over_many_seeds() {
    let map = MapConfig::square(1000.0);
    let (mut rooms_seen, mut corridors_seen) = (0, 0);
    for seed in 0..10 {
        let layout = generate_map(&map, &MapGenConfig::default(), &mut RngSource::seeded(seed)).unwrap();
        for lane in &layout.lanes {
            rooms_seen += lane.room_count(RoomKind::Room);
            corridors_seen += lane.room_count(RoomKind::Corridor);
        }
    }
    assert!(rooms_seen > 0);
    assert!(corridors_seen > 0);
}

#[test]
fn render_draws_paths_after_rects() {
    let layout = generate_map(
        &MapConfig::square(1000.0),
        &MapGenConfig::default(),
        &mut RngSource::seeded(1),
    )
    .unwrap();
    let mut rec = DrawRecorder::new();
    render_map(&layout, &mut rec);
    let rooms_end = 1 + layout.total_rooms();
    let spawns_start = rec.calls.len() - 2;
    for (i, call) in rec.calls.iter().enumerate() {
        let is_line = matches!(call, DrawCall::Polyline { .. });
        assert_eq!(is_line, (rooms_end..spawns_start).contains(&i), "call {i}");
    }
}

#[test]
fn layout_round_trips_through_json() {
    let layout = generate_map(
        &MapConfig::square(500.0),
        &MapGenConfig::default(),
        &mut RngSource::seeded(3),
    )
    .unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    let back: lanemap_logic::pipeline::MapLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(back.lanes.len(), 3);
    assert_eq!(back.total_rooms(), layout.total_rooms());
}

// ── Properties ─────────────────────────────────────────────────────────

fn walk_case() -> impl Strategy<Value = (WalkConfig, Point, Point, u64)> {
    (
        10.0f32..150.0,
        (0u32..4, any::<bool>()),
        0.0f32..1.0,
        0.0f32..1.0,
        any::<bool>(),
        prop_oneof![Just(Axis::Vertical), Just(Axis::Horizontal)],
        (100.0f32..900.0, 0.0f32..1000.0),
        (100.0f32..900.0, 0.0f32..1000.0),
        any::<u64>(),
    )
        .prop_map(|(step, (side, rand_cap), mb, sb, rand_side, axis, a, b, seed)| {
            let config = WalkConfig {
                step_size: step,
                max_side_moves: side,
                randomize_max_side_moves: rand_cap,
                bounds: CrossBounds::new(100.0, 900.0),
                main_bias: mb,
                side_bias: sb,
                allow_random_side_steps: rand_side,
                primary_axis: axis,
                max_steps: 1000,
            };
            // a.0 / b.0 always land on the cross axis
            let (start, end) = match axis {
                Axis::Vertical => (Point::new(a.0, a.1), Point::new(b.0, b.1)),
                Axis::Horizontal => (Point::new(a.1, a.0), Point::new(b.1, b.0)),
            };
            (config, start, end, seed)
        })
}

proptest! {
    #[test]
    fn walk_ends_exactly_within_budget((cfg, start, end, seed) in walk_case()) {
        let path = walk(start, end, &cfg, &mut RngSource::seeded(seed)).unwrap();
        prop_assert_eq!(path[0], start);
        prop_assert_eq!(*path.last().unwrap(), end);
        prop_assert!(path.len() <= cfg.max_steps + 1);
    }

    #[test]
    fn walk_is_axis_aligned((cfg, start, end, seed) in walk_case()) {
        let path = walk(start, end, &cfg, &mut RngSource::seeded(seed)).unwrap();
        prop_assert!(step_dirs(&path).iter().all(Option::is_some));
    }

    #[test]
    fn walk_respects_cross_bounds((cfg, start, end, seed) in walk_case()) {
        let path = walk(start, end, &cfg, &mut RngSource::seeded(seed)).unwrap();
        let cross = cfg.cross_axis();
        for p in &path[1..] {
            prop_assert!(cfg.bounds.contains(p.along(cross)), "{:?} escaped", p);
        }
    }

    #[test]
    fn walk_never_reverses((cfg, start, end, seed) in walk_case()) {
        let path = walk(start, end, &cfg, &mut RngSource::seeded(seed)).unwrap();
        let dirs: Vec<Direction> = step_dirs(&path).into_iter().flatten().collect();
        for pair in dirs.windows(2) {
            prop_assert_ne!(pair[1], pair[0].opposite());
        }
    }

    #[test]
    fn walk_caps_side_runs((cfg, start, end, seed) in walk_case()) {
        let path = walk(start, end, &cfg, &mut RngSource::seeded(seed)).unwrap();
        let main = cfg.primary_axis;
        let mut run = 0u32;
        for (i, w) in path.windows(2).enumerate() {
            let dir = Direction::between(w[0], w[1]).unwrap();
            if dir.axis() == main {
                run = 0;
                continue;
            }
            // past the cap only once the main axis is already aligned
            if run >= cfg.max_side_moves {
                prop_assert_eq!(w[0].along(main), end.along(main), "step {}", i);
            }
            run += 1;
        }
    }

    #[test]
    fn decompose_reconstructs_endpoints(
        raw in prop::collection::vec((0i32..20, 0i32..20), 2..40)
    ) {
        // axis-aligned staircase built from integer moves
        let mut path = vec![Point::new(0.0, 0.0)];
        for (i, (dx, dy)) in raw.into_iter().enumerate() {
            let last = *path.last().unwrap();
            let next = if i % 2 == 0 {
                Point::new(last.x + dx as f32, last.y)
            } else {
                Point::new(last.x, last.y + dy as f32)
            };
            path.push(next);
        }
        let segs = decompose(&path);
        prop_assert!(segs.len() <= path.len() - 1);
        if path.windows(2).any(|w| w[0] != w[1]) {
            prop_assert_eq!(segs[0].start, path[0]);
            prop_assert_eq!(segs.last().unwrap().end, *path.last().unwrap());
            for pair in segs.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
        } else {
            prop_assert!(segs.is_empty());
        }
    }

    #[test]
    fn rooms_have_positive_size(seed in any::<u64>(), width in 200.0f32..3000.0) {
        let map = MapConfig::new(width, width * 0.75);
        let path = walk(
            Point::new(width / 2.0, width * 0.7),
            Point::new(width / 2.0, width * 0.05),
            &WalkConfig {
                step_size: width * 0.08,
                bounds: CrossBounds::new(0.0, width),
                ..Default::default()
            },
            &mut RngSource::seeded(seed),
        )
        .unwrap();
        let rects = rooms::generate(&decompose(&path), &map, &RoomConfig::default(), &mut RngSource::seeded(seed));
        prop_assert!(rects.iter().all(|r| r.width > 0.0 && r.height > 0.0));
    }

    #[test]
    fn close_gaps_is_idempotent(seed in any::<u64>(), threshold in 0.0f32..60.0) {
        let layout = generate_map(
            &MapConfig::square(1000.0),
            &MapGenConfig::default(),
            &mut RngSource::seeded(seed),
        )
        .unwrap();
        for lane in layout.lanes {
            let mut rects = lane.rooms.clone();
            close_gaps(&mut rects, threshold);
            let once = rects.clone();
            prop_assert_eq!(close_gaps(&mut rects, threshold), 0);
            prop_assert_eq!(rects, once);
        }
    }
}
