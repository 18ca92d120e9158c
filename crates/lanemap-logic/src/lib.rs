//! Pure map-generation logic for lanemap.
//!
//! This crate builds the layout of a three-lane arena map: a middle lane and
//! two C-shaped side lanes joining two spawn points. Every function takes
//! plain data plus an injectable random source and returns plain data, so
//! the whole pipeline is unit-testable and independent of any renderer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Map size, per-lane tuning, room/gap options and validation |
//! | [`gaps`] | Closes small seams between adjacent rectangles of a lane |
//! | [`geometry`] | Points, directions, segments and rectangles |
//! | [`lanes`] | Spawn points, C-lane waypoints and per-leg walk windows |
//! | [`pipeline`] | Lanes → segments → rooms → gap closing, per lane |
//! | [`render`] | Renderer trait, draw order and a recording renderer |
//! | [`rng`] | Injectable uniform random source |
//! | [`rooms`] | One room or corridor rectangle per segment |
//! | [`segments`] | Merges a path into maximal straight segments |
//! | [`validation`] | Layout checks (axis alignment, bounds, dimensions) |
//! | [`walker`] | Biased, bounded random walk between two points |
//!
//! ```
//! use lanemap_logic::config::{MapConfig, MapGenConfig};
//! use lanemap_logic::pipeline::generate_map;
//! use lanemap_logic::rng::RngSource;
//!
//! let map = MapConfig::square(1000.0);
//! let mut rng = RngSource::seeded(7);
//! let layout = generate_map(&map, &MapGenConfig::default(), &mut rng).unwrap();
//! assert_eq!(layout.lanes.len(), 3);
//! ```

pub mod config;
pub mod gaps;
pub mod geometry;
pub mod lanes;
pub mod pipeline;
pub mod render;
pub mod rng;
pub mod rooms;
pub mod segments;
pub mod validation;
pub mod walker;
