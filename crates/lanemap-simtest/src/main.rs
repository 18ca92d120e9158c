//! Lanemap Headless Generation Harness
//!
//! Generates maps over a range of seeds and runs every layout check on
//! them. Runs entirely in-process; the only outputs are the optional SVG
//! and JSON files.
//!
//! Usage:
//!   cargo run -p lanemap-simtest
//!   cargo run -p lanemap-simtest -- --runs 200 --verbose
//!   cargo run -p lanemap-simtest -- --seed 7 --svg map.svg --json map.json

mod svg;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use lanemap_logic::config::{ConfigError, CrossBounds, MapConfig, MapGenConfig, WalkConfig};
use lanemap_logic::gaps::close_gaps;
use lanemap_logic::geometry::{Axis, Point};
use lanemap_logic::pipeline::{generate_map, MapLayout};
use lanemap_logic::render::{render_map, DrawCall, DrawRecorder};
use lanemap_logic::rng::RngSource;
use lanemap_logic::validation::{validate_layout, Severity};
use lanemap_logic::walker::walk;

use crate::svg::SvgRenderer;

#[derive(Parser, Debug)]
#[command(name = "lanemap-simtest")]
#[command(author, version, about = "Generate three-lane maps and check them", long_about = None)]
struct Args {
    /// First seed of the sweep
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Number of seeds to generate
    #[arg(short = 'n', long = "runs", default_value_t = 50)]
    runs: u64,

    /// Canvas width
    #[arg(long = "width", default_value_t = 1000.0)]
    width: f32,

    /// Canvas height
    #[arg(long = "height", default_value_t = 1000.0)]
    height: f32,

    /// Generation settings as JSON; missing fields keep their defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Write the map for the first seed as SVG
    #[arg(long = "svg")]
    svg: Option<PathBuf>,

    /// Write the map for the first seed as JSON
    #[arg(long = "json")]
    json: Option<PathBuf>,

    /// Print passing checks too
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
    println!("=== Lanemap Generation Harness ===\n");

    let map = MapConfig::new(args.width, args.height);
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MapGenConfig::default(),
    };

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&map, &config));

    // 2. Walker worked example
    results.extend(validate_walker(args.seed, args.runs));

    // 3. Seed sweep over the full pipeline
    results.extend(validate_seed_sweep(&map, &config, args));

    // ── Outputs ──
    if args.svg.is_some() || args.json.is_some() {
        let layout = generate_map(&map, &config, &mut RngSource::seeded(args.seed))?;
        if let Some(path) = &args.svg {
            write_svg(&layout, path)?;
            println!("Wrote {}", path.display());
        }
        if let Some(path) = &args.json {
            fs::write(path, serde_json::to_string_pretty(&layout)?)?;
            println!("Wrote {}", path.display());
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    Ok(failed == 0)
}

fn load_config(path: &Path) -> Result<MapGenConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let config: MapGenConfig = serde_json::from_str(&text)?;
    log::info!("Loaded generation config from {}", path.display());
    Ok(config)
}

fn write_svg(layout: &MapLayout, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut svg = SvgRenderer::new(layout.config.width, layout.config.height);
    render_map(layout, &mut svg);
    fs::write(path, svg.finish())?;
    Ok(())
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(map: &MapConfig, config: &MapGenConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let map_check = map.validate();
    results.push(TestResult {
        name: "canvas_valid".into(),
        passed: map_check.is_ok(),
        detail: match map_check {
            Ok(()) => format!("{}×{}", map.width, map.height),
            Err(e) => e.to_string(),
        },
    });

    let errors = config.errors();
    results.push(TestResult {
        name: "generation_config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "all settings in range".into()
        } else {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    // Invalid settings must be refused up front
    let zero_step = WalkConfig {
        step_size: 0.0,
        ..Default::default()
    };
    results.push(TestResult {
        name: "zero_step_rejected".into(),
        passed: matches!(zero_step.validate(), Err(ConfigError::InvalidStepSize(_))),
        detail: "step_size = 0".into(),
    });

    let inverted = WalkConfig {
        bounds: CrossBounds::new(900.0, 100.0),
        ..Default::default()
    };
    results.push(TestResult {
        name: "inverted_bounds_rejected".into(),
        passed: matches!(inverted.validate(), Err(ConfigError::InvertedBounds { .. })),
        detail: "bounds = [900, 100]".into(),
    });

    results
}

// ── 2. Walker ───────────────────────────────────────────────────────────

fn validate_walker(first_seed: u64, runs: u64) -> Vec<TestResult> {
    println!("--- Walker ---");
    let mut results = Vec::new();

    let config = WalkConfig {
        step_size: 100.0,
        max_side_moves: 2,
        bounds: CrossBounds::new(100.0, 900.0),
        main_bias: 0.3,
        side_bias: 0.7,
        allow_random_side_steps: true,
        primary_axis: Axis::Vertical,
        ..Default::default()
    };
    let start = Point::new(500.0, 1000.0);
    let end = Point::new(500.0, 200.0);

    let mut bad_ends = 0;
    let mut escapes = 0;
    let mut longest = 0;
    for seed in first_seed..first_seed.saturating_add(runs) {
        let path = match walk(start, end, &config, &mut RngSource::seeded(seed)) {
            Ok(p) => p,
            Err(e) => {
                results.push(TestResult {
                    name: "walk_config".into(),
                    passed: false,
                    detail: e.to_string(),
                });
                return results;
            }
        };
        if path.first() != Some(&start) || path.last() != Some(&end) {
            bad_ends += 1;
        }
        escapes += path
            .iter()
            .filter(|p| !config.bounds.contains(p.x))
            .count();
        longest = longest.max(path.len());
    }

    results.push(TestResult {
        name: "walk_endpoints_exact".into(),
        passed: bad_ends == 0,
        detail: format!("{} of {} walks off target", bad_ends, runs),
    });
    results.push(TestResult {
        name: "walk_within_bounds".into(),
        passed: escapes == 0,
        detail: format!("{} points outside [100, 900]", escapes),
    });
    results.push(TestResult {
        name: "walk_length_capped".into(),
        passed: longest <= config.max_steps + 1,
        detail: format!("longest path {} points", longest),
    });

    results
}

// ── 3. Seed sweep ───────────────────────────────────────────────────────

fn validate_seed_sweep(map: &MapConfig, config: &MapGenConfig, args: &Args) -> Vec<TestResult> {
    println!("--- Seed Sweep ({} seeds from {}) ---", args.runs, args.seed);
    let mut results = Vec::new();

    let mut generated = 0u64;
    let mut failures = 0u64;
    let mut warnings = 0usize;
    let mut not_idempotent = 0u64;
    let mut bad_order = 0u64;
    let mut rooms = 0usize;

    for seed in args.seed..args.seed.saturating_add(args.runs) {
        let layout = match generate_map(map, config, &mut RngSource::seeded(seed)) {
            Ok(l) => l,
            Err(e) => {
                results.push(TestResult {
                    name: "generate_map".into(),
                    passed: false,
                    detail: format!("seed {}: {}", seed, e),
                });
                return results;
            }
        };
        generated += 1;
        rooms += layout.total_rooms();

        let errors = validate_layout(&layout, config);
        let mut seed_failed = false;
        for e in &errors {
            match e.severity {
                Severity::Error => {
                    log::warn!("seed {}: [{}] {}", seed, e.category, e.message);
                    seed_failed = true;
                }
                Severity::Warning => {
                    log::debug!("seed {}: [{}] {}", seed, e.category, e.message);
                    warnings += 1;
                }
            }
        }
        if seed_failed {
            failures += 1;
        }

        for lane in &layout.lanes {
            let mut again = lane.rooms.clone();
            if close_gaps(&mut again, config.gaps.threshold) != 0 || again != lane.rooms {
                log::warn!("seed {}: {:?} lane gaps not stable", seed, lane.kind);
                not_idempotent += 1;
            }
        }

        if !draw_order_ok(&layout) {
            log::warn!("seed {}: unexpected draw order", seed);
            bad_order += 1;
        }

        if args.verbose {
            let counts: Vec<String> = layout
                .lanes
                .iter()
                .map(|l| format!("{:?}={}", l.kind, l.rooms.len()))
                .collect();
            println!("  seed {:>6}: {}", seed, counts.join(" "));
        }
    }

    results.push(TestResult {
        name: "layouts_valid".into(),
        passed: failures == 0,
        detail: format!(
            "{} of {} layouts with errors, {} warnings",
            failures, generated, warnings
        ),
    });
    results.push(TestResult {
        name: "gap_closing_stable".into(),
        passed: not_idempotent == 0,
        detail: format!("{} lanes changed on a second pass", not_idempotent),
    });
    results.push(TestResult {
        name: "render_order".into(),
        passed: bad_order == 0,
        detail: format!("{} layouts drawn out of order", bad_order),
    });
    results.push(TestResult {
        name: "rooms_generated".into(),
        passed: generated == 0 || rooms > 0,
        detail: format!(
            "{} rects over {} maps (avg {:.1})",
            rooms,
            generated,
            rooms as f32 / generated.max(1) as f32
        ),
    });

    results
}

/// Background, rooms, centerlines, two spawn markers.
fn draw_order_ok(layout: &MapLayout) -> bool {
    let mut rec = DrawRecorder::new();
    render_map(layout, &mut rec);
    let rooms_end = 1 + layout.total_rooms();
    let Some(spawns_start) = rec.calls.len().checked_sub(2) else {
        return false;
    };
    rec.calls.iter().enumerate().all(|(i, call)| {
        let is_line = matches!(call, DrawCall::Polyline { .. });
        is_line == (rooms_end..spawns_start).contains(&i)
    })
}
