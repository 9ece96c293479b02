//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use drapery_bench::metrics::BenchmarkMetrics;
use drapery_bench::runner::BenchmarkRunner;
use drapery_bench::scenarios::{Scenario, ScenarioKind};
use drapery_debug::hooks::{InspectionHook, TelemetryHook};
use drapery_debug::snapshot::StateSnapshot;
use drapery_render::{JsonFrameExporter, Renderer};
use drapery_solver::{ClothConfig, ReleaseState};
use drapery_telemetry::{EventBus, JsonLinesSink, TracingSink};

use crate::Preset;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub struct SimulateArgs {
    pub config: Option<PathBuf>,
    pub preset: Preset,
    pub frames: u32,
    pub release_at: Option<u32>,
    pub output: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub events: Option<PathBuf>,
}

fn load_config(path: &Path) -> Result<ClothConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: ClothConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn preset_config(preset: Preset) -> ClothConfig {
    match preset {
        Preset::Default => ClothConfig::default(),
        Preset::Preview => ClothConfig::preview(),
        Preset::Windy => ClothConfig::windy(),
    }
}

/// Run a simulation and write the requested outputs.
pub fn simulate(args: SimulateArgs) -> CmdResult {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => preset_config(args.preset),
    };
    if let Some(at) = args.release_at {
        if at >= args.frames {
            return Err(format!("--release-at {at} is past the last frame ({})", args.frames).into());
        }
    }

    println!("Drapery Simulation");
    println!("──────────────────");
    println!(
        "Cloth:   {}×{} segments, pins: {:?}, wind: {}",
        config.segments_x,
        config.segments_y,
        config.pin_layout,
        if config.wind.enabled { "on" } else { "off" }
    );
    println!("Frames:  {}", args.frames);
    if let Some(at) = args.release_at {
        println!("Release: frame {at}");
    }
    println!();

    let scenario = Scenario::custom(config, args.frames, args.release_at);

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new()));
    if let Some(path) = &args.events {
        bus.add_sink(Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))));
    }
    let mut hook = TelemetryHook::new();

    let mut exporter = args.output.as_ref().map(JsonFrameExporter::new);
    let renderer = exporter.as_mut().map(|e| e as &mut dyn Renderer);

    let outcome = BenchmarkRunner::run_with(&scenario, Some(&mut hook as &mut dyn InspectionHook), renderer)?;

    for event in hook.drain_events() {
        bus.emit(event);
    }
    bus.finish();

    let m = &outcome.metrics;
    println!("  Wall time:     {:.3}s", m.total_wall_time);
    println!("  Avg step:      {:.3}ms", m.avg_step_time * 1000.0);
    println!("  Pins released: {}", m.pins_released);
    println!("  Final KE:      {:.6e}", m.final_kinetic_energy);
    println!("  Max displace:  {:.3}", m.max_displacement);

    if let Some(path) = &args.output {
        println!("Animation written to: {}", path.display());
    }
    if let Some(path) = &args.events {
        println!("Events written to: {}", path.display());
    }
    if let Some(path) = &args.snapshot {
        StateSnapshot::capture(&outcome.simulation).save(path)?;
        println!("Snapshot written to: {}", path.display());
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&Path>, preview: bool) -> CmdResult {
    println!("Drapery Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let kinds: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![scenario_name.parse()?]
    };

    let mut all_metrics = Vec::new();
    for kind in kinds {
        let mut scenario = Scenario::from_kind(kind);
        if preview {
            scenario = scenario.with_preview_grid();
        }

        println!(
            "Running: {} ({}×{} segments, {} frames)",
            kind.name(),
            scenario.config.segments_x,
            scenario.config.segments_y,
            scenario.frames,
        );

        let metrics = BenchmarkRunner::run(&scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.3}", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {}", path.display());
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &Path) -> CmdResult {
    println!("Drapery Snapshot Inspector");
    println!("──────────────────────────");
    println!();

    let snapshot = StateSnapshot::load(path)?;

    println!("Frame:        {}", snapshot.frame);
    match snapshot.last_time_ms {
        Some(t) => println!("Sim time:     {t:.1}ms"),
        None => println!("Sim time:     (not started)"),
    }
    println!(
        "Cloth:        {}×{} segments",
        snapshot.config.segments_x, snapshot.config.segments_y
    );
    println!("Particles:    {}", snapshot.particle_count());
    println!(
        "Pins:         {} of {} holding",
        snapshot.pinned.iter().filter(|p| **p).count(),
        snapshot.pinned.len()
    );
    let release = match snapshot.release {
        ReleaseState::Idle => "idle".to_string(),
        ReleaseState::Releasing { next, due_at } => {
            format!("releasing (next pin {}, due at {due_at:.1}ms)", next.0)
        }
        ReleaseState::Done => "done".to_string(),
    };
    println!("Release:      {release}");

    if !snapshot.positions.is_empty() {
        let (min_y, max_y) = snapshot
            .positions
            .iter()
            .map(|p| p[1])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        println!("Y range:      [{min_y:.3}, {max_y:.3}]");
    }

    Ok(())
}

/// Validate a config file.
pub fn validate(path: &Path) -> CmdResult {
    println!("Drapery Validator");
    println!("─────────────────");
    println!();

    if path.extension().and_then(|e| e.to_str()) != Some("toml") {
        return Err("unsupported file format, expected a .toml config".into());
    }
    println!("Validating config: {}", path.display());
    let config = load_config(path)?;
    let particles = (config.segments_x + 1) * (config.segments_y + 1);
    let pins = config.pin_layout.columns(config.segments_x)?.len();
    println!("✅ Config is valid ({particles} particles, {pins} pinned columns).");

    Ok(())
}
