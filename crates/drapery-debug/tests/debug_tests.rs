//! Integration tests for drapery-debug.

use drapery_debug::hooks::{InspectionHook, TelemetryHook};
use drapery_debug::snapshot::StateSnapshot;
use drapery_math::Vec3;
use drapery_solver::{ClothConfig, ClothSimulation, PinLayout, ReleaseState, StepReport};
use drapery_telemetry::events::EventKind;
use drapery_types::{DraperyError, PinId};

fn report(frame: u64, released: Vec<PinId>, pinned_remaining: usize) -> StepReport {
    StepReport {
        frame,
        released,
        pinned_remaining,
        clamped_particles: 0,
        degenerate_constraints: 0,
        wind: None,
        wall_time: 0.001,
    }
}

fn run(sim: &mut ClothSimulation, from_ms: f64, frames: usize) -> f64 {
    let mut now = from_ms;
    for _ in 0..frames {
        now += 16.0;
        sim.step(now, None).unwrap();
    }
    now
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_events() {
    let mut hook = TelemetryHook::new();
    hook.on_frame_begin(0, 16.0);
    hook.on_frame_end(&report(0, vec![], 3));

    let events = hook.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::FrameBegin { now_ms: 16.0 });
    assert_eq!(events[1].label(), "frame_end");
}

#[test]
fn hook_reports_releases_with_remaining_counts() {
    let mut hook = TelemetryHook::new();
    hook.on_release_triggered(4, 64.0, 3);
    hook.on_frame_end(&report(5, vec![PinId(2), PinId(1)], 1));
    hook.on_frame_end(&report(6, vec![PinId(0)], 0));

    let kinds: Vec<EventKind> = hook.drain_events().into_iter().map(|e| e.kind).collect();
    let released: Vec<(u32, usize)> = kinds
        .iter()
        .filter_map(|k| match k {
            EventKind::PinReleased { pin, remaining } => Some((pin.0, *remaining)),
            _ => None,
        })
        .collect();
    assert_eq!(released, vec![(2, 2), (1, 1), (0, 0)]);
    assert!(kinds.contains(&EventKind::ReleaseComplete));
    assert!(matches!(kinds[0], EventKind::ReleaseTriggered { pinned: 3, .. }));
}

#[test]
fn hook_reports_wind() {
    let mut hook = TelemetryHook::new();
    let mut r = report(0, vec![], 0);
    r.wind = Some(Vec3::new(0.0, 60.0, 0.0));
    hook.on_frame_end(&r);
    let events = hook.drain_events();
    match &events[0].kind {
        EventKind::Wind { direction, strength } => {
            assert_eq!(*direction, [0.0, 1.0, 0.0]);
            assert!((strength - 60.0).abs() < 1e-4);
        }
        other => panic!("expected wind event, got {other:?}"),
    }
}

#[test]
fn hook_reports_energy() {
    let mut hook = TelemetryHook::new();
    hook.on_energy(3, 0.5, 12.0);
    let events = hook.drain_events();
    assert_eq!(events[0].frame, 3);
    assert_eq!(
        events[0].kind,
        EventKind::Energy {
            kinetic: 0.5,
            max_displacement: 12.0
        }
    );
}

#[test]
fn hook_drain_clears() {
    let mut hook = TelemetryHook::new();
    hook.on_frame_begin(0, 0.0);
    let _ = hook.drain_events();
    assert!(hook.drain_events().is_empty());
}

#[test]
fn hook_name() {
    assert_eq!(TelemetryHook::new().name(), "telemetry_hook");
}

#[test]
fn default_frame_end_forwards_releases() {
    struct Counter(Vec<u32>);
    impl InspectionHook for Counter {
        fn on_pin_released(&mut self, _frame: u64, pin: PinId, _remaining: usize) {
            self.0.push(pin.0);
        }
        fn name(&self) -> &str {
            "counter"
        }
    }

    let mut hook = Counter(Vec::new());
    hook.on_frame_end(&report(1, vec![PinId(4), PinId(3)], 3));
    assert_eq!(hook.0, vec![4, 3]);
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_round_trip_through_bytes() {
    let mut sim = ClothSimulation::new(ClothConfig::preview()).unwrap();
    let now = run(&mut sim, 0.0, 3);
    sim.begin_release(now);
    run(&mut sim, now, 2);

    let snap = StateSnapshot::capture(&sim);
    let recovered = StateSnapshot::from_bytes(&snap.to_bytes().unwrap()).unwrap();

    assert_eq!(recovered, snap);
    assert_eq!(recovered.frame, 5);
    assert_eq!(recovered.particle_count(), 66);
    assert!(matches!(recovered.release, ReleaseState::Releasing { .. }));
    assert!(recovered.pinned.iter().any(|p| !p));
}

#[test]
fn restored_simulation_continues_identically() {
    let mut config = ClothConfig::preview();
    config.pin_layout = PinLayout::Classic;
    let mut original = ClothSimulation::new(config).unwrap();
    let now = run(&mut original, 0.0, 10);
    original.begin_release(now);
    let now = run(&mut original, now, 1);

    let snap = StateSnapshot::capture(&original);
    let mut resumed = snap.into_simulation().unwrap();
    assert_eq!(resumed.frame(), original.frame());
    assert_eq!(resumed.pins().state(), original.pins().state());

    run(&mut original, now, 15);
    run(&mut resumed, now, 15);
    assert_eq!(original.positions(), resumed.positions());
    assert_eq!(original.pins().table(), resumed.pins().table());
}

#[test]
fn restore_rejects_mismatched_cloth() {
    let snap = StateSnapshot::capture(&ClothSimulation::new(ClothConfig::preview()).unwrap());
    let mut other = ClothSimulation::new(ClothConfig::default()).unwrap();
    assert!(matches!(
        snap.restore(&mut other),
        Err(DraperyError::SnapshotMismatch { .. })
    ));
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(matches!(
        StateSnapshot::from_bytes(&[1, 2, 3]),
        Err(DraperyError::Serialization(_))
    ));
}

#[test]
fn unknown_version_is_rejected() {
    let mut snap = StateSnapshot::capture(&ClothSimulation::new(ClothConfig::preview()).unwrap());
    snap.version = 99;
    let bytes = snap.to_bytes().unwrap();
    assert!(StateSnapshot::from_bytes(&bytes).is_err());
}

#[test]
fn snapshot_save_and_load() {
    let sim = ClothSimulation::new(ClothConfig::preview()).unwrap();
    let snap = StateSnapshot::capture(&sim);
    let path = std::env::temp_dir().join(format!("drapery_snapshot_{}.bin", std::process::id()));
    snap.save(&path).unwrap();
    let loaded = StateSnapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, snap);
}
