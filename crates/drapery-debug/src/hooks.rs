//! Inspection hooks for live debugging.
//!
//! Hooks are called around every [`ClothSimulation::step`](drapery_solver::ClothSimulation::step)
//! by whatever drives the simulation loop (the bench runner, the CLI).

use drapery_solver::StepReport;
use drapery_telemetry::events::{EventKind, SimulationEvent};
use drapery_types::PinId;

/// Trait for simulation inspection hooks.
///
/// Hooks observe the simulation without modifying it.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_frame_begin(...)
///   [hook.on_release_triggered(...)]     once, when release starts
///   hook.on_energy(...)
///   hook.on_frame_end(...)               → on_pin_released per released pin
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    /// Called before the frame is stepped.
    fn on_frame_begin(&mut self, frame: u64, now_ms: f64) {
        let _ = (frame, now_ms);
    }

    /// Called when the pin release sequence is triggered.
    fn on_release_triggered(&mut self, frame: u64, now_ms: f64, pinned: usize) {
        let _ = (frame, now_ms, pinned);
    }

    /// Called once per pin entry released during a frame, in release order.
    fn on_pin_released(&mut self, frame: u64, pin: PinId, remaining: usize) {
        let _ = (frame, pin, remaining);
    }

    /// Called after each frame with the cloth's energy state.
    fn on_energy(&mut self, frame: u64, kinetic: f64, max_displacement: f32) {
        let _ = (frame, kinetic, max_displacement);
    }

    /// Called after the frame is stepped.
    ///
    /// The default forwards every released pin to [`on_pin_released`](Self::on_pin_released).
    fn on_frame_end(&mut self, report: &StepReport) {
        for_each_release(report, |pin, remaining| {
            self.on_pin_released(report.frame, pin, remaining)
        });
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Calls `f(pin, remaining_after_release)` for each pin released in `report`.
pub fn for_each_release(report: &StepReport, mut f: impl FnMut(PinId, usize)) {
    let mut remaining = report.pinned_remaining + report.released.len();
    for &pin in &report.released {
        remaining -= 1;
        f(pin, remaining);
    }
}

/// Hook that translates lifecycle calls into telemetry events.
///
/// Events are buffered; drain them into an
/// [`EventBus`](drapery_telemetry::EventBus) with [`drain_events`](Self::drain_events).
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, frame: u64, kind: EventKind) {
        self.events.push(SimulationEvent::new(frame, kind));
    }
}

impl Default for TelemetryHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionHook for TelemetryHook {
    fn on_frame_begin(&mut self, frame: u64, now_ms: f64) {
        self.push(frame, EventKind::FrameBegin { now_ms });
    }

    fn on_release_triggered(&mut self, frame: u64, now_ms: f64, pinned: usize) {
        self.push(frame, EventKind::ReleaseTriggered { now_ms, pinned });
    }

    fn on_pin_released(&mut self, frame: u64, pin: PinId, remaining: usize) {
        self.push(frame, EventKind::PinReleased { pin, remaining });
    }

    fn on_energy(&mut self, frame: u64, kinetic: f64, max_displacement: f32) {
        self.push(
            frame,
            EventKind::Energy {
                kinetic,
                max_displacement,
            },
        );
    }

    fn on_frame_end(&mut self, report: &StepReport) {
        if let Some(wind) = report.wind {
            self.push(
                report.frame,
                EventKind::Wind {
                    direction: wind.normalize_or_zero().to_array(),
                    strength: wind.length(),
                },
            );
        }

        let mut released = Vec::with_capacity(report.released.len());
        for_each_release(report, |pin, remaining| released.push((pin, remaining)));
        for (pin, remaining) in released {
            self.on_pin_released(report.frame, pin, remaining);
        }
        if !report.released.is_empty() && report.pinned_remaining == 0 {
            self.push(report.frame, EventKind::ReleaseComplete);
        }

        self.push(
            report.frame,
            EventKind::FrameEnd {
                wall_time: report.wall_time,
                clamped: report.clamped_particles,
                degenerate: report.degenerate_constraints,
            },
        );
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
