//! Integration tests for drapery-telemetry.

use drapery_telemetry::bus::EventBus;
use drapery_telemetry::events::{EventKind, SimulationEvent};
use drapery_telemetry::sinks::{EventSink, JsonLinesSink, VecSink};
use drapery_types::PinId;

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SimulationEvent::new(0, EventKind::FrameBegin { now_ms: 16.0 }));
    bus.emit_kind(
        0,
        EventKind::FrameEnd {
            wall_time: 0.001,
            clamped: 4,
            degenerate: 0,
        },
    );
    assert!(log.lock().unwrap().is_empty(), "nothing delivered before flush");

    assert_eq!(bus.flush(), 2);
    let events = log.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].label(), "frame_begin");
    assert_eq!(events[1].label(), "frame_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit_kind(0, EventKind::ReleaseComplete);
    assert_eq!(bus.flush(), 0);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let a = VecSink::new();
    let b = VecSink::new();
    let (log_a, log_b) = (a.log(), b.log());
    bus.add_sink(Box::new(a));
    bus.add_sink(Box::new(b));
    assert_eq!(bus.sink_count(), 2);

    for pin in (0..3).rev() {
        bus.emit_kind(
            7,
            EventKind::PinReleased {
                pin: PinId(pin),
                remaining: pin as usize,
            },
        );
    }
    bus.flush();

    assert_eq!(*log_a.lock().unwrap(), *log_b.lock().unwrap());
    let order: Vec<u32> = log_a
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::PinReleased { pin, .. } => Some(pin.0),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec![2, 1, 0]);
}

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::Energy {
            kinetic: 1.0,
            max_displacement: 2.5,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn custom_event_uses_its_label() {
    let event = SimulationEvent::new(
        1,
        EventKind::Custom {
            label: "checkpoint".into(),
            payload: "{}".into(),
        },
    );
    assert_eq!(event.label(), "checkpoint");
}

#[test]
fn json_lines_sink_writes_one_line_per_event() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.handle(&SimulationEvent::new(
        0,
        EventKind::ReleaseTriggered {
            now_ms: 80.0,
            pinned: 26,
        },
    ));
    sink.handle(&SimulationEvent::new(3, EventKind::ReleaseComplete));
    sink.finalize();
    assert_eq!(sink.written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ReleaseTriggered"));
    let last: SimulationEvent = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(last.frame, 3);
}

#[test]
fn finish_flushes_pending_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));
    bus.emit_kind(9, EventKind::ReleaseComplete);
    bus.finish();
    assert_eq!(log.lock().unwrap().len(), 1);
}
