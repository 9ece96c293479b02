//! # drapery-render
//!
//! Pluggable rendering abstraction for Drapery.
//!
//! Provides a `Renderer` trait with a `HeadlessRenderer` for benchmarks
//! and CI, and a `JsonFrameExporter` that writes the whole animation to
//! a JSON file for offline viewing.

pub mod json_exporter;
pub mod renderer;

pub use json_exporter::JsonFrameExporter;
pub use renderer::{HeadlessRenderer, RenderFrame, Renderer};
