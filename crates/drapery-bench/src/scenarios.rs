//! Benchmark scenarios: cloth config, frame count, and release timing.
//!
//! Canonical scenarios:
//! 1. **Curtain drop**: full top row pinned, released part-way through
//! 2. **Windy curtain**: three pinned columns, wind enabled
//! 3. **Corner sag**: only the top corners pinned
//! 4. **Free fall**: nothing pinned

use std::str::FromStr;

use drapery_solver::{ClothConfig, PinLayout};
use drapery_types::DraperyError;
use serde::{Deserialize, Serialize};

/// Default display frame length (ms).
pub const DEFAULT_FRAME_MS: f64 = 16.0;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    CurtainDrop,
    WindyCurtain,
    CornerSag,
    FreeFall,
    /// User-supplied config (e.g. loaded from TOML).
    Custom,
}

impl ScenarioKind {
    /// The canned scenarios (everything except `Custom`).
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::CurtainDrop,
            ScenarioKind::WindyCurtain,
            ScenarioKind::CornerSag,
            ScenarioKind::FreeFall,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::CurtainDrop => "curtain_drop",
            ScenarioKind::WindyCurtain => "windy_curtain",
            ScenarioKind::CornerSag => "corner_sag",
            ScenarioKind::FreeFall => "free_fall",
            ScenarioKind::Custom => "custom",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = DraperyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                DraperyError::InvalidConfig(format!(
                    "unknown scenario '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: ClothConfig,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Simulated time between frames (ms).
    pub frame_ms: f64,
    /// Frame at which the pin release is triggered, if any.
    pub release_at: Option<u32>,
    /// Rebuild the render mesh and its normals after every frame.
    /// Required for wind to act.
    pub track_mesh: bool,
}

impl Scenario {
    /// Default 25×12 curtain, released after one second.
    pub fn curtain_drop() -> Self {
        Self {
            kind: ScenarioKind::CurtainDrop,
            config: ClothConfig::default(),
            frames: 180,
            frame_ms: DEFAULT_FRAME_MS,
            release_at: Some(60),
            track_mesh: false,
        }
    }

    /// Curtain held at both corners and the centre, blowing in the wind.
    pub fn windy_curtain() -> Self {
        let mut config = ClothConfig::windy();
        config.pin_layout = PinLayout::Classic;
        Self {
            kind: ScenarioKind::WindyCurtain,
            config,
            frames: 240,
            frame_ms: DEFAULT_FRAME_MS,
            release_at: None,
            track_mesh: true,
        }
    }

    /// Curtain hanging from its two top corners.
    pub fn corner_sag() -> Self {
        let config = ClothConfig {
            pin_layout: PinLayout::Corners,
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::CornerSag,
            config,
            frames: 120,
            frame_ms: DEFAULT_FRAME_MS,
            release_at: None,
            track_mesh: false,
        }
    }

    /// Nothing pinned.
    pub fn free_fall() -> Self {
        let config = ClothConfig {
            pin_layout: PinLayout::None,
            ..Default::default()
        };
        Self {
            kind: ScenarioKind::FreeFall,
            config,
            frames: 60,
            frame_ms: DEFAULT_FRAME_MS,
            release_at: None,
            track_mesh: false,
        }
    }

    /// A scenario around a user-supplied config.
    pub fn custom(config: ClothConfig, frames: u32, release_at: Option<u32>) -> Self {
        let track_mesh = config.wind.enabled;
        Self {
            kind: ScenarioKind::Custom,
            config,
            frames,
            frame_ms: DEFAULT_FRAME_MS,
            release_at,
            track_mesh,
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::CurtainDrop => Self::curtain_drop(),
            ScenarioKind::WindyCurtain => Self::windy_curtain(),
            ScenarioKind::CornerSag => Self::corner_sag(),
            ScenarioKind::FreeFall => Self::free_fall(),
            ScenarioKind::Custom => Self::custom(ClothConfig::default(), 120, None),
        }
    }

    /// Shrinks the cloth to the preview grid, keeping everything else.
    pub fn with_preview_grid(mut self) -> Self {
        let preview = ClothConfig::preview();
        self.config.segments_x = preview.segments_x;
        self.config.segments_y = preview.segments_y;
        self
    }

    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }
}
