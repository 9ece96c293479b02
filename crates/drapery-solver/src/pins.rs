//! Pinning and the progressive release sequence.
//!
//! The pin table holds one entry per pinned column of the top edge. A
//! particle is held at its rest position while any entry whose x matches
//! its rest x (to one decimal place) is still pinned. Since only x is
//! compared, an entry anchors every particle of that column, and entries
//! sharing an x anchor the same particles.
//!
//! Release is a one-shot state machine:
//!
//! ```text
//! Idle ──trigger(now)──▶ Releasing { next: last pinned, due_at: now + interval }
//!                          │ tick(now ≥ due_at): unpin `next`
//!                          ▼
//!                        Releasing { next pinned below, due_at + interval } … ──▶ Done
//! ```

use std::collections::HashMap;

use drapery_math::quantize_tenths;
use drapery_types::{DraperyError, DraperyResult, ParticleId, PinId};
use serde::{Deserialize, Serialize};

use crate::cloth::Cloth;
use crate::particle::Particle;

/// Which top-edge columns start out pinned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLayout {
    /// Every column of the top edge.
    #[default]
    TopRow,
    /// The two top corners.
    Corners,
    /// Left corner, centre column (`w / 2`), right corner.
    Classic,
    /// Explicit column indices in `[0, w]`.
    Columns(Vec<usize>),
    /// Nothing pinned; the cloth falls freely.
    None,
}

impl PinLayout {
    /// Sorted, de-duplicated column indices for a cloth `segments_x` wide.
    pub fn columns(&self, segments_x: usize) -> DraperyResult<Vec<usize>> {
        let mut cols = match self {
            PinLayout::TopRow => (0..=segments_x).collect(),
            PinLayout::Corners => vec![0, segments_x],
            PinLayout::Classic => vec![0, segments_x / 2, segments_x],
            PinLayout::Columns(cols) => {
                if let Some(&bad) = cols.iter().find(|&&c| c > segments_x) {
                    return Err(DraperyError::InvalidConfig(format!(
                        "pin column {bad} is outside [0, {segments_x}]"
                    )));
                }
                cols.clone()
            }
            PinLayout::None => Vec::new(),
        };
        cols.sort_unstable();
        cols.dedup();
        Ok(cols)
    }
}

/// One entry of the pin table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinPoint {
    /// Rest x of the anchored column.
    pub x: f32,
    /// `x` rounded to one decimal, in tenths.
    pub key: i64,
    pub pinned: bool,
}

/// Pin entries ordered left to right along the top edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinTable {
    entries: Vec<PinPoint>,
}

impl PinTable {
    /// One pinned entry per selected top-edge column.
    pub fn from_cloth(cloth: &Cloth, layout: &PinLayout) -> DraperyResult<Self> {
        let top = cloth.top_row();
        let entries = layout
            .columns(cloth.segments_x())?
            .into_iter()
            .map(|col| {
                let x = top[col].rest_position().x;
                PinPoint {
                    x,
                    key: quantize_tenths(x),
                    pinned: true,
                }
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PinPoint] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_pinned(&self, id: PinId) -> bool {
        self.entries.get(id.index()).is_some_and(|e| e.pinned)
    }

    pub fn pinned_count(&self) -> usize {
        self.entries.iter().filter(|e| e.pinned).count()
    }

    /// Unpins `id`. Returns `false` if it was already free or out of range.
    /// There is no way back.
    pub fn unpin(&mut self, id: PinId) -> bool {
        match self.entries.get_mut(id.index()) {
            Some(entry) if entry.pinned => {
                entry.pinned = false;
                true
            }
            _ => false,
        }
    }

    /// Entry whose key equals `key`, if any.
    pub fn find(&self, key: i64) -> Option<PinId> {
        self.entries
            .iter()
            .position(|e| e.key == key)
            .map(|i| PinId(i as u32))
    }
}

/// Progress of the release sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ReleaseState {
    /// Waiting for the trigger.
    #[default]
    Idle,
    /// Entry `next` is released once simulated time reaches `due_at` (ms).
    Releasing { next: PinId, due_at: f64 },
    /// Every entry has been released.
    Done,
}

/// Enforces pins each frame and runs the release sequence.
#[derive(Debug, Clone)]
pub struct PinManager {
    table: PinTable,
    state: ReleaseState,
    interval_ms: f64,
    /// Pin entries matching each particle's rest x, resolved once.
    matches: Vec<Vec<PinId>>,
}

impl PinManager {
    pub fn new(cloth: &Cloth, layout: &PinLayout, interval_ms: f64) -> DraperyResult<Self> {
        if !(interval_ms.is_finite() && interval_ms >= 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "release interval must be finite and non-negative, got {interval_ms}"
            )));
        }
        let table = PinTable::from_cloth(cloth, layout)?;
        let mut by_key: HashMap<i64, Vec<PinId>> = HashMap::new();
        for (i, e) in table.entries().iter().enumerate() {
            by_key.entry(e.key).or_default().push(PinId(i as u32));
        }
        let matches = cloth
            .particles()
            .iter()
            .map(|p| {
                by_key
                    .get(&quantize_tenths(p.rest_position().x))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();

        Ok(Self {
            table,
            state: ReleaseState::Idle,
            interval_ms,
            matches,
        })
    }

    pub fn table(&self) -> &PinTable {
        &self.table
    }

    pub fn state(&self) -> ReleaseState {
        self.state
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Whether `id` is currently held at its rest position.
    pub fn is_particle_pinned(&self, id: ParticleId) -> bool {
        self.matches
            .get(id.index())
            .is_some_and(|pins| self.any_pinned(pins))
    }

    /// Starts the release sequence at simulated time `now_ms`.
    ///
    /// Only the first call has any effect; it returns `true`. Later calls,
    /// including ones made after the sequence finished, return `false`.
    pub fn trigger(&mut self, now_ms: f64) -> bool {
        if self.state != ReleaseState::Idle {
            tracing::debug!(state = ?self.state, "release already triggered; ignoring");
            return false;
        }
        self.state = match self.last_pinned() {
            Some(next) => ReleaseState::Releasing {
                next,
                due_at: now_ms + self.interval_ms,
            },
            None => ReleaseState::Done,
        };
        tracing::info!(
            now_ms,
            pinned = self.table.pinned_count(),
            interval_ms = self.interval_ms,
            "pin release triggered"
        );
        true
    }

    /// Releases every entry whose time has come by `now_ms`, last entry
    /// first. Returns the released entries in release order.
    pub fn tick(&mut self, now_ms: f64) -> Vec<PinId> {
        let mut released = Vec::new();
        while let ReleaseState::Releasing { next, due_at } = self.state {
            if now_ms < due_at {
                break;
            }
            if self.table.unpin(next) {
                tracing::debug!(pin = next.0, due_at, remaining = self.table.pinned_count(), "pin released");
                released.push(next);
            }
            self.state = match self.pinned_below(next.index()) {
                Some(following) => ReleaseState::Releasing {
                    next: following,
                    due_at: due_at + self.interval_ms,
                },
                None => {
                    tracing::info!(now_ms, "pin release sequence complete");
                    ReleaseState::Done
                }
            };
        }
        released
    }

    /// Clamps every particle matching a still-pinned entry to its rest
    /// position. Returns the number of particles clamped.
    pub fn enforce(&self, particles: &mut [Particle]) -> usize {
        let mut clamped = 0;
        for (p, pins) in particles.iter_mut().zip(&self.matches) {
            if self.any_pinned(pins) {
                p.pin_to_rest();
                clamped += 1;
            }
        }
        clamped
    }

    /// Overwrites pin flags and release progress, e.g. from a snapshot.
    pub fn restore(&mut self, pinned: &[bool], state: ReleaseState) -> DraperyResult<()> {
        if pinned.len() != self.table.len() {
            return Err(DraperyError::InvalidConfig(format!(
                "pin flag count ({}) != pin table length ({})",
                pinned.len(),
                self.table.len()
            )));
        }
        for (entry, &flag) in self.table.entries.iter_mut().zip(pinned) {
            entry.pinned = flag;
        }
        self.state = state;
        Ok(())
    }

    fn any_pinned(&self, pins: &[PinId]) -> bool {
        pins.iter().any(|&pin| self.table.is_pinned(pin))
    }

    /// Highest still-pinned entry.
    fn last_pinned(&self) -> Option<PinId> {
        self.pinned_below(self.table.len())
    }

    /// Highest still-pinned entry with index below `end`.
    fn pinned_below(&self, end: usize) -> Option<PinId> {
        self.table.entries[..end.min(self.table.len())]
            .iter()
            .rposition(|e| e.pinned)
            .map(|i| PinId(i as u32))
    }
}
