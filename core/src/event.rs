//! Step events: what the engine reports to the host after each step.
//!
//! Events are descriptive only. A `Contact` does not end the run; capture
//! policy belongs to whoever drives the engine.

use crate::types::{Position, RunId, Tick};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id: RunId,
        seed:   u64,
    },
    StepStarted {
        tick: Tick,
    },
    StepCompleted {
        tick: Tick,
    },

    // ── Movement events ────────────────────────────
    ZombiesMoved {
        tick:  Tick,
        moved: usize,
        total: usize,
    },
    HumansMoved {
        tick:  Tick,
        moved: usize,
        total: usize,
    },

    // ── Contact ────────────────────────────────────
    Contact {
        tick:     Tick,
        position: Position,
        humans:   usize,
        zombies:  usize,
    },
}

impl SimEvent {
    /// Stable string name, used for the event_type field of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. } => "run_initialized",
            Self::StepStarted { .. }    => "step_started",
            Self::StepCompleted { .. }  => "step_completed",
            Self::ZombiesMoved { .. }   => "zombies_moved",
            Self::HumansMoved { .. }    => "humans_moved",
            Self::Contact { .. }        => "contact",
        }
    }
}

/// One entry of the in-memory event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub run_id:     RunId,
    pub tick:       Tick,
    pub event_type: String,
    pub payload:    String, // JSON-serialized SimEvent
}
