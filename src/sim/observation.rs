use serde::{Deserialize, Serialize};

use crate::model::link_state::WAVELENGTHS;

/// What the decision maker sees each round: the full wavelength occupancy
/// matrix plus the pending request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// One row per edge; a cell holds the remaining holding time, 0 = free.
    pub links: Vec<[u32; WAVELENGTHS]>,
    /// [source_id, target_id, holding_time]
    pub req: [u32; 3],
}

/// Per-step diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub round: u32,
    pub blocks: u32,
    pub admitted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}
