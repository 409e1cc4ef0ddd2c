use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::sim::env::SimParams;

/// Parameters for the generated ring-plus-chords topology the runner and
/// bench simulate on. Loading arbitrary topology file formats is out of
/// scope here; callers with a real network build a `Topology` directly.
#[derive(Debug, Clone)]
pub struct TopologyGenConfig {
    pub nodes: usize,
    pub chord_probability: f64,
    pub seed: u64,
}

impl Default for TopologyGenConfig {
    fn default() -> Self {
        Self {
            nodes: 14,
            chord_probability: 0.15,
            seed: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub episodes: usize,
    pub policy: String,
    pub seed: Option<u64>,
    pub params: SimParams,
    pub topology: TopologyGenConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            policy: "first-fit".to_string(),
            seed: None,
            params: SimParams::default(),
            topology: TopologyGenConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawSimParams {
    episode_rounds: Option<u32>,
    min_holding: Option<u32>,
    max_holding: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct RawTopology {
    nodes: Option<usize>,
    chord_probability: Option<f64>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawRunnerConfig {
    episodes: Option<usize>,
    policy: Option<String>,
    seed: Option<u64>,
    sim: Option<RawSimParams>,
    topology: Option<RawTopology>,
}

pub fn load_runner_config(path: &Path) -> Result<RunnerConfig> {
    let raw_text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_runner_config(&raw_text)
}

pub fn parse_runner_config(raw_text: &str) -> Result<RunnerConfig> {
    let raw_cfg: RawRunnerConfig =
        serde_yaml::from_str(raw_text).context("failed to parse runner config yaml")?;

    let sim = raw_cfg.sim.unwrap_or_default();
    let topology = raw_cfg.topology.unwrap_or_default();
    let sim_defaults = SimParams::default();
    let topology_defaults = TopologyGenConfig::default();

    let params = SimParams {
        episode_rounds: sim.episode_rounds.unwrap_or(sim_defaults.episode_rounds),
        min_holding: sim.min_holding.unwrap_or(sim_defaults.min_holding),
        max_holding: sim.max_holding.unwrap_or(sim_defaults.max_holding),
    };
    ensure!(params.episode_rounds > 0, "episode_rounds must be positive");
    ensure!(
        params.min_holding < params.max_holding,
        "holding time range is empty: [{}, {})",
        params.min_holding,
        params.max_holding
    );

    let topology = TopologyGenConfig {
        nodes: topology.nodes.unwrap_or(topology_defaults.nodes),
        chord_probability: topology
            .chord_probability
            .unwrap_or(topology_defaults.chord_probability),
        seed: topology.seed.unwrap_or(topology_defaults.seed),
    };
    ensure!(topology.nodes >= 3, "generated topology needs at least 3 nodes");

    Ok(RunnerConfig {
        episodes: raw_cfg.episodes.unwrap_or(10),
        policy: raw_cfg.policy.unwrap_or_else(|| "first-fit".to_string()),
        seed: raw_cfg.seed,
        params,
        topology,
    })
}
