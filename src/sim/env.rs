use std::sync::Arc;

use crate::error::{SimError, TopologyError};
use crate::model::link_state::{LinkStateStore, WAVELENGTHS};
use crate::model::request::{Request, RequestGenerator};
use crate::model::topology::Topology;
use crate::routing::PathCatalog;
use crate::sim::observation::{Observation, StepInfo, StepOutcome};

/// Action index that refuses the pending request.
pub const BLOCK_ACTION: u32 = 3;
/// Discrete action space: three candidate paths plus the blocking action.
pub const NUM_ACTIONS: u32 = 4;

#[derive(Debug, Clone)]
pub struct SimParams {
    pub episode_rounds: u32,
    pub min_holding: u32,
    pub max_holding: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            episode_rounds: 100,
            min_holding: 10,
            max_holding: 20,
        }
    }
}

/// The RWA simulation engine.
///
/// Owns the mutable per-episode state (link slots, live request, counters);
/// shares the immutable topology and candidate-path catalog, so independent
/// engines can simulate the same network concurrently. Policy-agnostic: the
/// caller picks the action, the engine only enforces resource constraints.
pub struct RwaEnv {
    topology: Arc<Topology>,
    catalog: Arc<PathCatalog>,
    params: SimParams,
    links: LinkStateStore,
    generator: RequestGenerator,
    request: Request,
    round: u32,
    blocks: u32,
    terminated: bool,
}

impl RwaEnv {
    pub fn new(
        topology: Arc<Topology>,
        catalog: Arc<PathCatalog>,
        params: SimParams,
        seed: Option<u64>,
    ) -> Result<Self, TopologyError> {
        topology.validate()?;
        let links = LinkStateStore::new(topology.num_edges());
        let mut generator = RequestGenerator::new(params.min_holding, params.max_holding, seed);
        let request = generator.draw(topology.num_nodes());
        Ok(Self {
            topology,
            catalog,
            params,
            links,
            generator,
            request,
            round: 0,
            blocks: 0,
            terminated: false,
        })
    }

    /// Starts a fresh episode. Always succeeds: clears every slot, resets the
    /// counters, optionally reseeds the traffic stream, and draws the first
    /// request.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        self.links.clear();
        self.generator.reseed(seed);
        self.request = self.generator.draw(self.topology.num_nodes());
        self.round = 0;
        self.blocks = 0;
        self.terminated = false;
        self.observation()
    }

    /// One round: decay, then admit the pending request on the selected
    /// candidate path or block it. Actions 0..2 select a path, 3 blocks.
    pub fn step(&mut self, action: u32) -> Result<StepOutcome, SimError> {
        if self.terminated {
            return Err(SimError::EpisodeFinished);
        }
        if action >= NUM_ACTIONS {
            return Err(SimError::InvalidAction(action));
        }

        // Holding times tick down every round, blocking actions included.
        self.links.decay();

        self.round += 1;
        let terminated = self.round == self.params.episode_rounds;

        let holding_time = self.request.holding_time;
        let route = if action == BLOCK_ACTION {
            None
        } else {
            self.catalog
                .route(self.request.source, self.request.target, action as usize)
        };

        // Full-path feasibility before any mutation: every edge must stay at
        // or under capacity after taking one more slot.
        let feasible = route.is_some_and(|path| {
            path.iter()
                .all(|edge| self.links.occupied(*edge) + 1 <= WAVELENGTHS)
        });

        let reward;
        let admitted;
        if let Some(path) = route.filter(|_| feasible) {
            for edge in path {
                self.links.admit(*edge, holding_time)?;
            }
            reward = f64::from(holding_time);
            admitted = true;
        } else {
            self.blocks += 1;
            reward = -1.0;
            admitted = false;
        }

        self.terminated = terminated;
        // The next request is drawn unconditionally, terminal step included.
        self.request = self.generator.draw(self.topology.num_nodes());

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            terminated,
            truncated: false,
            info: StepInfo {
                round: self.round,
                blocks: self.blocks,
                admitted,
            },
        })
    }

    pub fn observation(&self) -> Observation {
        Observation {
            links: self.links.snapshot(),
            req: [
                self.request.source,
                self.request.target,
                self.request.holding_time,
            ],
        }
    }

    pub fn catalog(&self) -> &PathCatalog {
        &self.catalog
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn blocks(&self) -> u32 {
        self.blocks
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn action_space(&self) -> u32 {
        NUM_ACTIONS
    }
}
