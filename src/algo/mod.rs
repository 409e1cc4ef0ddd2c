use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::link_state::WAVELENGTHS;
use crate::routing::PathCatalog;
use crate::sim::env::{BLOCK_ACTION, NUM_ACTIONS};
use crate::sim::observation::Observation;

/// Decision seam for episode drivers. The engine itself never sees this;
/// it only receives the chosen action index.
pub trait RoutingPolicy {
    fn name(&self) -> &'static str;
    fn choose(&mut self, observation: &Observation, catalog: &PathCatalog) -> u32;
}

/// Refuses every request. Useful as a lower-bound baseline.
#[derive(Debug, Default)]
pub struct AlwaysBlockPolicy;

impl RoutingPolicy for AlwaysBlockPolicy {
    fn name(&self) -> &'static str {
        "always-block"
    }

    fn choose(&mut self, _observation: &Observation, _catalog: &PathCatalog) -> u32 {
        BLOCK_ACTION
    }
}

/// Uniform random action, blocking included.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl RoutingPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, _observation: &Observation, _catalog: &PathCatalog) -> u32 {
        self.rng.random_range(0..NUM_ACTIONS)
    }
}

/// Picks the lowest action index whose candidate path still has a free slot
/// on every edge; blocks when none fits.
#[derive(Debug, Default)]
pub struct FirstFitPolicy;

impl RoutingPolicy for FirstFitPolicy {
    fn name(&self) -> &'static str {
        "first-fit"
    }

    fn choose(&mut self, observation: &Observation, catalog: &PathCatalog) -> u32 {
        let [source, target, _holding] = observation.req;
        let Some(candidates) = catalog.candidates(source, target) else {
            return BLOCK_ACTION;
        };

        for (action, path) in candidates.paths.iter().enumerate() {
            let fits = path.iter().all(|edge| {
                observation
                    .links
                    .get(*edge as usize)
                    .is_some_and(|row| row.iter().filter(|cell| **cell > 0).count() < WAVELENGTHS)
            });
            if fits {
                return action as u32;
            }
        }
        BLOCK_ACTION
    }
}

pub fn policy_by_name(raw: &str, seed: Option<u64>) -> Box<dyn RoutingPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "random" => Box::new(RandomPolicy::new(seed)),
        "always-block" | "block" => Box::new(AlwaysBlockPolicy),
        _ => Box::new(FirstFitPolicy),
    }
}
