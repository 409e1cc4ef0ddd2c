use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::algo::RoutingPolicy;
use crate::sim::env::RwaEnv;

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub rounds: u32,
    pub total_reward: f64,
    pub admitted: u32,
    pub blocks: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub episodes: Vec<EpisodeSummary>,
    pub mean_reward: f64,
    pub mean_blocking_rate: f64,
}

/// Drives the reset/step cycle for a batch of episodes. The policy only
/// sees the observation and the shared catalog; the engine stays in charge
/// of feasibility and reward. A cleared `running` flag stops between steps.
pub fn run_episodes(
    env: &mut RwaEnv,
    policy: &mut dyn RoutingPolicy,
    episodes: usize,
    seed: Option<u64>,
    running: &AtomicBool,
) -> Result<RunSummary> {
    let mut summaries = Vec::with_capacity(episodes);

    for episode in 0..episodes {
        if !running.load(Ordering::Relaxed) {
            info!("stop requested, finished {} episodes", summaries.len());
            break;
        }

        let episode_seed = seed.map(|base| base + episode as u64);
        let mut observation = env.reset(episode_seed);
        let mut total_reward = 0.0;
        let mut admitted = 0_u32;

        loop {
            if !running.load(Ordering::Relaxed) {
                break;
            }
            let action = policy.choose(&observation, env.catalog());
            let outcome = env.step(action)?;
            total_reward += outcome.reward;
            if outcome.info.admitted {
                admitted += 1;
            }
            observation = outcome.observation;
            if outcome.terminated {
                break;
            }
        }

        let summary = EpisodeSummary {
            episode,
            rounds: env.round(),
            total_reward,
            admitted,
            blocks: env.blocks(),
        };
        info!(
            "episode {} done: policy={} rounds={} reward={:.1} admitted={} blocked={}",
            episode, policy.name(), summary.rounds, summary.total_reward, summary.admitted, summary.blocks
        );
        summaries.push(summary);
    }

    Ok(aggregate(summaries))
}

fn aggregate(episodes: Vec<EpisodeSummary>) -> RunSummary {
    let count = episodes.len().max(1) as f64;
    let mean_reward = episodes.iter().map(|e| e.total_reward).sum::<f64>() / count;
    let mean_blocking_rate = episodes
        .iter()
        .map(|e| f64::from(e.blocks) / f64::from(e.rounds.max(1)))
        .sum::<f64>()
        / count;
    RunSummary {
        episodes,
        mean_reward,
        mean_blocking_rate,
    }
}
