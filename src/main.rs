use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rwa_sim::algo::policy_by_name;
use rwa_sim::routing::PathCatalog;
use rwa_sim::runtime::config::{load_runner_config, RunnerConfig};
use rwa_sim::runtime::runner::run_episodes;
use rwa_sim::runtime::topology_gen::generate_topology;
use rwa_sim::sim::env::RwaEnv;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "episode_runner")]
#[command(about = "Drive RWA simulation episodes with a baseline policy")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    episodes: Option<usize>,
    #[arg(long)]
    policy: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    output_json: Option<PathBuf>,
    #[arg(long, default_value = "INFO")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut cfg = match args.config.as_ref() {
        Some(path) => load_runner_config(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(episodes) = args.episodes {
        cfg.episodes = episodes;
    }
    if let Some(policy) = args.policy {
        cfg.policy = policy;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    let topology = Arc::new(generate_topology(&cfg.topology)?);
    let catalog = Arc::new(PathCatalog::build(&topology)?);
    info!(
        "catalog ready: nodes={} edges={} pairs={}",
        topology.num_nodes(),
        topology.num_edges(),
        catalog.num_pairs()
    );

    let mut env = RwaEnv::new(
        Arc::clone(&topology),
        Arc::clone(&catalog),
        cfg.params.clone(),
        cfg.seed,
    )?;
    let mut policy = policy_by_name(&cfg.policy, cfg.seed);

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::Relaxed);
    })?;

    let summary = run_episodes(&mut env, policy.as_mut(), cfg.episodes, cfg.seed, &running)?;
    info!(
        "run done: policy={} episodes={} mean_reward={:.2} mean_blocking_rate={:.3}",
        policy.name(),
        summary.episodes.len(),
        summary.mean_reward,
        summary.mean_blocking_rate
    );

    if let Some(path) = args.output_json {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(&summary)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let level = level.parse::<Level>()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .init();
    Ok(())
}
