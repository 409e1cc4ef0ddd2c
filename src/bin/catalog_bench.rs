use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rwa_sim::routing::{PathCatalog, CANDIDATE_PATHS};
use rwa_sim::runtime::config::TopologyGenConfig;
use rwa_sim::runtime::topology_gen::generate_topology;
use serde_json::{json, Value};

#[derive(Debug, Parser)]
#[command(name = "catalog_bench")]
#[command(about = "Benchmark candidate-path catalog construction")]
struct Args {
    #[arg(long, default_value_t = 14)]
    nodes: usize,
    #[arg(long, default_value_t = 0.15)]
    chord_probability: f64,
    #[arg(long, default_value_t = 3)]
    seeds: usize,
    #[arg(long, default_value_t = 1)]
    start_seed: u64,
    #[arg(long, default_value_t = 5)]
    iterations: usize,
    #[arg(long)]
    output_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rows = Vec::new();

    for idx in 0..args.seeds.max(1) {
        let seed = args.start_seed + idx as u64;
        let cfg = TopologyGenConfig {
            nodes: args.nodes.max(3),
            chord_probability: args.chord_probability,
            seed,
        };
        let topology = generate_topology(&cfg)?;

        let mut elapsed_ms = 0.0;
        let mut pairs = 0;
        let mut padded_pairs = 0;
        for _ in 0..args.iterations.max(1) {
            let start = Instant::now();
            let catalog = PathCatalog::build(&topology)?;
            elapsed_ms += start.elapsed().as_secs_f64() * 1000.0;

            pairs = catalog.num_pairs();
            padded_pairs = catalog
                .iter()
                .filter(|(_, candidates)| candidates.genuine < CANDIDATE_PATHS)
                .count();
        }

        rows.push(json!({
            "seed": seed,
            "nodes": topology.num_nodes(),
            "edges": topology.num_edges(),
            "pairs": pairs,
            "padded_pairs": padded_pairs,
            "runtime_ms": elapsed_ms / args.iterations.max(1) as f64,
        }));
    }

    print_summary(&rows);

    let payload = json!({
        "config": {
            "nodes": args.nodes,
            "chord_probability": args.chord_probability,
            "seeds": args.seeds,
            "start_seed": args.start_seed,
            "iterations": args.iterations,
        },
        "runs": rows,
    });

    if let Some(path) = args.output_json {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(&payload)?)?;
    }

    Ok(())
}

fn print_summary(rows: &[Value]) {
    println!("seed\tnodes\tedges\tpairs\tpadded_pairs\truntime_ms");
    for row in rows {
        let get_u64 = |key: &str| row.get(key).and_then(Value::as_u64).unwrap_or(0);
        let runtime_ms = row
            .get("runtime_ms")
            .and_then(Value::as_f64)
            .unwrap_or(f64::NAN);
        println!(
            "{}\t{}\t{}\t{}\t{}\t{:.4}",
            get_u64("seed"),
            get_u64("nodes"),
            get_u64("edges"),
            get_u64("pairs"),
            get_u64("padded_pairs"),
            runtime_ms
        );
    }
}
