//! Random graph generator CLI (§9a supplement).
//!
//! Grounded on `FinalProject/part3/random.c`: rejection sampling (keep
//! drawing random `(u, v)` pairs with `rand() % n`, skip ones
//! [`Graph::add_edge`] rejects as a duplicate) up to `num_edges * 1000`
//! attempts, the same `n * (n + 1) / 2` maximum-edges bound that allows one
//! self-loop per vertex, and a printout of the resulting graph followed by
//! its Euler-circuit status.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use graphsvc::algo;
use graphsvc::graph::Graph;

/// Generate a random simple undirected graph and report its Euler circuit.
#[derive(Debug, Parser)]
#[command(name = "graphgen", about = "Random graph generator")]
struct Args {
    /// Number of vertices.
    #[arg(short = 'v', long = "vertices")]
    num_vertices: usize,

    /// Number of edges to attempt to add.
    #[arg(short = 'e', long = "edges")]
    num_edges: usize,

    /// Random seed.
    #[arg(short = 'r', long = "seed")]
    seed: u64,
}

fn max_edges(n: usize) -> usize {
    n * (n + 1) / 2
}

fn generate_random_graph(g: &mut Graph, num_edges: usize, seed: u64) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = g.len();
    let max_attempts = num_edges.saturating_mul(1000);
    let mut edges_added = 0;
    let mut attempts = 0;

    while edges_added < num_edges && attempts < max_attempts {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if g.add_edge(u, v).is_ok() {
            edges_added += 1;
            println!("Added edge: {u} -- {v} (total: {edges_added}/{num_edges})");
        }
        attempts += 1;
    }

    if edges_added < num_edges {
        eprintln!(
            "Warning: could only add {edges_added} out of {num_edges} requested edges after {attempts} attempts"
        );
    }
    edges_added
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.num_vertices == 0 {
        eprintln!("Error: number of vertices must be positive");
        std::process::exit(1);
    }

    let cap = max_edges(args.num_vertices);
    if args.num_edges > cap {
        eprintln!(
            "Error: too many edges requested (requested {}, maximum possible {cap})",
            args.num_edges
        );
        std::process::exit(1);
    }

    println!("=== Random Graph Generation ===");
    println!("Vertices: {}", args.num_vertices);
    println!("Edges to generate: {}", args.num_edges);
    println!("Random seed: {}", args.seed);
    println!("Maximum possible edges: {cap}\n");

    let mut g = Graph::create(args.num_vertices).expect("num_vertices validated above");

    println!("Generating random edges...");
    generate_random_graph(&mut g, args.num_edges, args.seed);

    println!("\n=== Generated Graph ===");
    print!("{g}");

    println!("\n=== Euler Circuit Analysis ===");
    if !algo::has_euler_circuit(&g) {
        println!("No Euler circuit exists in this graph.");
        println!("(Either the graph is not connected, or some vertices have odd degree)");
    } else {
        println!("Euler circuit exists! Finding it...\n");
        match algo::find_euler_circuit(&g) {
            Some(cycle) => {
                println!("Circuit length (vertices): {}", cycle.len());
                let rendered: Vec<String> = cycle.iter().map(|v| v.to_string()).collect();
                println!("The circuit is:\n{}", rendered.join(" -> "));
            }
            None => println!("Error: failed to extract Euler circuit (unexpected)"),
        }
    }

    println!("\nDone!");
}
