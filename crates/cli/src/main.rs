//! Command-line runner for the tiling algorithms.
//!
//! Runs either algorithm on a fresh disk and reports point and edge counts;
//! with `--json` it prints the full geometry (point coordinates and edge
//! endpoint pairs) for downstream renderers.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;

use poincare::disk::Disk;
use poincare::spanning::MirrorTiling;
use poincare::tiling::{FrontierTiling, TilingAlgorithm, TilingParams};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Hyperbolic tiling generator for the Poincaré disk")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    /// Layered frontier growth over the edge graph
    Frontier,
    /// Recursive mirror reflection along a spanning tree
    Mirror,
}

#[derive(Subcommand)]
enum Action {
    /// Generate a {sides, adjacency} tiling
    Generate {
        #[arg(long, value_enum, default_value_t = Algo::Frontier)]
        algo: Algo,
        #[arg(long, default_value_t = 4)]
        sides: u32,
        #[arg(long, default_value_t = 5)]
        adjacency: u32,
        #[arg(long, default_value_t = 2)]
        layers: u32,
        /// Print the generated geometry as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PointDoc {
    id: u32,
    x: f64,
    y: f64,
    label: Option<String>,
}

#[derive(Serialize)]
struct TilingDoc {
    sides: u32,
    adjacency: u32,
    layers: u32,
    points: Vec<PointDoc>,
    edges: Vec<(u32, u32)>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            algo,
            sides,
            adjacency,
            layers,
            json,
        } => generate(algo, sides, adjacency, layers, json),
    }
}

fn generate(algo: Algo, sides: u32, adjacency: u32, layers: u32, json: bool) -> Result<()> {
    let params = TilingParams {
        sides,
        adjacency,
        layers,
    };
    let mut disk = Disk::new();

    let output = match algo {
        Algo::Frontier => FrontierTiling::default().generate(&mut disk, &params)?,
        Algo::Mirror => MirrorTiling::default().generate(&mut disk, &params)?,
    };

    tracing::info!(
        algo = ?algo,
        sides,
        adjacency,
        layers,
        points = output.points.len(),
        edges = output.edges.len(),
        "generated tiling"
    );

    if json {
        let mut points = Vec::with_capacity(output.points.len());
        for id in &output.points {
            let pos = disk.position(*id)?;
            points.push(PointDoc {
                id: id.0,
                x: pos.x,
                y: pos.y,
                label: disk.label(*id)?.map(str::to_owned),
            });
        }
        let doc = TilingDoc {
            sides,
            adjacency,
            layers,
            points,
            edges: output.edges.iter().map(|(a, b)| (a.0, b.0)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    Ok(())
}
