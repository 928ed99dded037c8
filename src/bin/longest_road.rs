use std::path::PathBuf;

use catanatron_graph::award::{LongestRoad, LongestRoadConfig};
use catanatron_graph::network::RoadNetwork;
use catanatron_graph::ownership::{BuildingLookup, RoadLookup};
use catanatron_graph::search::{EnemyBuildings, RoadPath};
use catanatron_graph::snapshot::{OwnershipSnapshot, SnapshotError, load_layout};
use catanatron_graph::{BoardGraph, Color, Edge};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "longest-road")]
#[command(about = "Longest Road scoring for a board layout and ownership snapshot")]
struct Args {
    /// Board layout JSON: {"nodes": [...], "edges": [[a, b], ...]}
    #[arg(long)]
    layout: PathBuf,

    /// Ownership JSON: {"roads": [{"edge", "color"}], "buildings": [{"node", "color", "kind"}]}
    #[arg(long)]
    ownership: PathBuf,

    /// Only score this color (RED, BLUE, ORANGE, WHITE)
    #[arg(long)]
    color: Option<Color>,

    /// Shortest road eligible for the award
    #[arg(long, default_value_t = LongestRoadConfig::default().min_length)]
    min_length: usize,

    /// How enemy buildings affect roads: impassable or terminal
    #[arg(long, default_value_t = EnemyBuildings::default())]
    enemy_buildings: EnemyBuildings,

    /// Look roads up only in the orientation they were written
    #[arg(long)]
    directed: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Serialize)]
struct ColorReport {
    color: Color,
    length: usize,
    components: usize,
    path: Vec<Edge>,
}

#[derive(Debug, Serialize)]
struct Report {
    colors: Vec<ColorReport>,
    award: LongestRoad,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<Report, SnapshotError> {
    let graph = load_layout(&args.layout)?;
    let snapshot = OwnershipSnapshot::load(&args.ownership)?;
    let buildings = snapshot.buildings()?;
    let config = LongestRoadConfig {
        min_length: args.min_length,
        enemy_buildings: args.enemy_buildings,
    };
    let colors = match args.color {
        Some(color) => vec![color],
        None => Color::ORDERED.to_vec(),
    };
    info!(
        nodes = graph.node_count(),
        roads = snapshot.roads.len(),
        directed = args.directed,
        "scoring board"
    );

    if args.directed {
        let roads = snapshot.directed_roads()?;
        Ok(score(&graph, &buildings, &roads, &colors, &config))
    } else {
        let roads = snapshot.road_map()?;
        Ok(score(&graph, &buildings, &roads, &colors, &config))
    }
}

fn score<B, R>(
    graph: &BoardGraph,
    buildings: &B,
    roads: &R,
    colors: &[Color],
    config: &LongestRoadConfig,
) -> Report
where
    B: BuildingLookup + ?Sized,
    R: RoadLookup + ?Sized,
{
    let network =
        RoadNetwork::new(graph, buildings, roads).with_enemy_buildings(config.enemy_buildings);

    let reports: Vec<ColorReport> = colors
        .iter()
        .map(|&color| {
            let roads = network.continuous_roads(color);
            let components = roads.len();
            let path = roads
                .into_iter()
                .max_by_key(RoadPath::len)
                .unwrap_or_default();
            ColorReport {
                color,
                length: path.len(),
                components,
                path: path.into_edges(),
            }
        })
        .collect();

    let mut award = LongestRoad::new();
    award.update(
        reports.iter().map(|report| (report.color, report.length)),
        config,
    );

    Report {
        colors: reports,
        award,
    }
}
