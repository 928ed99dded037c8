#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use catanatron_graph::{
    BoardGraph, BuildingKind, Buildings, Color, NodeId, RoadMap, RoadPath, canonical_edge,
};
use rand::Rng;
use rand::seq::SliceRandom;

/// Honeycomb laid out as a brick wall: `rows * cols` nodes, every node has at
/// most three neighbors and the faces are hexagons. 6 x 9 gives 54 nodes and
/// 71 edges, about the size of a base board.
pub fn brick_wall(rows: u16, cols: u16) -> BoardGraph {
    let id = |r: u16, c: u16| r * cols + c;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                edges.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows && (r + c) % 2 == 0 {
                edges.push((id(r, c), id(r + 1, c)));
            }
        }
    }
    BoardGraph::from_parts(0..rows * cols, edges)
}

/// Grows a connected road network per color, then drops a few settlements.
pub fn random_ownership(
    graph: &BoardGraph,
    rng: &mut impl Rng,
    roads_per_color: usize,
) -> (RoadMap, Buildings) {
    let nodes = graph.nodes();
    let mut roads = RoadMap::new();

    for color in Color::ORDERED {
        let mut frontier = vec![*nodes.choose(rng).unwrap()];
        let mut placed = 0;
        for _ in 0..roads_per_color * 20 {
            if placed == roads_per_color {
                break;
            }
            let node = *frontier.choose(rng).unwrap();
            let Some(&(a, b)) = graph.node_edges(node).choose(rng) else {
                continue;
            };
            if roads.get((a, b)).is_some() {
                continue;
            }
            roads.insert((a, b), color).unwrap();
            frontier.extend([a, b]);
            placed += 1;
        }
    }

    let mut buildings: Buildings = HashMap::new();
    for _ in 0..8 {
        let node = *nodes.choose(rng).unwrap();
        let color = *Color::ORDERED.choose(rng).unwrap();
        buildings
            .entry(node)
            .or_insert((color, BuildingKind::Settlement));
    }
    (roads, buildings)
}

/// Independent length-only search with a visited-edge set.
pub fn reference_length(
    graph: &BoardGraph,
    roads: &RoadMap,
    buildings: &Buildings,
    color: Color,
    starts: impl IntoIterator<Item = NodeId>,
) -> usize {
    starts
        .into_iter()
        .map(|start| longest_from(graph, roads, buildings, color, start, &mut HashSet::new()))
        .max()
        .unwrap_or(0)
}

fn longest_from(
    graph: &BoardGraph,
    roads: &RoadMap,
    buildings: &Buildings,
    color: Color,
    start: NodeId,
    visited: &mut HashSet<(NodeId, NodeId)>,
) -> usize {
    let mut best = 0;
    for &neighbor in graph.neighbors(start) {
        if buildings
            .get(&neighbor)
            .is_some_and(|(owner, _)| *owner != color)
        {
            continue;
        }
        if roads.get((start, neighbor)) != Some(color) {
            continue;
        }
        let edge = canonical_edge(start, neighbor);
        if !visited.insert(edge) {
            continue;
        }
        best = best.max(1 + longest_from(graph, roads, buildings, color, neighbor, visited));
        visited.remove(&edge);
    }
    best
}

/// Every edge distinct, canonical, owned by `color`, and the set connected.
pub fn assert_valid_road(path: &RoadPath, roads: &RoadMap, color: Color) {
    let edges = path.edges();
    let distinct: HashSet<_> = edges.iter().collect();
    assert_eq!(distinct.len(), edges.len(), "road reuses an edge: {edges:?}");

    for &(a, b) in edges {
        assert!(a < b, "edge ({a}, {b}) is not canonical");
        assert_eq!(roads.get((a, b)), Some(color));
    }

    if let Some(&(first, _)) = edges.first() {
        let mut reached = HashSet::from([first]);
        let mut grew = true;
        while grew {
            grew = false;
            for &(a, b) in edges {
                if reached.contains(&a) != reached.contains(&b) {
                    reached.insert(a);
                    reached.insert(b);
                    grew = true;
                }
            }
        }
        for &(a, b) in edges {
            assert!(reached.contains(&a) && reached.contains(&b), "road is split: {edges:?}");
        }
    }
}
