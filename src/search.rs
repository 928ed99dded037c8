use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumString};
use tracing::{debug, trace};

use crate::graph::{BoardGraph, Edge, NodeId, canonical_edge};
use crate::ownership::{BuildingLookup, RoadLookup};
use crate::types::Color;

// A player has at most 15 roads in the base game.
type PathBuffer = SmallVec<[Edge; 16]>;

/// Unordered set of canonical `(min, max)` edges forming one continuous road.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadPath {
    edges: Vec<Edge>,
}

impl RoadPath {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Accepts either orientation.
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.contains(&canonical_edge(a, b))
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

impl From<PathBuffer> for RoadPath {
    fn from(buffer: PathBuffer) -> Self {
        Self {
            edges: buffer.into_vec(),
        }
    }
}

/// How a node holding another color's building affects a road passing by.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyBuildings {
    /// The node cannot be entered; the road ends on the near side of it.
    #[default]
    Impassable,
    /// The node can be reached but the road cannot continue past it.
    Terminal,
}

/// Longest run of `color` roads reachable from any of `start_nodes`.
///
/// No road is used twice, though a node may be passed through more than once.
/// Nodes holding another color's building cannot be entered; the start node
/// itself is never blocked. Returns an empty path when no start node has a
/// usable road.
pub fn longest_acyclic_path<B, R, I>(
    buildings: &B,
    roads: &R,
    start_nodes: I,
    color: Color,
    graph: &BoardGraph,
) -> RoadPath
where
    B: BuildingLookup + ?Sized,
    R: RoadLookup + ?Sized,
    I: IntoIterator<Item = NodeId>,
{
    longest_acyclic_path_with(
        buildings,
        roads,
        start_nodes,
        color,
        graph,
        EnemyBuildings::default(),
    )
}

/// [`longest_acyclic_path`] with an explicit rule for enemy-held nodes.
pub fn longest_acyclic_path_with<B, R, I>(
    buildings: &B,
    roads: &R,
    start_nodes: I,
    color: Color,
    graph: &BoardGraph,
    enemy_buildings: EnemyBuildings,
) -> RoadPath
where
    B: BuildingLookup + ?Sized,
    R: RoadLookup + ?Sized,
    I: IntoIterator<Item = NodeId>,
{
    let mut search = PathSearch {
        graph,
        buildings,
        roads,
        color,
        enemy_buildings,
        path: PathBuffer::new(),
        best: PathBuffer::new(),
    };
    for start in start_nodes {
        search.extend_from(start);
        trace!(%color, start, best = search.best.len(), "explored start node");
    }
    debug!(%color, length = search.best.len(), ?enemy_buildings, "longest acyclic path");
    search.best.into()
}

struct PathSearch<'a, B: ?Sized, R: ?Sized> {
    graph: &'a BoardGraph,
    buildings: &'a B,
    roads: &'a R,
    color: Color,
    enemy_buildings: EnemyBuildings,
    path: PathBuffer,
    best: PathBuffer,
}

impl<B, R> PathSearch<'_, B, R>
where
    B: BuildingLookup + ?Sized,
    R: RoadLookup + ?Sized,
{
    fn extend_from(&mut self, node: NodeId) {
        let graph = self.graph;
        let mut extended = false;
        for &neighbor in graph.neighbors(node) {
            if self.roads.road_color(node, neighbor) != Some(self.color) {
                continue;
            }
            let enemy = self.buildings.is_enemy_node(neighbor, self.color);
            if enemy && self.enemy_buildings == EnemyBuildings::Impassable {
                continue;
            }
            let edge = canonical_edge(node, neighbor);
            if self.path.contains(&edge) {
                continue;
            }
            extended = true;
            self.path.push(edge);
            if enemy {
                self.keep_if_longer();
            } else {
                self.extend_from(neighbor);
            }
            self.path.pop();
        }

        if !extended {
            self.keep_if_longer();
        }
    }

    fn keep_if_longer(&mut self) {
        if self.path.len() > self.best.len() {
            self.best = self.path.clone();
        }
    }
}
