use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::graph::{BoardGraph, NodeId};
use crate::ownership::{BuildingLookup, RoadLookup};
use crate::search::{EnemyBuildings, RoadPath, longest_acyclic_path_with};
use crate::types::Color;

/// Read-only view of one ownership snapshot laid over a board.
#[derive(Debug)]
pub struct RoadNetwork<'a, B: ?Sized, R: ?Sized> {
    graph: &'a BoardGraph,
    buildings: &'a B,
    roads: &'a R,
    enemy_buildings: EnemyBuildings,
}

impl<'a, B, R> RoadNetwork<'a, B, R>
where
    B: BuildingLookup + ?Sized,
    R: RoadLookup + ?Sized,
{
    pub fn new(graph: &'a BoardGraph, buildings: &'a B, roads: &'a R) -> Self {
        Self {
            graph,
            buildings,
            roads,
            enemy_buildings: EnemyBuildings::default(),
        }
    }

    pub fn with_enemy_buildings(mut self, enemy_buildings: EnemyBuildings) -> Self {
        self.enemy_buildings = enemy_buildings;
        self
    }

    /// Node sets joined by `color` roads.
    ///
    /// A node holding another color's building ends a walk: it is included in
    /// every component that reaches it, but nothing is explored past it.
    pub fn components(&self, color: Color) -> Vec<BTreeSet<NodeId>> {
        let mut assigned: BTreeSet<NodeId> = BTreeSet::new();
        let mut components = Vec::new();

        for seed in self.graph.nodes() {
            if assigned.contains(&seed) || self.buildings.is_enemy_node(seed, color) {
                continue;
            }
            let component = self.walk(seed, color);
            if component.len() < 2 {
                continue;
            }
            assigned.extend(
                component
                    .iter()
                    .copied()
                    .filter(|&node| !self.buildings.is_enemy_node(node, color)),
            );
            components.push(component);
        }

        debug!(%color, count = components.len(), "road components");
        components
    }

    fn walk(&self, seed: NodeId, color: Color) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let mut agenda = vec![seed];

        while let Some(node) = agenda.pop() {
            if !visited.insert(node) {
                continue;
            }
            if node != seed && self.buildings.is_enemy_node(node, color) {
                continue;
            }
            agenda.extend(self.graph.neighbors(node).iter().copied().filter(|&neighbor| {
                !visited.contains(&neighbor) && self.roads.road_color(node, neighbor) == Some(color)
            }));
        }
        visited
    }

    /// Longest road inside each component of `color`.
    ///
    /// Each search runs on the component's own subgraph: an enemy-held node
    /// shared by two components is a start node for both, and would otherwise
    /// lead into the other side.
    pub fn continuous_roads(&self, color: Color) -> Vec<RoadPath> {
        self.components(color)
            .into_iter()
            .map(|component| {
                let graph = self.graph.subgraph(component.iter().copied());
                longest_acyclic_path_with(
                    self.buildings,
                    self.roads,
                    component,
                    color,
                    &graph,
                    self.enemy_buildings,
                )
            })
            .collect()
    }

    pub fn longest_road(&self, color: Color) -> RoadPath {
        self.continuous_roads(color)
            .into_iter()
            .max_by_key(RoadPath::len)
            .unwrap_or_default()
    }

    pub fn longest_road_length(&self, color: Color) -> usize {
        self.longest_road(color).len()
    }

    pub fn road_lengths<I>(&self, colors: I) -> BTreeMap<Color, usize>
    where
        I: IntoIterator<Item = Color>,
    {
        colors
            .into_iter()
            .map(|color| (color, self.longest_road_length(color)))
            .collect()
    }
}
