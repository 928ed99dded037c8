use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;

use crate::graph::{Edge, NodeId, canonical_edge};
use crate::types::{BuildingKind, Color};

/// Who owns the road between two adjacent nodes, looked up in travel order.
pub trait RoadLookup {
    fn road_color(&self, from: NodeId, to: NodeId) -> Option<Color>;
}

/// Who owns the building standing on a node, if any.
pub trait BuildingLookup {
    fn building_color(&self, node: NodeId) -> Option<Color>;

    fn is_enemy_node(&self, node: NodeId, color: Color) -> bool {
        self.building_color(node).is_some_and(|owner| owner != color)
    }
}

/// Building snapshot keyed by node. The kind is carried along but never read
/// by road routing.
pub type Buildings<K = BuildingKind> = HashMap<NodeId, (Color, K)>;

impl<K, S: BuildHasher> BuildingLookup for HashMap<NodeId, (Color, K), S> {
    fn building_color(&self, node: NodeId) -> Option<Color> {
        self.get(&node).map(|(color, _)| *color)
    }
}

/// Raw directed lookup: `(a, b)` and `(b, a)` are separate keys, so a road
/// recorded in one orientation only cannot be walked backwards.
impl<S: BuildHasher> RoadLookup for HashMap<Edge, Color, S> {
    fn road_color(&self, from: NodeId, to: NodeId) -> Option<Color> {
        self.get(&(from, to)).copied()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("road {edge:?} already owned by {owner}, cannot assign to {requested}")]
    RoadAlreadyOwned {
        edge: Edge,
        owner: Color,
        requested: Color,
    },
    #[error("road ({0}, {0}) does not join two nodes")]
    DegenerateRoad(NodeId),
}

/// Road ownership keyed by canonical edge, so either orientation resolves to
/// the same road.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadMap {
    roads: HashMap<Edge, Color>,
}

impl RoadMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, OwnershipError>
    where
        I: IntoIterator<Item = (Edge, Color)>,
    {
        let mut map = Self::new();
        for (edge, color) in entries {
            map.insert(edge, color)?;
        }
        Ok(map)
    }

    /// Re-inserting a road for its current owner is a no-op.
    pub fn insert(&mut self, edge: Edge, color: Color) -> Result<(), OwnershipError> {
        let (a, b) = edge;
        if a == b {
            return Err(OwnershipError::DegenerateRoad(a));
        }
        let key = canonical_edge(a, b);
        match self.roads.get(&key) {
            Some(&owner) if owner != color => Err(OwnershipError::RoadAlreadyOwned {
                edge: key,
                owner,
                requested: color,
            }),
            Some(_) => Ok(()),
            None => {
                self.roads.insert(key, color);
                Ok(())
            }
        }
    }

    pub fn get(&self, edge: Edge) -> Option<Color> {
        self.roads.get(&canonical_edge(edge.0, edge.1)).copied()
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// Canonical edges with their owners, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, Color)> + '_ {
        self.roads.iter().map(|(edge, color)| (*edge, *color))
    }

    pub fn edges_of(&self, color: Color) -> BTreeSet<Edge> {
        self.iter()
            .filter(|(_, owner)| *owner == color)
            .map(|(edge, _)| edge)
            .collect()
    }

    /// Nodes at either end of a road owned by `color`; the usual set of start
    /// nodes for a longest-road search.
    pub fn nodes_touching(&self, color: Color) -> BTreeSet<NodeId> {
        self.edges_of(color)
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect()
    }

    /// Expands into a directed map holding both orientations of every road.
    pub fn to_directed(&self) -> HashMap<Edge, Color> {
        self.iter()
            .flat_map(|((a, b), color)| [((a, b), color), ((b, a), color)])
            .collect()
    }
}

impl RoadLookup for RoadMap {
    fn road_color(&self, from: NodeId, to: NodeId) -> Option<Color> {
        self.get((from, to))
    }
}
