use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{BoardGraph, Edge, GraphError, GraphSnapshot, NodeId};
use crate::ownership::{Buildings, OwnershipError, RoadMap};
use crate::types::{BuildingKind, Color};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed layout: {0}")]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    #[error("node {node} holds both a {first} and a {second} building")]
    ConflictingBuilding {
        node: NodeId,
        first: Color,
        second: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadEntry {
    pub edge: Edge,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingEntry {
    pub node: NodeId,
    pub color: Color,
    pub kind: BuildingKind,
}

/// Road and building ownership at one point of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipSnapshot {
    #[serde(default)]
    pub roads: Vec<RoadEntry>,
    #[serde(default)]
    pub buildings: Vec<BuildingEntry>,
}

impl OwnershipSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let snapshot = Self::from_json(&read(path.as_ref())?)?;
        debug!(
            roads = snapshot.roads.len(),
            buildings = snapshot.buildings.len(),
            "loaded ownership snapshot"
        );
        Ok(snapshot)
    }

    /// Roads keyed canonically; either orientation of an entry is walkable.
    pub fn road_map(&self) -> Result<RoadMap, OwnershipError> {
        RoadMap::from_entries(self.roads.iter().map(|road| (road.edge, road.color)))
    }

    /// Roads keyed exactly as written, for hosts that record each orientation
    /// they want walkable. Repeating an entry for the same owner is a no-op; a
    /// second owner for either orientation of a road is rejected.
    pub fn directed_roads(&self) -> Result<HashMap<Edge, Color>, OwnershipError> {
        let mut roads: HashMap<Edge, Color> = HashMap::with_capacity(self.roads.len());
        for &RoadEntry { edge, color } in &self.roads {
            let (a, b) = edge;
            if a == b {
                return Err(OwnershipError::DegenerateRoad(a));
            }
            if let Some(&owner) = roads.get(&(b, a)) {
                if owner != color {
                    return Err(OwnershipError::RoadAlreadyOwned {
                        edge,
                        owner,
                        requested: color,
                    });
                }
            }
            match roads.entry(edge) {
                Entry::Occupied(entry) if *entry.get() != color => {
                    return Err(OwnershipError::RoadAlreadyOwned {
                        edge,
                        owner: *entry.get(),
                        requested: color,
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(color);
                }
            }
        }
        Ok(roads)
    }

    /// Upgrading a settlement to a city of the same color is accepted; two
    /// owners on one node are not.
    pub fn buildings(&self) -> Result<Buildings, SnapshotError> {
        let mut buildings = Buildings::with_capacity(self.buildings.len());
        for entry in &self.buildings {
            if let Some(&(first, _)) = buildings.get(&entry.node) {
                if first != entry.color {
                    return Err(SnapshotError::ConflictingBuilding {
                        node: entry.node,
                        first,
                        second: entry.color,
                    });
                }
            }
            buildings.insert(entry.node, (entry.color, entry.kind));
        }
        Ok(buildings)
    }
}

pub fn load_layout(path: impl AsRef<Path>) -> Result<BoardGraph, SnapshotError> {
    let graph = layout_from_json(&read(path.as_ref())?)?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded board layout"
    );
    Ok(graph)
}

/// Parses `{"nodes": [...], "edges": [[a, b], ...]}`; edges to unknown
/// nodes are dropped, self-loops are an error.
pub fn layout_from_json(json: &str) -> Result<BoardGraph, SnapshotError> {
    let snapshot: GraphSnapshot = serde_json::from_str(json)?;
    Ok(BoardGraph::try_from(snapshot)?)
}

fn read(path: &Path) -> Result<String, SnapshotError> {
    fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}
