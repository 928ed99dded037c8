#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod award;
pub mod graph;
pub mod network;
pub mod ownership;
pub mod search;
pub mod snapshot;
pub mod types;

pub use award::{AwardChange, LongestRoad, LongestRoadConfig};
pub use graph::{BoardGraph, Edge, GraphError, GraphSnapshot, NodeId, canonical_edge};
pub use network::RoadNetwork;
pub use ownership::{BuildingLookup, Buildings, OwnershipError, RoadLookup, RoadMap};
pub use search::{EnemyBuildings, RoadPath, longest_acyclic_path, longest_acyclic_path_with};
pub use snapshot::{OwnershipSnapshot, SnapshotError};
pub use types::{BuildingKind, Color};
