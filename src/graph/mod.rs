use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

pub type NodeId = u16;

/// A path between two intersections, kept in the orientation it was added with.
pub type Edge = (NodeId, NodeId);

// Board intersections touch at most three paths.
type Neighbors = SmallVec<[NodeId; 3]>;
type NodeEdges = SmallVec<[Edge; 3]>;

/// Order-independent form of an edge.
pub fn canonical_edge(a: NodeId, b: NodeId) -> Edge {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    neighbors: Neighbors,
    edges: NodeEdges,
}

/// Undirected board topology.
///
/// Storage is indexed directly by [`NodeId`]; a `None` slot is an id that was
/// never registered. Each edge tuple is stored verbatim in the incident lists of
/// both of its endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct BoardGraph {
    slots: Vec<Option<Slot>>,
    node_count: usize,
}

impl BoardGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for ids `0..max_nodes`.
    pub fn with_capacity(max_nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_nodes),
            node_count: 0,
        }
    }

    pub fn from_parts<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        graph.add_nodes(nodes);
        graph.add_edges(edges);
        graph
    }

    pub fn add_nodes<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for id in ids {
            let index = usize::from(id);
            if index >= self.slots.len() {
                self.slots.resize_with(index + 1, || None);
            }
            if self.slots[index].is_none() {
                self.slots[index] = Some(Slot::default());
                self.node_count += 1;
            }
        }
    }

    /// Edges touching an unregistered node are dropped without error.
    ///
    /// # Panics
    ///
    /// Panics on a self-loop `(a, a)`, which cannot describe a board path.
    /// Untrusted input goes through `BoardGraph::try_from(GraphSnapshot)`.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = Edge>,
    {
        for edge in edges {
            let (a, b) = edge;
            assert_ne!(a, b, "self-loop edge ({a}, {b}) is not a board path");
            if !self.contains_node(a) || !self.contains_node(b) {
                trace!(from = a, to = b, "dropping edge with unregistered endpoint");
                continue;
            }
            self.link(a, b, edge);
            self.link(b, a, edge);
        }
    }

    fn link(&mut self, node: NodeId, neighbor: NodeId, edge: Edge) {
        let Some(slot) = self.slot_mut(node) else {
            return;
        };
        if !slot.neighbors.contains(&neighbor) {
            slot.neighbors.push(neighbor);
        }
        if !slot.edges.contains(&edge) {
            slot.edges.push(edge);
        }
    }

    fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(usize::from(id)).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots.get_mut(usize::from(id)).and_then(Option::as_mut)
    }

    /// New graph holding exactly `ids` plus the source edges between them.
    pub fn subgraph<I>(&self, ids: I) -> BoardGraph
    where
        I: IntoIterator<Item = NodeId>,
    {
        let ids: Vec<NodeId> = ids.into_iter().collect();
        let edges = self.edges_touching(ids.iter().copied());

        let capacity = ids.iter().max().map_or(0, |&id| usize::from(id) + 1);
        let mut graph = BoardGraph::with_capacity(capacity);
        graph.add_nodes(ids);
        graph.add_edges(edges);
        graph
    }

    /// Every stored edge, each tuple reported once.
    pub fn edges(&self) -> Vec<Edge> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|slot| slot.edges.iter().copied())
            .unique()
            .collect()
    }

    /// Union of the edges incident to any of `ids`.
    pub fn edges_touching<I>(&self, ids: I) -> Vec<Edge>
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter()
            .flat_map(|id| self.node_edges(id).iter().copied())
            .unique()
            .collect()
    }

    pub fn node_edges(&self, id: NodeId) -> &[Edge] {
        self.slot(id).map(|slot| slot.edges.as_slice()).unwrap_or(&[])
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.slot(id)
            .map(|slot| slot.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index as NodeId)
            .collect()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}

/// Serialized form: enough to rebuild the graph with nodes first, then edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub edges: Vec<Edge>,
    pub nodes: Vec<NodeId>,
}

impl From<BoardGraph> for GraphSnapshot {
    fn from(graph: BoardGraph) -> Self {
        Self {
            edges: graph.edges(),
            nodes: graph.nodes(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("self-loop edge ({0}, {0}) is not a board path")]
    SelfLoop(NodeId),
}

impl TryFrom<GraphSnapshot> for BoardGraph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        if let Some(&(node, _)) = snapshot.edges.iter().find(|(a, b)| a == b) {
            return Err(GraphError::SelfLoop(node));
        }
        Ok(BoardGraph::from_parts(snapshot.nodes, snapshot.edges))
    }
}
