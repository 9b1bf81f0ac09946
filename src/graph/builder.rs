//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) label and edge lookups during construction. Node ids are
//! assigned in insertion order and never change.

use rustc_hash::FxHashMap;

use crate::error::RankError;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The label for this node
    pub label: String,
    /// Outgoing adjacency: target node id -> accumulated edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
///
/// Edges are directed; repeated additions of the same `(source, target)`
/// pair sum into one accumulated weight.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps label -> node id
    label_to_id: FxHashMap<String, u32>,
    /// Node storage, indexed by id
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Build from a finished edge list, the hand-off format produced by an
    /// external ingestion step.
    pub fn from_edges<I, S>(edges: I) -> Result<Self, RankError>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut builder = Self::new();
        for (source, target, weight) in edges {
            builder.add_edge(source.as_ref(), target.as_ref(), weight)?;
        }
        Ok(builder)
    }

    /// Get or create a node for the given label, returning its id
    pub fn add_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Accumulate weight onto the directed edge `source -> target`,
    /// creating both nodes as needed.
    ///
    /// Negative weights are rejected; a zero weight still registers the
    /// nodes.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<(), RankError> {
        if !(weight >= 0.0) {
            return Err(RankError::InvalidGraph(format!(
                "edge {source} -> {target} has negative weight {weight}"
            )));
        }

        let from = self.add_node(source);
        let to = self.add_node(target);
        *self.nodes[from as usize].edges.entry(to).or_insert(0.0) += weight;
        Ok(())
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Get a node by id
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node id by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Get the label for a node id
    pub fn get_label(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.label.as_str())
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
