//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR stores outgoing edges contiguously, making iteration over neighbors
//! very fast. All four solvers reduce to repeated sweeps over the edge set,
//! so this is the hot-path representation; the dense matrix view exists only
//! for the exact eigen-decomposition path.

use nalgebra::DMatrix;

use super::builder::GraphBuilder;

/// An immutable directed graph in Compressed Sparse Row format
///
/// Node order is frozen at construction: row/column `i` of every matrix
/// view corresponds to the same node for the lifetime of the graph.
#[derive(Debug, Clone)]
pub struct VisitGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Accumulated edge weights
    pub weights: Vec<f64>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
    /// Total outgoing weight for each node
    pub total_weight: Vec<f64>,
    /// Labels for each node, in insertion order
    pub labels: Vec<String>,
}

impl VisitGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut labels = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in builder.nodes() {
            labels.push(node.label.clone());

            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            out_degree.push(edges.len() as u32);
            total_weight.push(edges.iter().map(|(_, w)| w).sum());

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            out_degree,
            total_weight,
            labels,
        }
    }

    /// Iterate over out-neighbors of a node with their weights
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Get the total outgoing weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Get the label for a node
    pub fn label(&self, node: u32) -> &str {
        &self.labels[node as usize]
    }

    /// Node labels in insertion order
    pub fn nodes(&self) -> &[String] {
        &self.labels
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the number of distinct directed edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling nodes (nodes with no outgoing edges)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }

    /// Get node id by label (linear search - use sparingly)
    pub fn get_node_by_label(&self, label: &str) -> Option<u32> {
        self.labels.iter().position(|l| l == label).map(|i| i as u32)
    }

    /// Compute `y = A x`, i.e. `y[u] = Σ_{u→v} w(u,v) x[v]`.
    ///
    /// With `weighted = false` every present edge counts as 1.
    pub fn forward_product(&self, x: &[f64], weighted: bool) -> Vec<f64> {
        let mut y = vec![0.0; self.num_nodes];
        for u in 0..self.num_nodes {
            let mut acc = 0.0;
            for (v, w) in self.neighbors(u as u32) {
                let w = if weighted { w } else { 1.0 };
                acc += w * x[v as usize];
            }
            y[u] = acc;
        }
        y
    }

    /// Compute `y = Aᵗ x`, i.e. `y[v] = Σ_{u→v} w(u,v) x[u]`.
    ///
    /// Uses the forward edge list in scatter order, so no reverse index is
    /// needed.
    pub fn transpose_product(&self, x: &[f64], weighted: bool) -> Vec<f64> {
        let mut y = vec![0.0; self.num_nodes];
        for u in 0..self.num_nodes {
            let xu = x[u];
            for (v, w) in self.neighbors(u as u32) {
                let w = if weighted { w } else { 1.0 };
                y[v as usize] += w * xu;
            }
        }
        y
    }

    /// Dense adjacency matrix view: `entry (i, j)` is the weight (or 1 if
    /// unweighted) of edge `i -> j`. Row/column `i` corresponds to node `i`
    /// across repeated calls.
    pub fn adjacency_matrix(&self, weighted: bool) -> DMatrix<f64> {
        let n = self.num_nodes;
        let mut m = DMatrix::zeros(n, n);
        for u in 0..n {
            for (v, w) in self.neighbors(u as u32) {
                m[(u, v as usize)] = if weighted { w } else { 1.0 };
            }
        }
        m
    }
}

impl Default for VisitGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            out_degree: Vec::new(),
            total_weight: Vec::new(),
            labels: Vec::new(),
        }
    }
}
