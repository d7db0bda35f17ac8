//! Undirected multigraph with optional integer edge weights (§3, §4.1).
//!
//! Vertices are `0..n`. Each undirected edge `{u, v}` is stored as one
//! [`AdjEntry`] in `adj[u]` pointing at `v` and one in `adj[v]` pointing at
//! `u`, both carrying the same weight; a self-loop on `u` is stored as two
//! entries in `adj[u]`, both pointing at `u` with the same weight. At most
//! one edge may exist between any unordered pair, including at most one
//! self-loop per vertex (the *simple-graph policy*, §3).
//!
//! Unlike the original's individually `malloc`'d, singly-linked adjacency
//! nodes, each vertex here owns a contiguous `Vec<AdjEntry>` — the redesign
//! spec.md §9 asks for, since it removes the "allocate both nodes before
//! linking either" subtlety without changing observable behaviour.

use std::fmt;

use crate::error::GraphError;

/// One directed incidence within a vertex's neighbour list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjEntry {
    /// The neighbour vertex.
    pub to: usize,
    /// The edge weight (always positive; default 1 when unspecified).
    pub weight: i32,
}

/// An undirected multigraph-shaped-as-simple-graph: adjacency lists over
/// vertices `0..n`, at most one edge per unordered pair, at most one
/// self-loop per vertex.
#[derive(Debug, Clone)]
pub struct Graph {
    adj: Vec<Vec<AdjEntry>>,
}

impl Graph {
    /// Create a graph with `n` vertices and no edges.
    ///
    /// Returns `None` for `n == 0`, matching `graph_create`'s `NULL` return
    /// on a non-positive vertex count.
    pub fn create(n: usize) -> Option<Graph> {
        if n == 0 {
            return None;
        }
        Some(Graph {
            adj: vec![Vec::new(); n],
        })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// A graph with zero vertices is never constructible via [`Graph::create`],
    /// but this is kept for API completeness (e.g. a future empty default).
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    #[inline]
    fn in_bounds(&self, v: usize) -> bool {
        v < self.adj.len()
    }

    /// Count occurrences of `v` in `u`'s adjacency list.
    fn count_neighbor(&self, u: usize, v: usize) -> usize {
        self.adj[u].iter().filter(|e| e.to == v).count()
    }

    /// Simple-graph duplicate check for the undirected edge `u--v`.
    fn edge_exists(&self, u: usize, v: usize) -> bool {
        if u == v {
            self.count_neighbor(u, u) >= 2
        } else {
            self.count_neighbor(u, v) >= 1
        }
    }

    /// Add an undirected edge `u--v` with default weight 1.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        self.add_weighted_edge(u, v, 1)
    }

    /// Add an undirected edge `u--v` with the given weight.
    ///
    /// Rejects out-of-range vertices ([`GraphError::OutOfBounds`]) and an
    /// already-present edge, including a third self-loop on the same vertex
    /// ([`GraphError::Duplicate`]). Both adjacency entries are pushed only
    /// after every validity check passes, so a rejected call never leaves
    /// the graph half-mutated.
    pub fn add_weighted_edge(
        &mut self,
        u: usize,
        v: usize,
        weight: i32,
    ) -> Result<(), GraphError> {
        if !self.in_bounds(u) || !self.in_bounds(v) {
            return Err(GraphError::OutOfBounds);
        }
        if self.edge_exists(u, v) {
            return Err(GraphError::Duplicate);
        }

        if u == v {
            self.adj[u].push(AdjEntry { to: u, weight });
            self.adj[u].push(AdjEntry { to: u, weight });
        } else {
            self.adj[u].push(AdjEntry { to: v, weight });
            self.adj[v].push(AdjEntry { to: u, weight });
        }
        Ok(())
    }

    /// Weight of the edge between `u` and `v`, or `0` if no such edge exists
    /// (including when either vertex is out of range).
    pub fn edge_weight(&self, u: usize, v: usize) -> i32 {
        if !self.in_bounds(u) || !self.in_bounds(v) {
            return 0;
        }
        self.adj[u]
            .iter()
            .find(|e| e.to == v)
            .map(|e| e.weight)
            .unwrap_or(0)
    }

    /// Overwrite the weight already stored on both endpoints' entries for
    /// the undirected edge `u--v`, without touching the simple-graph
    /// duplicate check `add_weighted_edge` runs. No-op if the edge doesn't
    /// exist.
    ///
    /// Exists for the weighted wire-request handlers, which add an edge at
    /// the default weight and then patch its weight in a second pass — see
    /// DESIGN.md's "asymmetric weight update" note.
    pub fn set_edge_weight(&mut self, u: usize, v: usize, weight: i32) {
        if !self.in_bounds(u) || !self.in_bounds(v) {
            return;
        }
        if u == v {
            // Both of a self-loop's two entries live in the same list.
            for e in self.adj[u].iter_mut().filter(|e| e.to == u) {
                e.weight = weight;
            }
            return;
        }
        for e in self.adj[u].iter_mut() {
            if e.to == v {
                e.weight = weight;
                break;
            }
        }
        for e in self.adj[v].iter_mut() {
            if e.to == u {
                e.weight = weight;
                break;
            }
        }
    }

    /// Whether the undirected edge `u--v` exists.
    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.in_bounds(u) && self.in_bounds(v) && self.adj[u].iter().any(|e| e.to == v)
    }

    /// Adjacency entries incident to `v`, in insertion order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = &AdjEntry> {
        self.adj[v].iter()
    }

    /// Degree of `v`: number of adjacency entries (a self-loop counts 2).
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Whether any edge in the graph has a weight other than 1.
    fn has_weights(&self) -> bool {
        self.adj.iter().flatten().any(|e| e.weight != 1)
    }
}

impl fmt::Display for Graph {
    /// One line per vertex: `i: to(w:weight) to(w:weight) ...`. Weights are
    /// shown only if some edge in the graph has weight != 1, matching
    /// `graph_print`'s `has_weights` gate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show_weights = self.has_weights();
        for (i, entries) in self.adj.iter().enumerate() {
            write!(f, "{i}:")?;
            for e in entries {
                if show_weights {
                    write!(f, " {}(w:{})", e.to, e.weight)?;
                } else {
                    write!(f, " {}", e.to)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
