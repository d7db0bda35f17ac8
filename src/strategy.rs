//! Strategy/Factory dispatch over the five kernels (§4.6).
//!
//! Grounded on `FinalProject/part7/factory.h` and `algorithm_strategy.h`: the
//! original pairs an `AlgorithmType` enum with an array of
//! `AlgorithmStrategy { execute, name, description, id }` structs built once
//! and looked up by id. A C function pointer table doesn't carry its weight
//! in Rust once the dispatch is onto an enum with a fixed, known arity, so
//! this collapses it to a `match` over [`AlgorithmId`] backed by a small
//! `static` registry of names/descriptions, consulted for introspection
//! (`available`) but not for the dispatch itself.

use std::sync::OnceLock;

use crate::algo;
use crate::graph::Graph;

/// One of the five supported kernels, numbered exactly as
/// `factory.h`'s `AlgorithmType` (§6: wire ids 1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AlgorithmId {
    Euler = 1,
    MaxFlow = 2,
    Mst = 3,
    MaxClique = 4,
    CliqueCount = 5,
}

impl AlgorithmId {
    /// Decode a wire algorithm id, rejecting anything outside `1..=5`.
    pub fn from_wire(id: i32) -> Option<AlgorithmId> {
        match id {
            1 => Some(AlgorithmId::Euler),
            2 => Some(AlgorithmId::MaxFlow),
            3 => Some(AlgorithmId::Mst),
            4 => Some(AlgorithmId::MaxClique),
            5 => Some(AlgorithmId::CliqueCount),
            _ => None,
        }
    }

    pub fn wire_id(self) -> i32 {
        self as i32
    }

    /// Whether this algorithm's request uses the weighted edge-list shape
    /// (§6) rather than the plain adjacency-matrix shape.
    pub fn is_weighted(self) -> bool {
        matches!(self, AlgorithmId::MaxFlow | AlgorithmId::Mst)
    }
}

/// Static metadata about a kernel, independent of any particular graph.
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub description: &'static str,
}

static REGISTRY: OnceLock<[AlgorithmInfo; 5]> = OnceLock::new();

fn registry() -> &'static [AlgorithmInfo; 5] {
    REGISTRY.get_or_init(|| {
        [
            AlgorithmInfo {
                id: AlgorithmId::Euler,
                name: "euler",
                description: "Euler circuit via Hierholzer's algorithm",
            },
            AlgorithmInfo {
                id: AlgorithmId::MaxFlow,
                name: "max_flow",
                description: "Maximum flow via Edmonds-Karp (source 0, sink n-1)",
            },
            AlgorithmInfo {
                id: AlgorithmId::Mst,
                name: "mst",
                description: "Minimum spanning tree via Prim's algorithm",
            },
            AlgorithmInfo {
                id: AlgorithmId::MaxClique,
                name: "max_clique",
                description: "Maximum clique via backtracking search",
            },
            AlgorithmInfo {
                id: AlgorithmId::CliqueCount,
                name: "clique_count",
                description: "Count of cliques of every size",
            },
        ]
    })
}

/// All supported algorithms, in wire-id order.
pub fn available() -> &'static [AlgorithmInfo; 5] {
    registry()
}

pub fn info(id: AlgorithmId) -> &'static AlgorithmInfo {
    registry().iter().find(|a| a.id == id).expect("exhaustive registry")
}

/// Run the kernel named by `id` against `g` and render a human-readable
/// result string, matching the shape of the original's per-algorithm
/// `char*`-returning execute functions (now built with plain string
/// formatting rather than a manually-sized buffer).
pub fn execute(g: &Graph, id: AlgorithmId) -> String {
    match id {
        AlgorithmId::Euler => match algo::find_euler_circuit(g) {
            Some(cycle) => {
                let verts: Vec<String> = cycle.iter().map(|v| v.to_string()).collect();
                format!("Euler circuit found: {}", verts.join(" -> "))
            }
            None => "No Euler circuit exists".to_string(),
        },
        AlgorithmId::MaxFlow => match algo::max_flow_default(g) {
            Ok(result) => format!(
                "Max flow from {} to {}: {}",
                result.source, result.sink, result.value
            ),
            Err(e) => format!("Max flow failed: {e}"),
        },
        AlgorithmId::Mst => {
            let result = algo::mst(g);
            if !result.connected {
                "Graph is not connected: no spanning tree exists".to_string()
            } else {
                let edges: Vec<String> = result
                    .edges
                    .iter()
                    .map(|e| format!("{}-{}(w:{})", e.u, e.v, e.weight))
                    .collect();
                format!(
                    "MST weight {}: {}",
                    result.total_weight,
                    edges.join(", ")
                )
            }
        }
        AlgorithmId::MaxClique => {
            let result = algo::max_clique(g);
            let verts: Vec<String> = result.vertices.iter().map(|v| v.to_string()).collect();
            format!("Max clique (size {}): {{{}}}", result.size(), verts.join(", "))
        }
        AlgorithmId::CliqueCount => {
            let result = algo::count_all_cliques(g);
            let mut parts = Vec::new();
            for (i, &c) in result.counts_by_size.iter().enumerate() {
                if c > 0 {
                    parts.push(format!("size {}: {}", i + 1, c));
                }
            }
            format!(
                "Total cliques: {} (max size {}); {}",
                result.total_cliques,
                result.max_size,
                parts.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_round_trip() {
        for id in [
            AlgorithmId::Euler,
            AlgorithmId::MaxFlow,
            AlgorithmId::Mst,
            AlgorithmId::MaxClique,
            AlgorithmId::CliqueCount,
        ] {
            assert_eq!(AlgorithmId::from_wire(id.wire_id()), Some(id));
        }
    }

    #[test]
    fn unknown_wire_id_is_none() {
        assert_eq!(AlgorithmId::from_wire(0), None);
        assert_eq!(AlgorithmId::from_wire(6), None);
    }

    #[test]
    fn weighted_flags_match_wire_shape() {
        assert!(AlgorithmId::MaxFlow.is_weighted());
        assert!(AlgorithmId::Mst.is_weighted());
        assert!(!AlgorithmId::Euler.is_weighted());
        assert!(!AlgorithmId::MaxClique.is_weighted());
        assert!(!AlgorithmId::CliqueCount.is_weighted());
    }

    #[test]
    fn available_lists_all_five_in_order() {
        let infos = available();
        assert_eq!(infos.len(), 5);
        assert_eq!(infos[0].id, AlgorithmId::Euler);
        assert_eq!(infos[4].id, AlgorithmId::CliqueCount);
    }

    #[test]
    fn execute_euler_on_triangle() {
        let mut g = Graph::create(3).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        let out = execute(&g, AlgorithmId::Euler);
        assert!(out.starts_with("Euler circuit found"));
    }

    #[test]
    fn execute_max_flow_reports_value() {
        let mut g = Graph::create(3).unwrap();
        g.add_weighted_edge(0, 1, 5).unwrap();
        g.add_weighted_edge(1, 2, 3).unwrap();
        let out = execute(&g, AlgorithmId::MaxFlow);
        assert!(out.contains("3"));
    }
}
