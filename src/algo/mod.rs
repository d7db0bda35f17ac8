//! The five graph-algorithm kernels (§4), each a thin pure function over
//! [`crate::graph::Graph`] with no knowledge of the wire protocol or either
//! server architecture.

pub mod bron_kerbosch;
pub mod clique;
pub mod euler;
pub mod max_flow;
pub mod mst;

pub use bron_kerbosch::find_all_maximal_cliques;
pub use clique::{count_all_cliques, count_cliques_of_size, max_clique, CliqueCountResult, MaxCliqueResult};
pub use euler::{find_euler_circuit, has_euler_circuit};
pub use max_flow::{max_flow, max_flow_default, MaxFlowResult};
pub use mst::{mst, MstEdge, MstResult};
