//! **graphsvc** is a multi-client graph-algorithm service.
//!
//! The crate is split into a pure core — [`graph::Graph`] plus the five
//! algorithm kernels in [`algo`] and the dispatch table in [`strategy`] — and
//! two independent server architectures built on top of it: [`server::pipeline`]
//! (a staged pipeline with bounded hand-off queues) and
//! [`server::leader_follower`] (a leader-elected thread pool). Both servers
//! share the same graph core and the same wire codec ([`wire`]); only the
//! concurrency architecture differs.

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod queue;
pub mod server;
pub mod strategy;
pub mod wire;

pub use error::{GraphError, WireError};
pub use graph::Graph;
