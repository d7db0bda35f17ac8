//! Error kinds at the boundary of the graph core and the wire codec.
//!
//! See spec.md §7: the C original signals these as negative return codes or
//! `NULL` pointers. Here they are ordinary `Result` errors; server code maps
//! both enums down to the wire-level `status = 0` response rather than
//! unwrapping anything derived from client input.

use thiserror::Error;

/// Failure modes of [`crate::graph::Graph`] construction and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index fell outside `[0, n)`.
    #[error("vertex index out of bounds")]
    OutOfBounds,

    /// The allocator failed to grow an adjacency list.
    ///
    /// Unreachable in practice: `Vec` growth failure aborts the process via
    /// the global allocator rather than returning. The variant is kept for
    /// wire/API symmetry with the original C `graph_add_weighted_edge`,
    /// which could observe `malloc` failure; see DESIGN.md.
    #[error("allocation failure")]
    OutOfMemory,

    /// The edge (or, for a self-loop, a second self-loop) already exists.
    #[error("duplicate edge")]
    Duplicate,

    /// `source == sink`, or either is out of range, for a flow query.
    #[error("invalid source/sink for max flow")]
    InvalidArg,
}

/// Failure modes of decoding a client request off the wire.
#[derive(Debug, Error)]
pub enum WireError {
    /// Fewer bytes arrived than the declared shape requires.
    #[error("short read: need {needed} bytes, got {got}")]
    ShortRead { needed: usize, got: usize },

    /// The declared vertex count or edge count falls outside the protocol's bound.
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    /// An unrecognised algorithm id.
    #[error("unknown algorithm id {0}")]
    UnknownAlgorithm(i32),

    /// Underlying transport failure (reset, broken pipe, ...).
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}
