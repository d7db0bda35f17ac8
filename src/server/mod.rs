//! The two server architectures sharing the graph core and wire codec (§4.7, §4.8).

pub mod euler_text;
pub mod leader_follower;
pub mod pipeline;

/// Shared request-shape parsing for the general-purpose wire protocol (§6),
/// used by both [`pipeline`] and [`leader_follower`] — the two differ only
/// in how a parsed request is scheduled onto worker threads, not in how it
/// is decoded off the wire.
pub mod request {
    use std::io::Read;

    use crate::error::WireError;
    use crate::graph::Graph;
    use crate::strategy::AlgorithmId;
    use crate::wire;

    /// A fully decoded client request: which algorithm to run, and a graph
    /// built from whichever of the two wire shapes that algorithm uses.
    pub struct GraphRequest {
        pub algorithm_id: AlgorithmId,
        pub graph: Graph,
    }

    /// Read and decode one request, enforcing `max_vertices` on the
    /// declared vertex count (§6: 50 for the general servers, 20 for the
    /// leader/follower pool, per their respective original bounds).
    pub fn read_request<R: Read>(r: &mut R, max_vertices: usize) -> Result<GraphRequest, WireError> {
        let raw_id = wire::read_i32(r)?;
        let algorithm_id = AlgorithmId::from_wire(raw_id).ok_or(WireError::UnknownAlgorithm(raw_id))?;

        let graph = if algorithm_id.is_weighted() {
            read_weighted_graph(r, max_vertices)?
        } else {
            read_unweighted_graph(r, max_vertices)?
        };

        Ok(GraphRequest { algorithm_id, graph })
    }

    /// `[n, num_edges, (u, v, weight) * num_edges]` — grounded on
    /// `process_mst_weighted_request` in `OS_project/part7/server.c`. Each
    /// edge is added at the default weight and then has its weight patched
    /// in a second pass, but only for an edge `add_edge` actually accepted
    /// (§9's "asymmetric weight update", preserved as specified — see
    /// DESIGN.md).
    fn read_weighted_graph<R: Read>(r: &mut R, max_vertices: usize) -> Result<Graph, WireError> {
        let n = wire::read_i32(r)?;
        if n <= 0 || n as usize > max_vertices {
            return Err(WireError::InvalidRequest("vertex count out of range"));
        }
        let n = n as usize;

        let num_edges = wire::read_i32(r)?;
        if num_edges < 0 || num_edges as usize > n * n {
            return Err(WireError::InvalidRequest("edge count out of range"));
        }

        let mut graph = Graph::create(n).ok_or(WireError::InvalidRequest("zero vertices"))?;
        for _ in 0..num_edges {
            let u = wire::read_i32(r)?;
            let v = wire::read_i32(r)?;
            let weight = wire::read_i32(r)?;
            if u < 0 || v < 0 || u as usize >= n || v as usize >= n {
                return Err(WireError::InvalidRequest("edge endpoint out of range"));
            }
            let (u, v) = (u as usize, v as usize);
            // Ignore a duplicate edge (already linked by an earlier entry in
            // this same request) rather than failing the whole request; the
            // weight patch only runs for an edge this call actually added, so
            // a duplicate's weight silently stays at whatever the first
            // successful add set it to.
            if graph.add_edge(u, v).is_ok() {
                graph.set_edge_weight(u, v, weight);
            }
        }
        Ok(graph)
    }

    /// `[n, adjacency_matrix (n*n ints, row-major)]` — grounded on
    /// `process_unweighted_request`, which scans only the upper triangle
    /// (`for j = i..n`) of the declared matrix.
    fn read_unweighted_graph<R: Read>(r: &mut R, max_vertices: usize) -> Result<Graph, WireError> {
        let n = wire::read_i32(r)?;
        if n <= 0 || n as usize > max_vertices {
            return Err(WireError::InvalidRequest("vertex count out of range"));
        }
        let n = n as usize;

        let matrix = wire::read_i32_vec(r, n * n)?;
        let mut graph = Graph::create(n).ok_or(WireError::InvalidRequest("zero vertices"))?;
        for i in 0..n {
            for j in i..n {
                if matrix[i * n + j] != 0 {
                    // A duplicate edge reported by both triangular halves,
                    // or twice within the triangle, is simply skipped.
                    let _ = graph.add_edge(i, j);
                }
            }
        }
        Ok(graph)
    }
}
