//! Single-purpose Euler circuit server (§4.2 adapter).
//!
//! Grounded on `FinalProject/part6/euler_server.c`: a narrower wire contract
//! than the general algorithm servers — the request is just
//! `[n, adjacency_matrix]` with no algorithm id, the graph is always built
//! from the upper triangle of the matrix (`for j = i..n`, logging a warning
//! on a duplicate lower-triangle entry rather than failing the request),
//! and the response is `[status, cycle_length, cycle_vertices...]` with no
//! trailing NUL — unlike [`crate::wire::write_response`]'s general framing.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::algo;
use crate::config::EulerServerConfig;
use crate::error::WireError;
use crate::graph::Graph;
use crate::wire;

/// Matches `process_request`'s `n` bound: `0 < n <= 50`.
const MAX_VERTICES: usize = 50;

fn read_matrix_graph<R: Read>(r: &mut R) -> Result<Graph, WireError> {
    let n = wire::read_i32(r)?;
    if n <= 0 || n as usize > MAX_VERTICES {
        return Err(WireError::InvalidRequest("vertex count out of range"));
    }
    let n = n as usize;

    let matrix = wire::read_i32_vec(r, n * n)?;
    let mut graph = Graph::create(n).ok_or(WireError::InvalidRequest("zero vertices"))?;
    for i in 0..n {
        for j in i..n {
            if matrix[i * n + j] != 0 {
                if graph.add_edge(i, j).is_err() && i != j {
                    warn!("duplicate edge ({i}, {j}) in request, ignoring");
                }
            } else if matrix[j * n + i] != 0 && i != j {
                warn!("edge ({j}, {i}) present only below the diagonal, ignoring");
            }
        }
    }
    Ok(graph)
}

fn send_euler_response<W: Write>(w: &mut W, status: i32, cycle: &[usize]) -> io::Result<()> {
    w.write_all(&status.to_ne_bytes())?;
    w.write_all(&(cycle.len() as i32).to_ne_bytes())?;
    for &v in cycle {
        w.write_all(&(v as i32).to_ne_bytes())?;
    }
    Ok(())
}

fn handle_client(mut stream: TcpStream) {
    match read_matrix_graph(&mut stream) {
        Ok(graph) => match algo::find_euler_circuit(&graph) {
            Some(cycle) => {
                if let Err(e) = send_euler_response(&mut stream, 1, &cycle) {
                    warn!("failed to write euler response: {e}");
                }
            }
            None => {
                if let Err(e) = send_euler_response(&mut stream, 0, &[]) {
                    warn!("failed to write euler response: {e}");
                }
            }
        },
        Err(e) => {
            warn!("rejected request: {e}");
            let _ = send_euler_response(&mut stream, 0, &[]);
        }
    }
}

/// Runs the Euler-only server until `shutdown` is set, one thread per
/// connection (no pipeline, no thread pool — the original is a small
/// single-purpose demo server, not one of the two architectures under
/// study).
pub fn run(config: &EulerServerConfig, shutdown: Arc<AtomicBool>) -> io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port))?;
    listener.set_nonblocking(true)?;
    info!("euler server listening on port {}", config.port);

    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("accepted connection from {addr}");
                thread::spawn(move || handle_client(stream));
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                error!("accept failed: {e}");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_graph_from_upper_triangle_only() {
        let mut buf = Vec::new();
        wire::write_i32(&mut buf, 3).unwrap();
        // Upper triangle has edges (0,1) and (1,2); lower triangle mirrors them.
        let matrix = [0, 1, 0, 1, 0, 1, 0, 1, 0];
        for v in matrix {
            wire::write_i32(&mut buf, v).unwrap();
        }
        let mut cursor = Cursor::new(buf);
        let graph = read_matrix_graph(&mut cursor).unwrap();
        assert!(graph.contains_edge(0, 1));
        assert!(graph.contains_edge(1, 2));
        assert!(!graph.contains_edge(0, 2));
    }

    #[test]
    fn rejects_vertex_count_out_of_range() {
        let mut buf = Vec::new();
        wire::write_i32(&mut buf, 0).unwrap();
        let mut cursor = Cursor::new(buf);
        assert!(read_matrix_graph(&mut cursor).is_err());
    }

    #[test]
    fn response_framing_has_no_trailing_nul() {
        let mut buf = Vec::new();
        send_euler_response(&mut buf, 1, &[0, 1, 0]).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&1i32.to_ne_bytes());
        expected.extend_from_slice(&3i32.to_ne_bytes());
        for v in [0i32, 1, 0] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(buf, expected);
    }
}
