//! Staged pipeline server: four bounded queues, one worker per stage (§4.7).
//!
//! Unlike the leader/follower and Euler-text servers, a pipeline job is not
//! dispatched to a single algorithm by wire id — every job runs all four
//! kernels in a fixed order (MST, MaxFlow, MaxClique, CliqueCount) and the
//! final stage composes one combined text report (§3, §6, §8 S6).
//!
//! Grounded on the constants visible in
//! `FinalProject/part11/server_pipeline.c` (`PORT 3490`, `BACKLOG 10`,
//! `MAX_QUEUE 32`) and on spec.md §4.7's description of the architecture
//! itself: an acceptor spawns a short-lived per-connection task that decodes
//! the request and pushes a [`Job`] onto `Q1`; stages 2-4 each own one
//! persistent worker thread and hand the same job to the next queue; the
//! last stage writes the response and closes the connection. Every stage
//! blocks on its input queue rather than polling, using
//! [`crate::queue::BoundedQueue`].

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use log::{debug, error, info, warn};

use crate::config::{self, PipelineConfig};
use crate::error::WireError;
use crate::graph::Graph;
use crate::wire;

/// Vertices per request (§6: `vertices ∈ [1, 50]`).
const MAX_VERTICES: usize = 50;

/// Edge triplets accepted per request (§6: "up to 1000 edges").
const MAX_EDGES: usize = 1000;

/// A job as it moves through the four stage queues (§3): one record, owned
/// by whichever stage currently holds it, augmented with that stage's
/// result string before being handed to the next queue.
struct Job {
    job_id: u64,
    stream: TcpStream,
    vertices: usize,
    graph: Graph,
    start_time: Instant,
    mst_str: Option<String>,
    maxflow_str: Option<String>,
    clique_str: Option<String>,
    count_str: Option<String>,
}

type Q = crate::queue::BoundedQueue<Job>;

/// Job ids are drawn from a mutex-protected counter (§4.7, §5), not an
/// atomic, matching the documented design.
struct JobIdCounter {
    next: Mutex<u64>,
}

impl JobIdCounter {
    fn new() -> JobIdCounter {
        JobIdCounter { next: Mutex::new(1) }
    }

    fn next_id(&self) -> u64 {
        let mut next = self.next.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

/// Read the pipeline wire request: `[seed, max_weight, vertices, num_edges]`
/// followed by `num_edges` `(u, v, weight)` triplets.
///
/// `seed` and `max_weight` are accepted and logged but play no role in
/// constructing the graph: the client supplies the edges (and their
/// weights) explicitly, so there is nothing left for them to parameterize
/// on the server side (§9 open question, resolved in DESIGN.md). `num_edges`
/// gives the variable-length edge block an explicit length prefix, the same
/// framing convention the weighted request shape already uses.
fn read_pipeline_request<R: Read>(r: &mut R) -> Result<(usize, Graph), WireError> {
    let seed = wire::read_i32(r)?;
    let max_weight = wire::read_i32(r)?;
    debug!("pipeline request: seed={seed} max_weight={max_weight}");

    let vertices = wire::read_i32(r)?;
    if vertices < 1 || vertices as usize > MAX_VERTICES {
        return Err(WireError::InvalidRequest("vertex count out of range"));
    }
    let n = vertices as usize;

    let num_edges = wire::read_i32(r)?;
    if num_edges < 0 || num_edges as usize > MAX_EDGES {
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
        if graph.add_edge(u, v).is_ok() {
            graph.set_edge_weight(u, v, weight);
        }
    }
    Ok((n, graph))
}

/// Acceptor-spawned per-connection task (§4.7): reads the wire header,
/// builds the `Graph`, allocates a `Job`, and pushes it to `Q1`. Short-lived
/// by design — one thread per connection, not a persistent stage worker.
fn handle_connection(mut stream: TcpStream, peer: String, counter: Arc<JobIdCounter>, q1: Arc<Q>) {
    match read_pipeline_request(&mut stream) {
        Ok((vertices, graph)) => {
            let job = Job {
                job_id: counter.next_id(),
                stream,
                vertices,
                graph,
                start_time: Instant::now(),
                mst_str: None,
                maxflow_str: None,
                clique_str: None,
                count_str: None,
            };
            debug!("job {} decoded from {peer} ({vertices} vertices)", job.job_id);
            if q1.push(job).is_err() {
                warn!("pipeline shutting down, dropping decoded job from {peer}");
            }
        }
        Err(e) => {
            warn!("rejected pipeline request from {peer}: {e}");
            let _ = writeln!(stream, "Error: {e}");
        }
    }
}

fn spawn_mst_stage(q_in: Arc<Q>, q_out: Arc<Q>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("mst stage started");
        while let Some(mut job) = q_in.pop() {
            let result = crate::algo::mst(&job.graph);
            job.mst_str = Some(if !result.connected {
                "MST: graph is not connected".to_string()
            } else {
                let edges: Vec<String> = result
                    .edges
                    .iter()
                    .map(|e| format!("{}-{}(w:{})", e.u, e.v, e.weight))
                    .collect();
                format!("MST: weight {} [{}]", result.total_weight, edges.join(", "))
            });
            debug!("job {} finished mst stage", job.job_id);
            if q_out.push(job).is_err() {
                break;
            }
        }
        info!("mst stage stopped");
    })
}

fn spawn_maxflow_stage(q_in: Arc<Q>, q_out: Arc<Q>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("maxflow stage started");
        while let Some(mut job) = q_in.pop() {
            job.maxflow_str = Some(match crate::algo::max_flow_default(&job.graph) {
                Ok(result) => format!(
                    "MaxFlow: value {} (source {}, sink {})",
                    result.value, result.source, result.sink
                ),
                Err(e) => format!("MaxFlow: failed ({e})"),
            });
            debug!("job {} finished maxflow stage", job.job_id);
            if q_out.push(job).is_err() {
                break;
            }
        }
        info!("maxflow stage stopped");
    })
}

fn spawn_maxclique_stage(q_in: Arc<Q>, q_out: Arc<Q>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("maxclique stage started");
        while let Some(mut job) = q_in.pop() {
            let result = crate::algo::max_clique(&job.graph);
            let verts: Vec<String> = result.vertices.iter().map(|v| v.to_string()).collect();
            job.clique_str = Some(format!("MaxClique: size {} {{{}}}", result.size(), verts.join(", ")));
            debug!("job {} finished maxclique stage", job.job_id);
            if q_out.push(job).is_err() {
                break;
            }
        }
        info!("maxclique stage stopped");
    })
}

/// Final stage: runs clique counting, composes the combined text response
/// (§6, §8 S6), writes it, and closes the connection — the stage that owns
/// teardown (§3: "the final stage owns teardown").
fn spawn_cliquecount_respond_stage(q_in: Arc<Q>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("cliquecount stage started");
        while let Some(mut job) = q_in.pop() {
            let result = crate::algo::count_all_cliques(&job.graph);
            let mut parts = Vec::new();
            for (i, &c) in result.counts_by_size.iter().enumerate() {
                if c > 0 {
                    parts.push(format!("size {}: {}", i + 1, c));
                }
            }
            job.count_str = Some(format!(
                "CliqueCount: total {} (max size {}) [{}]",
                result.total_cliques,
                result.max_size,
                parts.join(", ")
            ));
            debug!("job {} finished cliquecount stage, responding", job.job_id);

            let elapsed = job.start_time.elapsed().as_secs_f64();
            let response = format!(
                "Job {}\nGraph: {} vertices\nProcessing time: {elapsed:.2} seconds\n{}\n{}\n{}\n{}\n",
                job.job_id,
                job.vertices,
                job.mst_str.as_deref().unwrap_or(""),
                job.maxflow_str.as_deref().unwrap_or(""),
                job.clique_str.as_deref().unwrap_or(""),
                job.count_str.as_deref().unwrap_or(""),
            );
            if let Err(e) = job.stream.write_all(response.as_bytes()) {
                warn!("failed to write response for job {}: {e}", job.job_id);
            }
            // `job.stream` drops here, closing the connection.
        }
        info!("cliquecount stage stopped");
    })
}

/// Runs the pipeline server until `shutdown` is set, blocking the calling
/// thread. Intended to be driven from a `main` that also installs a signal
/// handler flipping `shutdown`.
///
/// Always binds [`config::DEFAULT_PORT`] — the pipeline server hard-codes
/// its port rather than taking a `--port` flag (§6).
pub fn run(config: &PipelineConfig, shutdown: Arc<AtomicBool>) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config::DEFAULT_PORT))?;
    info!("pipeline server listening on port {}", config::DEFAULT_PORT);

    let q1: Arc<Q> = Arc::new(crate::queue::BoundedQueue::new(config.max_queue));
    let q2: Arc<Q> = Arc::new(crate::queue::BoundedQueue::new(config.max_queue));
    let q3: Arc<Q> = Arc::new(crate::queue::BoundedQueue::new(config.max_queue));
    let q4: Arc<Q> = Arc::new(crate::queue::BoundedQueue::new(config.max_queue));

    let mst_handle = spawn_mst_stage(Arc::clone(&q1), Arc::clone(&q2));
    let maxflow_handle = spawn_maxflow_stage(Arc::clone(&q2), Arc::clone(&q3));
    let maxclique_handle = spawn_maxclique_stage(Arc::clone(&q3), Arc::clone(&q4));
    let respond_handle = spawn_cliquecount_respond_stage(Arc::clone(&q4));

    let counter = Arc::new(JobIdCounter::new());
    let mut connection_handles = Vec::new();

    listener.set_nonblocking(true)?;
    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("accepted connection from {addr}");
                let counter = Arc::clone(&counter);
                let q1 = Arc::clone(&q1);
                connection_handles.push(thread::spawn(move || {
                    handle_connection(stream, addr.to_string(), counter, q1)
                }));
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(std::time::Duration::from_millis(20));
            }
            Err(e) => {
                error!("accept failed: {e}");
                break;
            }
        }
    }

    for handle in connection_handles {
        let _ = handle.join();
    }
    q1.close();
    q2.close();
    q3.close();
    q4.close();
    let _ = mst_handle.join();
    let _ = maxflow_handle.join();
    let _ = maxclique_handle.join();
    let _ = respond_handle.join();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn s1_square_request() -> Vec<u8> {
        let mut buf = Vec::new();
        crate::wire::write_i32(&mut buf, 1).unwrap(); // seed
        crate::wire::write_i32(&mut buf, 10).unwrap(); // max_weight
        crate::wire::write_i32(&mut buf, 4).unwrap(); // vertices
        crate::wire::write_i32(&mut buf, 4).unwrap(); // num_edges
        for (u, v, w) in [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)] {
            crate::wire::write_i32(&mut buf, u).unwrap();
            crate::wire::write_i32(&mut buf, v).unwrap();
            crate::wire::write_i32(&mut buf, w).unwrap();
        }
        buf
    }

    #[test]
    fn decode_accepts_s1_square_graph() {
        let mut cursor = Cursor::new(s1_square_request());
        let (vertices, graph) = read_pipeline_request(&mut cursor).unwrap();
        assert_eq!(vertices, 4);
        assert_eq!(graph.len(), 4);
        assert!(graph.contains_edge(0, 1));
        assert!(graph.contains_edge(3, 0));
    }

    #[test]
    fn decode_rejects_vertex_count_out_of_range() {
        let mut buf = Vec::new();
        crate::wire::write_i32(&mut buf, 1).unwrap();
        crate::wire::write_i32(&mut buf, 10).unwrap();
        crate::wire::write_i32(&mut buf, 0).unwrap(); // 0 vertices, invalid
        let mut cursor = Cursor::new(buf);
        let err = read_pipeline_request(&mut cursor).unwrap_err();
        assert!(matches!(err, WireError::InvalidRequest(_)));
    }

    #[test]
    fn decode_rejects_too_many_edges() {
        let mut buf = Vec::new();
        crate::wire::write_i32(&mut buf, 1).unwrap();
        crate::wire::write_i32(&mut buf, 10).unwrap();
        crate::wire::write_i32(&mut buf, 4).unwrap();
        crate::wire::write_i32(&mut buf, (MAX_EDGES + 1) as i32).unwrap();
        let mut cursor = Cursor::new(buf);
        let err = read_pipeline_request(&mut cursor).unwrap_err();
        assert!(matches!(err, WireError::InvalidRequest(_)));
    }

    #[test]
    fn job_id_counter_is_monotonic() {
        let counter = JobIdCounter::new();
        let first = counter.next_id();
        let second = counter.next_id();
        assert_eq!(second, first + 1);
    }
}
