//! End-to-end wire-protocol tests (§8): a real client connects over loopback
//! TCP to each of the three servers and checks the framed response.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use graphsvc::config::{EulerServerConfig, LeaderFollowerConfig, PipelineConfig};
use graphsvc::server::{euler_text, leader_follower, pipeline};
use graphsvc::wire;

/// The pipeline server hard-codes its port (§6), so only one test may run it
/// at a time; see `pipeline_server_runs_s6_job_then_rejects_bad_request`.
fn spawn_pipeline() {
    let config = PipelineConfig {
        max_queue: 8,
        backlog: 10,
    };
    thread::spawn(move || {
        let _ = pipeline::run(&config, Arc::new(AtomicBool::new(false)));
    });
    thread::sleep(Duration::from_millis(100));
}

fn spawn_leader_follower(port: u16) {
    let config = LeaderFollowerConfig {
        port,
        thread_pool_size: 2,
        backlog: 10,
    };
    thread::spawn(move || {
        let _ = leader_follower::run(&config, Arc::new(AtomicBool::new(false)));
    });
    thread::sleep(Duration::from_millis(100));
}

fn spawn_euler(port: u16) {
    let config = EulerServerConfig { port, backlog: 10 };
    thread::spawn(move || {
        let _ = euler_text::run(&config, Arc::new(AtomicBool::new(false)));
    });
    thread::sleep(Duration::from_millis(100));
}

fn read_general_response(stream: &mut TcpStream) -> (i32, String) {
    let status = wire::read_i32(stream).unwrap();
    let length = wire::read_i32(stream).unwrap() as usize;
    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload).unwrap();
    let mut nul = [0u8; 1];
    stream.read_exact(&mut nul).unwrap();
    assert_eq!(nul[0], 0);
    (status, String::from_utf8(payload).unwrap())
}

/// Covers §8 S6 (a job over the square graph reporting job id, vertex
/// count, and all four algorithm results) and an invalid-request rejection,
/// as two sequential connections to one server instance — the pipeline
/// server hard-codes port 3490, so only one instance can run per test binary.
#[test]
fn pipeline_server_runs_s6_job_then_rejects_bad_request() {
    spawn_pipeline();

    // S6: seed=1, max_weight=10, the square graph 0-1-2-3-0.
    let mut stream = TcpStream::connect(("127.0.0.1", graphsvc::config::DEFAULT_PORT)).unwrap();
    wire::write_i32(&mut stream, 1).unwrap(); // seed
    wire::write_i32(&mut stream, 10).unwrap(); // max_weight
    wire::write_i32(&mut stream, 4).unwrap(); // vertices
    wire::write_i32(&mut stream, 4).unwrap(); // num_edges
    for (u, v, w) in [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)] {
        wire::write_i32(&mut stream, u).unwrap();
        wire::write_i32(&mut stream, v).unwrap();
        wire::write_i32(&mut stream, w).unwrap();
    }

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.contains("Job "));
    assert!(response.contains("Graph: 4 vertices"));
    let mst_pos = response.find("MST:").expect("MST line present");
    let maxflow_pos = response.find("MaxFlow:").expect("MaxFlow line present");
    let clique_pos = response.find("MaxClique:").expect("MaxClique line present");
    let count_pos = response.find("CliqueCount:").expect("CliqueCount line present");
    assert!(mst_pos < maxflow_pos && maxflow_pos < clique_pos && clique_pos < count_pos);

    // Zero vertices is out of range; the connection closes with an error line.
    let mut bad_stream = TcpStream::connect(("127.0.0.1", graphsvc::config::DEFAULT_PORT)).unwrap();
    wire::write_i32(&mut bad_stream, 1).unwrap();
    wire::write_i32(&mut bad_stream, 10).unwrap();
    wire::write_i32(&mut bad_stream, 0).unwrap(); // vertices = 0, invalid
    let mut bad_response = String::new();
    bad_stream.read_to_string(&mut bad_response).unwrap();
    assert!(bad_response.contains("Error"));
}

#[test]
fn leader_follower_server_runs_weighted_mst_request() {
    spawn_leader_follower(18_303);
    let mut stream = TcpStream::connect(("127.0.0.1", 18_303)).unwrap();

    wire::write_i32(&mut stream, 3).unwrap(); // MST
    wire::write_i32(&mut stream, 3).unwrap(); // n = 3
    wire::write_i32(&mut stream, 3).unwrap(); // 3 edges
    for (u, v, w) in [(0, 1, 5), (1, 2, 3), (0, 2, 7)] {
        wire::write_i32(&mut stream, u).unwrap();
        wire::write_i32(&mut stream, v).unwrap();
        wire::write_i32(&mut stream, w).unwrap();
    }

    let (status, payload) = read_general_response(&mut stream);
    assert_eq!(status, 1);
    assert!(payload.contains("MST weight 8"));
}

#[test]
fn leader_follower_server_handles_two_sequential_connections() {
    spawn_leader_follower(18_304);

    for _ in 0..2 {
        let mut stream = TcpStream::connect(("127.0.0.1", 18_304)).unwrap();
        wire::write_i32(&mut stream, 1).unwrap(); // Euler
        wire::write_i32(&mut stream, 1).unwrap(); // n = 1
        wire::write_i32(&mut stream, 0).unwrap(); // 1x1 matrix, no self-loop
        let (status, payload) = read_general_response(&mut stream);
        assert_eq!(status, 1);
        assert!(payload.starts_with("Euler circuit found"));
    }
}

#[test]
fn euler_server_returns_cycle_vertices_s3() {
    spawn_euler(18_305);
    let mut stream = TcpStream::connect(("127.0.0.1", 18_305)).unwrap();

    wire::write_i32(&mut stream, 3).unwrap();
    for v in [0, 1, 1, 1, 0, 1, 1, 1, 0] {
        wire::write_i32(&mut stream, v).unwrap();
    }

    let status = wire::read_i32(&mut stream).unwrap();
    assert_eq!(status, 1);
    let cycle_len = wire::read_i32(&mut stream).unwrap();
    assert_eq!(cycle_len, 4); // 3 edges + return to start.
    let mut cycle = Vec::new();
    for _ in 0..cycle_len {
        cycle.push(wire::read_i32(&mut stream).unwrap());
    }
    assert_eq!(cycle.first(), cycle.last());
}

#[test]
fn euler_server_reports_no_circuit_for_a_path() {
    spawn_euler(18_306);
    let mut stream = TcpStream::connect(("127.0.0.1", 18_306)).unwrap();

    wire::write_i32(&mut stream, 3).unwrap();
    // Path 0-1-2: vertex 0 and 2 have odd degree.
    for v in [0, 1, 0, 1, 0, 1, 0, 1, 0] {
        wire::write_i32(&mut stream, v).unwrap();
    }

    let status = wire::read_i32(&mut stream).unwrap();
    assert_eq!(status, 0);
    let cycle_len = wire::read_i32(&mut stream).unwrap();
    assert_eq!(cycle_len, 0);
}
