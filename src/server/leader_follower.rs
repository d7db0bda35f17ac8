//! Leader/follower thread pool server (§4.8).
//!
//! Grounded on `FinalProject/part8/server.c`: a fixed pool of worker
//! threads shares one listening socket; exactly one worker is ever the
//! "leader" entitled to call `accept`, tracked by `current_leader` under a
//! mutex/condvar pair. On accepting a connection the leader promotes the
//! next worker in line *before* processing the request (`current_leader =
//! (current_leader + 1) % THREAD_POOL_SIZE`, then broadcast) — so the
//! promoted follower can start waiting on `accept` while the old leader is
//! still handling its client, matching the original's ordering rather than
//! promoting only after the request finishes.

use std::io;
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::LeaderFollowerConfig;
use crate::wire;

use super::request::read_request;

/// Vertices per request, matching the tighter `n <= 20` bound in
/// `FinalProject/part8/server.c`'s request handlers (vs. 50 elsewhere).
const MAX_VERTICES: usize = 20;

struct LeaderState {
    current_leader: Mutex<usize>,
    promoted: Condvar,
    pool_size: usize,
}

impl LeaderState {
    fn new(pool_size: usize) -> LeaderState {
        LeaderState {
            current_leader: Mutex::new(0),
            promoted: Condvar::new(),
            pool_size,
        }
    }

    /// Block until `id` is the leader or `shutdown` fires. Returns `false`
    /// if woken by shutdown rather than promotion.
    fn wait_for_leadership(&self, id: usize, shutdown: &AtomicBool) -> bool {
        let mut leader = self.current_leader.lock().unwrap();
        while *leader != id {
            if shutdown.load(Ordering::SeqCst) {
                return false;
            }
            let (next, timeout) = self
                .promoted
                .wait_timeout(leader, Duration::from_millis(50))
                .unwrap();
            leader = next;
            let _ = timeout;
        }
        !shutdown.load(Ordering::SeqCst)
    }

    /// Hand leadership to the next worker in round-robin order.
    fn promote_next(&self) {
        let mut leader = self.current_leader.lock().unwrap();
        *leader = (*leader + 1) % self.pool_size;
        self.promoted.notify_all();
    }
}

/// Runs the leader/follower server until `shutdown` is set.
pub fn run(config: &LeaderFollowerConfig, shutdown: Arc<AtomicBool>) -> io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port))?;
    listener.set_nonblocking(true)?;
    info!(
        "leader/follower server listening on port {} with {} workers",
        config.port, config.thread_pool_size
    );

    let listener = Arc::new(listener);
    let state = Arc::new(LeaderState::new(config.thread_pool_size));
    let total_requests = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..config.thread_pool_size)
        .map(|id| {
            let listener = Arc::clone(&listener);
            let state = Arc::clone(&state);
            let shutdown = Arc::clone(&shutdown);
            let total_requests = Arc::clone(&total_requests);
            thread::spawn(move || worker_loop(id, listener, state, shutdown, total_requests))
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }
    info!("leader/follower server stopped after {} requests", total_requests.load(Ordering::SeqCst));
    Ok(())
}

fn worker_loop(
    id: usize,
    listener: Arc<TcpListener>,
    state: Arc<LeaderState>,
    shutdown: Arc<AtomicBool>,
    total_requests: Arc<AtomicUsize>,
) {
    loop {
        if !state.wait_for_leadership(id, &shutdown) {
            return;
        }

        match listener.accept() {
            Ok((stream, addr)) => {
                debug!("worker {id} accepted connection from {addr} as leader");
                state.promote_next();
                total_requests.fetch_add(1, Ordering::SeqCst);
                process_client(stream);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(20));
            }
            Err(e) => {
                error!("worker {id} accept failed: {e}");
                state.promote_next();
            }
        }
    }
}

/// Handle exactly one request on `stream`, then close it, matching
/// `process_client`'s single `recv`-dispatch-close shape.
fn process_client(mut stream: TcpStream) {
    match read_request(&mut stream, MAX_VERTICES) {
        Ok(req) => {
            let result = crate::strategy::execute(&req.graph, req.algorithm_id);
            if let Err(e) = wire::write_response(&mut stream, 1, &result) {
                warn!("failed to write response: {e}");
            }
        }
        Err(e) => {
            warn!("rejected request: {e}");
            let _ = wire::write_response(&mut stream, 0, "");
        }
    }
}
