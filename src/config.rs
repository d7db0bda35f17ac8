//! Command-line configuration for the three server binaries (§4.7, §4.8, §4.2).
//!
//! Grounded on `WFBFA-SNOMOR/Paths/src/main.rs`'s use of `clap`'s derive API
//! for a small CLI surface; the defaults themselves (port, queue depth,
//! thread pool size) come from the `#define`s at the top of
//! `FinalProject/part11/server_pipeline.c` and `FinalProject/part8/server.c`.

use clap::Parser;

/// Default TCP port shared by all three servers, matching `PORT 3490` in the
/// original sources.
pub const DEFAULT_PORT: u16 = 3490;

/// Depth of each of the four pipeline hand-off queues (`MAX_QUEUE` in
/// `server_pipeline.c`).
pub const DEFAULT_MAX_QUEUE: usize = 32;

/// Backlog passed to `listen` (`BACKLOG` in `server_pipeline.c`).
pub const DEFAULT_BACKLOG: i32 = 10;

/// Number of worker threads in the leader/follower pool (`THREAD_POOL_SIZE`
/// in `FinalProject/part8/server.c`).
pub const DEFAULT_THREAD_POOL_SIZE: usize = 4;

/// Staged pipeline server configuration.
///
/// No `--port` flag: the pipeline server always binds [`DEFAULT_PORT`] (§6).
#[derive(Debug, Parser)]
#[command(name = "pipeline-server", about = "Staged pipeline graph-algorithm server")]
pub struct PipelineConfig {
    /// Capacity of each inter-stage queue.
    #[arg(long, default_value_t = DEFAULT_MAX_QUEUE)]
    pub max_queue: usize,

    /// `listen(2)` backlog.
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: i32,
}

impl Default for PipelineConfig {
    fn default() -> PipelineConfig {
        PipelineConfig {
            max_queue: DEFAULT_MAX_QUEUE,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

/// Leader/follower thread pool server configuration.
#[derive(Debug, Parser)]
#[command(name = "leader-follower-server", about = "Leader/follower graph-algorithm server")]
pub struct LeaderFollowerConfig {
    /// TCP port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of worker threads in the pool.
    #[arg(long, default_value_t = DEFAULT_THREAD_POOL_SIZE)]
    pub thread_pool_size: usize,

    /// `listen(2)` backlog.
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: i32,
}

impl Default for LeaderFollowerConfig {
    fn default() -> LeaderFollowerConfig {
        LeaderFollowerConfig {
            port: DEFAULT_PORT,
            thread_pool_size: DEFAULT_THREAD_POOL_SIZE,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

/// Euler-only text server configuration.
#[derive(Debug, Parser)]
#[command(name = "euler-server", about = "Single-purpose Euler circuit server")]
pub struct EulerServerConfig {
    /// TCP port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// `listen(2)` backlog.
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: i32,
}

impl Default for EulerServerConfig {
    fn default() -> EulerServerConfig {
        EulerServerConfig {
            port: DEFAULT_PORT,
            backlog: DEFAULT_BACKLOG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_constants() {
        assert_eq!(DEFAULT_PORT, 3490);
        assert_eq!(PipelineConfig::default().max_queue, 32);
        assert_eq!(LeaderFollowerConfig::default().thread_pool_size, 4);
    }
}
