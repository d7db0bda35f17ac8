//! Entry point for the leader/follower thread pool server (§4.8).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::error;

use graphsvc::config::LeaderFollowerConfig;
use graphsvc::server::leader_follower;

fn main() {
    env_logger::init();
    let config = LeaderFollowerConfig::parse();
    let shutdown = Arc::new(AtomicBool::new(false));

    if let Err(e) = leader_follower::run(&config, shutdown) {
        error!("leader/follower server exited with error: {e}");
        std::process::exit(1);
    }
}
