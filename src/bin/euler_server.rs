//! Entry point for the single-purpose Euler circuit server (§4.2).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::error;

use graphsvc::config::EulerServerConfig;
use graphsvc::server::euler_text;

fn main() {
    env_logger::init();
    let config = EulerServerConfig::parse();
    let shutdown = Arc::new(AtomicBool::new(false));

    if let Err(e) = euler_text::run(&config, shutdown) {
        error!("euler server exited with error: {e}");
        std::process::exit(1);
    }
}
