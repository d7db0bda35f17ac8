//! Entry point for the staged pipeline server (§4.7).

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::error;

use graphsvc::config::PipelineConfig;
use graphsvc::server::pipeline;

fn main() {
    env_logger::init();
    let config = PipelineConfig::parse();
    let shutdown = Arc::new(AtomicBool::new(false));

    if let Err(e) = pipeline::run(&config, shutdown) {
        error!("pipeline server exited with error: {e}");
        std::process::exit(1);
    }
}
