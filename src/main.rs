mod aggregate;
mod charts;
mod dataset;
mod explorer;
mod pages;
mod server;

use clap::Parser;
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::dataset::Dataset;
use crate::server::Site;

#[derive(Parser)]
#[command(about = "Interactive dashboard over the Istanbul shopping-malls transaction dataset")]
struct Params {
    /// CSV file path or http(s) URL of the transactions feed
    #[arg(long)]
    data: String,

    /// Socket address the web server binds to
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

pub fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

fn main() {
    env_logger::init();
    let params = Params::parse();
    if let Err(e) = run(params) {
        error!("dashboard failed to start: {}", e);
        std::process::exit(1);
    }
}

fn run(params: Params) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let dataset = Dataset::load(&params.data)?;
    info!(
        "loaded {} transactions in {}ms",
        dataset.len(),
        start.elapsed().as_millis()
    );

    // static pages are built here, once; only the explorer re-renders
    let site = Arc::new(Site::new(dataset));

    // the blocking load above must finish before any async runtime exists
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(site, params.listen))?;
    Ok(())
}
