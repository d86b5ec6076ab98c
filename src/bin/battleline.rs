//! Battleline game server binary
//!
//! Serves session creation, joining and realtime play over websockets.

use battleline::*;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = hosting::Config::parse();
    log(config.log_level)?;
    kys();
    hosting::Server::run(config).await
}
