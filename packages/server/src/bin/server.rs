//! Moderated WebSocket chat room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parley-server -- --port 8080 --blocklist "bad word"
//! ```

use clap::Parser;
use parley_server::ServerConfig;
use parley_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = parley_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
