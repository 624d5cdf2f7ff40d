//! # Index Node Binary
//!
//! Reads one JSON request per line on stdin and writes one JSON response per
//! line on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use index_node::{handle_line, init_logging, IndexNode, NodeConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Load configuration from the optional path argument and the environment.
fn load_config() -> Result<NodeConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => NodeConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => NodeConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config.telemetry)?;

    let (node, _ledger) = IndexNode::with_in_memory_ledger(&config);
    info!(
        accounts = config.genesis_balances.len(),
        "index node ready; reading requests from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let response = handle_line(&node, &line);
                let mut encoded = serde_json::to_vec(&response)?;
                encoded.push(b'\n');
                stdout.write_all(&encoded).await?;
                stdout.flush().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted; shutting down");
                break;
            }
        }
    }

    info!(stats = ?node.metering_stats(), "index node stopped");
    Ok(())
}
