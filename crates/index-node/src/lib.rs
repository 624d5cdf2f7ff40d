//! # Index Node
//!
//! Hosts the Ledger Index components behind a line-oriented JSON interface.
//!
//! - `config/` - TOML configuration with `LI_*` environment overrides
//! - `telemetry/` - `tracing` subscriber setup
//! - `node/` - [`IndexNode`], component wiring and the pause gate
//! - `api/` - request routing and response encoding
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file given as first argument, else defaults)
//! 2. Apply environment overrides and validate
//! 3. Install logging
//! 4. Seed the in-memory ledger from `genesis_balances`
//! 5. Serve one request per stdin line until EOF or Ctrl+C

pub mod api;
pub mod config;
pub mod errors;
pub mod node;
pub mod telemetry;

pub use api::{dispatch, handle_line, handle_request, NodeRequest, NodeResponse};
pub use config::{
    ConfigError, GenesisBalance, NodeConfig, TelemetryConfig, DEFAULT_OWNER, DEFAULT_RESULT_STORE,
    DEFAULT_TREASURY,
};
pub use errors::NodeError;
pub use node::IndexNode;
pub use telemetry::{init_logging, TelemetryError};
