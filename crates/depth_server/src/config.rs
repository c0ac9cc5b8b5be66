use clap::Parser;
use depth_core::BatchMode;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration. Every flag can also be given through its
/// environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "depth-server")]
#[command(about = "Serve the depth chart over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "DEPTH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5210)]
    pub port: u16,

    /// Seed roster (JSON array of players) loaded at startup
    #[arg(long, env = "DEPTH_SEED_PATH")]
    pub seed: Option<PathBuf>,

    /// Persist the roster to this JSON snapshot after every change
    #[arg(long, env = "DEPTH_SNAPSHOT_PATH")]
    pub snapshot: Option<PathBuf>,

    /// How POST /players/reorder treats unknown ids: lenient or strict
    #[arg(long, env = "DEPTH_BATCH_MODE", default_value = "lenient", value_parser = parse_batch_mode)]
    pub batch_mode: BatchMode,

    /// Emit logs as JSON lines
    #[arg(long, env = "DEPTH_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Allow cross-origin requests from any origin
    #[arg(long, env = "DEPTH_CORS", default_value_t = true, action = clap::ArgAction::Set)]
    pub cors: bool,
}

fn parse_batch_mode(s: &str) -> Result<BatchMode, String> {
    s.parse::<BatchMode>().map_err(|e| e.to_string())
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["depth-server"]).unwrap();
        assert_eq!(config.port, 5210);
        assert_eq!(config.batch_mode, BatchMode::Lenient);
        assert!(config.cors);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:5210");
    }

    #[test]
    fn test_flags() {
        let config = ServerConfig::try_parse_from([
            "depth-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--batch-mode",
            "strict",
            "--cors",
            "false",
        ])
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.batch_mode, BatchMode::Strict);
        assert!(!config.cors);
    }

    #[test]
    fn test_rejects_unknown_batch_mode() {
        assert!(ServerConfig::try_parse_from(["depth-server", "--batch-mode", "atomic"]).is_err());
    }
}
