//! Command-line surface.
//!
//! The two listen addresses can come from the config file, the flags, or both;
//! flags win.

use std::path::PathBuf;

use clap::Parser;

use backstat_core::error::Result;

use crate::config::{self, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "backstat-server", version, about = "Collects proxy backend status datagrams and serves them as JSON")]
pub struct Cli {
    /// YAML config file. Built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// IP:port to listen for status datagrams on.
    #[arg(long, value_name = "IP:PORT")]
    pub listen: Option<String>,

    /// IP:port to serve the JSON snapshot on.
    #[arg(long, value_name = "IP:PORT")]
    pub serve: Option<String>,
}

impl Cli {
    /// Resolve the effective config: file (or defaults), then flag overrides.
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(listen) = &self.listen {
            cfg.ingest.listen = listen.clone();
        }
        if let Some(serve) = &self.serve {
            cfg.http.listen = serve.clone();
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "backstat-server",
            "--listen",
            "0.0.0.0:19463",
            "--serve",
            "0.0.0.0:19464",
        ]);
        let cfg = cli.resolve_config().unwrap();
        assert_eq!(cfg.ingest.listen, "0.0.0.0:19463");
        assert_eq!(cfg.http.listen, "0.0.0.0:19464");
        assert_eq!(cfg.registry.completed_capacity, 500);
    }

    #[test]
    fn bad_flag_address_is_rejected() {
        let cli = Cli::parse_from(["backstat-server", "--serve", "localhost"]);
        let err = cli.resolve_config().unwrap_err();
        assert_eq!(err.code().as_str(), "BAD_REQUEST");
    }
}
