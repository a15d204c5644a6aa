//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use backstat_core::error::{BackstatError, Result};

pub use schema::{HttpSection, IngestSection, RegistrySection, ServerConfig};

pub fn load_from_file(path: &Path) -> Result<ServerConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        BackstatError::Io(std::io::Error::new(
            e.kind(),
            format!("read config {}: {e}", path.display()),
        ))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| BackstatError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
