use std::net::SocketAddr;

use serde::Deserialize;
use backstat_core::error::{BackstatError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub ingest: IngestSection,

    #[serde(default)]
    pub http: HttpSection,

    #[serde(default)]
    pub registry: RegistrySection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            ingest: IngestSection::default(),
            http: HttpSection::default(),
            registry: RegistrySection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BackstatError::UnsupportedVersion);
        }

        self.ingest.validate()?;
        self.http.validate()?;
        self.registry.validate()?;

        Ok(())
    }
}

/// UDP side: where the proxies send their status datagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestSection {
    #[serde(default = "default_ingest_listen")]
    pub listen: String,

    /// Datagrams longer than this are truncated by the socket and fail to decode.
    #[serde(default = "default_recv_buffer_bytes")]
    pub recv_buffer_bytes: usize,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            listen: default_ingest_listen(),
            recv_buffer_bytes: default_recv_buffer_bytes(),
        }
    }
}

impl IngestSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(512..=65536).contains(&self.recv_buffer_bytes) {
            return Err(BackstatError::BadRequest(
                "ingest.recv_buffer_bytes must be between 512 and 65536".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("ingest.listen", &self.listen)
    }
}

/// HTTP side: where dashboards fetch the snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_http_listen")]
    pub listen: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_http_listen(),
        }
    }
}

impl HttpSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("http.listen", &self.listen)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// Completed requests retained per backend, newest first.
    #[serde(default = "default_completed_capacity")]
    pub completed_capacity: usize,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            completed_capacity: default_completed_capacity(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=100_000).contains(&self.completed_capacity) {
            return Err(BackstatError::BadRequest(
                "registry.completed_capacity must be between 1 and 100000".into(),
            ));
        }
        Ok(())
    }
}

fn parse_addr(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|e| BackstatError::BadRequest(format!("{field} must be ip:port ({s:?}): {e}")))
}

fn default_version() -> u32 {
    1
}
fn default_ingest_listen() -> String {
    "127.0.0.1:9463".into()
}
fn default_recv_buffer_bytes() -> usize {
    4096
}
fn default_http_listen() -> String {
    "127.0.0.1:9464".into()
}
fn default_completed_capacity() -> usize {
    500
}
