use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::net::UdpSocket;
use tokio::sync::broadcast;

use backstat_core::error::{BackstatError, Result};

use crate::app_state::AppState;
use crate::ingest::codec::{decode, Inbound};
use crate::registry::ApplyOutcome;

/// Owns the UDP socket and drives the receive -> decode -> apply loop.
pub struct Ingestor {
    socket: UdpSocket,
    state: AppState,
    recv_buffer_bytes: usize,
}

impl Ingestor {
    /// Bind the configured ingest address. Failing to bind is fatal at startup.
    pub async fn bind(state: AppState) -> Result<Self> {
        let addr = state.cfg().ingest.listen_addr()?;
        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            BackstatError::Io(std::io::Error::new(e.kind(), format!("bind udp {addr}: {e}")))
        })?;
        let recv_buffer_bytes = state.cfg().ingest.recv_buffer_bytes;

        Ok(Self {
            socket,
            state,
            recv_buffer_bytes,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive until shutdown. A socket read error ends the loop with `Err`:
    /// the listening capability is gone and the process should exit.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let mut buf = BytesMut::with_capacity(self.recv_buffer_bytes);
        tracing::info!(addr = ?self.socket.local_addr().ok(), "ingest loop starting");

        loop {
            buf.clear();
            buf.reserve(self.recv_buffer_bytes);

            tokio::select! {
                res = self.socket.recv_buf_from(&mut buf) => {
                    let (n, sender) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            tracing::error!(error = %e, "udp read failed, ingest cannot continue");
                            return Err(BackstatError::Io(e));
                        }
                    };
                    self.handle(&buf[..n], sender);
                }
                _ = shutdown.recv() => {
                    tracing::info!("ingest loop stopping");
                    return Ok(());
                }
            }
        }
    }

    /// Decode and apply a single datagram. Every failure here is local.
    ///
    /// `datagrams` is bumped last, so once it covers a datagram its effect is
    /// visible in the registry.
    fn handle(&self, payload: &[u8], sender: SocketAddr) {
        self.process(payload, sender);
        self.state.metrics().datagrams.inc(&[]);
    }

    fn process(&self, payload: &[u8], sender: SocketAddr) {
        let metrics = self.state.metrics();

        let Inbound { update, sender, bytes_len } = match decode(payload, sender) {
            Ok(inbound) => inbound,
            Err(e) => {
                let reason = match &e {
                    BackstatError::MissingField(_) => "missing_field",
                    _ => "json",
                };
                metrics.decode_errors.inc(&[("reason", reason)]);
                tracing::warn!(%sender, bytes = payload.len(), error = %e, "dropping undecodable datagram");
                return;
            }
        };

        metrics.datagram_bytes.add(&[], bytes_len as u64);

        let outcome = self.state.registry().apply(&update, &sender);
        metrics.updates.inc(&[("outcome", outcome.as_str())]);

        let backend = update.backend.as_str();
        let request_id = update.request_seq;
        match &outcome {
            ApplyOutcome::Started => {
                tracing::debug!(backend, %sender, request_id, uri = %update.uri, "request started");
            }
            ApplyOutcome::Completed { evicted } => {
                tracing::debug!(
                    backend,
                    %sender,
                    request_id,
                    status = update.status,
                    elapsed_secs = update.elapsed_secs,
                    evicted = ?evicted,
                    "request finished"
                );
            }
            ApplyOutcome::DuplicateStart => {
                tracing::warn!(
                    backend,
                    %sender,
                    request_id,
                    "request id reused while still in flight, discarding both"
                );
            }
            ApplyOutcome::UnknownRequest => {
                tracing::warn!(backend, %sender, request_id, "finish for unknown request id");
            }
            ApplyOutcome::UnknownKind(code) => {
                tracing::warn!(backend, %sender, request_id, code, "unknown update type");
            }
        }
    }
}
