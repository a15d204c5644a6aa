//! Process wiring: bind both listeners, run ingest and HTTP side by side.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use backstat_core::error::{BackstatError, Result};

use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::ingest::Ingestor;
use crate::lifecycle::Shutdown;
use crate::router;

pub struct Server {
    state: AppState,
    ingestor: Ingestor,
    listener: TcpListener,
}

impl Server {
    /// Bind the UDP socket, then the HTTP listener. Either failing is fatal.
    pub async fn bind(cfg: ServerConfig) -> Result<Self> {
        let http_addr = cfg.http.listen_addr()?;
        let state = AppState::new(cfg);

        let ingestor = Ingestor::bind(state.clone()).await?;
        let listener = TcpListener::bind(http_addr).await.map_err(|e| {
            BackstatError::Io(std::io::Error::new(e.kind(), format!("bind http {http_addr}: {e}")))
        })?;

        Ok(Self {
            state,
            ingestor,
            listener,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ingest_addr(&self) -> Result<SocketAddr> {
        self.ingestor.local_addr()
    }

    pub fn http_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run until `signal` resolves or the ingest loop fails.
    ///
    /// A fatal ingest error still drains the HTTP side before being returned.
    pub async fn run<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Server {
            state,
            ingestor,
            listener,
        } = self;

        let ingest_addr = ingestor.local_addr()?;
        let shutdown = Shutdown::new();
        let ingest = ingestor.run(shutdown.subscribe());

        tracing::info!(%ingest_addr, "ingest socket bound");
        serve(state, listener, shutdown, ingest, signal).await
    }
}

/// Drive `ingest` next to the HTTP server on `listener`.
///
/// Whichever of `signal` or `ingest` finishes first starts the shutdown: the
/// process is marked draining, `shutdown` is triggered, and both tasks are
/// awaited. The ingest result is returned.
async fn serve<I, F>(
    state: AppState,
    listener: TcpListener,
    shutdown: Shutdown,
    ingest: I,
    signal: F,
) -> Result<()>
where
    I: Future<Output = Result<()>> + Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let http_addr = listener.local_addr()?;
    let mut ingest = tokio::spawn(ingest);

    let mut http_stop = shutdown.subscribe();
    let app = router::build_router(state.clone());
    let http = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = http_stop.recv().await;
            })
            .await
    });

    tracing::info!(%http_addr, "backstat-server up and running");

    let early = tokio::select! {
        _ = signal => {
            tracing::info!("shutdown signal received");
            None
        }
        res = &mut ingest => Some(res),
    };

    state.metrics().set_draining();
    shutdown.trigger();

    let ingest_res = match early {
        Some(res) => res,
        None => ingest.await,
    }
    .map_err(|e| BackstatError::Internal(format!("ingest task failed: {e}")))?;

    http.await
        .map_err(|e| BackstatError::Internal(format!("http task failed: {e}")))??;

    tracing::info!("backstat-server stopped");
    ingest_res
}
