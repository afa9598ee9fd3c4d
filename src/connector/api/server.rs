use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::application::RelayChatUseCase;

use super::controller::CHAT_PATH;
use super::http::http_router;

/// Serve the relay endpoint on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    relay: Arc<RelayChatUseCase>,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Relay endpoint listening on http://{}{}", addr, CHAT_PATH);

    axum::serve(listener, http_router(relay))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Relay endpoint on {} stopped", addr);
    Ok(())
}
