use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::super::{server, Container};

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run the relay endpoint until Ctrl-C.
    pub async fn serve(&self, bind: SocketAddr) -> Result<String> {
        let listener = TcpListener::bind(bind).await?;
        let relay = Arc::new(self.container.relay_use_case());

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, shutting down");
            }
            trigger.cancel();
        });

        server::serve(relay, listener, shutdown).await?;

        Ok("Relay endpoint stopped.".to_string())
    }
}
