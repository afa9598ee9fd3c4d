use std::net::SocketAddr;

use clap::Subcommand;

use crate::connector::DEFAULT_ENDPOINT;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay endpoint that forwards transcripts to the inference provider
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Open the terminal chat widget
    Chat {
        /// Relay endpoint URL
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Send a single message through the relay and print the reply
    Send {
        message: String,

        /// Relay endpoint URL
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}
