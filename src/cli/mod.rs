use std::net::SocketAddr;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Override BIND_ADDRESS (e.g. --bind 127.0.0.1:8080)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Rewrite a single piece of text and print the result
    Ask {
        query: String,
    },
}
