use clap::Parser;

use bazaar_server::config::BazaarConfig;
use bazaar_server::error::ServerError;

/// Bazaar marketplace HTTP server.
#[derive(Parser, Debug)]
#[command(name = "bazaar-server", about = "HTTP API server for the Bazaar marketplace")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "bazaar.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = BazaarConfig::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    bazaar_server::serve(config).await
}
