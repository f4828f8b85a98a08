use clap::Parser;
use parkspot_server::{Server, ServerConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    host: Option<String>,

    /// JSON or TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with the demo parking spots loaded
    #[arg(long)]
    seed_demo: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkspot_server=info,parkspot=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(host) = args.host {
        config = config.with_host(host);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if args.seed_demo {
        config = config.with_demo_spots(true);
    }

    let server = Server::bind(&config).inspect_err(|e| error!("{}", e))?;
    info!("parkspot {} serving on {}", parkspot::VERSION, server.local_addr()?);
    server.run()
}
