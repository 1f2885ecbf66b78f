use clap::Parser;
use geotrip::{ItemService, NewItem};
use geotrip_server::run_server;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON or TOML service configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured default trip capacity
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    default_capacity: Option<u64>,

    /// JSON array of items to load at startup
    #[arg(long)]
    seed: Option<PathBuf>,
}

fn load_seed(path: &Path) -> anyhow::Result<Vec<NewItem>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geotrip_server=info,geotrip=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let mut builder = ItemService::builder();
    if let Some(path) = &args.config {
        info!("Loading configuration from {}", path.display());
        builder = builder.config_path(path)?;
    }
    if let Some(capacity) = args.default_capacity {
        builder = builder.default_capacity(usize::try_from(capacity)?);
    }
    if let Some(path) = &args.seed {
        let items = load_seed(path)?;
        info!("Seeding {} items from {}", items.len(), path.display());
        builder = builder.seed_items(items);
    }
    let service = builder.build()?;

    info!(
        "Default trip capacity {}, metric {:?}",
        service.config().default_capacity,
        service.config().distance_metric
    );

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    run_server(listener, Arc::new(service), shutdown).await?;

    Ok(())
}
