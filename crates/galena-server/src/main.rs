use std::net::SocketAddr;
use std::path::Path;

use tracing::{info, warn};

use galena_server::config::ServerConfig;
use galena_server::packs::PackStore;
use galena_server::transport::UdpTransport;
use galena_server::{Server, ServerContext};

const CONFIG_PATH: &str = "galena.toml";

#[tokio::main]
async fn main() {
    let config = if Path::new(CONFIG_PATH).exists() {
        match ServerConfig::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {CONFIG_PATH}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        ServerConfig::default()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "Galena v{} starting on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.address,
        config.server.port
    );
    info!("MOTD: {}", config.server.motd);
    info!(
        "encryption: {}, XBOX Live auth: {}",
        config.auth.use_encryption, config.auth.xbox_live_auth
    );

    let packs = match PackStore::load_dir(&config.packs.directory) {
        Ok(packs) => {
            info!("{} resource pack(s) loaded", packs.len());
            packs
        }
        Err(e) => {
            warn!("failed to load resource packs: {e}");
            PackStore::empty()
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.address, config.server.port)
        .parse()
        .expect("invalid bind address");

    let (transport, events, handle) = UdpTransport::bind(addr)
        .await
        .expect("failed to bind transport");
    tokio::spawn(transport.run());

    let ctx = ServerContext::new(config, packs, handle);
    let server = Server::new(ctx);

    tokio::select! {
        _ = server.run(events) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }
    info!("server shut down");
}
