//! # ztnet-dns
//!
//! Authoritative DNS for ZeroTier networks managed by a ZTNET controller.

mod bootstrap;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use ztnet_dns_application::MembershipProvider;
use ztnet_dns_domain::CliOverrides;
use ztnet_dns_infrastructure::{RecordCache, RecordRefresher, ZtnetApiClient, ZtnetHandler};

#[derive(Parser)]
#[command(name = "ztnet-dns")]
#[command(version)]
#[command(about = "Authoritative DNS server for ZTNET-managed ZeroTier networks")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// DNS server port (overrides the config file)
    #[arg(short = 'p', long)]
    dns_port: Option<u16>,

    /// Bind address (overrides the config file)
    #[arg(short = 'b', long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(
        cli.config.as_deref(),
        CliOverrides {
            dns_port: cli.dns_port,
            bind_address: cli.bind,
        },
    )?;
    bootstrap::init_logging(&config);

    // Composition root: every component is wired explicitly.
    let zones = config.ztnet.network_zones()?;
    let client: Arc<dyn MembershipProvider> =
        Arc::new(ZtnetApiClient::new(&config.ztnet.endpoint, &config.ztnet.token)?);
    let cache = Arc::new(RecordCache::new());

    let refresher = RecordRefresher::new(
        Arc::clone(&cache),
        client,
        zones.clone(),
        config.ztnet.refresh_interval(),
    );
    let refresher_handle = refresher.start();

    let fallthrough = config.ztnet.fallthrough();
    if fallthrough.is_enabled() {
        warn!(
            "fallthrough is configured but this binary wires no next handler; \
             covered names will answer SERVFAIL"
        );
    }
    let handler = ZtnetHandler::new(zones, cache, config.ztnet.record_ttl_secs, fallthrough);

    let socket_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.dns_port
    )
    .parse()?;
    let tcp_timeout = Duration::from_secs(config.server.tcp_timeout_secs);

    let mut server_task =
        tokio::spawn(server::start_dns_server(socket_addr, tcp_timeout, handler));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutdown signal received");
            server_task.abort();
        }
        result = &mut server_task => {
            match result {
                Ok(Ok(())) => info!("DNS server stopped"),
                Ok(Err(e)) => error!(error = %e, "DNS server failed"),
                Err(e) => error!(error = %e, "DNS server task failed"),
            }
        }
    }

    // Join the refresh task so no cycle is left half-applied.
    refresher_handle.shutdown().await;
    info!("ztnet-dns stopped");

    Ok(())
}
