use std::net::SocketAddr;
use std::time::Duration;

use hickory_server::server::RequestHandler;
use hickory_server::ServerFuture;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;

/// Bind UDP and TCP on `socket_addr` and serve queries with `handler` until
/// the server future completes.
pub async fn start_dns_server<H: RequestHandler>(
    socket_addr: SocketAddr,
    tcp_timeout: Duration,
    handler: H,
) -> anyhow::Result<()> {
    info!(bind_address = %socket_addr, "Starting DNS server");

    let udp_socket = UdpSocket::bind(socket_addr).await?;
    info!(protocol = "UDP", "DNS server listening");

    let tcp_listener = TcpListener::bind(socket_addr).await?;
    info!(protocol = "TCP", "DNS server listening");

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, tcp_timeout);

    info!("DNS server ready to accept queries");

    server.block_until_done().await?;

    Ok(())
}
