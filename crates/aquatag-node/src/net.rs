use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;

use crate::config::NetworkConfig;

/// Fire-and-forget datagram sink for event payloads.
///
/// Send failures are logged at debug level and otherwise invisible; the
/// engine never learns about them and nothing is retried.
pub struct UdpSink {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpSink {
    /// Bind the local socket and resolve the destination.
    ///
    /// With `static_address` the configured bind address is used verbatim;
    /// otherwise the OS assigns one, the dynamic-configuration analogue.
    pub async fn bring_up(config: &NetworkConfig, static_address: bool) -> io::Result<Self> {
        let destination: SocketAddr = config
            .destination
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let bind_addr = if static_address {
            config.bind_addr.as_str()
        } else {
            "0.0.0.0:0"
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        tracing::info!(
            local = %socket.local_addr()?,
            destination = %destination,
            "Network link up"
        );
        Ok(Self {
            socket,
            destination,
        })
    }

    /// Send one payload; failures are not surfaced.
    pub async fn send(&self, payload: &str) {
        if let Err(e) = self.socket.send_to(payload.as_bytes(), self.destination).await {
            tracing::debug!(error = %e, payload, "Dropped outbound datagram");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dynamic_bind_gets_an_os_port() {
        let config = NetworkConfig {
            destination: "127.0.0.1:5678".to_string(),
            ..NetworkConfig::default()
        };
        let sink = UdpSink::bring_up(&config, false).await.unwrap();
        assert_ne!(sink.socket.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn payload_arrives_at_destination() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let dest = receiver.local_addr().unwrap();

        let config = NetworkConfig {
            destination: dest.to_string(),
            ..NetworkConfig::default()
        };
        let sink = UdpSink::bring_up(&config, false).await.unwrap();
        sink.send("B3.1 - HIT").await;

        let mut buf = [0u8; 64];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], b"B3.1 - HIT");
    }

    #[tokio::test]
    async fn bad_destination_is_an_error() {
        let config = NetworkConfig {
            destination: "nowhere".to_string(),
            ..NetworkConfig::default()
        };
        assert!(UdpSink::bring_up(&config, false).await.is_err());
    }
}
