//! Unsecured datagram I/O.
//!
//! Thin pass-through to [`CoapSocket`]: no framing, no retransmission.

use std::time::Duration;

use tracing::{debug, trace};

use super::socket::CoapSocket;
use crate::core::TransportResult;

/// Send `data` to the socket's peer as a single datagram.
///
/// Socket failures map to [`TransportError::Internal`](crate::core::TransportError::Internal).
pub async fn write(socket: &CoapSocket, data: &[u8]) -> TransportResult<usize> {
    debug!(peer = %socket.peer_addr(), len = data.len(), "send plain datagram");
    let sent = socket.send(data).await?;
    trace!(sent, "plain send complete");
    Ok(sent)
}

/// Receive one datagram into `buf`, reading at most `limit` bytes.
///
/// The whole of `buf` is zero-filled first so a short read never exposes
/// bytes from an earlier one. Returns `Ok(0)` on timeout.
pub async fn read(
    socket: &CoapSocket,
    buf: &mut [u8],
    limit: usize,
    timeout: Duration,
) -> TransportResult<usize> {
    buf.fill(0);
    let limit = limit.min(buf.len());
    let len = socket.recv_timeout(&mut buf[..limit], timeout).await?;
    debug!(peer = %socket.peer_addr(), len, "recv plain datagram");
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::UdpSocket;

    async fn pair() -> (UdpSocket, CoapSocket) {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let client = CoapSocket::open(server.local_addr().unwrap(), None)
            .await
            .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_write_delivers_exact_length() {
        let (server, client) = pair().await;

        let payload = vec![0xA5u8; 300];
        let sent = write(&client, &payload).await.unwrap();
        assert_eq!(sent, 300);

        let mut buf = [0u8; 1024];
        let (len, _) = server.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, 300);
        assert_eq!(&buf[..len], &payload[..]);
    }

    #[tokio::test]
    async fn test_read_zero_fills_on_timeout() {
        let (_server, client) = pair().await;

        let mut buf = [0xFFu8; 64];
        let start = Instant::now();
        let len = read(&client, &mut buf, 64, Duration::from_millis(50))
            .await
            .unwrap();

        assert_eq!(len, 0);
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[tokio::test]
    async fn test_read_short_datagram_clears_tail() {
        let (server, client) = pair().await;
        let client_addr = client.local_addr().unwrap();
        let to = std::net::SocketAddr::new("127.0.0.1".parse().unwrap(), client_addr.port());

        server.send_to(b"abc", to).await.unwrap();

        let mut buf = [0xEEu8; 16];
        let len = read(&client, &mut buf, 16, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(len, 3);
        assert_eq!(&buf[..3], b"abc");
        assert!(buf[3..].iter().all(|&b| b == 0));
    }

    #[tokio::test]
    async fn test_read_respects_limit() {
        let (server, client) = pair().await;
        let to = std::net::SocketAddr::new(
            "127.0.0.1".parse().unwrap(),
            client.local_addr().unwrap().port(),
        );

        server.send_to(&[7u8; 32], to).await.unwrap();

        let mut buf = [0u8; 64];
        let len = read(&client, &mut buf, 8, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(len, 8);
        assert!(buf[8..].iter().all(|&b| b == 0));
    }
}
