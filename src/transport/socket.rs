//! Async UDP socket wrapper for the datagram transport.
//!
//! A [`CoapSocket`] is bound locally and connected to one peer, so the OS
//! filters out datagrams from anyone else. The underlying tokio socket is
//! shared with the DTLS engine through [`CoapSocket::socket_arc`].

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::trace;

/// UDP socket connected to a single remote peer.
#[derive(Debug)]
pub struct CoapSocket {
    /// The underlying UDP socket.
    socket: Arc<UdpSocket>,
    /// The connected peer.
    peer: SocketAddr,
}

impl CoapSocket {
    /// Open a socket towards `peer`.
    ///
    /// Binds to `local` if given, else to an ephemeral port on the
    /// unspecified address of the peer's family.
    pub async fn open(peer: SocketAddr, local: Option<SocketAddr>) -> io::Result<Self> {
        let local = local.unwrap_or_else(|| unspecified_for(&peer));
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;
        trace!(local = ?socket.local_addr().ok(), %peer, "udp socket opened");
        Ok(Self {
            socket: Arc::new(socket),
            peer,
        })
    }

    /// Get the local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Get the connected peer address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Send one datagram to the peer.
    pub async fn send(&self, data: &[u8]) -> io::Result<usize> {
        self.socket.send(data).await
    }

    /// Receive one datagram from the peer, waiting at most `timeout`.
    ///
    /// Returns `Ok(0)` if nothing arrived in time.
    pub async fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
        match tokio::time::timeout(timeout, self.socket.recv(buf)).await {
            Ok(result) => result,
            Err(_elapsed) => Ok(0),
        }
    }

    /// Get a clone of the Arc-wrapped socket.
    pub fn socket_arc(&self) -> Arc<UdpSocket> {
        Arc::clone(&self.socket)
    }
}

fn unspecified_for(peer: &SocketAddr) -> SocketAddr {
    let ip = match peer {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, 0)
}
