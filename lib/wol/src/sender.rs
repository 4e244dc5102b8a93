use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use async_trait::async_trait;
use log::{debug, trace, warn};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tokio::net::UdpSocket;

use crate::{Error, MacAddress, MagicPacket, Result};

pub const DEFAULT_PORT: u16 = 9;
pub const DEFAULT_FALLBACK_PORT: u16 = 7;

#[async_trait]
pub trait Wake: Send + Sync {
    /// Broadcasts a magic packet for `mac`. Success means the datagram left
    /// the socket, not that the device woke up.
    async fn wake(&self, mac: MacAddress) -> Result<()>;
}

/// Sends magic packets to a fixed subnet broadcast address.
///
/// The address is not derived from local interfaces: if it belongs to another
/// subnet the packet is silently lost.
#[derive(Clone, Debug)]
pub struct Sender {
    broadcast: Ipv4Addr,
    port: u16,
    fallback_port: Option<u16>,
}

impl Sender {
    pub fn new(broadcast: Ipv4Addr, port: u16, fallback_port: Option<u16>) -> Self {
        Self {
            broadcast,
            port,
            fallback_port,
        }
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        self.broadcast
    }

    fn connect() -> std::io::Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
        socket.set_broadcast(true)?;
        socket.set_nonblocking(true)?;

        let address = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
        socket.bind(&SockAddr::from(address))?;

        UdpSocket::from_std(socket.into())
    }

    async fn send_to(&self, packet: &MagicPacket, port: u16) -> Result<()> {
        let socket = Self::connect()?;
        let addr = SocketAddr::V4(SocketAddrV4::new(self.broadcast, port));

        let sent = socket.send_to(packet.as_bytes(), addr).await?;
        trace!("sent {sent} bytes to {addr}");

        if sent != MagicPacket::LEN {
            return Err(Error::ShortWrite {
                sent,
                expected: MagicPacket::LEN,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Wake for Sender {
    async fn wake(&self, mac: MacAddress) -> Result<()> {
        let packet = MagicPacket::new(mac);
        debug!("sending magic packet for {mac} to {}:{}", self.broadcast, self.port);

        let err = match self.send_to(&packet, self.port).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        match self.fallback_port {
            Some(port) if port != self.port => {
                warn!("unable to send magic packet to port {}: {err}, trying {port}", self.port);

                self.send_to(&packet, port).await.map_err(|fallback_err| {
                    debug!("fallback port {port} failed too: {fallback_err}");
                    err
                })
            }
            _ => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wake_sends_magic_packet() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let mac = MacAddress::from_str("AA:BB:CC:DD:EE:01").unwrap();
        let sender = Sender::new(Ipv4Addr::LOCALHOST, port, None);

        sender.wake(mac).await.unwrap();

        let mut buffer = [0; 256];
        let (size, _) = tokio::time::timeout(Duration::from_secs(2), listener.recv_from(&mut buffer))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(size, 102);
        assert_eq!(MagicPacket::parse(&buffer[..size]), Some(mac));
    }

    #[tokio::test]
    async fn test_wake_falls_back_to_second_port() {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // port 0 can't be sent to and fails locally
        let mac = MacAddress::from_str("AA:BB:CC:DD:EE:02").unwrap();
        let sender = Sender::new(Ipv4Addr::LOCALHOST, 0, Some(port));

        sender.wake(mac).await.unwrap();

        let mut buffer = [0; 256];
        let (size, _) = tokio::time::timeout(Duration::from_secs(2), listener.recv_from(&mut buffer))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(size, 102);
        assert_eq!(MagicPacket::parse(&buffer[..size]), Some(mac));
    }

    #[tokio::test]
    async fn test_wake_without_fallback_fails() {
        let mac = MacAddress::from_str("AA:BB:CC:DD:EE:03").unwrap();
        let sender = Sender::new(Ipv4Addr::LOCALHOST, 0, None);

        let result = sender.wake(mac).await;
        assert!(matches!(result, Err(Error::Io(_))), "unexpected {result:?}");
    }
}
