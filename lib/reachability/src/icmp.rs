use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use log::{debug, trace};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use crate::{Reachability, Result};

const ECHO_REQUEST: u8 = 8;
const ECHO_REPLY: u8 = 0;
const HEADER_LEN: usize = 8;
const PAYLOAD: &[u8] = b"powerup probe";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SocketKind {
    /// Unprivileged ping socket, the kernel strips the IP header and owns the
    /// identifier.
    Datagram,
    Raw,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct EchoReply {
    identifier: u16,
    sequence: u16,
}

pub async fn probe(ip: Ipv4Addr) -> Result<Reachability> {
    let (socket, kind) = connect()?;

    let identifier = rand::random::<u16>();
    let sequence = 1;
    let request = echo_request(identifier, sequence, PAYLOAD);

    // routing and icmp errors mean nobody is answering
    let addr = SocketAddr::V4(SocketAddrV4::new(ip, 0));
    if let Err(err) = socket.send_to(&request, addr).await {
        debug!("unable to send echo request to {ip}: {err}");
        return Ok(Reachability::Dead);
    }
    trace!("sent echo request {identifier}/{sequence} to {ip} over {kind:?} socket");

    let mut buffer = [0; 1024];

    loop {
        let (size, source) = match socket.recv_from(&mut buffer).await {
            Ok(received) => received,
            Err(err) => {
                debug!("echo reply from {ip} failed: {err}");
                return Ok(Reachability::Dead);
            }
        };

        if source.ip() != ip {
            continue;
        }

        let packet = match kind {
            SocketKind::Datagram => &buffer[..size],
            SocketKind::Raw => match strip_ipv4_header(&buffer[..size]) {
                Some(packet) => packet,
                None => continue,
            },
        };

        match parse_echo_reply(packet) {
            Some(reply) if reply.sequence == sequence => {
                if kind == SocketKind::Raw && reply.identifier != identifier {
                    continue;
                }

                return Ok(Reachability::Alive);
            }
            _ => trace!("ignored icmp packet from {source}"),
        }
    }
}

fn connect() -> std::io::Result<(UdpSocket, SocketKind)> {
    let (socket, kind) = match Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::ICMPV4)) {
        Ok(socket) => (socket, SocketKind::Datagram),
        Err(err) => {
            debug!("ping socket unavailable: {err}, trying raw socket");
            let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
            (socket, SocketKind::Raw)
        }
    };

    socket.set_nonblocking(true)?;

    Ok((UdpSocket::from_std(socket.into())?, kind))
}

fn echo_request(identifier: u16, sequence: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_LEN + payload.len());

    packet.push(ECHO_REQUEST);
    packet.push(0);
    packet.extend_from_slice(&[0, 0]);
    packet.extend_from_slice(&identifier.to_be_bytes());
    packet.extend_from_slice(&sequence.to_be_bytes());
    packet.extend_from_slice(payload);

    let checksum = checksum(&packet);
    packet[2..4].copy_from_slice(&checksum.to_be_bytes());

    packet
}

fn parse_echo_reply(packet: &[u8]) -> Option<EchoReply> {
    if packet.len() < HEADER_LEN || packet[0] != ECHO_REPLY || packet[1] != 0 {
        return None;
    }

    Some(EchoReply {
        identifier: u16::from_be_bytes([packet[4], packet[5]]),
        sequence: u16::from_be_bytes([packet[6], packet[7]]),
    })
}

fn strip_ipv4_header(packet: &[u8]) -> Option<&[u8]> {
    let first = *packet.first()?;
    if first >> 4 != 4 {
        return None;
    }

    let header_len = usize::from(first & 0x0f) * 4;
    packet.get(header_len..)
}

/// RFC 1071 internet checksum.
fn checksum(bytes: &[u8]) -> u16 {
    let mut sum = 0u32;

    let mut chunks = bytes.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u32::from(u16::from_be_bytes([chunk[0], chunk[1]]));
    }

    if let [last] = chunks.remainder() {
        sum += u32::from(*last) << 8;
    }

    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }

    !(sum as u16)
}
