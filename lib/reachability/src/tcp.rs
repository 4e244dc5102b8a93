use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};

use futures_util::future::select_ok;
use log::trace;
use tokio::net::TcpStream;

use crate::Reachability;

pub async fn probe(addrs: &[IpAddr], ports: &[u16]) -> Reachability {
    let attempts = addrs
        .iter()
        .flat_map(|ip| ports.iter().map(move |port| SocketAddr::new(*ip, *port)))
        .map(|addr| Box::pin(connect(addr)))
        .collect::<Vec<_>>();

    if attempts.is_empty() {
        return Reachability::Dead;
    }

    match select_ok(attempts).await {
        Ok((addr, _)) => {
            trace!("{addr} answered");
            Reachability::Alive
        }
        Err(_) => Reachability::Dead,
    }
}

async fn connect(addr: SocketAddr) -> std::io::Result<SocketAddr> {
    match TcpStream::connect(addr).await {
        Ok(_) => Ok(addr),
        // a reset comes from the host itself
        Err(err) if err.kind() == ErrorKind::ConnectionRefused => Ok(addr),
        Err(err) => {
            trace!("{addr}: {err}");
            Err(err)
        }
    }
}
