use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, trace};
use tokio::time;

use crate::{icmp, tcp, Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// ssh, http, msrpc, netbios, smb and rdp.
pub const DEFAULT_TCP_PORTS: [u16; 6] = [22, 80, 135, 139, 445, 3389];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reachability {
    Alive,
    Dead,
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Makes a single liveness check of `host`.
    ///
    /// Silence until `timeout` is reported as [`Reachability::Dead`], only a
    /// host that can't be resolved or a socket that can't be opened is an error.
    async fn probe(&self, host: &str, timeout: Duration) -> Result<Reachability>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prober {
    /// Any port accepting or refusing a connection proves the host is up.
    Tcp { ports: Vec<u16> },
    /// One echo request. Needs `net.ipv4.ping_group_range` to cover the
    /// process group or a raw socket capability.
    Icmp,
}

impl Default for Prober {
    fn default() -> Self {
        Prober::Tcp {
            ports: DEFAULT_TCP_PORTS.to_vec(),
        }
    }
}

impl Prober {
    async fn probe_addrs(&self, host: &str, addrs: Vec<IpAddr>) -> Result<Reachability> {
        match self {
            Prober::Tcp { ports } => Ok(tcp::probe(&addrs, ports).await),
            Prober::Icmp => {
                let ip = addrs
                    .into_iter()
                    .find_map(|ip| match ip {
                        IpAddr::V4(ip) => Some(ip),
                        IpAddr::V6(_) => None,
                    })
                    .ok_or_else(|| Error::NoAddress(host.to_string()))?;

                icmp::probe(ip).await
            }
        }
    }
}

#[async_trait]
impl Probe for Prober {
    async fn probe(&self, host: &str, timeout: Duration) -> Result<Reachability> {
        let probe = async {
            let addrs = resolve(host).await?;
            trace!("{host} resolved to {addrs:?}");

            self.probe_addrs(host, addrs).await
        };

        let result = match time::timeout(timeout, probe).await {
            Ok(result) => result,
            Err(_) => Ok(Reachability::Dead),
        };

        debug!("probe {host}: {result:?}");
        result
    }
}

async fn resolve(host: &str) -> Result<Vec<IpAddr>> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![ip]);
    }

    let addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|source| Error::Resolve {
            host: host.to_string(),
            source,
        })?;

    let mut ips = vec![];
    for addr in addrs {
        if !ips.contains(&addr.ip()) {
            ips.push(addr.ip());
        }
    }

    if ips.is_empty() {
        return Err(Error::NoAddress(host.to_string()));
    }

    Ok(ips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::{TcpListener, TcpSocket, TcpStream};

    /// A listener whose accept queue is full, so further connection attempts
    /// are never answered.
    async fn unresponsive_listener() -> (TcpListener, Vec<TcpStream>) {
        let socket = TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(0).unwrap();
        let addr = listener.local_addr().unwrap();

        let mut queued = vec![];
        for _ in 0..64 {
            match time::timeout(Duration::from_millis(100), TcpStream::connect(addr)).await {
                Ok(Ok(stream)) => queued.push(stream),
                _ => break,
            }
        }

        (listener, queued)
    }

    #[tokio::test]
    async fn test_tcp_probe_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let prober = Prober::Tcp { ports: vec![port] };
        let result = prober.probe("127.0.0.1", DEFAULT_TIMEOUT).await.unwrap();

        assert_eq!(result, Reachability::Alive);
    }

    #[tokio::test]
    async fn test_tcp_probe_refused_port_is_alive() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let prober = Prober::Tcp { ports: vec![port] };
        let result = prober.probe("127.0.0.1", DEFAULT_TIMEOUT).await.unwrap();

        assert_eq!(result, Reachability::Alive);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_error() {
        let prober = Prober::default();
        let result = prober
            .probe("no-such-device.invalid", Duration::from_secs(10))
            .await;

        assert!(
            matches!(result, Err(Error::Resolve { .. })),
            "unexpected {result:?}"
        );
    }

    #[tokio::test]
    async fn test_empty_ports_is_dead() {
        let prober = Prober::Tcp { ports: vec![] };
        let result = prober.probe("127.0.0.1", DEFAULT_TIMEOUT).await.unwrap();

        assert_eq!(result, Reachability::Dead);
    }

    #[tokio::test]
    async fn test_deadline_is_dead() {
        let (listener, _queued) = unresponsive_listener().await;
        let port = listener.local_addr().unwrap().port();
        let timeout = Duration::from_millis(300);

        let prober = Prober::Tcp { ports: vec![port] };

        let start = Instant::now();
        let result = prober.probe("127.0.0.1", timeout).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(result, Reachability::Dead);
        assert!(elapsed >= timeout, "gave up after {elapsed:?}");
        assert!(elapsed < timeout * 3, "took {elapsed:?}");
    }

    #[test]
    fn test_reachability_display() {
        assert_eq!(Reachability::Alive.to_string(), "alive");
        assert_eq!(Reachability::Dead.to_string(), "dead");
    }
}
