use std::fmt::Display;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use reachability::{Prober, DEFAULT_TCP_PORTS, DEFAULT_TIMEOUT};
use wol::{Sender, DEFAULT_FALLBACK_PORT, DEFAULT_PORT};

use crate::{Error, Registry, Result};

#[derive(Debug)]
pub struct Config {
    pub listen_address: SocketAddr,
    pub registry: Registry,
    pub broadcast: Ipv4Addr,
    pub wake_port: u16,
    pub wake_fallback_port: Option<u16>,
    pub prober: Prober,
    pub probe_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_address = parse(&lookup, "LISTEN_ADDRESS")?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

        let registry = if let Some(path) = lookup("DEVICES_FILE") {
            let json = std::fs::read(&path)?;
            Registry::from_json(&json)?
        } else if let Some(json) = lookup("DEVICES") {
            Registry::from_json(json.as_bytes())?
        } else {
            Registry::default_catalog()?
        };

        let broadcast = parse(&lookup, "BROADCAST_ADDRESS")?.unwrap_or(Ipv4Addr::BROADCAST);
        let wake_port = parse(&lookup, "WAKE_PORT")?.unwrap_or(DEFAULT_PORT);

        let wake_fallback_port = match lookup("WAKE_FALLBACK_PORT").as_deref() {
            Some("none") | Some("") => None,
            Some(port) => Some(parse_value("WAKE_FALLBACK_PORT", port)?),
            None => Some(DEFAULT_FALLBACK_PORT),
        };

        let prober = match lookup("PROBE_METHOD").as_deref() {
            None | Some("tcp") => Prober::Tcp {
                ports: parse_ports(lookup("PROBE_PORTS"))?,
            },
            Some("icmp") => Prober::Icmp,
            Some(other) => {
                return Err(Error::Config {
                    key: "PROBE_METHOD",
                    reason: format!("{other:?} is neither tcp nor icmp"),
                })
            }
        };

        let probe_timeout = parse::<u64, _>(&lookup, "PROBE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        if probe_timeout.is_zero() {
            return Err(Error::Config {
                key: "PROBE_TIMEOUT_MS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Config {
            listen_address,
            registry,
            broadcast,
            wake_port,
            wake_fallback_port,
            prober,
            probe_timeout,
        })
    }

    pub fn sender(&self) -> Sender {
        Sender::new(self.broadcast, self.wake_port, self.wake_fallback_port)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| parse_value(key, &value))
        .transpose()
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|err: T::Err| Error::Config {
        key,
        reason: format!("{value:?}: {err}"),
    })
}

fn parse_ports(value: Option<String>) -> Result<Vec<u16>> {
    let value = match value {
        Some(value) => value,
        None => return Ok(DEFAULT_TCP_PORTS.to_vec()),
    };

    let ports = value
        .split(',')
        .filter(|port| !port.trim().is_empty())
        .map(|port| parse_value("PROBE_PORTS", port))
        .collect::<Result<Vec<u16>>>()?;

    if ports.is_empty() {
        return Err(Error::Config {
            key: "PROBE_PORTS",
            reason: "at least one port is required".to_string(),
        });
    }

    Ok(ports)
}
