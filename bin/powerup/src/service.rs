use std::time::Duration;

use futures_util::future::join_all;
use log::{debug, error, info};
use reachability::Probe;
use wol::Wake;

use crate::{DeviceStatus, Error, Registry, Result, StatusMap, WakeOutcome};

/// Wakes up and probes the devices of a registry.
///
/// Holds no mutable state: every call opens and closes its own sockets.
pub struct PowerService<P, W> {
    registry: Registry,
    prober: P,
    sender: W,
    probe_timeout: Duration,
}

impl<P: Probe, W: Wake> PowerService<P, W> {
    pub fn new(registry: Registry, prober: P, sender: W, probe_timeout: Duration) -> Self {
        Self {
            registry,
            prober,
            sender,
            probe_timeout,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Probes the device, then sends the magic packet whatever the probe
    /// said, including when the probe itself failed.
    pub async fn wake(&self, id: &str) -> Result<WakeOutcome> {
        let device = self
            .registry
            .get(id)
            .ok_or_else(|| Error::UnknownDevice(id.to_string()))?;

        info!("wants to wake up {} ({})", device.id, device.name);

        let probe = self.prober.probe(&device.host, self.probe_timeout).await;
        if let Err(err) = &probe {
            error!("unable to check status of {}: {err}", device.id);
        }

        let send = self.sender.wake(device.mac).await;
        if let Err(err) = &send {
            error!("unable to send magic packet to {}: {err}", device.mac);
        }

        let outcome = WakeOutcome::new(device.clone(), probe, send);
        info!("{}: {}", device.id, outcome.message);

        Ok(outcome)
    }

    pub async fn status(&self, id: &str) -> Result<DeviceStatus> {
        let device = self
            .registry
            .get(id)
            .ok_or_else(|| Error::UnknownDevice(id.to_string()))?;

        Ok(self.probe(&device.id, &device.host).await)
    }

    /// Probes all devices at once, so the whole request takes about one probe
    /// timeout no matter how many devices are registered.
    pub async fn status_all(&self) -> StatusMap {
        let probes = self.registry.devices().iter().map(|device| async move {
            let status = self.probe(&device.id, &device.host).await;
            (device.id.clone(), status)
        });

        join_all(probes).await.into_iter().collect()
    }

    async fn probe(&self, id: &str, host: &str) -> DeviceStatus {
        match self.prober.probe(host, self.probe_timeout).await {
            Ok(reachability) => DeviceStatus::from(reachability),
            Err(err) => {
                debug!("{id} is considered offline: {err}");
                DeviceStatus::Offline
            }
        }
    }
}
