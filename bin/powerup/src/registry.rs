use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wol::MacAddress;

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub mac: MacAddress,
    pub host: String,
}

impl Device {
    fn new(id: &str, name: &str, mac: [u8; 6], host: &str) -> Device {
        Device {
            id: id.to_string(),
            name: name.to_string(),
            mac: MacAddress::new(mac),
            host: host.to_string(),
        }
    }
}

/// Devices known to the service, in the order they were registered.
#[derive(Debug)]
pub struct Registry {
    devices: Vec<Device>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new(devices: Vec<Device>) -> Result<Registry> {
        let mut index = HashMap::with_capacity(devices.len());

        for (position, device) in devices.iter().enumerate() {
            if device.id.trim().is_empty() {
                return Err(Error::EmptyDeviceId);
            }

            if index.insert(device.id.clone(), position).is_some() {
                return Err(Error::DuplicateDevice(device.id.clone()));
            }
        }

        Ok(Registry { devices, index })
    }

    /// Parses a catalog of `{id, name, mac, host}` records. A malformed MAC
    /// address fails the whole catalog.
    pub fn from_json(json: &[u8]) -> Result<Registry> {
        let devices: Vec<Device> = serde_json::from_slice(json)?;
        Registry::new(devices)
    }

    pub fn default_catalog() -> Result<Registry> {
        let devices = vec![
            Device::new("pc1", "Office PC", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01], "OFFICE-PC"),
            Device::new("pc2", "Living Room PC", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x02], "LIVINGROOM"),
            Device::new("pc3", "Server", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x03], "SERVER"),
            Device::new("pc4", "Test Machine", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x04], "TEST"),
            Device::new("pc5", "Laptop", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x05], "LAPTOP"),
            Device::new("pc6", "Media Center", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x06], "MEDIA"),
        ];

        Registry::new(devices)
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.index.get(id).map(|position| &self.devices[*position])
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
