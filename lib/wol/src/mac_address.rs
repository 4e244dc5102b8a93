use std::fmt;
use std::str::FromStr;

use serde::{
    de::{self, Unexpected},
    Deserialize, Serialize,
};

use crate::Error;

/// Hardware address of a network interface.
///
/// Parsed from six hex octet pairs separated either by `:` or by `-`,
/// always displayed as upper-case colon-separated pairs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> MacAddress {
        MacAddress(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator = if s.contains('-') { '-' } else { ':' };

        let mut octets = [0; 6];
        let mut parts = s.split(separator);

        for octet in octets.iter_mut() {
            let part = parts.next().ok_or_else(|| Error::InvalidMac(s.to_string()))?;

            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::InvalidMac(s.to_string()));
            }

            *octet = u8::from_str_radix(part, 16).map_err(|_| Error::InvalidMac(s.to_string()))?;
        }

        if parts.next().is_some() {
            return Err(Error::InvalidMac(s.to_string()));
        }

        Ok(MacAddress(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl Serialize for MacAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MacAddressVisitor;

        impl de::Visitor<'_> for MacAddressVisitor {
            type Value = MacAddress;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("mac address like AA:BB:CC:DD:EE:FF")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                MacAddress::from_str(value).map_err(|_| {
                    de::Error::invalid_value(Unexpected::Str(value), &"AA:BB:CC:DD:EE:FF")
                })
            }
        }

        deserializer.deserialize_str(MacAddressVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            MacAddress::from_str("AA:BB:CC:DD:EE:01").unwrap(),
            MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01])
        );

        assert_eq!(
            MacAddress::from_str("aa-bb-cc-dd-ee-01").unwrap(),
            MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01])
        );
    }

    #[test]
    fn test_parse_invalid() {
        for mac in [
            "ZZ:ZZ:ZZ:ZZ:ZZ:ZZ",
            "AA:BB:CC:DD:EE",
            "AA:BB:CC:DD:EE:01:02",
            "AABBCCDDEE01",
            "A:BB:CC:DD:EE:001",
            "AA:BB-CC:DD:EE:01",
            "+A:BB:CC:DD:EE:01",
            "",
        ] {
            assert!(
                matches!(MacAddress::from_str(mac), Err(Error::InvalidMac(_))),
                "{mac} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        let mac = MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01]);
        assert_eq!(mac.to_string(), "AA:BB:CC:DD:EE:01");
    }

    #[test]
    fn test_serde() {
        let mac: MacAddress = serde_json::from_str("\"aa:bb:cc:dd:ee:01\"").unwrap();
        assert_eq!(mac, MacAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01]));
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"AA:BB:CC:DD:EE:01\"");

        assert!(serde_json::from_str::<MacAddress>("\"ZZ:ZZ:ZZ:ZZ:ZZ:ZZ\"").is_err());
    }
}
