use crate::MacAddress;

const SYNC_LEN: usize = 6;
const REPEAT: usize = 16;
const PACKET_LEN: usize = SYNC_LEN + REPEAT * 6;

/// Wake-on-LAN payload: six `0xFF` bytes followed by the target hardware
/// address repeated sixteen times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagicPacket([u8; PACKET_LEN]);

impl MagicPacket {
    pub const LEN: usize = PACKET_LEN;

    pub const fn new(mac: MacAddress) -> MagicPacket {
        let octets = mac.octets();
        let mut bytes = [0xff; PACKET_LEN];

        let mut i = SYNC_LEN;
        while i < PACKET_LEN {
            bytes[i] = octets[(i - SYNC_LEN) % 6];
            i += 1;
        }

        MagicPacket(bytes)
    }

    /// Returns the target address if `bytes` is a well-formed magic packet.
    pub fn parse(bytes: &[u8]) -> Option<MacAddress> {
        if bytes.len() != PACKET_LEN || bytes[..SYNC_LEN].iter().any(|b| *b != 0xff) {
            return None;
        }

        let mut groups = bytes[SYNC_LEN..].chunks_exact(6);
        let first: [u8; 6] = groups.next()?.try_into().ok()?;

        if groups.all(|group| group == first) {
            Some(MacAddress::new(first))
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
