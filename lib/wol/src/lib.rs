mod mac_address;
mod magic_packet;
mod sender;

mod error;
pub use error::Error;

pub use mac_address::MacAddress;
pub use magic_packet::MagicPacket;
pub use sender::{Sender, Wake, DEFAULT_FALLBACK_PORT, DEFAULT_PORT};

pub type Result<T> = std::result::Result<T, Error>;
