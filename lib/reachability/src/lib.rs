mod icmp;
mod prober;
mod tcp;

mod error;
pub use error::Error;

pub use prober::{Probe, Prober, Reachability, DEFAULT_TCP_PORTS, DEFAULT_TIMEOUT};

pub type Result<T> = std::result::Result<T, Error>;
