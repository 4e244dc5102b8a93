use std::fmt;

#[derive(Debug)]
pub enum Error {
    InvalidMac(String),
    ShortWrite { sent: usize, expected: usize },
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMac(mac) => write!(
                f,
                "invalid mac address {mac:?}, expected six hex pairs like AA:BB:CC:DD:EE:FF"
            ),
            Self::ShortWrite { sent, expected } => {
                write!(f, "sent {sent} of {expected} bytes of the magic packet")
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
