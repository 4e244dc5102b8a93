use std::fmt;

#[derive(Debug)]
pub enum Error {
    UnknownDevice(String),
    DuplicateDevice(String),
    EmptyDeviceId,
    Config { key: &'static str, reason: String },
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDevice(id) => write!(f, "unknown device {id}"),
            Self::DuplicateDevice(id) => write!(f, "device {id} is registered twice"),
            Self::EmptyDeviceId => write!(f, "device id can't be empty"),
            Self::Config { key, reason } => write!(f, "invalid {key}: {reason}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
