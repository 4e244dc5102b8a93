use std::fmt;

#[derive(Debug)]
pub enum Error {
    Resolve {
        host: String,
        source: std::io::Error,
    },
    NoAddress(String),
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
            Self::Resolve { host, source } => write!(f, "unable to resolve {host}: {source}"),
            Self::NoAddress(host) => write!(f, "{host} has no usable address"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::NoAddress(_) => None,
        }
    }
}
