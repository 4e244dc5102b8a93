use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use reachability::{Probe, Reachability};
use wol::{MacAddress, Wake};

mock! {
    pub Prober {}

    #[async_trait]
    impl Probe for Prober {
        async fn probe(&self, host: &str, timeout: Duration) -> reachability::Result<Reachability>;
    }
}

mock! {
    pub Sender {}

    #[async_trait]
    impl Wake for Sender {
        async fn wake(&self, mac: MacAddress) -> wol::Result<()>;
    }
}

pub fn send_error() -> wol::Error {
    wol::Error::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "permission denied",
    ))
}
