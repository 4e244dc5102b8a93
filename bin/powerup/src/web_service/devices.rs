use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use reachability::Probe;
use wol::Wake;

use crate::{Device, PowerService};

pub async fn devices<P, W>(State(service): State<Arc<PowerService<P, W>>>) -> Json<Vec<Device>>
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    Json(service.registry().devices().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockProber, MockSender};
    use crate::Registry;

    use std::time::Duration;

    use serde_json::json;

    #[tokio::test]
    async fn test_devices() {
        let service = Arc::new(PowerService::new(
            Registry::default_catalog().unwrap(),
            MockProber::new(),
            MockSender::new(),
            Duration::from_secs(2),
        ));

        let Json(devices) = devices(State(service)).await;

        assert_eq!(devices.len(), 6);
        assert_eq!(
            serde_json::to_value(&devices[0]).unwrap(),
            json!({
                "id": "pc1",
                "name": "Office PC",
                "mac": "AA:BB:CC:DD:EE:01",
                "host": "OFFICE-PC"
            })
        );
    }
}
