use std::fmt;

use reachability::Reachability;
use serde::Serialize;

use crate::Device;

/// State of a device observed right before the wake packet went out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PowerState {
    #[serde(rename = "online")]
    Alive,
    #[serde(rename = "offline")]
    Dead,
    /// The probe failed, e.g. the host name didn't resolve.
    #[serde(rename = "unknown")]
    Unknown,
}

impl From<Reachability> for PowerState {
    fn from(value: Reachability) -> Self {
        match value {
            Reachability::Alive => PowerState::Alive,
            Reachability::Dead => PowerState::Dead,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alive => write!(f, "online"),
            Self::Dead => write!(f, "offline"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WakeOutcome {
    pub device: Device,
    pub state: PowerState,
    pub probe_error: Option<String>,
    pub send_error: Option<String>,
    pub message: String,
}

impl WakeOutcome {
    pub fn new(
        device: Device,
        probe: reachability::Result<Reachability>,
        send: wol::Result<()>,
    ) -> WakeOutcome {
        let (state, probe_error) = match probe {
            Ok(reachability) => (PowerState::from(reachability), None),
            Err(err) => (PowerState::Unknown, Some(err.to_string())),
        };
        let send_error = send.err().map(|err| err.to_string());

        let message = compose_message(
            &device.name,
            state,
            probe_error.as_deref(),
            send_error.as_deref(),
        );

        WakeOutcome {
            device,
            state,
            probe_error,
            send_error,
            message,
        }
    }

    pub fn already_on(&self) -> bool {
        self.state == PowerState::Alive
    }

    pub fn sent(&self) -> bool {
        self.send_error.is_none()
    }
}

// An online device wins over a failed send, waking it again is a no-op.
fn compose_message(
    name: &str,
    state: PowerState,
    probe_error: Option<&str>,
    send_error: Option<&str>,
) -> String {
    match (state, probe_error, send_error) {
        (PowerState::Alive, _, _) => format!("⚠️ {name} is already ON."),
        (PowerState::Unknown, probe_error, send_error) => {
            let probe_error = probe_error.unwrap_or("unknown error");

            match send_error {
                Some(send_error) => format!(
                    "⚠️ Error checking status of {name}: {probe_error}. \
                     ⚠️ Error sending WOL packet: {send_error}"
                ),
                None => format!("⚠️ Error checking status of {name}: {probe_error}. Wake packet sent."),
            }
        }
        (PowerState::Dead, _, Some(send_error)) => {
            format!("✅ Sending wake packet to {name}... ⚠️ Error sending WOL packet: {send_error}")
        }
        (PowerState::Dead, _, None) => format!("✅ {name} powers on!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::send_error;
    use crate::Registry;

    fn office_pc() -> Device {
        Registry::default_catalog().unwrap().get("pc1").unwrap().clone()
    }

    #[test]
    fn test_already_on() {
        let outcome = WakeOutcome::new(office_pc(), Ok(Reachability::Alive), Ok(()));

        assert_eq!(outcome.message, "⚠️ Office PC is already ON.");
        assert!(outcome.already_on());
        assert!(outcome.sent());
    }

    #[test]
    fn test_already_on_ignores_send_error() {
        let outcome = WakeOutcome::new(office_pc(), Ok(Reachability::Alive), Err(send_error()));

        assert_eq!(outcome.message, "⚠️ Office PC is already ON.");
        assert!(!outcome.sent());
        assert_eq!(outcome.send_error.as_deref(), Some("io error: permission denied"));
    }

    #[test]
    fn test_powers_on() {
        let outcome = WakeOutcome::new(office_pc(), Ok(Reachability::Dead), Ok(()));

        assert_eq!(outcome.message, "✅ Office PC powers on!");
        assert_eq!(outcome.state, PowerState::Dead);
        assert!(!outcome.already_on());
        assert!(outcome.sent());
    }

    #[test]
    fn test_send_failed() {
        let outcome = WakeOutcome::new(office_pc(), Ok(Reachability::Dead), Err(send_error()));

        assert_eq!(
            outcome.message,
            "✅ Sending wake packet to Office PC... ⚠️ Error sending WOL packet: io error: permission denied"
        );
        assert!(!outcome.sent());
    }

    #[test]
    fn test_probe_error() {
        let probe_error = || reachability::Error::NoAddress("OFFICE-PC".to_string());

        let outcome = WakeOutcome::new(office_pc(), Err(probe_error()), Ok(()));
        assert_eq!(outcome.state, PowerState::Unknown);
        assert_eq!(
            outcome.message,
            "⚠️ Error checking status of Office PC: OFFICE-PC has no usable address. Wake packet sent."
        );

        let outcome = WakeOutcome::new(office_pc(), Err(probe_error()), Err(send_error()));
        assert_eq!(
            outcome.message,
            "⚠️ Error checking status of Office PC: OFFICE-PC has no usable address. \
             ⚠️ Error sending WOL packet: io error: permission denied"
        );
        assert_eq!(
            outcome.probe_error.as_deref(),
            Some("OFFICE-PC has no usable address")
        );
    }
}
