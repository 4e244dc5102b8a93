use reachability::Reachability;
use serde::ser::SerializeMap;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl From<Reachability> for DeviceStatus {
    fn from(value: Reachability) -> Self {
        match value {
            Reachability::Alive => DeviceStatus::Online,
            Reachability::Dead => DeviceStatus::Offline,
        }
    }
}

/// Status of every registered device, serialized as a JSON object keeping
/// the registry order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusMap(Vec<(String, DeviceStatus)>);

impl StatusMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, DeviceStatus)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, DeviceStatus)> for StatusMap {
    fn from_iter<T: IntoIterator<Item = (String, DeviceStatus)>>(iter: T) -> Self {
        StatusMap(iter.into_iter().collect())
    }
}

impl Serialize for StatusMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (id, status) in &self.0 {
            map.serialize_entry(id, status)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_keeps_order() {
        let map = StatusMap::from_iter([
            ("pc2".to_string(), DeviceStatus::Online),
            ("pc1".to_string(), DeviceStatus::Offline),
        ]);

        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"pc2":"online","pc1":"offline"}"#
        );
    }

    #[test]
    fn test_from_reachability() {
        let map: StatusMap = [
            ("pc1".to_string(), DeviceStatus::from(Reachability::Alive)),
            ("pc2".to_string(), DeviceStatus::from(Reachability::Dead)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            map.iter().collect::<Vec<_>>(),
            [("pc1", DeviceStatus::Online), ("pc2", DeviceStatus::Offline)]
        );
        assert!(!map.is_empty());
    }
}
