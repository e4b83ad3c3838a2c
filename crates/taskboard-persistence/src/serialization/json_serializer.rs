use crate::traits::Serializer;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Pretty-printed JSON, so data files stay readable and diffable
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> TaskboardResult<Vec<u8>> {
        serde_json::to_vec_pretty(data).map_err(|e| TaskboardError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> TaskboardResult<T> {
        serde_json::from_slice(bytes).map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}
