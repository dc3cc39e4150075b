use classeviva_client::ResourceCategory;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Success body of a resource fetch: `{"ok": true, "<category>": payload}`.
#[derive(Debug, Clone)]
pub struct ResourceEnvelope {
    pub category: ResourceCategory,
    pub payload: Value,
}

impl ResourceEnvelope {
    pub fn new(category: ResourceCategory, payload: Value) -> Self {
        Self { category, payload }
    }
}

impl Serialize for ResourceEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("ok", &true)?;
        map.serialize_entry(self.category.name(), &self.payload)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let envelope = ResourceEnvelope::new(ResourceCategory::Grades, json!({"grades": []}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"ok": true, "voti": {"grades": []}})
        );
    }
}
