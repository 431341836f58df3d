//! Fluent builders for request bodies.

use serde_json::{Map, Value, json};

/// Builder for `Account` bodies with valid defaults.
pub struct AccountBuilder {
    fields: Map<String, Value>,
}

impl AccountBuilder {
    pub fn new(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("Name".into(), json!(name));
        fields.insert("Email".into(), json!(format!("{}@example.com", name.to_lowercase())));
        fields.insert("Balance".into(), json!("0.00"));
        fields.insert("Visits".into(), json!(0));
        fields.insert("IsActive".into(), json!(true));
        Self { fields }
    }

    pub fn with(mut self, property: &str, value: Value) -> Self {
        self.fields.insert(property.into(), value);
        self
    }

    pub fn without(mut self, property: &str) -> Self {
        self.fields.remove(property);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}
