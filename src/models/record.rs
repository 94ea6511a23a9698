use serde::Serialize;
use std::collections::BTreeMap;

use super::metric::CoercedValue;

/// Запись метрик, передаваемая в sink
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub event_type: String,
    pub labels: BTreeMap<String, String>,
    pub fields: BTreeMap<String, CoercedValue>,
}

impl MetricRecord {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            labels: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&CoercedValue> {
        self.fields.get(key)
    }
}

/// Значение инвентаря. Не использует систему семантических типов метрик
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InventoryValue {
    Text(String),
    Integer(i128),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryFact {
    pub category: String,
    pub name: String,
    pub value: InventoryValue,
}
