use anyhow::Result;
use std::collections::BTreeMap;

pub mod json;

pub use json::JsonPublisher;

use crate::models::{CoercedValue, InventoryValue};

/// Получатель собранных метрик и инвентаря
pub trait MetricSink {
    fn emit(
        &mut self,
        event_type: &str,
        labels: &BTreeMap<String, String>,
        fields: &BTreeMap<String, CoercedValue>,
    ) -> Result<()>;

    fn set_inventory_item(&mut self, category: &str, name: &str, value: &InventoryValue)
    -> Result<()>;
}
