use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use super::MetricSink;
use crate::models::{CoercedValue, InventoryValue};

/// JSON документ с результатами опроса одного устройства
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringResultJson {
    pub target: String,
    pub client_type: String,
    pub timestamp: String,
    pub summary: ResultSummary,
    pub metric_sets: Vec<MetricSetJson>,
    pub inventory: BTreeMap<String, BTreeMap<String, InventoryValue>>,
    pub errors: Vec<ErrorInfo>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSummary {
    pub total_metric_sets: usize,
    pub failed_metric_sets: usize,
    pub inventory_items: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricSetJson {
    pub event_type: String,
    pub labels: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, CoercedValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub event_type: String,
    pub item_name: String,
    pub error_code: String,
    pub error_message: String,
}

/// Накапливает метрики прогона и отдаёт их одним JSON документом
pub struct JsonPublisher {
    target: String,
    client_type: String,
    metric_sets: Vec<MetricSetJson>,
    inventory: BTreeMap<String, BTreeMap<String, InventoryValue>>,
}

impl JsonPublisher {
    pub fn new(target: impl Into<String>, client_type: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            client_type: client_type.into(),
            metric_sets: Vec::new(),
            inventory: BTreeMap::new(),
        }
    }

    fn text_field(fields: &BTreeMap<String, CoercedValue>, key: &str) -> Option<String> {
        fields
            .get(key)
            .and_then(|v| v.as_text())
            .map(str::to_string)
    }

    /// Записи об ошибках, повторённые отдельным списком
    fn extract_errors(&self) -> Vec<ErrorInfo> {
        self.metric_sets
            .iter()
            .filter_map(|set| {
                let error_code = Self::text_field(&set.metrics, "errorCode")?;
                Some(ErrorInfo {
                    event_type: set.event_type.clone(),
                    item_name: set.labels.get("name").cloned().unwrap_or_default(),
                    error_code,
                    error_message: Self::text_field(&set.metrics, "errorMessage")
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    pub fn format(&self) -> MonitoringResultJson {
        let errors = self.extract_errors();
        let summary = ResultSummary {
            total_metric_sets: self.metric_sets.len(),
            failed_metric_sets: errors.len(),
            inventory_items: self.inventory.values().map(BTreeMap::len).sum(),
        };

        MonitoringResultJson {
            target: self.target.clone(),
            client_type: self.client_type.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary,
            metric_sets: self.metric_sets.clone(),
            inventory: self.inventory.clone(),
            errors,
        }
    }

    /// Сериализует результат в JSON строку
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.format())
            .map_err(|e| anyhow::anyhow!("Ошибка сериализации в JSON: {}", e))
    }
}

impl MetricSink for JsonPublisher {
    fn emit(
        &mut self,
        event_type: &str,
        labels: &BTreeMap<String, String>,
        fields: &BTreeMap<String, CoercedValue>,
    ) -> Result<()> {
        if event_type.is_empty() {
            anyhow::bail!("Пустой event_type для набора {:?}", labels.get("name"));
        }
        self.metric_sets.push(MetricSetJson {
            event_type: event_type.to_string(),
            labels: labels.clone(),
            metrics: fields.clone(),
        });
        Ok(())
    }

    fn set_inventory_item(
        &mut self,
        category: &str,
        name: &str,
        value: &InventoryValue,
    ) -> Result<()> {
        self.inventory
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn labels(name: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("device".to_string(), "router".to_string()),
            ("name".to_string(), name.to_string()),
        ])
    }

    #[test]
    fn renders_metrics_inventory_and_errors() {
        let mut publisher = JsonPublisher::new("10.0.0.1:161", "SNMPv2c");

        let fields = BTreeMap::from([("sysName".to_string(), CoercedValue::attribute("router1"))]);
        publisher.emit("SNMPSample", &labels("system"), &fields).unwrap();

        let errors = BTreeMap::from([
            ("errorCode".to_string(), CoercedValue::attribute("SNMPError")),
            ("errorMessage".to_string(), CoercedValue::attribute("timeout")),
        ]);
        publisher.emit("SNMPSample", &labels("ifTable"), &errors).unwrap();

        publisher
            .set_inventory_item("system", "sysServices", &InventoryValue::Integer(72))
            .unwrap();

        let doc: Value = serde_json::from_str(&publisher.to_json_string().unwrap()).unwrap();

        assert_eq!(doc["target"], "10.0.0.1:161");
        assert_eq!(doc["client_type"], "SNMPv2c");
        assert_eq!(doc["summary"]["total_metric_sets"], 2);
        assert_eq!(doc["summary"]["failed_metric_sets"], 1);
        assert_eq!(
            doc["metric_sets"][0]["metrics"]["sysName"],
            json!({ "type": "attribute", "value": "router1" })
        );
        assert_eq!(doc["inventory"]["system"]["sysServices"], 72);
        assert_eq!(doc["errors"][0]["item_name"], "ifTable");
        assert_eq!(doc["errors"][0]["error_code"], "SNMPError");
    }

    #[test]
    fn rejects_empty_event_type() {
        let mut publisher = JsonPublisher::new("t", "SNMPv2c");
        assert!(publisher.emit("", &labels("x"), &BTreeMap::new()).is_err());
    }
}
