//! Тестовые двойники сессии и sink

use anyhow::Result;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::formatter::MetricSink;
use crate::models::{CoercedValue, InventoryFact, InventoryValue, MetricRecord};
use crate::snmp::{GetResponse, RawVarBind, SnmpSession, UsmReport};

/// Сессия с заранее подготовленными ответами
#[derive(Default)]
pub struct MockSession {
    pub get_replies: VecDeque<Result<GetResponse>>,
    pub walks: HashMap<String, Vec<RawVarBind>>,
    pub walk_error: Option<String>,
    pub get_calls: Vec<Vec<String>>,
    pub walk_calls: Vec<String>,
}

impl MockSession {
    pub fn with_get(mut self, reply: GetResponse) -> Self {
        self.get_replies.push_back(Ok(reply));
        self
    }

    pub fn with_get_error(mut self, message: &str) -> Self {
        self.get_replies.push_back(Err(anyhow::anyhow!(message.to_string())));
        self
    }

    /// GET, на который агент ответил отказом USM
    pub fn with_usm_report(mut self, report: UsmReport) -> Self {
        self.get_replies.push_back(Err(report.into()));
        self
    }

    pub fn with_walk(mut self, root: &str, units: Vec<RawVarBind>) -> Self {
        self.walks.insert(root.to_string(), units);
        self
    }

    pub fn calls(&self) -> usize {
        self.get_calls.len() + self.walk_calls.len()
    }
}

impl SnmpSession for MockSession {
    async fn get(&mut self, oids: &[String]) -> Result<GetResponse> {
        self.get_calls.push(oids.to_vec());
        match self.get_replies.pop_front() {
            Some(reply) => reply,
            None => Ok(GetResponse::default()),
        }
    }

    async fn bulk_walk<F>(&mut self, root_oid: &str, mut on_unit: F) -> Result<()>
    where
        F: FnMut(RawVarBind) -> Result<()>,
    {
        self.walk_calls.push(root_oid.to_string());
        if let Some(message) = &self.walk_error {
            anyhow::bail!("{message}");
        }
        for unit in self.walks.get(root_oid).cloned().unwrap_or_default() {
            on_unit(unit)?;
        }
        Ok(())
    }
}

/// Sink, который просто запоминает всё, что в него отправили
#[derive(Default)]
pub struct RecordingSink {
    pub records: Vec<MetricRecord>,
    pub inventory: Vec<InventoryFact>,
    pub fail_emit: bool,
}

impl RecordingSink {
    pub fn errors(&self) -> Vec<&MetricRecord> {
        self.records
            .iter()
            .filter(|r| r.fields.contains_key("errorCode"))
            .collect()
    }
}

impl MetricSink for RecordingSink {
    fn emit(
        &mut self,
        event_type: &str,
        labels: &BTreeMap<String, String>,
        fields: &BTreeMap<String, CoercedValue>,
    ) -> Result<()> {
        if self.fail_emit {
            anyhow::bail!("sink is closed");
        }
        self.records.push(MetricRecord {
            event_type: event_type.to_string(),
            labels: labels.clone(),
            fields: fields.clone(),
        });
        Ok(())
    }

    fn set_inventory_item(&mut self, category: &str, name: &str, value: &InventoryValue) -> Result<()> {
        self.inventory.push(InventoryFact {
            category: category.to_string(),
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(())
    }
}
