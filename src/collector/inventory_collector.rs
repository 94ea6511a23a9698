use std::collections::HashMap;

use super::UnmatchedOidPolicy;
use super::error::CollectError;
use crate::models::{InventoryFact, InventoryItem, InventoryValue};
use crate::snmp::{ProtocolType, RawValue, RawVarBind, SnmpSession, known_error_message};

/// Модуль для сбора инвентаря устройства
pub struct InventoryCollector;

impl InventoryCollector {
    /// Опрашивает все элементы инвентаря одним GET
    pub async fn collect<S: SnmpSession>(
        session: &mut S,
        items: &[InventoryItem],
        policy: UnmatchedOidPolicy,
    ) -> Result<Vec<InventoryFact>, CollectError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut oids = Vec::with_capacity(items.len());
        let mut lookup: HashMap<String, &InventoryItem> = HashMap::with_capacity(items.len());
        for item in items {
            let oid = item.oid.trim().to_string();
            lookup.insert(oid.clone(), item);
            oids.push(oid);
        }

        let response = session.get(&oids).await?;
        if let Some(status) = response.status {
            return Err(CollectError::DeviceStatus { status });
        }

        let mut facts = Vec::with_capacity(response.varbinds.len());
        for unit in &response.varbinds {
            let oid = unit.oid.trim();
            let Some(item) = lookup.get(oid) else {
                if let Some(message) = known_error_message(oid) {
                    return Err(CollectError::KnownErrorOid {
                        oid: oid.to_string(),
                        message,
                    });
                }
                match policy {
                    UnmatchedOidPolicy::Skip => {
                        tracing::error!(oid = %oid, "OID не настроен в инвентаре и не будет отправлен");
                        continue;
                    }
                    UnmatchedOidPolicy::Fail => {
                        return Err(CollectError::UnexpectedOid {
                            oid: oid.to_string(),
                        });
                    }
                }
            };

            match inventory_value(unit) {
                Some(value) => facts.push(InventoryFact {
                    category: item.category.clone(),
                    name: item.name.clone(),
                    value,
                }),
                None => tracing::info!(oid = %oid, "Пустое значение инвентаря"),
            }
        }

        Ok(facts)
    }
}

/// Значение инвентаря: строки и целые приводятся, остальное передаётся как есть
fn inventory_value(unit: &RawVarBind) -> Option<InventoryValue> {
    match (unit.kind, &unit.value) {
        (ProtocolType::OctetString, RawValue::Bytes(bytes)) => {
            Some(InventoryValue::Text(String::from_utf8_lossy(bytes).into_owned()))
        }
        (kind, RawValue::Int(v)) if kind.is_integer_like() => Some(InventoryValue::Integer(*v)),
        (ProtocolType::Null | ProtocolType::NoSuchObject | ProtocolType::NoSuchInstance, _) => None,
        (_, RawValue::Empty) => None,
        (_, RawValue::Text(text)) => Some(InventoryValue::Text(text.clone())),
        (_, RawValue::Int(v)) => Some(InventoryValue::Integer(*v)),
        (_, RawValue::Float(v)) => Some(InventoryValue::Float(*v)),
        (_, RawValue::Bool(b)) => Some(InventoryValue::Bool(*b)),
        (_, RawValue::Bytes(bytes)) => Some(InventoryValue::Bytes(bytes.clone())),
    }
}
