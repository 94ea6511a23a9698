use std::collections::HashMap;

use super::UnmatchedOidPolicy;
use super::coerce::{coerce, hint_overridden};
use super::error::CollectError;
use crate::models::{MetricDef, MetricRecord, ScalarSet};
use crate::snmp::{ProtocolType, SnmpSession, known_error_message};

/// Максимум OID в одном GET. Набор больше лимита не опрашивается целиком
pub const MAX_SCALAR_OIDS: usize = 200;

/// Модуль для сбора скалярных SNMP значений
pub struct ScalarCollector;

impl ScalarCollector {
    /// Опрашивает весь набор одним GET и собирает одну запись
    pub async fn collect<S: SnmpSession>(
        session: &mut S,
        device: &str,
        set: &ScalarSet,
        policy: UnmatchedOidPolicy,
    ) -> Result<MetricRecord, CollectError> {
        let mut record = MetricRecord::new(&set.event_type)
            .with_label("device", device)
            .with_label("name", &set.name);

        if set.metrics.is_empty() {
            tracing::debug!(set = %set.name, "Пустой скалярный набор");
            return Ok(record);
        }
        if set.metrics.len() > MAX_SCALAR_OIDS {
            return Err(CollectError::BatchLimitExceeded {
                set: set.name.clone(),
                count: set.metrics.len(),
                limit: MAX_SCALAR_OIDS,
            });
        }

        let (oids, lookup) = Self::build_lookup(&set.metrics);
        let response = session.get(&oids).await?;

        if let Some(status) = response.status {
            return Err(CollectError::DeviceStatus { status });
        }

        for unit in &response.varbinds {
            let oid = unit.oid.trim();

            if matches!(
                unit.kind,
                ProtocolType::NoSuchObject | ProtocolType::NoSuchInstance
            ) {
                tracing::warn!(oid = %oid, "OID не поддерживается устройством");
                continue;
            }

            let Some(metric) = lookup.get(oid) else {
                if let Some(message) = known_error_message(oid) {
                    return Err(CollectError::KnownErrorOid {
                        oid: oid.to_string(),
                        message,
                    });
                }
                match policy {
                    UnmatchedOidPolicy::Skip => {
                        tracing::debug!(oid = %oid, set = %set.name, "Получен неожиданный OID");
                        continue;
                    }
                    UnmatchedOidPolicy::Fail => {
                        return Err(CollectError::UnexpectedOid {
                            oid: oid.to_string(),
                        });
                    }
                }
            };

            match coerce(unit, metric.hint) {
                Ok(value) => {
                    if hint_overridden(metric.hint, &value) {
                        tracing::debug!(
                            oid = %oid,
                            requested = ?metric.hint,
                            "OctetString всегда attribute, тип метрики переопределён"
                        );
                    }
                    record
                        .fields
                        .insert(metric.display_name().to_string(), value);
                }
                Err(e) => tracing::error!(set = %set.name, error = %e, "Не удалось привести значение"),
            }
        }

        Ok(record)
    }

    /// Список OID для запроса и таблица соответствия ответа метрике.
    /// OID без ".0" регистрируется в обеих формах, устройство может ответить любой
    fn build_lookup(metrics: &[MetricDef]) -> (Vec<String>, HashMap<String, &MetricDef>) {
        let mut oids = Vec::with_capacity(metrics.len());
        let mut lookup = HashMap::with_capacity(metrics.len() * 2);

        for metric in metrics {
            let oid = metric.oid.trim().to_string();
            if !oid.ends_with(".0") {
                lookup.insert(format!("{oid}.0"), metric);
            }
            lookup.insert(oid.clone(), metric);
            oids.push(oid);
        }

        (oids, lookup)
    }
}
