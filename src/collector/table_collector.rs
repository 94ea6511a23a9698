use super::coerce::{coerce, hint_overridden};
use super::correlate::correlate;
use super::error::CollectError;
use crate::models::{CoercedValue, MetricRecord, TableSet};
use crate::snmp::SnmpSession;

/// Модуль для сбора табличных SNMP данных
pub struct TableCollector;

impl TableCollector {
    /// Собирает таблицу одним walk и возвращает по записи на строку.
    /// Порядок строк не определён
    pub async fn collect<S: SnmpSession>(
        session: &mut S,
        device: &str,
        table: &TableSet,
    ) -> Result<Vec<MetricRecord>, CollectError> {
        if table.index.is_empty() {
            return Err(CollectError::TableWithoutIndex {
                table: table.name.clone(),
                root_oid: table.root_oid.clone(),
            });
        }

        let mut walked = Vec::new();
        session
            .bulk_walk(&table.root_oid, |unit| {
                walked.push(unit);
                Ok(())
            })
            .await?;

        tracing::debug!(table = %table.name, units = walked.len(), "Walk таблицы завершён");

        let correlation = correlate(&table.index, walked)?;
        if correlation.rows.is_empty() {
            tracing::warn!(
                table = %table.name,
                root_oid = %table.root_oid,
                "Ни один индекс не совпал, таблица без строк"
            );
        }

        let mut records = Vec::with_capacity(correlation.rows.len());
        for (suffix, index_values) in &correlation.rows {
            let mut record = MetricRecord::new(&table.event_type)
                .with_label("device", device)
                .with_label("name", &table.name)
                .with_label("index", suffix);

            for (name, value) in index_values {
                record
                    .fields
                    .insert(name.clone(), CoercedValue::attribute(value.clone()));
            }

            for metric in &table.metrics {
                let Some(unit) = correlation.column(&metric.oid, suffix) else {
                    tracing::warn!(oid = %format!("{}.{}", metric.oid, suffix), "Нет данных для колонки");
                    continue;
                };

                match coerce(unit, metric.hint) {
                    Ok(value) => {
                        if hint_overridden(metric.hint, &value) {
                            tracing::debug!(
                                oid = %unit.oid,
                                requested = ?metric.hint,
                                "OctetString всегда attribute, тип метрики переопределён"
                            );
                        }
                        record
                            .fields
                            .insert(metric.display_name().to_string(), value);
                    }
                    Err(e) => tracing::error!(table = %table.name, error = %e, "Не удалось привести значение"),
                }
            }

            records.push(record);
        }

        Ok(records)
    }
}
