pub mod coerce;
pub mod correlate;
pub mod error;
pub mod inventory_collector;
pub mod scalar_collector;
pub mod table_collector;

#[cfg(test)]
pub(crate) mod testing;

pub use error::CollectError;
pub use inventory_collector::InventoryCollector;
pub use scalar_collector::ScalarCollector;
pub use table_collector::TableCollector;

use crate::formatter::MetricSink;
use crate::models::{Collection, CoercedValue, MetricRecord, QueryDescriptor};
use crate::snmp::SnmpSession;

/// Что делать с OID в ответе, которого нет в конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedOidPolicy {
    /// Записать в лог и пропустить
    #[default]
    Skip,
    /// Считать весь набор неудачным
    Fail,
}

/// Итоги одного прогона
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Коллектор для сбора SNMP данных
pub struct SnmpCollector;

impl SnmpCollector {
    /// Выполняет все запросы по порядку. Отказ одного набора превращается
    /// в запись об ошибке, прогон продолжается
    pub async fn collect_all<S, K>(
        session: &mut S,
        sink: &mut K,
        collections: &[Collection],
        policy: UnmatchedOidPolicy,
    ) -> RunSummary
    where
        S: SnmpSession,
        K: MetricSink,
    {
        let mut summary = RunSummary::default();

        for collection in collections {
            for query in &collection.queries {
                match Self::collect_one(session, sink, &collection.device, query, policy).await {
                    Ok(true) => summary.succeeded += 1,
                    Ok(false) => summary.skipped += 1,
                    Err(e) => {
                        tracing::error!(
                            device = %collection.device,
                            kind = query.kind(),
                            name = query.name(),
                            config_error = e.is_config_error(),
                            error = %e,
                            "Не удалось собрать набор"
                        );
                        Self::report_error(sink, &collection.device, query, &e);
                        summary.failed += 1;
                    }
                }
            }
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Сбор завершён"
        );
        summary
    }

    /// `Ok(false)` если запрос пропущен
    async fn collect_one<S, K>(
        session: &mut S,
        sink: &mut K,
        device: &str,
        query: &QueryDescriptor,
        policy: UnmatchedOidPolicy,
    ) -> Result<bool, CollectError>
    where
        S: SnmpSession,
        K: MetricSink,
    {
        match query {
            QueryDescriptor::Scalar(set) => {
                let record = ScalarCollector::collect(session, device, set, policy).await?;
                Self::emit(sink, &record);
            }
            QueryDescriptor::Table(table) => {
                let records = TableCollector::collect(session, device, table).await?;
                tracing::debug!(table = %table.name, rows = records.len(), "Таблица собрана");
                for record in &records {
                    Self::emit(sink, record);
                }
            }
            QueryDescriptor::Inventory(items) => {
                let facts = InventoryCollector::collect(session, items, policy).await?;
                for fact in &facts {
                    if let Err(e) = sink.set_inventory_item(&fact.category, &fact.name, &fact.value) {
                        tracing::error!(name = %fact.name, error = %e, "Не удалось записать инвентарь");
                    }
                }
            }
            QueryDescriptor::Unsupported { kind, name, .. } => {
                let e = CollectError::UnsupportedKind { kind: kind.clone() };
                tracing::error!(device = %device, set = %name, error = %e, "Проверьте файл коллекции");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn emit<K: MetricSink>(sink: &mut K, record: &MetricRecord) {
        if let Err(e) = sink.emit(&record.event_type, &record.labels, &record.fields) {
            tracing::error!(event_type = %record.event_type, error = %e, "Не удалось отправить метрики");
        }
    }

    /// Синтетическая запись вместо данных упавшего набора
    fn report_error<K: MetricSink>(
        sink: &mut K,
        device: &str,
        query: &QueryDescriptor,
        error: &CollectError,
    ) {
        let mut record = MetricRecord::new(query.event_type())
            .with_label("device", device)
            .with_label("name", query.name());
        record
            .fields
            .insert("errorCode".into(), CoercedValue::attribute(error.error_code()));
        record
            .fields
            .insert("errorMessage".into(), CoercedValue::attribute(error.to_string()));
        Self::emit(sink, &record);
    }
}
