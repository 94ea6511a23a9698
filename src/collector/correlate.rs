use std::collections::{BTreeMap, HashMap};

use super::coerce::coerce_index;
use super::error::CollectError;
use crate::models::IndexDef;
use crate::snmp::{RawVarBind, known_error_message};

/// Значения индексных колонок одной строки: имя индекса → значение
pub type IndexValues = BTreeMap<String, String>;

/// Результат разбора одного walk таблицы.
///
/// `rows` это множество ключей строк (суффиксов индекса). Порядок обхода
/// не определён и не должен ни на что влиять.
#[derive(Debug, Default)]
pub struct Correlation {
    pub rows: HashMap<String, IndexValues>,
    pub data_points: HashMap<String, RawVarBind>,
}

impl Correlation {
    /// Значение колонки `column_oid` для строки `suffix`
    pub fn column(&self, column_oid: &str, suffix: &str) -> Option<&RawVarBind> {
        self.data_points.get(&format!("{column_oid}.{suffix}"))
    }
}

/// Суффикс после `prefix` и разделителя
fn index_suffix<'a>(oid: &'a str, prefix: &str) -> Option<&'a str> {
    oid.strip_prefix(prefix)?
        .strip_prefix('.')
        .filter(|suffix| !suffix.is_empty())
}

/// Группирует плоский результат walk в строки по индексам.
///
/// Каждый OID сверяется с индексами в порядке конфигурации, первый совпавший
/// побеждает. Все значения остаются доступны как точки данных для колонок.
pub fn correlate(index: &[IndexDef], walked: Vec<RawVarBind>) -> Result<Correlation, CollectError> {
    let mut correlation = Correlation::default();

    for unit in walked {
        let oid = unit.oid.trim().to_string();
        if let Some(message) = known_error_message(&oid) {
            return Err(CollectError::KnownErrorOid { oid, message });
        }

        let matched = index
            .iter()
            .find_map(|def| index_suffix(&oid, &def.oid).map(|suffix| (def, suffix)));

        if let Some((def, suffix)) = matched {
            match coerce_index(&unit) {
                Ok(value) => {
                    correlation
                        .rows
                        .entry(suffix.to_string())
                        .or_default()
                        .insert(def.display_name().to_string(), value);
                }
                Err(e) => {
                    tracing::error!(index = %suffix, error = %e, "Не удалось извлечь значение индекса");
                }
            }
        }

        correlation.data_points.insert(oid, unit);
    }

    for def in index {
        let used = correlation
            .rows
            .values()
            .any(|values| values.contains_key(def.display_name()));
        if !used {
            tracing::debug!(index = %def.oid, "Индекс не совпал ни с одним OID таблицы");
        }
    }

    Ok(correlation)
}
