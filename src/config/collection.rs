use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::models::{
    Collection, IndexDef, InventoryItem, MetricDef, MetricTypeHint, QueryDescriptor, ScalarSet,
    TableSet,
};
use crate::snmp::normalize_oid;

/// Файл коллекции в том виде, как он лежит на диске
#[derive(Debug, Deserialize)]
struct CollectionFile {
    #[serde(default)]
    collect: Vec<DeviceSection>,
}

#[derive(Debug, Deserialize)]
struct DeviceSection {
    #[serde(default)]
    device: String,
    #[serde(default)]
    metric_sets: Vec<MetricSetSection>,
    #[serde(default)]
    inventory: Vec<InventorySection>,
}

#[derive(Debug, Deserialize)]
struct MetricSetSection {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    event_type: String,
    #[serde(default)]
    metrics: Vec<MetricSection>,
    #[serde(default)]
    root_oid: String,
    #[serde(default)]
    index: Vec<IndexSection>,
}

#[derive(Debug, Deserialize)]
struct MetricSection {
    oid: String,
    #[serde(default)]
    metric_name: String,
    #[serde(default)]
    metric_type: String,
}

#[derive(Debug, Deserialize)]
struct IndexSection {
    oid: String,
    #[serde(default)]
    metric_name: String,
}

#[derive(Debug, Deserialize)]
struct InventorySection {
    oid: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    name: String,
}

/// Загружает и валидирует файл коллекции. Путь должен быть абсолютным
pub fn load_collection_file(path: impl AsRef<Path>) -> Result<Vec<Collection>> {
    let path = path.as_ref();
    if !path.is_absolute() {
        anyhow::bail!(
            "Путь к файлу коллекции должен быть абсолютным: {}",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .context(format!("Не удалось прочитать файл: {}", path.display()))?;
    parse_collection(&content).context(format!("Файл коллекции {}", path.display()))
}

/// Разбирает YAML и превращает его в провалидированные запросы
pub fn parse_collection(content: &str) -> Result<Vec<Collection>> {
    let file: CollectionFile =
        serde_yml::from_str(content).context("Не удалось распарсить YAML")?;

    if file.collect.is_empty() {
        anyhow::bail!("Файл коллекции пустой: нет секции `collect`");
    }

    file.collect.into_iter().map(build_collection).collect()
}

fn build_collection(section: DeviceSection) -> Result<Collection> {
    let device = section.device.trim().to_string();
    let mut queries = Vec::with_capacity(section.metric_sets.len() + 1);

    for set in section.metric_sets {
        queries.push(build_metric_set(set)?);
    }

    if !section.inventory.is_empty() {
        let items = section
            .inventory
            .into_iter()
            .map(|item| InventoryItem {
                oid: normalize_oid(&item.oid),
                category: item.category.trim().to_string(),
                name: item.name.trim().to_string(),
            })
            .collect();
        queries.push(QueryDescriptor::Inventory(items));
    }

    Ok(Collection { device, queries })
}

fn build_metric_set(set: MetricSetSection) -> Result<QueryDescriptor> {
    let name = set.name.trim().to_string();
    let event_type = set.event_type.trim().to_string();
    if event_type.is_empty() {
        anyhow::bail!("metric set `{}` has no `event_type`", name);
    }

    let metrics = set
        .metrics
        .into_iter()
        .map(|m| {
            let hint = MetricTypeHint::parse(&m.metric_type).ok_or_else(|| {
                anyhow::anyhow!(
                    "invalid metric type `{}` for OID {} in metric set `{}`",
                    m.metric_type,
                    m.oid.trim(),
                    name
                )
            })?;
            Ok(MetricDef::new(normalize_oid(&m.oid), m.metric_name.trim(), hint))
        })
        .collect::<Result<Vec<_>>>()?;

    let descriptor = match set.kind.trim() {
        "scalar" => QueryDescriptor::Scalar(ScalarSet {
            name,
            event_type,
            metrics,
        }),
        "table" => QueryDescriptor::Table(TableSet {
            name,
            event_type,
            root_oid: normalize_oid(&set.root_oid),
            index: set
                .index
                .into_iter()
                .map(|i| IndexDef::new(normalize_oid(&i.oid), i.metric_name.trim()))
                .collect(),
            metrics,
        }),
        other => QueryDescriptor::Unsupported {
            name,
            event_type,
            kind: other.to_string(),
        },
    };

    Ok(descriptor)
}
