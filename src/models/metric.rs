use serde::{Deserialize, Serialize};
use std::fmt;

/// Семантический тип метрики, независимый от типа SNMP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Gauge,
    Delta,
    Rate,
    Attribute,
}

/// Тип метрики, запрошенный в конфигурации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTypeHint {
    #[default]
    Auto,
    Gauge,
    Delta,
    Rate,
    Attribute,
}

impl MetricTypeHint {
    /// Разбирает строку `metric_type` из файла коллекции. Пустая строка = auto.
    /// `pdelta`/`prate` принимаются как delta/rate
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "" | "auto" => Some(Self::Auto),
            "gauge" => Some(Self::Gauge),
            "delta" | "pdelta" => Some(Self::Delta),
            "rate" | "prate" => Some(Self::Rate),
            "attribute" => Some(Self::Attribute),
            _ => None,
        }
    }

    /// Числовой семантический тип для этой подсказки. `None` для attribute
    pub fn numeric_type(self) -> Option<SemanticType> {
        match self {
            Self::Auto | Self::Gauge => Some(SemanticType::Gauge),
            Self::Delta => Some(SemanticType::Delta),
            Self::Rate => Some(SemanticType::Rate),
            Self::Attribute => None,
        }
    }

    /// Оператор явно попросил числовой тип
    pub fn is_explicit_numeric(self) -> bool {
        matches!(self, Self::Gauge | Self::Delta | Self::Rate)
    }
}

/// Значение метрики после приведения
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i128),
    Float(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Integer(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercedValue {
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    pub value: MetricValue,
}

impl CoercedValue {
    pub fn new(semantic_type: SemanticType, value: MetricValue) -> Self {
        Self {
            semantic_type,
            value,
        }
    }

    pub fn attribute(value: impl Into<String>) -> Self {
        Self::new(SemanticType::Attribute, MetricValue::Text(value.into()))
    }

    pub fn gauge(value: i128) -> Self {
        Self::new(SemanticType::Gauge, MetricValue::Integer(value))
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            MetricValue::Text(s) => Some(s),
            _ => None,
        }
    }
}
