use super::metric::MetricTypeHint;

/// Метрика набора: скаляр или колонка таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDef {
    pub oid: String,
    pub name: String,
    pub hint: MetricTypeHint,
}

impl MetricDef {
    pub fn new(oid: impl Into<String>, name: impl Into<String>, hint: MetricTypeHint) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
            hint,
        }
    }

    /// Имя для вывода. Пустое имя заменяется OID при эмиссии
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.oid
        } else {
            &self.name
        }
    }
}

/// Индексная колонка таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDef {
    pub oid: String,
    pub name: String,
}

impl IndexDef {
    pub fn new(oid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            name: name.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.oid
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSet {
    pub name: String,
    pub event_type: String,
    pub metrics: Vec<MetricDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSet {
    pub name: String,
    pub event_type: String,
    pub root_oid: String,
    pub index: Vec<IndexDef>,
    pub metrics: Vec<MetricDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub oid: String,
    pub category: String,
    pub name: String,
}

/// Провалидированный запрос к устройству
#[derive(Debug, Clone, PartialEq)]
pub enum QueryDescriptor {
    Scalar(ScalarSet),
    Table(TableSet),
    Inventory(Vec<InventoryItem>),
    /// Набор с неизвестным `type`. Оркестратор пишет ошибку и пропускает его
    Unsupported {
        name: String,
        event_type: String,
        kind: String,
    },
}

impl QueryDescriptor {
    pub fn kind(&self) -> &str {
        match self {
            QueryDescriptor::Scalar(_) => "scalar",
            QueryDescriptor::Table(_) => "table",
            QueryDescriptor::Inventory(_) => "inventory",
            QueryDescriptor::Unsupported { kind, .. } => kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QueryDescriptor::Scalar(set) => &set.name,
            QueryDescriptor::Table(set) => &set.name,
            QueryDescriptor::Inventory(_) => "inventory",
            QueryDescriptor::Unsupported { name, .. } => name,
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            QueryDescriptor::Scalar(set) => &set.event_type,
            QueryDescriptor::Table(set) => &set.event_type,
            QueryDescriptor::Inventory(_) => "InventoryError",
            QueryDescriptor::Unsupported { event_type, .. } => event_type,
        }
    }
}

/// Все запросы для одного устройства из файла коллекции
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub device: String,
    pub queries: Vec<QueryDescriptor>,
}
