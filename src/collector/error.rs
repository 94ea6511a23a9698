use crate::snmp::{ErrorStatus, ProtocolType, UsmReport};

/// Почему значение не удалось привести
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceFailure {
    #[error("unsupported PDU type")]
    UnsupportedType,
    #[error("null value")]
    Null,
    #[error("no such object or instance")]
    NoSuchObject,
    #[error("payload cannot be read as {0}")]
    TypeMismatch(&'static str),
}

/// Ошибка приведения одного значения. Локальна для одного OID
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason} [oid={oid}, type={kind}]")]
pub struct CoerceError {
    pub oid: String,
    pub kind: ProtocolType,
    pub reason: CoerceFailure,
}

impl CoerceError {
    pub fn new(oid: impl Into<String>, kind: ProtocolType, reason: CoerceFailure) -> Self {
        Self {
            oid: oid.into(),
            kind,
            reason,
        }
    }
}

/// Отказ одной единицы сбора (скалярный набор, таблица, инвентарь)
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Table index not specified for table `{table}` (root OID `{root_oid}`)")]
    TableWithoutIndex { table: String, root_oid: String },

    #[error(
        "Metric set {set} has {count} metrics, the current limit is {limit}. This metric set will not be reported"
    )]
    BatchLimitExceeded {
        set: String,
        count: usize,
        limit: usize,
    },

    #[error("invalid `metric_set` type: {kind}")]
    UnsupportedKind { kind: String },

    #[error("{0}")]
    Transport(String),

    #[error("{}", .status.message())]
    DeviceStatus { status: ErrorStatus },

    #[error("Error Message: {message} (OID {oid})")]
    KnownErrorOid { oid: String, message: &'static str },

    #[error("OID {oid} is not configured in this set")]
    UnexpectedOid { oid: String },
}

impl CollectError {
    /// Стабильный код для записи об ошибке
    pub fn error_code(&self) -> String {
        match self {
            CollectError::DeviceStatus { status } => status.code(),
            CollectError::TableWithoutIndex { .. }
            | CollectError::BatchLimitExceeded { .. }
            | CollectError::UnsupportedKind { .. } => "ConfigError".to_string(),
            _ => "SNMPError".to_string(),
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CollectError::TableWithoutIndex { .. }
                | CollectError::BatchLimitExceeded { .. }
                | CollectError::UnsupportedKind { .. }
        )
    }
}

impl From<anyhow::Error> for CollectError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<UsmReport>() {
            Ok(report) => CollectError::KnownErrorOid {
                oid: report.oid,
                message: report.message,
            },
            Err(e) => CollectError::Transport(format!("{e:#}")),
        }
    }
}
