use std::fmt;

use super::status::ErrorStatus;

/// Тип значения в ответе SNMP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolType {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    IpAddress,
    Counter32,
    Gauge32,
    TimeTicks,
    Opaque,
    Counter64,
    Uinteger32,
    OpaqueFloat,
    OpaqueDouble,
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    /// Тег, который мы не знаем
    Unknown(u8),
}

impl ProtocolType {
    pub fn is_integer_like(self) -> bool {
        matches!(
            self,
            ProtocolType::Integer
                | ProtocolType::Counter32
                | ProtocolType::Gauge32
                | ProtocolType::Counter64
                | ProtocolType::Uinteger32
        )
    }
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolType::Unknown(tag) => write!(f, "Unknown(0x{tag:02x})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Сырое значение из ответа, до приведения типов
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Empty,
}

/// Одна пара OID → значение из GET или WALK
#[derive(Debug, Clone, PartialEq)]
pub struct RawVarBind {
    pub oid: String,
    pub kind: ProtocolType,
    pub value: RawValue,
}

impl RawVarBind {
    pub fn new(oid: impl Into<String>, kind: ProtocolType, value: RawValue) -> Self {
        Self {
            oid: oid.into(),
            kind,
            value,
        }
    }

    pub fn octet_string(oid: impl Into<String>, value: &str) -> Self {
        Self::new(
            oid,
            ProtocolType::OctetString,
            RawValue::Bytes(value.as_bytes().to_vec()),
        )
    }

    pub fn integer(oid: impl Into<String>, kind: ProtocolType, value: i128) -> Self {
        Self::new(oid, kind, RawValue::Int(value))
    }
}

/// Ответ на GET: статус устройства и значения
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetResponse {
    pub status: Option<ErrorStatus>,
    pub varbinds: Vec<RawVarBind>,
}

impl GetResponse {
    pub fn ok(varbinds: Vec<RawVarBind>) -> Self {
        Self {
            status: None,
            varbinds,
        }
    }
}
