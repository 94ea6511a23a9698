use anyhow::Result;

pub mod client;
pub mod convert;
pub mod known_errors;
pub mod oid;
pub mod status;
pub mod types;
pub mod v2c;
pub mod v3;

pub use client::SnmpClient;
pub use known_errors::{UsmReport, known_error_message};
pub use oid::{normalize_oid, parse_oid};
pub use status::ErrorStatus;
pub use types::{GetResponse, ProtocolType, RawValue, RawVarBind};

/// Сессия с устройством. Коллекторы получают её по ссылке и не знают о транспорте
#[allow(async_fn_in_trait)]
pub trait SnmpSession {
    /// GET одним запросом для всех `oids`
    async fn get(&mut self, oids: &[String]) -> Result<GetResponse>;

    /// Обходит поддерево `root_oid` и вызывает `on_unit` для каждого значения.
    /// Ошибка из `on_unit` прерывает обход
    async fn bulk_walk<F>(&mut self, root_oid: &str, on_unit: F) -> Result<()>
    where
        F: FnMut(RawVarBind) -> Result<()>;
}

pub use v2c::create_v2c_client;
pub use v3::create_v3_client;
