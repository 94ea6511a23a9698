use anyhow::{Context, Result};
use snmp2::AsyncSession;

use super::client::{RequestPolicy, SnmpClient, SnmpVersion};

/// Создаёт SNMPv2c клиент
pub async fn create_v2c_client(
    target: &str,
    community: &[u8],
    policy: RequestPolicy,
) -> Result<SnmpClient> {
    let session = AsyncSession::new_v2c(target, community, 2)
        .await
        .context("Не удалось создать SNMP сессию")?;

    tracing::info!(addr = %target, "Открыта SNMPv2c сессия");
    Ok(SnmpClient::new(session, SnmpVersion::V2c, policy))
}
