use anyhow::{Context, Result};
use snmp2::AsyncSession;
use snmp2::v3::{Auth, AuthProtocol, Cipher, Security};

use super::client::{RequestPolicy, SnmpClient, SnmpVersion};

/// Уровень безопасности SNMPv3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityLevel {
    NoAuthNoPriv,
    AuthNoPriv,
    AuthPriv,
}

impl SecurityLevel {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "noauthnopriv" => Ok(Self::NoAuthNoPriv),
            "authnopriv" => Ok(Self::AuthNoPriv),
            "authpriv" => Ok(Self::AuthPriv),
            other => anyhow::bail!(
                "Невалидный security_level '{}' (допустимо noAuthNoPriv, authNoPriv, authPriv)",
                other
            ),
        }
    }
}

pub fn parse_auth_protocol(s: &str) -> Result<AuthProtocol> {
    match s.trim().to_uppercase().as_str() {
        "MD5" => Ok(AuthProtocol::Md5),
        "SHA" | "SHA1" => Ok(AuthProtocol::Sha1),
        other => anyhow::bail!("Невалидный auth_protocol '{}' (допустимо SHA или MD5)", other),
    }
}

pub fn parse_privacy_protocol(s: &str) -> Result<Cipher> {
    match s.trim().to_uppercase().as_str() {
        "AES" | "AES128" => Ok(Cipher::Aes128),
        "DES" => Ok(Cipher::Des),
        other => anyhow::bail!("Невалидный priv_protocol '{}' (допустимо AES или DES)", other),
    }
}

/// Параметры SNMPv3 пользователя
pub struct V3Credentials<'a> {
    pub level: SecurityLevel,
    pub username: &'a [u8],
    pub auth_protocol: AuthProtocol,
    pub auth_password: &'a [u8],
    pub cipher: Cipher,
    pub privacy_password: &'a [u8],
}

fn build_security(creds: V3Credentials<'_>) -> Security {
    let auth = match creds.level {
        SecurityLevel::NoAuthNoPriv => Auth::NoAuthNoPriv,
        SecurityLevel::AuthNoPriv => Auth::AuthNoPriv,
        SecurityLevel::AuthPriv => Auth::AuthPriv {
            cipher: creds.cipher,
            privacy_password: creds.privacy_password.to_vec(),
        },
    };

    Security::new(creds.username, creds.auth_password)
        .with_auth_protocol(creds.auth_protocol)
        .with_auth(auth)
}

/// Создаёт SNMPv3 клиент и выполняет discovery engine id
pub async fn create_v3_client(
    target: &str,
    creds: V3Credentials<'_>,
    policy: RequestPolicy,
) -> Result<SnmpClient> {
    let level = creds.level;
    let security = build_security(creds);
    let mut session = AsyncSession::new_v3(target, 0, security)
        .await
        .context("Не удалось создать SNMPv3 сессию")?;

    session
        .init()
        .await
        .context("SNMPv3 discovery не удался")?;

    tracing::info!(addr = %target, level = ?level, "Открыта SNMPv3 сессия");
    Ok(SnmpClient::new(session, SnmpVersion::V3, policy))
}
