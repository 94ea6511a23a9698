use serde::{Deserialize, Serialize};

/// Базовые настройки приложения
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Настройки подключения
    pub connection: ConnectionSettings,
    /// Настройки аутентификации
    pub auth: AuthSettings,
    /// Поведение сборщика
    pub collection: CollectionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Порт агента
    pub port: u16,
    /// Таймаут для SNMP операций (секунды)
    pub timeout: u64,
    /// Количество повторов при таймауте
    pub retries: u32,
    /// Удваивать таймаут на каждой попытке
    pub exponential_timeout: bool,
    /// max-repetitions для GETBULK
    pub max_repetitions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Настройки SNMPv2c
    pub v2c: SnmpV2cSettings,
    /// Настройки SNMPv3
    pub v3: SnmpV3Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpV2cSettings {
    /// Community string
    pub community: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnmpV3Settings {
    /// Использовать SNMPv3 вместо v2c
    pub enabled: bool,
    /// noAuthNoPriv, authNoPriv или authPriv
    pub security_level: String,
    /// Имя пользователя
    pub username: String,
    /// SHA или MD5
    pub auth_protocol: String,
    /// Пароль аутентификации
    pub auth_password: String,
    /// AES или DES
    pub privacy_protocol: String,
    /// Пароль шифрования
    pub privacy_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSettings {
    /// Неожиданный OID в ответе валит весь набор
    pub strict_unmatched_oids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings {
                port: 161,
                timeout: 10,
                retries: 0,
                exponential_timeout: false,
                max_repetitions: 10,
            },
            auth: AuthSettings {
                v2c: SnmpV2cSettings {
                    community: "public".to_string(),
                },
                v3: SnmpV3Settings {
                    enabled: false,
                    security_level: String::new(),
                    username: String::new(),
                    auth_protocol: "SHA".to_string(),
                    auth_password: String::new(),
                    privacy_protocol: "AES".to_string(),
                    privacy_password: String::new(),
                },
            },
            collection: CollectionSettings {
                strict_unmatched_oids: false,
            },
        }
    }
}
