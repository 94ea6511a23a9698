use anyhow::Result;
use std::env;
use tokio::time::Duration;

pub mod collection;
pub mod settings;

pub use collection::load_collection_file;
pub use settings::Settings;

use crate::collector::UnmatchedOidPolicy;
use crate::models::Collection;
use crate::snmp::client::RequestPolicy;

/// Главная конфигурация приложения
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Запросы из всех файлов коллекций
    pub collections: Vec<Collection>,
    /// Базовые настройки
    pub settings: Settings,
}

impl AppConfig {
    /// Загружает все файлы коллекций
    pub fn load<P: AsRef<std::path::Path>>(collection_files: &[P]) -> Result<Self> {
        if collection_files.is_empty() {
            anyhow::bail!("Нужно указать хотя бы один файл коллекции");
        }

        let mut collections = Vec::new();
        for path in collection_files {
            collections.extend(load_collection_file(path)?);
        }

        Ok(Self {
            collections,
            settings: Settings::default(),
        })
    }

    /// Пути к файлам коллекций из аргументов или COLLECTION_FILES
    pub fn collection_files_from_env(args: &[String]) -> Vec<String> {
        if !args.is_empty() {
            return args.to_vec();
        }
        env::var("COLLECTION_FILES")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Получает target из переменной окружения или использует по умолчанию
    pub fn get_target(&self) -> String {
        let host = env::var("SNMP_TARGET").unwrap_or_else(|_| "127.0.0.1".to_string());
        let host = host.trim();
        // target уже с портом
        if host.contains(':') {
            return host.to_string();
        }
        format!("{}:{}", host, self.get_port())
    }

    pub fn get_port(&self) -> u16 {
        env_parse("SNMP_PORT").unwrap_or(self.settings.connection.port)
    }

    /// Получает timeout из переменной окружения или из настроек
    pub fn get_timeout(&self) -> u64 {
        env_parse("SNMP_TIMEOUT").unwrap_or(self.settings.connection.timeout)
    }

    pub fn get_retries(&self) -> u32 {
        env_parse("SNMP_RETRIES").unwrap_or(self.settings.connection.retries)
    }

    pub fn request_policy(&self) -> RequestPolicy {
        RequestPolicy {
            timeout: Duration::from_secs(self.get_timeout()),
            retries: self.get_retries(),
            exponential_timeout: self.settings.connection.exponential_timeout,
            max_repetitions: self.settings.connection.max_repetitions,
        }
    }

    /// Получает community для SNMPv2c
    pub fn get_community(&self) -> Vec<u8> {
        env::var("SNMP_COMMUNITY")
            .unwrap_or_else(|_| self.settings.auth.v2c.community.clone())
            .trim()
            .as_bytes()
            .to_vec()
    }

    pub fn use_v3(&self) -> bool {
        env_parse("SNMP_V3").unwrap_or(self.settings.auth.v3.enabled)
    }

    pub fn get_security_level(&self) -> String {
        env::var("SNMP_SECURITY_LEVEL")
            .unwrap_or_else(|_| self.settings.auth.v3.security_level.clone())
    }

    /// Получает username для SNMPv3
    pub fn get_username(&self) -> Vec<u8> {
        env::var("SNMP_USERNAME")
            .unwrap_or_else(|_| self.settings.auth.v3.username.clone())
            .into_bytes()
    }

    pub fn get_auth_protocol(&self) -> String {
        env::var("SNMP_AUTH_PROTOCOL")
            .unwrap_or_else(|_| self.settings.auth.v3.auth_protocol.clone())
    }

    /// Получает auth password для SNMPv3
    pub fn get_auth_password(&self) -> Vec<u8> {
        env::var("SNMP_AUTH_PASSWORD")
            .unwrap_or_else(|_| self.settings.auth.v3.auth_password.clone())
            .into_bytes()
    }

    pub fn get_privacy_protocol(&self) -> String {
        env::var("SNMP_PRIV_PROTOCOL")
            .unwrap_or_else(|_| self.settings.auth.v3.privacy_protocol.clone())
    }

    /// Получает privacy password для SNMPv3
    pub fn get_privacy_password(&self) -> Vec<u8> {
        env::var("SNMP_PRIVACY_PASSWORD")
            .unwrap_or_else(|_| self.settings.auth.v3.privacy_password.clone())
            .into_bytes()
    }

    pub fn unmatched_oid_policy(&self) -> UnmatchedOidPolicy {
        let strict = env_parse("SNMP_STRICT_OIDS")
            .unwrap_or(self.settings.collection.strict_unmatched_oids);
        if strict {
            UnmatchedOidPolicy::Fail
        } else {
            UnmatchedOidPolicy::Skip
        }
    }

    pub fn debug_config(&self) {
        let queries: usize = self.collections.iter().map(|c| c.queries.len()).sum();
        tracing::info!(
            target_addr = %self.get_target(),
            timeout_secs = self.get_timeout(),
            retries = self.get_retries(),
            v3 = self.use_v3(),
            collections = self.collections.len(),
            queries,
            "Конфигурация SNMP"
        );
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
