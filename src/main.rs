use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod collector;
mod config;
mod formatter;
mod models;
mod snmp;

use collector::SnmpCollector;
use config::AppConfig;
use formatter::JsonPublisher;
use snmp::SnmpClient;
use snmp::v3::{SecurityLevel, V3Credentials, parse_auth_protocol, parse_privacy_protocol};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout занят JSON, логи пишем в stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("snmp_metrics_collector=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let files = AppConfig::collection_files_from_env(&args);
    let config = AppConfig::load(&files)?;
    config.debug_config();

    let target = config.get_target();
    let mut client = create_client(&config, &target)
        .await
        .context(format!("Не удалось подключиться к {}", target))?;

    let mut publisher = JsonPublisher::new(&target, client.version().as_str());
    SnmpCollector::collect_all(
        &mut client,
        &mut publisher,
        &config.collections,
        config.unmatched_oid_policy(),
    )
    .await;
    // Выводим результаты в JSON
    match publisher.to_json_string() {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "Ошибка JSON сериализации"),
    }

    Ok(())
}

/// Создает SNMP клиент нужной версии
async fn create_client(config: &AppConfig, target: &str) -> Result<SnmpClient> {
    let policy = config.request_policy();

    if !config.use_v3() {
        return snmp::create_v2c_client(target, &config.get_community(), policy).await;
    }

    let level = SecurityLevel::parse(&config.get_security_level())?;
    let username = config.get_username();
    let auth_password = config.get_auth_password();
    let privacy_password = config.get_privacy_password();
    let creds = V3Credentials {
        level,
        username: &username,
        auth_protocol: parse_auth_protocol(&config.get_auth_protocol())?,
        auth_password: &auth_password,
        cipher: parse_privacy_protocol(&config.get_privacy_protocol())?,
        privacy_password: &privacy_password,
    };

    snmp::create_v3_client(target, creds, policy).await
}
