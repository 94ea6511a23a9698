use anyhow::{Context, Result};
use snmp2::Oid;

/// Парсит строку OID ("1.3.6.1" или ".1.3.6.1") в `Oid`
pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.context(format!("Невалидный OID: {}", s))?;
    if parts.is_empty() {
        anyhow::bail!("Пустой OID: '{}'", s);
    }
    Oid::from(&parts).map_err(|e| anyhow::anyhow!("Не удалось создать Oid из '{}': {:?}", s, e))
}

/// Приводит OID к абсолютной форме с ведущей точкой
pub fn normalize_oid(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}

/// Абсолютная строка для `Oid` из snmp2
pub fn oid_to_string(oid: &Oid<'_>) -> String {
    normalize_oid(&oid.to_string())
}
