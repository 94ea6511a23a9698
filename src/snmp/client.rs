use anyhow::Result;
use snmp2::{AsyncSession, Oid};
use tokio::time::{Duration, timeout};

use super::convert::to_raw_varbind;
use super::known_errors::{UsmReport, known_error_message};
use super::oid::{normalize_oid, parse_oid};
use super::status::ErrorStatus;
use super::types::{GetResponse, ProtocolType, RawVarBind};
use super::SnmpSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    V2c,
    V3,
}

impl SnmpVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SnmpVersion::V2c => "SNMPv2c",
            SnmpVersion::V3 => "SNMPv3",
        }
    }
}

/// Параметры запросов: таймаут, повторы, размер GETBULK
#[derive(Debug, Clone, Copy)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub retries: u32,
    pub exponential_timeout: bool,
    pub max_repetitions: u32,
}

/// SNMP клиент поверх `snmp2::AsyncSession`
pub struct SnmpClient {
    session: AsyncSession,
    version: SnmpVersion,
    policy: RequestPolicy,
}

impl SnmpClient {
    pub(crate) fn new(session: AsyncSession, version: SnmpVersion, policy: RequestPolicy) -> Self {
        Self {
            session,
            version,
            policy,
        }
    }

    pub fn version(&self) -> SnmpVersion {
        self.version
    }

    async fn request_get(&mut self, oids: &[Oid<'static>]) -> Result<GetResponse> {
        let refs: Vec<&Oid<'_>> = oids.iter().collect();
        let version = self.version;
        let mut wait = self.policy.timeout;

        for attempt in 0..=self.policy.retries {
            match timeout(wait, self.session.get_many(&refs)).await {
                Ok(result) => {
                    let pdu = result
                        .map_err(|e| request_error(version, e, "SNMP GET запрос не удался"))?;
                    let status = ErrorStatus::from_code(pdu.error_status);
                    let varbinds = pdu
                        .varbinds
                        .map(|(oid, value)| to_raw_varbind(&oid, &value))
                        .collect();
                    return Ok(GetResponse { status, varbinds });
                }
                Err(_) => {
                    tracing::warn!(attempt, timeout_ms = wait.as_millis() as u64, "Таймаут SNMP GET");
                    wait = next_wait(wait, self.policy.exponential_timeout);
                }
            }
        }

        anyhow::bail!("TIMEOUT: SNMP GET без ответа после {} попыток", self.policy.retries + 1)
    }

    async fn request_bulk(&mut self, from: &Oid<'static>) -> Result<GetResponse> {
        let version = self.version;
        let mut wait = self.policy.timeout;

        for attempt in 0..=self.policy.retries {
            match timeout(
                wait,
                self.session
                    .getbulk(&[from], 0, self.policy.max_repetitions),
            )
            .await
            {
                Ok(result) => {
                    let pdu = result
                        .map_err(|e| request_error(version, e, "SNMP GETBULK запрос не удался"))?;
                    let status = ErrorStatus::from_code(pdu.error_status);
                    let varbinds = pdu
                        .varbinds
                        .map(|(oid, value)| to_raw_varbind(&oid, &value))
                        .collect();
                    return Ok(GetResponse { status, varbinds });
                }
                Err(_) => {
                    tracing::warn!(attempt, timeout_ms = wait.as_millis() as u64, "Таймаут SNMP GETBULK");
                    wait = next_wait(wait, self.policy.exponential_timeout);
                }
            }
        }

        anyhow::bail!(
            "TIMEOUT: SNMP GETBULK без ответа после {} попыток",
            self.policy.retries + 1
        )
    }
}

/// На v3 сессии отказ USM превращается в `UsmReport`, остальное идёт как ошибка транспорта
fn request_error(version: SnmpVersion, err: snmp2::Error, what: &'static str) -> anyhow::Error {
    if version == SnmpVersion::V3 {
        if let Some(report) = UsmReport::from_snmp_error(&err) {
            return report.into();
        }
    }
    anyhow::Error::new(err).context(what)
}

fn next_wait(current: Duration, exponential: bool) -> Duration {
    if exponential { current * 2 } else { current }
}

/// OID лежит строго внутри поддерева `root`
fn is_within(oid: &str, root: &str) -> bool {
    oid.strip_prefix(root)
        .is_some_and(|rest| rest.starts_with('.'))
}

impl SnmpSession for SnmpClient {
    async fn get(&mut self, oids: &[String]) -> Result<GetResponse> {
        let parsed = oids
            .iter()
            .map(|oid| parse_oid(oid))
            .collect::<Result<Vec<_>>>()?;
        self.request_get(&parsed).await
    }

    async fn bulk_walk<F>(&mut self, root_oid: &str, mut on_unit: F) -> Result<()>
    where
        F: FnMut(RawVarBind) -> Result<()>,
    {
        let root = normalize_oid(root_oid);
        let mut current = root.clone();

        loop {
            let from = parse_oid(&current)?;
            let response = self.request_bulk(&from).await?;

            if let Some(status) = response.status {
                anyhow::bail!("{}: {}", status.code(), status.message());
            }

            match walk_batch(&root, &current, response.varbinds, &mut on_unit)? {
                Some(last) => current = last,
                None => return Ok(()),
            }
        }
    }
}

/// Отдаёт `on_unit` значения одного ответа GETBULK.
/// `Some(oid)` с которого продолжать обход, `None` если обход закончен
fn walk_batch<F>(
    root: &str,
    current: &str,
    varbinds: Vec<RawVarBind>,
    on_unit: &mut F,
) -> Result<Option<String>>
where
    F: FnMut(RawVarBind) -> Result<()>,
{
    let mut last: Option<String> = None;
    for unit in varbinds {
        // usmStats лежит вне поддерева, но это ошибка, а не конец таблицы
        if known_error_message(&unit.oid).is_some() {
            on_unit(unit)?;
            return Ok(None);
        }
        if unit.kind == ProtocolType::EndOfMibView || !is_within(&unit.oid, root) {
            return Ok(None);
        }
        // агент вернул тот же OID, дальше не продвинемся
        if unit.oid == current || last.as_deref() == Some(unit.oid.as_str()) {
            return Ok(None);
        }
        last = Some(unit.oid.clone());
        on_unit(unit)?;
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_check_requires_separator() {
        assert!(is_within(".1.3.6.1.2.1.2.2.1.1.5", ".1.3.6.1.2.1.2.2"));
        assert!(!is_within(".1.3.6.1.2.1.2.20.1", ".1.3.6.1.2.1.2.2"));
        assert!(!is_within(".1.3.6.1.2.1.2.2", ".1.3.6.1.2.1.2.2"));
    }

    fn collect_batch(root: &str, varbinds: Vec<RawVarBind>) -> (Vec<String>, Option<String>) {
        let mut seen = Vec::new();
        let next = walk_batch(root, root, varbinds, &mut |unit: RawVarBind| -> Result<()> {
            seen.push(unit.oid);
            Ok(())
        })
        .unwrap();
        (seen, next)
    }

    #[test]
    fn walk_batch_continues_from_last_oid() {
        let (seen, next) = collect_batch(
            ".1.3.6.1.2.1.2.2",
            vec![
                RawVarBind::integer(".1.3.6.1.2.1.2.2.1.1.1", ProtocolType::Integer, 1),
                RawVarBind::integer(".1.3.6.1.2.1.2.2.1.1.2", ProtocolType::Integer, 2),
            ],
        );
        assert_eq!(seen.len(), 2);
        assert_eq!(next.as_deref(), Some(".1.3.6.1.2.1.2.2.1.1.2"));
    }

    #[test]
    fn walk_batch_stops_outside_subtree() {
        let (seen, next) = collect_batch(
            ".1.3.6.1.2.1.2.2",
            vec![
                RawVarBind::integer(".1.3.6.1.2.1.2.2.1.1.1", ProtocolType::Integer, 1),
                RawVarBind::integer(".1.3.6.1.2.1.3.1.1.1", ProtocolType::Integer, 9),
            ],
        );
        assert_eq!(seen, vec![".1.3.6.1.2.1.2.2.1.1.1".to_string()]);
        assert_eq!(next, None);
    }

    #[test]
    fn walk_batch_hands_over_usm_report_oid() {
        let (seen, next) = collect_batch(
            ".1.3.6.1.2.1.2.2",
            vec![RawVarBind::integer(
                ".1.3.6.1.6.3.15.1.1.5.0",
                ProtocolType::Counter32,
                3,
            )],
        );
        assert_eq!(seen, vec![".1.3.6.1.6.3.15.1.1.5.0".to_string()]);
        assert_eq!(next, None);
    }

    #[test]
    fn walk_batch_propagates_callback_error() {
        let result = walk_batch(
            ".1.3.6.1.2.1.2.2",
            ".1.3.6.1.2.1.2.2",
            vec![RawVarBind::integer(".1.3.6.1.6.3.15.1.1.3.0", ProtocolType::Counter32, 1)],
            &mut |_unit: RawVarBind| -> Result<()> { anyhow::bail!("usmStatsUnknownUserNames") },
        );
        assert!(result.is_err());
    }

    #[test]
    fn usm_failures_on_v3_become_reports() {
        let err = request_error(
            SnmpVersion::V3,
            snmp2::Error::AuthFailure(snmp2::v3::AuthErrorKind::UsernameMismatch),
            "SNMP GET запрос не удался",
        );
        let report = err.downcast_ref::<UsmReport>().unwrap();
        assert_eq!(report.oid, ".1.3.6.1.6.3.15.1.1.3.0");

        let err = request_error(SnmpVersion::V3, snmp2::Error::AsnWrongType, "GET");
        assert!(err.downcast_ref::<UsmReport>().is_some());
    }

    #[test]
    fn v2c_errors_stay_transport() {
        let err = request_error(SnmpVersion::V2c, snmp2::Error::AsnWrongType, "GET");
        assert!(err.downcast_ref::<UsmReport>().is_none());
        assert!(format!("{err:#}").starts_with("GET"));
    }

    #[test]
    fn exponential_wait_doubles() {
        let base = Duration::from_secs(2);
        assert_eq!(next_wait(base, false), base);
        assert_eq!(next_wait(base, true), Duration::from_secs(4));
    }
}
