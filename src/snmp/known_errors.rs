use snmp2::v3::AuthErrorKind;

const USM_UNKNOWN_USER_NAMES: &str = ".1.3.6.1.6.3.15.1.1.3.0";
const USM_UNKNOWN_ENGINE_IDS: &str = ".1.3.6.1.6.3.15.1.1.4.0";
const USM_WRONG_DIGESTS: &str = ".1.3.6.1.6.3.15.1.1.5.0";
const USM_DECRYPTION_ERRORS: &str = ".1.3.6.1.6.3.15.1.1.6.0";

/// Поддерево usmStats, если агент прислал Report без разборчивого OID
const USM_STATS: &str = ".1.3.6.1.6.3.15.1.1";

/// Диагностические OID USM, которые агент присылает вместо данных при ошибке SNMPv3
const KNOWN_ERROR_OIDS: &[(&str, &str)] = &[
    (USM_UNKNOWN_USER_NAMES, "usmStatsUnknownUserNames: unknown SNMPv3 user name"),
    (USM_UNKNOWN_ENGINE_IDS, "usmStatsUnknownEngineIDs: unknown SNMPv3 engine ID"),
    (USM_WRONG_DIGESTS, "usmStatsWrongDigests: wrong authentication digest"),
    (USM_DECRYPTION_ERRORS, "usmStatsDecryptionErrors: SNMPv3 decryption failed"),
];

pub fn known_error_message(oid: &str) -> Option<&'static str> {
    let oid = oid.trim();
    KNOWN_ERROR_OIDS
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, message)| *message)
}

/// Агент отверг SNMPv3 запрос на уровне USM
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (OID {oid})")]
pub struct UsmReport {
    pub oid: String,
    pub message: &'static str,
}

impl UsmReport {
    fn from_known(oid: &'static str) -> Option<Self> {
        known_error_message(oid).map(|message| Self {
            oid: oid.to_string(),
            message,
        })
    }

    /// Report PDU, который snmp2 не отдаёт наружу как ответ
    fn unreadable() -> Self {
        Self {
            oid: USM_STATS.to_string(),
            message: "usmStats: SNMPv3 agent answered with a Report PDU",
        }
    }

    /// Ошибка snmp2 на v3 сессии, за которой стоит usmStats отчёт агента
    pub fn from_snmp_error(err: &snmp2::Error) -> Option<Self> {
        match err {
            snmp2::Error::AuthFailure(kind) => {
                let oid = match kind {
                    AuthErrorKind::UsernameMismatch => USM_UNKNOWN_USER_NAMES,
                    AuthErrorKind::EngineIdMismatch => USM_UNKNOWN_ENGINE_IDS,
                    AuthErrorKind::SignatureMismatch | AuthErrorKind::NotAuthenticated => {
                        USM_WRONG_DIGESTS
                    }
                    AuthErrorKind::PrivLengthMismatch | AuthErrorKind::ReplyNotEncrypted => {
                        USM_DECRYPTION_ERRORS
                    }
                    _ => return None,
                };
                Self::from_known(oid)
            }
            snmp2::Error::AsnWrongType => Some(Self::unreadable()),
            _ => None,
        }
    }
}
