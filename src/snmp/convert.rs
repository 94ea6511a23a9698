use snmp2::{Oid, Value};
use std::net::Ipv4Addr;

use super::oid::oid_to_string;
use super::types::{ProtocolType, RawValue, RawVarBind};

/// Опаковые float/double по схеме net-snmp: 9f 78 04 <4 байта> и 9f 79 08 <8 байт>
const OPAQUE_FLOAT_PREFIX: [u8; 3] = [0x9f, 0x78, 0x04];
const OPAQUE_DOUBLE_PREFIX: [u8; 3] = [0x9f, 0x79, 0x08];

/// Конвертирует varbind из snmp2 во владеющую структуру
pub fn to_raw_varbind(oid: &Oid<'_>, value: &Value<'_>) -> RawVarBind {
    let oid = oid_to_string(oid);
    let (kind, raw) = match value {
        Value::Boolean(b) => (ProtocolType::Boolean, RawValue::Bool(*b)),
        Value::Null => (ProtocolType::Null, RawValue::Empty),
        Value::Integer(v) => (ProtocolType::Integer, RawValue::Int(i128::from(*v))),
        Value::OctetString(bytes) => (ProtocolType::OctetString, RawValue::Bytes(bytes.to_vec())),
        Value::ObjectIdentifier(id) => (
            ProtocolType::ObjectIdentifier,
            RawValue::Text(oid_to_string(id)),
        ),
        Value::IpAddress(octets) => (
            ProtocolType::IpAddress,
            RawValue::Text(Ipv4Addr::from(*octets).to_string()),
        ),
        Value::Counter32(v) => (ProtocolType::Counter32, RawValue::Int(i128::from(*v))),
        Value::Unsigned32(v) => (ProtocolType::Gauge32, RawValue::Int(i128::from(*v))),
        Value::Timeticks(v) => (ProtocolType::TimeTicks, RawValue::Int(i128::from(*v))),
        Value::Counter64(v) => (ProtocolType::Counter64, RawValue::Int(i128::from(*v))),
        Value::Opaque(bytes) => decode_opaque(bytes),
        Value::NoSuchObject => (ProtocolType::NoSuchObject, RawValue::Empty),
        Value::NoSuchInstance => (ProtocolType::NoSuchInstance, RawValue::Empty),
        Value::EndOfMibView => (ProtocolType::EndOfMibView, RawValue::Empty),
        // тег сохраняем, чтобы он попал в диагностику
        Value::Sequence(_) => (ProtocolType::Unknown(0x30), RawValue::Empty),
        Value::Set(_) => (ProtocolType::Unknown(0x31), RawValue::Empty),
        Value::Constructed(tag, _) => (ProtocolType::Unknown(*tag), RawValue::Empty),
        other => {
            tracing::debug!(oid = %oid, value = ?other, "Неподдерживаемый тип значения SNMP");
            (ProtocolType::Unknown(0), RawValue::Empty)
        }
    };

    RawVarBind::new(oid, kind, raw)
}

fn decode_opaque(bytes: &[u8]) -> (ProtocolType, RawValue) {
    if let Some(payload) = bytes.strip_prefix(&OPAQUE_FLOAT_PREFIX[..]) {
        if let Ok(buf) = <[u8; 4]>::try_from(payload) {
            let v = f32::from_be_bytes(buf);
            return (ProtocolType::OpaqueFloat, RawValue::Float(f64::from(v)));
        }
    }
    if let Some(payload) = bytes.strip_prefix(&OPAQUE_DOUBLE_PREFIX[..]) {
        if let Ok(buf) = <[u8; 8]>::try_from(payload) {
            return (
                ProtocolType::OpaqueDouble,
                RawValue::Float(f64::from_be_bytes(buf)),
            );
        }
    }
    (ProtocolType::Opaque, RawValue::Bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snmp::parse_oid;
    use snmp2::AsnReader;

    #[test]
    fn decodes_opaque_float() {
        let mut bytes = OPAQUE_FLOAT_PREFIX.to_vec();
        bytes.extend_from_slice(&1.5f32.to_be_bytes());
        assert_eq!(
            decode_opaque(&bytes),
            (ProtocolType::OpaqueFloat, RawValue::Float(1.5))
        );
    }

    #[test]
    fn decodes_opaque_double() {
        let mut bytes = OPAQUE_DOUBLE_PREFIX.to_vec();
        bytes.extend_from_slice(&2.25f64.to_be_bytes());
        assert_eq!(
            decode_opaque(&bytes),
            (ProtocolType::OpaqueDouble, RawValue::Float(2.25))
        );
    }

    #[test]
    fn plain_opaque_stays_opaque() {
        let (kind, _) = decode_opaque(&[0x01, 0x02]);
        assert_eq!(kind, ProtocolType::Opaque);
    }

    #[test]
    fn converts_common_values() {
        let oid = parse_oid("1.3.6.1.2.1.1.5.0").unwrap();

        let vb = to_raw_varbind(&oid, &Value::OctetString(b"router1"));
        assert_eq!(vb.oid, ".1.3.6.1.2.1.1.5.0");
        assert_eq!(vb.kind, ProtocolType::OctetString);
        assert_eq!(vb.value, RawValue::Bytes(b"router1".to_vec()));

        let vb = to_raw_varbind(&oid, &Value::Counter64(u64::MAX));
        assert_eq!(vb.value, RawValue::Int(i128::from(u64::MAX)));

        let vb = to_raw_varbind(&oid, &Value::IpAddress([10, 0, 0, 1]));
        assert_eq!(vb.value, RawValue::Text("10.0.0.1".to_string()));
    }

    #[test]
    fn constructed_value_keeps_its_tag() {
        let oid = parse_oid("1.3.6.1.4.1.99.1.0").unwrap();
        let vb = to_raw_varbind(&oid, &Value::Constructed(0xa9, AsnReader::from_bytes(&[])));
        assert_eq!(vb.kind, ProtocolType::Unknown(0xa9));
        assert_eq!(vb.value, RawValue::Empty);
    }
}
