use super::error::{CoerceError, CoerceFailure};
use crate::models::{CoercedValue, MetricTypeHint, MetricValue, SemanticType};
use crate::snmp::{ProtocolType, RawValue, RawVarBind};

/// Приводит значение из ответа к семантическому типу метрики.
///
/// OctetString всегда становится attribute, независимо от `hint`.
/// Числа получают тип из `hint` (auto = gauge), а при attribute превращаются
/// в десятичную строку без потери точности.
pub fn coerce(unit: &RawVarBind, hint: MetricTypeHint) -> Result<CoercedValue, CoerceError> {
    let fail = |reason| CoerceError::new(unit.oid.clone(), unit.kind, reason);

    match unit.kind {
        ProtocolType::OctetString => {
            let text = match &unit.value {
                RawValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                RawValue::Text(text) => text.clone(),
                _ => return Err(fail(CoerceFailure::TypeMismatch("octet string"))),
            };
            Ok(CoercedValue::attribute(text))
        }
        ProtocolType::Integer
        | ProtocolType::Counter32
        | ProtocolType::Gauge32
        | ProtocolType::Counter64
        | ProtocolType::Uinteger32 => match &unit.value {
            RawValue::Int(v) => Ok(numeric(hint, MetricValue::Integer(*v), v.to_string())),
            _ => Err(fail(CoerceFailure::TypeMismatch("integer"))),
        },
        ProtocolType::ObjectIdentifier | ProtocolType::IpAddress => match &unit.value {
            RawValue::Text(text) => Ok(CoercedValue::attribute(text.clone())),
            RawValue::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(CoercedValue::attribute)
                .map_err(|_| fail(CoerceFailure::TypeMismatch("string"))),
            _ => Err(fail(CoerceFailure::TypeMismatch("string"))),
        },
        ProtocolType::OpaqueFloat | ProtocolType::OpaqueDouble => {
            let v = match &unit.value {
                RawValue::Float(v) => *v,
                RawValue::Int(v) => *v as f64,
                _ => return Err(fail(CoerceFailure::TypeMismatch("float"))),
            };
            Ok(numeric(hint, MetricValue::Float(v), format!("{v:.6}")))
        }
        ProtocolType::Boolean => match &unit.value {
            RawValue::Bool(b) => Ok(numeric(
                hint,
                MetricValue::Integer(i128::from(*b)),
                b.to_string(),
            )),
            _ => Err(fail(CoerceFailure::TypeMismatch("boolean"))),
        },
        ProtocolType::Null => Err(fail(CoerceFailure::Null)),
        ProtocolType::NoSuchObject | ProtocolType::NoSuchInstance => {
            Err(fail(CoerceFailure::NoSuchObject))
        }
        ProtocolType::BitString
        | ProtocolType::TimeTicks
        | ProtocolType::Opaque
        | ProtocolType::EndOfMibView
        | ProtocolType::Unknown(_) => Err(fail(CoerceFailure::UnsupportedType)),
    }
}

fn numeric(hint: MetricTypeHint, value: MetricValue, as_text: String) -> CoercedValue {
    match hint.numeric_type() {
        Some(semantic_type) => CoercedValue::new(semantic_type, value),
        None => CoercedValue::new(SemanticType::Attribute, MetricValue::Text(as_text)),
    }
}

/// Значение индексной колонки всегда строка. Boolean индексом быть не может
pub fn coerce_index(unit: &RawVarBind) -> Result<String, CoerceError> {
    if unit.kind == ProtocolType::Boolean {
        return Err(CoerceError::new(
            unit.oid.clone(),
            unit.kind,
            CoerceFailure::UnsupportedType,
        ));
    }
    coerce(unit, MetricTypeHint::Attribute).map(|coerced| coerced.value.to_string())
}

/// Оператор просил числовой тип, а получил attribute
pub fn hint_overridden(hint: MetricTypeHint, coerced: &CoercedValue) -> bool {
    hint.is_explicit_numeric() && coerced.semantic_type == SemanticType::Attribute
}

#[cfg(test)]
mod tests {
    use super::*;

    const OID: &str = ".1.3.6.1.2.1.1.5.0";

    fn unit(kind: ProtocolType, value: RawValue) -> RawVarBind {
        RawVarBind::new(OID, kind, value)
    }

    fn reason(result: Result<CoercedValue, CoerceError>) -> CoerceFailure {
        let err = result.unwrap_err();
        assert_eq!(err.oid, OID);
        err.reason
    }

    #[test]
    fn octet_string_is_always_attribute() {
        for hint in [
            MetricTypeHint::Auto,
            MetricTypeHint::Gauge,
            MetricTypeHint::Delta,
            MetricTypeHint::Rate,
            MetricTypeHint::Attribute,
        ] {
            let coerced = coerce(&RawVarBind::octet_string(OID, "router1"), hint).unwrap();
            assert_eq!(coerced, CoercedValue::attribute("router1"));
        }
    }

    #[test]
    fn octet_string_override_is_reported() {
        let coerced = coerce(&RawVarBind::octet_string(OID, "1"), MetricTypeHint::Gauge).unwrap();
        assert!(hint_overridden(MetricTypeHint::Gauge, &coerced));
        assert!(!hint_overridden(MetricTypeHint::Auto, &coerced));
    }

    #[test]
    fn integers_follow_hint() {
        let u = unit(ProtocolType::Counter32, RawValue::Int(42));
        assert_eq!(
            coerce(&u, MetricTypeHint::Auto).unwrap(),
            CoercedValue::new(SemanticType::Gauge, MetricValue::Integer(42))
        );
        assert_eq!(
            coerce(&u, MetricTypeHint::Delta).unwrap().semantic_type,
            SemanticType::Delta
        );
        assert_eq!(
            coerce(&u, MetricTypeHint::Rate).unwrap().semantic_type,
            SemanticType::Rate
        );
        assert_eq!(
            coerce(&u, MetricTypeHint::Gauge).unwrap().semantic_type,
            SemanticType::Gauge
        );
    }

    #[test]
    fn integer_attribute_is_exact_decimal() {
        for (kind, v) in [
            (ProtocolType::Counter64, i128::from(u64::MAX)),
            (ProtocolType::Integer, i128::from(i64::MIN)),
            (ProtocolType::Gauge32, i128::from(u32::MAX)),
            (ProtocolType::Uinteger32, 7),
        ] {
            let coerced = coerce(&unit(kind, RawValue::Int(v)), MetricTypeHint::Attribute).unwrap();
            assert_eq!(coerced, CoercedValue::attribute(v.to_string()));
        }
        let big = coerce(
            &unit(ProtocolType::Counter64, RawValue::Int(i128::from(u64::MAX))),
            MetricTypeHint::Attribute,
        )
        .unwrap();
        assert_eq!(big.as_text(), Some("18446744073709551615"));
    }

    #[test]
    fn oid_and_ip_are_attributes() {
        let u = unit(
            ProtocolType::ObjectIdentifier,
            RawValue::Text(".1.3.6.1.4.1.8072.3.2.10".into()),
        );
        assert_eq!(
            coerce(&u, MetricTypeHint::Gauge).unwrap(),
            CoercedValue::attribute(".1.3.6.1.4.1.8072.3.2.10")
        );

        let u = unit(ProtocolType::IpAddress, RawValue::Text("10.0.0.1".into()));
        assert_eq!(
            coerce(&u, MetricTypeHint::Auto).unwrap(),
            CoercedValue::attribute("10.0.0.1")
        );
    }

    #[test]
    fn oid_with_unreadable_payload_fails() {
        let u = unit(ProtocolType::ObjectIdentifier, RawValue::Int(5));
        assert_eq!(
            reason(coerce(&u, MetricTypeHint::Auto)),
            CoerceFailure::TypeMismatch("string")
        );
        let u = unit(ProtocolType::IpAddress, RawValue::Bytes(vec![0xff, 0xfe]));
        assert_eq!(
            reason(coerce(&u, MetricTypeHint::Auto)),
            CoerceFailure::TypeMismatch("string")
        );
    }

    #[test]
    fn opaque_floats_follow_hint() {
        let u = unit(ProtocolType::OpaqueFloat, RawValue::Float(1.5));
        assert_eq!(
            coerce(&u, MetricTypeHint::Rate).unwrap(),
            CoercedValue::new(SemanticType::Rate, MetricValue::Float(1.5))
        );
        let u = unit(ProtocolType::OpaqueDouble, RawValue::Float(0.25));
        assert_eq!(
            coerce(&u, MetricTypeHint::Attribute).unwrap(),
            CoercedValue::attribute("0.250000")
        );
    }

    #[test]
    fn boolean_is_zero_or_one() {
        let t = unit(ProtocolType::Boolean, RawValue::Bool(true));
        let f = unit(ProtocolType::Boolean, RawValue::Bool(false));
        assert_eq!(coerce(&t, MetricTypeHint::Auto).unwrap(), CoercedValue::gauge(1));
        assert_eq!(coerce(&f, MetricTypeHint::Gauge).unwrap(), CoercedValue::gauge(0));
        assert_eq!(
            coerce(&t, MetricTypeHint::Attribute).unwrap(),
            CoercedValue::attribute("true")
        );
    }

    #[test]
    fn boolean_follows_delta_and_rate_hints() {
        let t = unit(ProtocolType::Boolean, RawValue::Bool(true));
        assert_eq!(
            coerce(&t, MetricTypeHint::Delta).unwrap(),
            CoercedValue::new(SemanticType::Delta, MetricValue::Integer(1))
        );
        assert_eq!(
            coerce(&t, MetricTypeHint::Rate).unwrap(),
            CoercedValue::new(SemanticType::Rate, MetricValue::Integer(1))
        );
    }

    #[test]
    fn plain_opaque_is_unsupported() {
        let u = unit(ProtocolType::Opaque, RawValue::Bytes(vec![0x01, 0x02]));
        assert_eq!(
            reason(coerce(&u, MetricTypeHint::Gauge)),
            CoerceFailure::UnsupportedType
        );
    }

    #[test]
    fn end_of_mib_view_is_unsupported() {
        let u = unit(ProtocolType::EndOfMibView, RawValue::Empty);
        let err = coerce(&u, MetricTypeHint::Auto).unwrap_err();
        assert_eq!(err.kind, ProtocolType::EndOfMibView);
        assert_eq!(err.reason, CoerceFailure::UnsupportedType);
    }

    #[test]
    fn bit_string_is_unsupported() {
        let u = unit(ProtocolType::BitString, RawValue::Bytes(vec![0x80]));
        assert_eq!(
            reason(coerce(&u, MetricTypeHint::Auto)),
            CoerceFailure::UnsupportedType
        );
    }

    #[test]
    fn time_ticks_are_unsupported() {
        let u = unit(ProtocolType::TimeTicks, RawValue::Int(12345));
        let err = coerce(&u, MetricTypeHint::Gauge).unwrap_err();
        assert_eq!(err.kind, ProtocolType::TimeTicks);
        assert_eq!(err.reason, CoerceFailure::UnsupportedType);
    }

    #[test]
    fn null_is_an_error() {
        let u = unit(ProtocolType::Null, RawValue::Empty);
        assert_eq!(reason(coerce(&u, MetricTypeHint::Auto)), CoerceFailure::Null);
    }

    #[test]
    fn no_such_object_and_instance_are_errors() {
        for kind in [ProtocolType::NoSuchObject, ProtocolType::NoSuchInstance] {
            let u = unit(kind, RawValue::Empty);
            assert_eq!(
                reason(coerce(&u, MetricTypeHint::Auto)),
                CoerceFailure::NoSuchObject
            );
        }
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let u = unit(ProtocolType::Unknown(0x30), RawValue::Empty);
        let err = coerce(&u, MetricTypeHint::Auto).unwrap_err();
        assert_eq!(err.reason, CoerceFailure::UnsupportedType);
        assert!(err.to_string().contains("0x30"));
    }

    #[test]
    fn index_values_are_strings() {
        assert_eq!(
            coerce_index(&RawVarBind::octet_string(OID, "eth0")).unwrap(),
            "eth0"
        );
        assert_eq!(
            coerce_index(&unit(ProtocolType::Integer, RawValue::Int(17))).unwrap(),
            "17"
        );
        assert_eq!(
            coerce_index(&unit(ProtocolType::OpaqueFloat, RawValue::Float(2.0))).unwrap(),
            "2.000000"
        );
        assert!(coerce_index(&unit(ProtocolType::Null, RawValue::Empty)).is_err());
    }

    #[test]
    fn boolean_index_is_rejected() {
        let err = coerce_index(&unit(ProtocolType::Boolean, RawValue::Bool(true))).unwrap_err();
        assert_eq!(err.reason, CoerceFailure::UnsupportedType);
    }
}
