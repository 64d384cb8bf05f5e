//! Property-based tests for the XML-RPC codec.
//!
//! Ensures the decoder never panics on arbitrary input and that every
//! representable value survives an encode/decode cycle unchanged.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use hashi_protocol::{CallEnvelope, Codec};
use hashi_types::Value;
use proptest::prelude::*;

fn whole_second_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (0i32..=9999, 1u32..=12, 1u32..=31, 0u32..24, 0u32..60, 0u32..60).prop_filter_map(
        "valid calendar date",
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d).and_then(|date| date.and_hms_opt(h, mi, s))
        },
    )
}

fn leaf(allow_none: bool) -> BoxedStrategy<Value> {
    let datetime = whole_second_datetime().prop_map(Value::DateTime);

    let base = prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |d| d.is_finite())
            .prop_map(Value::Double),
        any::<bool>().prop_map(Value::Bool),
        "[\\PC\r\t\n]{0,24}".prop_map(Value::String),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(Value::Bytes),
        datetime,
    ];

    if allow_none {
        prop_oneof![base, Just(Value::Nil)].boxed()
    } else {
        base.boxed()
    }
}

fn value(allow_none: bool) -> impl Strategy<Value = Value> {
    leaf(allow_none).prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map("\\PC{1,8}", inner, 0..6)
                .prop_map(|m: BTreeMap<String, Value>| Value::Struct(m)),
        ]
    })
}

proptest! {
    /// Arbitrary strings never cause a panic.
    #[test]
    fn no_panic_on_arbitrary_input(input in "\\PC{0,256}") {
        let _ = Codec::new().decode_call(&input);
        let _ = Codec::new().decode_response(&input);
    }

    /// Arbitrary tag soup built from XML-RPC element names never panics.
    #[test]
    fn no_panic_on_tag_soup(
        parts in proptest::collection::vec(
            prop_oneof![
                Just("<methodCall>"), Just("</methodCall>"),
                Just("<methodName>m</methodName>"),
                Just("<params>"), Just("</params>"),
                Just("<param>"), Just("</param>"),
                Just("<value>"), Just("</value>"),
                Just("<array><data>"), Just("</data></array>"),
                Just("<struct>"), Just("</struct>"),
                Just("<member><name>k</name>"), Just("</member>"),
                Just("<int>1</int>"), Just("<nil/>"), Just("text"),
            ],
            0..24,
        )
    ) {
        let body: String = parts.concat();
        let _ = Codec::new().with_allow_none(true).decode_call(&body);
    }

    /// Every value without nil survives a full call round trip.
    #[test]
    fn call_roundtrip(method in "[a-zA-Z][a-zA-Z0-9_.]{0,31}", params in proptest::collection::vec(value(false), 0..4)) {
        let codec = Codec::new();
        let call = CallEnvelope::new(method, params);
        let xml = codec.encode_call(&call).expect("test: encodable");
        prop_assert_eq!(codec.decode_call(&xml).expect("test: decodable"), call);
    }

    /// With nil enabled, nil values round-trip too.
    #[test]
    fn value_roundtrip_with_nil(v in value(true)) {
        let codec = Codec::new().with_allow_none(true);
        let xml = codec.encode_value(&v).expect("test: encodable");
        prop_assert_eq!(codec.decode_value(&xml).expect("test: decodable"), v);
    }

    /// Sub-second datetimes have no wire form and are refused, not truncated.
    #[test]
    fn subsecond_datetime_refused(dt in whole_second_datetime(), nanos in 1u32..1_000_000_000) {
        let precise = dt.with_nanosecond(nanos).expect("test: nanos in range");
        let codec = Codec::new();
        prop_assert!(codec.check(&Value::DateTime(precise)).is_err());
        prop_assert!(codec.encode_value(&Value::DateTime(precise)).is_err());
    }

    /// Responses round-trip as well.
    #[test]
    fn response_roundtrip(v in value(false)) {
        let codec = Codec::new();
        let xml = codec.encode_response(&v).expect("test: encodable");
        let back = codec.decode_response(&xml).expect("test: decodable").into_result();
        prop_assert_eq!(back, Ok(v));
    }
}
