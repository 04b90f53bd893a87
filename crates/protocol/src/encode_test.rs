//! Tests for line encoding and encode/decode agreement

use bytes::BytesMut;
use uuid::Uuid;

use crate::encode::{EncodeError, LineEncoder};
use crate::line::{decode_line, decode_line_with};
use crate::options::DecodeOptions;
use crate::slice::LineSlice;
use crate::timestamp::parse_timestamp_line;
use crate::value::TypedValue;

fn id() -> Uuid {
    Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()
}

#[test]
fn test_encode_layout() {
    let mut buf: Vec<u8> = Vec::new();
    LineEncoder::new()
        .encode(
            &mut buf,
            b'M',
            id(),
            Some(b"agent1".as_slice()),
            b"cpu.load",
            &TypedValue::Double(0.75),
        )
        .unwrap();

    assert_eq!(
        buf,
        b"M\t550e8400-e29b-41d4-a716-446655440000\tagent1\tcpu.load\tn0.75"
    );
}

#[test]
fn test_encode_without_agent() {
    let mut buf: Vec<u8> = Vec::new();
    LineEncoder::new()
        .encode(&mut buf, b'M', id(), None, b"up", &TypedValue::Absent)
        .unwrap();

    assert_eq!(buf, b"M\t550e8400-e29b-41d4-a716-446655440000\tup\t-");
}

#[test]
fn test_encode_decode_agrees_for_every_value_type() {
    let text = b"free text with spaces";
    let values = [
        TypedValue::Absent,
        TypedValue::Int32(i32::MIN),
        TypedValue::UInt32(u32::MAX),
        TypedValue::Int64(-1),
        TypedValue::UInt64(u64::MAX),
        TypedValue::Double(0.1),
        TypedValue::Double(-2.5e-300),
        TypedValue::Double(1e300),
        TypedValue::String(LineSlice::new(text, 0)),
    ];
    let encoder = LineEncoder::new();

    for value in values {
        for agent in [None, Some(b"".as_slice()), Some(b"agent-7".as_slice())] {
            let mut buf = BytesMut::new();
            encoder
                .encode(&mut buf, b'M', id(), agent, b"m.name", &value)
                .unwrap();

            let decoded = decode_line(&buf, agent.is_some()).unwrap();
            assert_eq!(decoded.record_type, b'M');
            assert_eq!(decoded.identifier, id());
            assert_eq!(decoded.agent_name.map(|a| a.as_bytes()), agent);
            assert_eq!(decoded.metric_name, "m.name");
            assert_eq!(decoded.value, value);
        }
    }
}

#[test]
fn test_encode_decode_custom_delimiter() {
    let encoder = LineEncoder::with_delimiter(b'|');
    let options = DecodeOptions::new().with_delimiter(b'|');
    let mut buf: Vec<u8> = Vec::new();
    encoder
        .encode(&mut buf, b'M', id(), None, b"a\tb", &TypedValue::Int32(9))
        .unwrap();

    let decoded = decode_line_with(&buf, false, &options).unwrap();
    assert_eq!(decoded.metric_name, "a\tb");
    assert_eq!(decoded.value, TypedValue::Int32(9));
}

#[test]
fn test_encode_rejects_empty_metric_name() {
    let mut buf: Vec<u8> = Vec::new();
    let err = LineEncoder::new()
        .encode(&mut buf, b'M', id(), None, b"", &TypedValue::Absent)
        .unwrap_err();
    assert_eq!(err, EncodeError::EmptyMetricName);
    assert!(buf.is_empty());
}

#[test]
fn test_encode_rejects_delimiter_in_fields() {
    let encoder = LineEncoder::new();
    let mut buf: Vec<u8> = Vec::new();

    let err = encoder
        .encode(&mut buf, b'M', id(), Some(b"a\tb".as_slice()), b"cpu", &TypedValue::Absent)
        .unwrap_err();
    assert_eq!(
        err,
        EncodeError::DelimiterInField {
            field: "agent name"
        }
    );

    let err = encoder
        .encode(&mut buf, b'M', id(), None, b"cpu\t", &TypedValue::Absent)
        .unwrap_err();
    assert_eq!(err.to_string(), "metric name contains the field delimiter");

    let tabbed = TypedValue::String(LineSlice::new(b"x\ty", 0));
    assert!(encoder
        .encode(&mut buf, b'M', id(), None, b"cpu", &tabbed)
        .is_err());

    assert!(encoder
        .encode(&mut buf, b'\t', id(), None, b"cpu", &TypedValue::Absent)
        .is_err());

    assert!(buf.is_empty());
}

#[test]
fn test_encode_rejects_non_finite_double() {
    let encoder = LineEncoder::new();
    let mut buf: Vec<u8> = Vec::new();

    for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = encoder
            .encode(&mut buf, b'M', id(), None, b"m", &TypedValue::Double(v))
            .unwrap_err();
        assert_eq!(err, EncodeError::NonFiniteDouble, "{v}");
    }
    assert!(buf.is_empty());

    // The largest finite double still decodes with default options
    encoder
        .encode(&mut buf, b'M', id(), None, b"m", &TypedValue::Double(f64::MAX))
        .unwrap();
    assert_eq!(
        decode_line(&buf, false).unwrap().value,
        TypedValue::Double(f64::MAX)
    );
}

#[test]
fn test_encode_rejects_delimiter_in_identifier() {
    // '5' and '-' both occur in the rendered identifier
    for delimiter in [b'5', b'-', b'e'] {
        let mut buf: Vec<u8> = Vec::new();
        let err = LineEncoder::with_delimiter(delimiter)
            .encode(&mut buf, b'M', id(), None, b"m", &TypedValue::Absent)
            .unwrap_err();
        assert_eq!(
            err,
            EncodeError::DelimiterInField {
                field: "identifier"
            }
        );
        assert!(buf.is_empty());
    }
}

#[test]
fn test_encode_rejects_delimiter_in_number() {
    let id = Uuid::nil();
    let cases = [
        (b'7', TypedValue::Int32(17)),
        (b'.', TypedValue::Double(0.5)),
        (b'9', TypedValue::UInt64(9)),
    ];

    for (delimiter, value) in cases {
        let mut buf: Vec<u8> = Vec::new();
        let result = LineEncoder::with_delimiter(delimiter)
            .encode(&mut buf, b'M', id, None, b"m", &value);
        assert_eq!(
            result,
            Err(EncodeError::DelimiterInField { field: "value" }),
            "{}",
            char::from(delimiter)
        );
        assert!(buf.is_empty());
    }
}

#[test]
fn test_encode_rejects_delimiter_equal_to_value_tag() {
    let mut buf: Vec<u8> = Vec::new();
    let err = LineEncoder::with_delimiter(b'n')
        .encode(&mut buf, b'M', Uuid::nil(), None, b"m", &TypedValue::Double(1.5))
        .unwrap_err();
    assert_eq!(err, EncodeError::DelimiterInField { field: "value" });
}

#[test]
fn test_encode_custom_delimiter_output_decodes() {
    let delimiter = b':';
    let options = DecodeOptions::new().with_delimiter(delimiter);
    let encoder = LineEncoder::with_delimiter(delimiter);

    for value in [
        TypedValue::Int64(-42),
        TypedValue::Double(-0.125),
        TypedValue::UInt32(7),
    ] {
        let mut buf: Vec<u8> = Vec::new();
        encoder
            .encode(&mut buf, b'M', id(), Some(b"a1".as_slice()), b"m", &value)
            .unwrap();
        let decoded = decode_line_with(&buf, true, &options).unwrap();
        assert_eq!(decoded.value, value);
        assert_eq!(decoded.identifier, id());
    }
}

#[test]
fn test_encode_timestamp() {
    let mut buf: Vec<u8> = Vec::new();
    LineEncoder::default().encode_timestamp(&mut buf, 1_700_000_000_000);
    assert_eq!(buf, b"1700000000000");
    assert_eq!(parse_timestamp_line(&buf), Some(1_700_000_000_000));
}
