//! Encode/decode tests: rendering rules, round trips, nesting, malformed input.

use jpack_codec::{encode, flatten_recursive, Codec};
use jpack_core::config::{MalformedPolicy, PackConfig};
use jpack_core::{Error, Value};

fn t(s: &str) -> Value {
    Value::text(s)
}

fn raw_codec() -> Codec {
    Codec::new(PackConfig {
        malformed: MalformedPolicy::Raw,
        ..PackConfig::default()
    })
    .unwrap()
}

#[test]
fn test_single_scalar_renders_bare() {
    assert_eq!(encode(&[t("a")]), "a");
    assert_eq!(encode(&[Value::Integer(5)]), "5");
    assert_eq!(encode(&[Value::Real(2.5)]), "2.5");
    assert_eq!(encode(&[Value::Null]), "null");
}

#[test]
fn test_text_that_would_reparse_differently_is_quoted() {
    assert_eq!(encode(&[t("1")]), "\"1\"");
    assert_eq!(encode(&[t("null")]), "\"null\"");
    assert_eq!(encode(&[t("[x]")]), "\"[x]\"");
    // Still no brackets.
    assert!(!encode(&[t("1")]).as_str().starts_with('['));
}

#[test]
fn test_everything_else_renders_as_array() {
    assert_eq!(encode(&[]), "[]");
    assert_eq!(encode(&[Value::Integer(1), Value::Integer(2)]), "[1,2]");
    assert_eq!(
        encode(&[Value::sequence(vec![t("b"), Value::Integer(3)])]),
        "[[\"b\",3]]"
    );
}

#[test]
fn test_jpack_examples() {
    let codec = Codec::default();
    assert_eq!(codec.pack(&[t("a")]).unwrap(), "a");
    assert_eq!(
        codec.pack(&[t("a"), t("b"), Value::Integer(3)]).unwrap(),
        "[\"a\",\"b\",3]"
    );

    let inner = codec.pack(&[t("b"), t("3")]).unwrap();
    assert_eq!(inner, "[\"b\",3]");
    let outer = codec.pack(&[t("a"), inner.into()]).unwrap();
    assert_eq!(outer, "[\"a\",[\"b\",3]]");
}

#[test]
fn test_round_trip_scalar_sequences() {
    let codec = Codec::default();
    let cases: Vec<Vec<Value>> = vec![
        vec![],
        vec![t("1")],
        vec![t("")],
        vec![t("null")],
        vec![t(" spaced ")],
        vec![t(" [x")],
        vec![Value::Real(1.0)],
        vec![Value::Integer(-7), t("a\"b"), Value::Null, Value::Real(0.25)],
        vec![t("a\tb"), t("c")],
    ];
    for values in cases {
        let pack = encode(&values);
        let decoded = codec.decode_flat(&[pack.clone().into()]).unwrap();
        assert_eq!(decoded, values, "round trip through {}", pack);
    }
}

#[test]
fn test_decode_keeps_or_flattens_nested_packs() {
    let codec = Codec::default();
    let arg = t("[\"b\",3]");

    assert_eq!(
        codec.decode_elem(&[arg.clone()]).unwrap(),
        vec![Value::sequence(vec![t("b"), Value::Integer(3)])]
    );
    assert_eq!(
        codec.decode_flat(&[arg]).unwrap(),
        vec![t("b"), Value::Integer(3)]
    );
}

#[test]
fn test_decode_flattens_only_one_level() {
    let codec = Codec::default();
    let decoded = codec.decode_flat(&[t("[1,[2,[3]]]")]).unwrap();
    assert_eq!(
        decoded,
        vec![
            Value::Integer(1),
            Value::sequence(vec![
                Value::Integer(2),
                Value::sequence(vec![Value::Integer(3)])
            ]),
        ]
    );
}

#[test]
fn test_non_text_arguments_pass_through() {
    let codec = Codec::default();
    let seq = Value::sequence(vec![Value::Integer(1), Value::Integer(2)]);
    let args = vec![Value::Integer(3), Value::Null, seq.clone()];

    assert_eq!(
        codec.decode_flat(&args).unwrap(),
        vec![
            Value::Integer(3),
            Value::Null,
            Value::Integer(1),
            Value::Integer(2)
        ]
    );
    assert_eq!(
        codec.decode_elem(&args).unwrap(),
        vec![Value::Integer(3), Value::Null, seq]
    );
}

#[test]
fn test_json_scalars_and_objects_classify() {
    let codec = Codec::default();
    let decoded = codec
        .decode_flat(&[t("3"), t("2.5"), t("null"), t("\"q\""), t("{\"k\":1}")])
        .unwrap();
    assert_eq!(
        decoded,
        vec![
            Value::Integer(3),
            Value::Real(2.5),
            Value::Null,
            t("q"),
            t("{\"k\":1}")
        ]
    );
}

#[test]
fn test_booleans_become_integers() {
    let codec = Codec::default();
    assert_eq!(
        codec.decode_flat(&[t("[true,false]")]).unwrap(),
        vec![Value::Integer(1), Value::Integer(0)]
    );
}

#[test]
fn test_malformed_pack_errors_by_default() {
    let codec = Codec::default();
    for bad in ["[1,2", "{oops", "  [\"a\""] {
        match codec.decode_flat(&[t(bad)]) {
            Err(Error::Decode { input, .. }) => assert_eq!(input, bad),
            other => panic!("expected decode error for {:?}, got {:?}", bad, other),
        }
        assert!(codec.decode_elem(&[t(bad)]).is_err());
    }
}

#[test]
fn test_malformed_pack_kept_raw_when_configured() {
    let codec = raw_codec();
    assert_eq!(codec.decode_flat(&[t("[1,2")]).unwrap(), vec![t("[1,2")]);
    assert_eq!(codec.pack(&[t("{oops"), t("a")]).unwrap(), "[\"{oops\",\"a\"]");
}

#[test]
fn test_plain_text_is_never_malformed() {
    let codec = Codec::default();
    assert_eq!(
        codec.decode_flat(&[t("hello world"), t("1,2")]).unwrap(),
        vec![t("hello world"), t("1,2")]
    );
}

#[test]
fn test_flatten_recursive_is_depth_unbounded() {
    let nested = Value::sequence(vec![
        Value::Integer(1),
        Value::sequence(vec![Value::sequence(vec![t("deep")]), Value::Null]),
    ]);
    assert_eq!(
        flatten_recursive(vec![nested, Value::Integer(2)]),
        vec![Value::Integer(1), t("deep"), Value::Null, Value::Integer(2)]
    );
}
