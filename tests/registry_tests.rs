//! Registry lookup, dispatch and capability metadata.

use jpack_core::config::{MalformedPolicy, PackConfig};
use jpack_core::Value;
use jpack_operators::{FunctionKind, OpError, Registry};

fn t(s: &str) -> Value {
    Value::text(s)
}

#[test]
fn test_all_builtins_registered() {
    let registry = Registry::new();
    let listed: Vec<(&str, FunctionKind)> = registry
        .entries()
        .map(|e| (e.name(), e.capabilities().kind))
        .collect();

    for name in [
        "jpack",
        "jmerge",
        "jset",
        "jsort",
        "jfilterempty",
        "jflatten",
        "jmergeregexp",
        "j2t",
        "t2j",
        "jdictkeys",
        "jdictvals",
    ] {
        assert!(
            listed.contains(&(name, FunctionKind::Scalar)),
            "{} should be a scalar function",
            name
        );
    }
    for name in ["jsplitv", "jsplit", "jdictsplit"] {
        assert!(listed.contains(&(name, FunctionKind::Table)), "{}", name);
    }
    assert!(listed.contains(&("igroup", FunctionKind::Operator)));
    assert_eq!(listed.len(), 15);

    // Listed in name order.
    let names: Vec<&str> = listed.iter().map(|(n, _)| *n).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_capabilities() {
    let registry = Registry::new();
    let jset = registry.get("jset").unwrap().capabilities();
    assert!(jset.deterministic);
    assert_eq!(jset.min_args, 0);

    let igroup = registry.get("igroup").unwrap().capabilities();
    assert!(!igroup.deterministic);

    assert_eq!(registry.get("jdictvals").unwrap().capabilities().min_args, 1);
    assert!(registry.get("nope").is_none());
}

#[test]
fn test_call_scalar() {
    let registry = Registry::new();
    assert_eq!(
        registry
            .call_scalar("jset", &[t("[3,1]"), t("2"), t("1")])
            .unwrap(),
        t("[1,2,3]")
    );
    assert_eq!(
        registry.call_scalar("jmergeregexp", &[t("[\"a\",\"b\"]")]).unwrap(),
        t("(?:a)|(?:b)")
    );
    assert_eq!(
        registry
            .call_scalar("jdictvals", &[Value::Integer(4)])
            .unwrap(),
        Value::Integer(4)
    );
    assert_eq!(registry.call_scalar("jpack", &[]).unwrap(), t("[]"));
}

#[test]
fn test_lookup_errors() {
    let registry = Registry::new();

    assert!(matches!(
        registry.call_scalar("jnope", &[]),
        Err(OpError::UnknownFunction(name)) if name == "jnope"
    ));

    match registry.call_scalar("jsplitv", &[t("[1]")]) {
        Err(OpError::WrongKind {
            expected, actual, ..
        }) => {
            assert_eq!(expected, FunctionKind::Scalar);
            assert_eq!(actual, FunctionKind::Table);
        }
        other => panic!("expected wrong kind, got {:?}", other),
    }
    assert!(matches!(
        registry.open_table("jset", &[]),
        Err(OpError::WrongKind { .. })
    ));
    assert!(matches!(
        registry.operator("jsplit"),
        Err(OpError::WrongKind { .. })
    ));

    assert!(matches!(
        registry.call_scalar("jdictvals", &[]),
        Err(OpError::Arity { min: 1, got: 0, .. })
    ));
}

#[test]
fn test_codec_errors_surface_as_pack_errors() {
    let registry = Registry::new();
    let err = registry.call_scalar("jmerge", &[t("[1,")]).unwrap_err();
    assert!(matches!(err, OpError::Pack(jpack_core::Error::Decode { .. })));
    assert!(err.to_string().contains("[1,"));
}

#[test]
fn test_config_flows_to_functions_and_operators() {
    let registry = Registry::with_config(PackConfig {
        malformed: MalformedPolicy::Raw,
        estimated_rows: 42,
        ..PackConfig::default()
    })
    .unwrap();
    assert_eq!(registry.codec().config().malformed, MalformedPolicy::Raw);
    // Kept raw, then quoted so it cannot be mistaken for an array.
    assert_eq!(
        registry.call_scalar("jmerge", &[t("[1,")]).unwrap(),
        t("\"[1,\"")
    );

    let plan = registry.operator("igroup").unwrap().plan_access(&[], &[]);
    assert_eq!(plan.estimated_rows, 42);
    assert!(plan.pre_sorted);
}

#[test]
fn test_invalid_config_is_refused() {
    let result = Registry::with_config(PackConfig {
        tab_replacement: "\t".to_string(),
        ..PackConfig::default()
    });
    assert!(matches!(
        result,
        Err(OpError::Pack(jpack_core::Error::Config(_)))
    ));
}

#[test]
fn test_kind_display_pads() {
    assert_eq!(format!("{:<9}|", FunctionKind::Table), "table    |");
    assert_eq!(FunctionKind::Operator.to_string(), "operator");
}
