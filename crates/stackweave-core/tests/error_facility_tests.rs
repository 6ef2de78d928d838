use stackweave_core::errors::{ExError, ExErrorKind, StackError};

#[test]
fn test_malformed_template_carries_marker() {
    let err = StackError::MalformedTemplate {
        marker: "enableJavaMonJob".to_string(),
        token: "{{ start enableJavaMonJob }}".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedTemplate);
    assert_eq!(ex_err.code(), "ERR_MALFORMED_TEMPLATE");
    assert_eq!(ex_err.marker(), Some("enableJavaMonJob"));
    assert_eq!(ex_err.op(), Some("render"));
    assert!(ex_err.message().contains("{{ start enableJavaMonJob }}"));
}

#[test]
fn test_ordering_conflict_lists_cycle_members() {
    let cycle = vec!["flux".to_string(), "secret".to_string(), "flux".to_string()];
    let err = StackError::OrderingConflict {
        addons: cycle.clone(),
    };
    assert_eq!(
        err.to_string(),
        "Ordering conflict: addons form a cycle: flux -> secret -> flux"
    );

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::OrderingConflict);
    assert_eq!(ex_err.related(), Some(cycle.as_slice()));
}

#[test]
fn test_duplicate_distinct_from_unknown() {
    let dup: ExError = StackError::DuplicateAddon {
        name: "flux".to_string(),
    }
    .into();
    let unknown: ExError = StackError::UnknownAddon {
        addon: "secret".to_string(),
        missing: "flux".to_string(),
    }
    .into();

    assert_eq!(dup.kind(), ExErrorKind::DuplicateAddon);
    assert_eq!(unknown.kind(), ExErrorKind::UnknownAddon);
    assert_ne!(dup.code(), unknown.code());
    assert_eq!(dup.addon(), Some("flux"));
    assert_eq!(unknown.addon(), Some("secret"));
    assert!(unknown.message().contains("flux"));
}

#[test]
fn test_invalid_plan_keeps_reason() {
    let ex_err: ExError = StackError::InvalidPlan {
        reason: "region is not set".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_INVALID_PLAN");
    assert_eq!(ex_err.message(), "region is not set");
}

#[test]
fn test_io_error_keeps_path() {
    let err = StackError::Io {
        path: "plan.yaml".to_string(),
        message: "No such file or directory".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Cannot access plan.yaml: No such file or directory"
    );

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.code(), "ERR_IO");
    assert!(ex_err.message().starts_with("plan.yaml"));
}

#[test]
fn test_recursive_parameter_has_own_code() {
    let ex_err: ExError = StackError::RecursiveParameter {
        key: "logStreamName".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::RecursiveParameter);
    assert_eq!(ex_err.code(), "ERR_RECURSIVE_PARAMETER");
    assert!(ex_err.message().contains("logStreamName"));
}

#[test]
fn test_serde_errors_map_to_serialization() {
    let yaml_err = serde_yaml::from_str::<u32>("not: a number").unwrap_err();
    let err: StackError = yaml_err.into();
    assert!(matches!(err, StackError::Serialization { .. }));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_error_kind_codes_are_unique() {
    let kinds = [
        ExErrorKind::MalformedTemplate,
        ExErrorKind::RecursiveParameter,
        ExErrorKind::OrderingConflict,
        ExErrorKind::DuplicateAddon,
        ExErrorKind::UnknownAddon,
        ExErrorKind::InvalidPlan,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
    ];

    let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
