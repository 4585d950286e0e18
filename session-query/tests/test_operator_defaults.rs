use session_query::{
    build_clause, static_fields, FieldRegistry, OperatorDefaults, OperatorTag, RawValue,
    ValidationError, ValueType,
};

#[test]
fn compiled_in_defaults() {
    let defaults = OperatorDefaults::default();

    assert_eq!(defaults.for_type(ValueType::Boolean), &[OperatorTag::Equals]);
    assert!(defaults
        .for_type(ValueType::Long)
        .contains(&OperatorTag::GreaterThan));
    assert!(defaults
        .for_type(ValueType::Text)
        .contains(&OperatorTag::Contains));
    assert!(!defaults
        .for_type(ValueType::Text)
        .contains(&OperatorTag::GreaterThan));
}

#[test]
fn yaml_override_replaces_the_sets() {
    let yaml = r#"
text: [equals, is_one_of]
long: [equals, greater_than]
boolean: [equals]
"#;
    let defaults = OperatorDefaults::from_yaml(yaml).unwrap();

    assert_eq!(
        defaults.for_type(ValueType::Text),
        &[OperatorTag::Equals, OperatorTag::IsOneOf]
    );
    assert_eq!(
        defaults.for_type(ValueType::Long),
        &[OperatorTag::Equals, OperatorTag::GreaterThan]
    );
}

#[test]
fn yaml_override_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("operators.yaml");
    std::fs::write(
        &path,
        "text: [equals]\nlong: [equals]\nboolean: [equals]\n",
    )
    .unwrap();

    let yaml = std::fs::read_to_string(&path).unwrap();
    let defaults = OperatorDefaults::from_yaml(&yaml).unwrap();
    assert_eq!(defaults.for_type(ValueType::Text), &[OperatorTag::Equals]);
}

#[test]
fn overridden_defaults_flow_into_validation() {
    let yaml = "text: [equals]\nlong: [equals]\nboolean: [equals]\n";
    let defaults = OperatorDefaults::from_yaml(yaml).unwrap();
    let registry = FieldRegistry::merge(&static_fields(&defaults), &[]);

    // contains is in the compiled-in text set but not in the override
    let err = build_clause(
        &registry,
        "app_version",
        OperatorTag::Contains,
        &RawValue::from("1."),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::OperatorNotAllowed("app_version".to_string(), OperatorTag::Contains)
    );
}

#[test]
fn unknown_operator_name_fails_to_parse() {
    let yaml = "text: [sounds_like]\nlong: []\nboolean: []\n";
    assert!(OperatorDefaults::from_yaml(yaml).is_err());
}
