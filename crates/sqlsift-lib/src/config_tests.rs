use super::*;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.scope, Scope::All);
    assert!(config.structured);
    assert!(config.safety_net);
    assert_eq!(config.max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES);
    assert_eq!(config.oversize, OversizePolicy::Reject);
}

#[test]
fn builder_setters_chain() {
    let config = Config::new()
        .scope(Scope::Executed)
        .structured(false)
        .safety_net(false)
        .max_document_bytes(64)
        .oversize(OversizePolicy::Truncate);

    assert_eq!(config.scope, Scope::Executed);
    assert!(!config.structured);
    assert!(!config.safety_net);
    assert_eq!(config.max_document_bytes, 64);
    assert_eq!(config.oversize, OversizePolicy::Truncate);
}

#[test]
fn deserialize_partial_uses_defaults() {
    let config: Config = serde_json::from_str(r#"{"scope": "executed", "safety-net": false}"#).unwrap();
    assert_eq!(config.scope, Scope::Executed);
    assert!(!config.safety_net);
    assert!(config.structured);
    assert_eq!(config.max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES);
}

#[test]
fn deserialize_all_keys() {
    let config: Config = serde_json::from_str(
        r#"{
            "scope": "all",
            "structured": false,
            "safety-net": true,
            "max-document-bytes": 1024,
            "oversize": "truncate"
        }"#,
    )
    .unwrap();
    assert_eq!(
        config,
        Config::new()
            .structured(false)
            .max_document_bytes(1024)
            .oversize(OversizePolicy::Truncate)
    );
}

#[test]
fn deserialize_rejects_unknown_keys() {
    let result: std::result::Result<Config, _> = serde_json::from_str(r#"{"scopes": "all"}"#);
    assert!(result.is_err());
}

#[test]
fn validate_rejects_zero_limit() {
    let err = Config::new().max_document_bytes(0).validate().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid configuration: max-document-bytes must be positive");
    assert!(Config::new().validate().is_ok());
}

#[test]
#[cfg(target_pointer_width = "64")]
fn validate_rejects_limit_past_span_range() {
    let limit = MAX_DOCUMENT_BYTES + 1;
    let err = Config::new().max_document_bytes(limit).validate().unwrap_err();
    assert!(err.to_string().contains("at most 4294967295"), "{err}");
    assert!(Config::new().max_document_bytes(MAX_DOCUMENT_BYTES).validate().is_ok());
    assert_eq!(Config::new().max_document_bytes(limit).document_limit(), MAX_DOCUMENT_BYTES);
}
