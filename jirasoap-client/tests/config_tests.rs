use jirasoap_client::{ClientConfig, ClientError};
use pretty_assertions::assert_eq;

#[test]
fn partial_json_takes_defaults() {
    let config = ClientConfig::from_json(r#"{ "endpoint_url": "https://jira.example.com" }"#).unwrap();
    assert_eq!(
        config,
        ClientConfig {
            endpoint_url: "https://jira.example.com".into(),
            ..Default::default()
        }
    );
    assert_eq!(
        config.service_url(),
        "https://jira.example.com/rpc/soap/jirasoapservice-v2"
    );
}

#[test]
fn every_key_can_be_overridden() {
    let config = ClientConfig::from_json(
        r#"{
            "endpoint_url": "http://localhost:8080/jira/",
            "service_path": "rpc/soap/custom",
            "timeout_ms": 500,
            "default_max_results": 25
        }"#,
    )
    .unwrap();
    assert_eq!(config.timeout_ms, 500);
    assert_eq!(config.default_max_results, 25);
    assert_eq!(config.service_url(), "http://localhost:8080/jira/rpc/soap/custom");
}

#[test]
fn missing_endpoint_is_rejected() {
    assert!(matches!(ClientConfig::from_json("{}"), Err(ClientError::Config(_))));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = ClientConfig::from_json(r#"{ "endpoint_url": "http://jira", "timeout_ms": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("timeout_ms"));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    assert!(matches!(
        ClientConfig::from_json("{ endpoint_url"),
        Err(ClientError::Serialization(_))
    ));
}

#[test]
fn config_serializes_back_to_json() {
    let config = ClientConfig::new("https://jira.example.com");
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ClientConfig::from_json(&json).unwrap(), config);
}
