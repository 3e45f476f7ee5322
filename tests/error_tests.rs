// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use cachegate::GatewayError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::Config("bad base_url".to_string()),
        GatewayError::InvalidUri("::".to_string()),
        GatewayError::Status {
            uri: "/api/1".to_string(),
            status: 503,
            body: "down".to_string(),
        },
        GatewayError::AuditViolation {
            key: "/api/2".to_string(),
        },
        GatewayError::Internal("oops".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_audit_violation_message() {
    let error = GatewayError::AuditViolation {
        key: "https://lims.example.org/api/v2/samples/S2".to_string(),
    };
    assert!(error.is_audit_violation());
    assert_eq!(
        error.to_string(),
        "Not allowed to fetch https://lims.example.org/api/v2/samples/S2. Should already be in the cache."
    );
}

#[test]
fn test_status_error() {
    let error = GatewayError::Status {
        uri: "/api/1".to_string(),
        status: 404,
        body: "Not Found".to_string(),
    };
    assert_eq!(error.status(), Some(404));
    assert!(!error.is_audit_violation());
    assert!(format!("{}", error).contains("/api/1"));
}

#[test]
fn test_json_error_conversion() {
    let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: GatewayError = parse.into();
    assert!(matches!(error, GatewayError::Json(_)));
    assert_eq!(error.status(), None);
}

#[test]
fn test_invalid_uri_error() {
    let error = GatewayError::InvalidUri("samples/S1: relative URI and no base_url configured".to_string());
    assert!(format!("{}", error).contains("no base_url"));
}
