//! Tests for the shared error taxonomy

use core_kernel::{ErrorKind, PortError};

#[test]
fn test_port_error_kinds() {
    assert_eq!(PortError::not_found("Claim", "x").kind(), ErrorKind::NotFound);
    assert_eq!(PortError::conflict("dup").kind(), ErrorKind::Conflict);
    assert_eq!(PortError::validation("bad").kind(), ErrorKind::Validation);
    assert_eq!(PortError::connection("refused").kind(), ErrorKind::Transient);
    assert_eq!(PortError::internal("boom").kind(), ErrorKind::Internal);
}

#[test]
fn test_validation_field_is_kept() {
    match PortError::validation_field("must not be blank", "phone") {
        PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("phone")),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_error_kind_codes_are_stable() {
    assert_eq!(ErrorKind::Validation.code(), "validation_error");
    assert_eq!(ErrorKind::Conflict.to_string(), "conflict");
    assert_eq!(ErrorKind::Transient.code(), "service_unavailable");
}

#[test]
fn test_error_kind_serializes_snake_case() {
    let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
    assert_eq!(json, "\"not_found\"");
}
