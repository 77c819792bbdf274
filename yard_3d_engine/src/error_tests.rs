//! Unit tests for error.rs
//!
//! Tests Error variants, Display output, conversions and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("geometry 'roof' has a negative height".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid resource"));
    assert!(display.contains("negative height"));
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("camera path needs at least 2 waypoints".to_string());
    assert_eq!(
        format!("{}", err),
        "Invalid configuration: camera path needs at least 2 waypoints"
    );
}

#[test]
fn test_duplicate_registration_display() {
    let err = Error::DuplicateRegistration("node already in Foreground".to_string());
    assert!(format!("{}", err).contains("Duplicate registration"));
}

#[test]
fn test_invalid_node_and_init_display() {
    assert!(format!("{}", Error::InvalidNode("k".to_string())).contains("Invalid node"));
    assert!(format!("{}", Error::InitializationFailed("no window".to_string()))
        .contains("Initialization failed: no window"));
    assert!(format!("{}", Error::Io("missing".to_string())).contains("I/O error"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidConfig("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::InvalidResource("res".to_string());
    let err2 = err1.clone();
    assert_eq!(err1, err2);
    assert_ne!(err1, Error::InvalidConfig("res".to_string()));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "yard.ron not found");
    let err: Error = io.into();
    match err {
        Error::Io(msg) => assert!(msg.contains("yard.ron")),
        other => panic!("expected Io, got {:?}", other),
    }
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_named_variant() {
    let err = crate::engine_err!("yard3d::tests", InvalidNode, "node {} missing", 7);
    assert_eq!(err, Error::InvalidNode("node 7 missing".to_string()));
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("yard3d::tests", InvalidConfig, "flag was {}", flag);
        }
        Ok(1)
    }

    assert_eq!(fails(false), Ok(1));
    assert_eq!(fails(true), Err(Error::InvalidConfig("flag was true".to_string())));
}

// ============================================================================
// ERROR PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidResource("factory failed".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert_eq!(outer(), Err(Error::InvalidResource("factory failed".to_string())));
}
