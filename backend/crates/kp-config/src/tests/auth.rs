use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Auth
// =========================================================================

#[test]
#[serial]
fn given_no_secret_when_validate_then_error_mentions_secret() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("secret"));
}

#[test]
#[serial]
fn given_secret_too_short_when_validate_then_error_mentions_32_characters() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("KP_AUTH_SECRET", "tooshort");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_secret_exactly_32_chars_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("KP_AUTH_SECRET", "0123456789abcdef0123456789abcdef");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_access_ttl_not_less_than_refresh_ttl_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("KP_AUTH_SECRET", "0123456789abcdef0123456789abcdef");
    let _access = EnvGuard::set("KP_AUTH_ACCESS_TTL_SECS", "604800");
    let _refresh = EnvGuard::set("KP_AUTH_REFRESH_TTL_SECS", "604800");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("access_ttl_secs"));
}

#[test]
#[serial]
fn given_defaults_when_load_then_refresh_endpoints_are_public() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    let paths = &config.auth.public_paths;
    assert_that!(paths.iter().any(|p| p == "/api/user/login"), eq(true));
    assert_that!(paths.iter().any(|p| p == "/api/user/token/refresh"), eq(true));
}
