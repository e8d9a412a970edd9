use super::*;
use std::sync::Mutex;

// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_chat_env() {
    unsafe {
        std::env::remove_var("CHAT_BASE_URL");
        std::env::remove_var("CHAT_POLL_INTERVAL_MS");
        std::env::remove_var("CHAT_VIEWER_IS_OPERATOR");
        std::env::remove_var("CHAT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("CHAT_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("CHAT_SESSION_COOKIE");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_chat_env() };

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg, ChatConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.poll_interval, Duration::from_millis(3000));
    assert!(!cfg.viewer_is_operator);
    assert!(cfg.session_cookie.is_none());
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("CHAT_BASE_URL", "https://soporte.example.test/");
        std::env::set_var("CHAT_POLL_INTERVAL_MS", "500");
        std::env::set_var("CHAT_VIEWER_IS_OPERATOR", "true");
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("CHAT_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("CHAT_SESSION_COOKIE", "session=abc");
    }

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://soporte.example.test");
    assert_eq!(cfg.poll_interval, Duration::from_millis(500));
    assert!(cfg.viewer_is_operator);
    assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    assert_eq!(cfg.connect_timeout, Duration::from_secs(2));
    assert_eq!(cfg.session_cookie.as_deref(), Some("session=abc"));

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_rejects_bad_operator_flag() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("CHAT_VIEWER_IS_OPERATOR", "maybe");
    }

    let err = ChatConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::InvalidValue { var: "CHAT_VIEWER_IS_OPERATOR", value: "maybe".into() });

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_rejects_zero_poll_interval() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("CHAT_POLL_INTERVAL_MS", "0");
    }

    assert!(ChatConfig::from_env().is_err());

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_ignores_unparseable_numbers() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

    unsafe { clear_chat_env() };
}

#[test]
fn normalize_base_url_trims_slashes_and_whitespace() {
    assert_eq!(normalize_base_url(" http://host:5000// "), "http://host:5000");
}
