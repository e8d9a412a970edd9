use super::*;

#[test]
fn flags_fall_back_to_environment_and_override_it() {
    // SAFETY: the only test in this binary that writes the environment.
    unsafe {
        std::env::set_var("CHAT_BASE_URL", "http://chat.local:8080/");
        std::env::set_var("CHAT_SESSION_COOKIE", "session=env");
        std::env::set_var("CHAT_POLL_INTERVAL_MS", "1500");
    }

    let from_env = Cli::try_parse_from(["atencion", "fetch", "--conversation", "3"]).unwrap();
    assert_eq!(from_env.base_url.as_deref(), Some("http://chat.local:8080/"));
    assert_eq!(from_env.cookie.as_deref(), Some("session=env"));
    assert_eq!(from_env.poll_ms, Some(1500));

    let flagged =
        Cli::try_parse_from(["atencion", "--cookie", "session=flag", "--poll-ms", "500", "close", "--conversation", "3"])
            .unwrap();
    assert_eq!(flagged.cookie.as_deref(), Some("session=flag"));
    assert_eq!(flagged.poll_ms, Some(500));

    let config = resolve_config(&from_env).unwrap();
    assert_eq!(config.base_url, "http://chat.local:8080");
    assert_eq!(config.session_cookie.as_deref(), Some("session=env"));
    assert_eq!(config.poll_interval, Duration::from_millis(1500));

    unsafe {
        std::env::remove_var("CHAT_BASE_URL");
        std::env::remove_var("CHAT_SESSION_COOKIE");
        std::env::remove_var("CHAT_POLL_INTERVAL_MS");
    }
}

#[test]
fn zero_poll_flag_is_rejected() {
    let cli = Cli::try_parse_from(["atencion", "--poll-ms", "0", "fetch", "--conversation", "3"]).unwrap();
    assert!(matches!(
        resolve_config(&cli),
        Err(CliError::Config(ConfigError::InvalidValue { var: "--poll-ms", .. }))
    ));
}
