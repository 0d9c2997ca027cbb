use super::*;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK` so no other test in this module races on env.
unsafe fn clear_app_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("LAYOUT_DEFAULT_THEME");
    }
}

#[test]
fn from_env_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_app_env() };

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg, AppConfig { port: 3000, default_theme: "#6366f1".into() });
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_app_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("LAYOUT_DEFAULT_THEME", "#0F0");
    }

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.default_theme, "#0F0");

    unsafe { clear_app_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_app_env();
        std::env::set_var("PORT", "70000");
    }

    assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Port("70000".into()));

    unsafe { clear_app_env() };
}

#[test]
fn from_env_rejects_non_hex_theme() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_app_env();
        std::env::set_var("LAYOUT_DEFAULT_THEME", "indigo");
    }

    assert!(matches!(AppConfig::from_env(), Err(ConfigError::Theme(t)) if t == "indigo"));

    unsafe { clear_app_env() };
}

#[test]
fn hex_color_shapes() {
    assert!(is_hex_color("#abc"));
    assert!(is_hex_color("#A1B2C3"));
    assert!(!is_hex_color("abc"));
    assert!(!is_hex_color("#abcd"));
    assert!(!is_hex_color("#ggg"));
    assert!(!is_hex_color("#"));
}
