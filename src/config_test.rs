use super::*;

// Environment mutation is process-global; every test here holds this lock.
static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

const APP_KEYS: [&str; 6] = [
    "PORT",
    "DASHBOARD_CENTER_LAT",
    "DASHBOARD_CENTER_LON",
    "DASHBOARD_ZOOM",
    "AI_MOCK_DELAY_MS",
    "AI_MAX_OUTPUT_TOKENS",
];

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn clear_app_env() {
    for key in APP_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_uses_default() {
    let _guard = lock_env();
    unsafe { std::env::remove_var("BITEBASE_TEST_PARSE_MISSING") };
    assert_eq!(env_parse("BITEBASE_TEST_PARSE_MISSING", 7_u32), 7);
}

#[test]
fn env_parse_reads_value() {
    let _guard = lock_env();
    unsafe { std::env::set_var("BITEBASE_TEST_PARSE_SET", "42") };
    assert_eq!(env_parse("BITEBASE_TEST_PARSE_SET", 7_u32), 42);
    unsafe { std::env::remove_var("BITEBASE_TEST_PARSE_SET") };
}

#[test]
fn env_parse_garbage_uses_default() {
    let _guard = lock_env();
    unsafe { std::env::set_var("BITEBASE_TEST_PARSE_BAD", "not-a-number") };
    assert!((env_parse("BITEBASE_TEST_PARSE_BAD", 1.5_f64) - 1.5).abs() < f64::EPSILON);
    unsafe { std::env::remove_var("BITEBASE_TEST_PARSE_BAD") };
}

// =============================================================================
// AppConfig
// =============================================================================

#[test]
fn from_env_defaults() {
    let _guard = lock_env();
    clear_app_env();
    let config = AppConfig::from_env();
    assert_eq!(config.port, DEFAULT_PORT);
    assert!((config.view.latitude - DEFAULT_CENTER_LAT).abs() < f64::EPSILON);
    assert!((config.view.longitude - DEFAULT_CENTER_LON).abs() < f64::EPSILON);
    assert!((config.view.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    assert_eq!(config.ai, AiSettings::default());
    assert_eq!(config.ai.mock_delay, Duration::from_millis(500));
}

#[test]
fn from_env_overrides() {
    let _guard = lock_env();
    clear_app_env();
    unsafe {
        std::env::set_var("PORT", "8080");
        std::env::set_var("DASHBOARD_CENTER_LAT", "40.7128");
        std::env::set_var("DASHBOARD_ZOOM", "11");
        std::env::set_var("AI_MOCK_DELAY_MS", "0");
        std::env::set_var("AI_MAX_OUTPUT_TOKENS", "512");
    }
    let config = AppConfig::from_env();
    clear_app_env();

    assert_eq!(config.port, 8080);
    assert!((config.view.latitude - 40.7128).abs() < f64::EPSILON);
    assert!((config.view.longitude - DEFAULT_CENTER_LON).abs() < f64::EPSILON);
    assert!((config.view.zoom - 11.0).abs() < f64::EPSILON);
    assert_eq!(config.ai.mock_delay, Duration::ZERO);
    assert_eq!(config.ai.max_output_tokens, 512);
}
