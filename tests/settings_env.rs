//! Settings loaded from the real process environment.
//!
//! Kept in its own test binary: these tests mutate the process environment.

use std::sync::Mutex;

use item_api::config::LogLevel;
use item_api::Settings;

static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_load_reads_process_environment() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("FLASK_ENV", "production");
    std::env::set_var("PORT", "8080");
    std::env::set_var("log_level", "warning");
    std::env::set_var("DATABASE_URL", "");

    let settings = Settings::load();

    std::env::remove_var("FLASK_ENV");
    std::env::remove_var("PORT");
    std::env::remove_var("log_level");
    std::env::remove_var("DATABASE_URL");

    assert_eq!(settings.flask_env, "production");
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.log_level, LogLevel::Warning);
    assert_eq!(settings.database_url, Settings::default().database_url);
}

#[test]
fn test_process_environment_overrides_env_file() {
    use std::io::Write;

    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "API_TITLE=\"From File\"").unwrap();
    writeln!(file, "API_VERSION=9.9.9").unwrap();
    file.flush().unwrap();

    std::env::set_var("API_VERSION", "2.0.0");
    let settings = Settings::load_with_env_file(file.path());
    std::env::remove_var("API_VERSION");

    assert_eq!(settings.api_title, "From File");
    assert_eq!(settings.api_version, "2.0.0");
}

#[cfg(unix)]
#[test]
fn test_load_skips_non_unicode_variables() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    std::env::set_var("UNRELATED_BINARY_VAR", OsStr::from_bytes(&[0x66, 0xff, 0x6f]));
    std::env::set_var("HOST", "127.0.0.1");

    let settings = Settings::load();

    std::env::remove_var("UNRELATED_BINARY_VAR");
    std::env::remove_var("HOST");

    assert_eq!(settings.host, "127.0.0.1");
}
