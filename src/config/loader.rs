//! Settings loading from the environment.
//!
//! Variable names are matched case-insensitively against the field names.
//! Empty or unparseable values leave the field at its default; unknown
//! variables are ignored.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::{LogLevel, Settings};

impl Settings {
    /// Load settings from `.env` (if present) and the process environment.
    ///
    /// Process variables take precedence over `.env` entries.
    pub fn load() -> Self {
        let mut vars = dotenv_vars(None);
        vars.extend(process_vars());
        Self::from_vars(vars)
    }

    /// Load settings from a specific dotenv file and the process environment.
    pub fn load_with_env_file(path: &Path) -> Self {
        let mut vars = dotenv_vars(Some(path));
        vars.extend(process_vars());
        Self::from_vars(vars)
    }

    /// Build settings from explicit key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
            .collect();

        let get = |key: &str| lookup(&vars, key);

        let mut settings = Settings::default();

        if let Some(v) = get("flask_env") {
            settings.flask_env = v.to_string();
        }
        if let Some(v) = get("flask_debug").and_then(parse_bool) {
            settings.flask_debug = v;
        }
        if let Some(v) = get("secret_key") {
            settings.secret_key = v.to_string();
        }
        if let Some(v) = get("database_url") {
            settings.database_url = v.to_string();
        }
        if let Some(v) = get("database_echo").and_then(parse_bool) {
            settings.database_echo = v;
        }
        if let Some(v) = get("host") {
            settings.host = v.to_string();
        }
        if let Some(v) = get("port").and_then(parse::<u16>) {
            settings.port = v;
        }
        if let Some(v) = get("log_level").and_then(parse::<LogLevel>) {
            settings.log_level = v;
        }
        if let Some(v) = get("api_title") {
            settings.api_title = v.to_string();
        }
        if let Some(v) = get("api_version") {
            settings.api_version = v.to_string();
        }
        if let Some(v) = get("cors_origins") {
            settings.cors_origins = Some(v.to_string());
        }

        settings
    }
}

/// Read dotenv entries without touching the process environment.
fn dotenv_vars(path: Option<&Path>) -> HashMap<String, String> {
    let iter = match path {
        Some(path) => dotenvy::from_path_iter(path),
        None => dotenvy::dotenv_iter(),
    };

    match iter {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect(),
        Err(_) => HashMap::new(),
    }
}

/// Process environment, skipping entries that are not valid Unicode.
fn process_vars() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os().filter_map(|(k, v)| {
        Some((k.into_string().ok()?.to_ascii_lowercase(), v.into_string().ok()?))
    })
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

/// Lenient boolean parsing.
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
