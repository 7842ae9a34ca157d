//! Structured logging.
//!
//! # Responsibilities
//! - Install the process-wide tracing subscriber
//! - Select the renderer from the configured level
//! - Reconfigure level and renderer in place on repeated calls
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for every level except DEBUG, which gets the human-readable format
//! - The subscriber is installed once; later calls swap the filter and the
//!   format layer through reload handles instead of stacking new layers
//! - Reconfiguration belongs to startup and test setup, not request handling

use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{
    filter::LevelFilter,
    fmt,
    layer::{Layered, SubscriberExt},
    reload,
    util::SubscriberInitExt,
    Layer, Registry,
};

use crate::config::LogLevel;

type FilterLayer = reload::Layer<LevelFilter, Registry>;
type Filtered = Layered<FilterLayer, Registry>;
type FormatLayer = Box<dyn Layer<Filtered> + Send + Sync>;

/// Output renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for local development.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// The level/renderer pair applied by [`configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogProfile {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LogProfile {
    pub fn for_level(level: LogLevel) -> Self {
        let format = match level {
            LogLevel::Debug => LogFormat::Pretty,
            _ => LogFormat::Json,
        };
        Self { level, format }
    }

    /// Severity threshold for tracing events.
    pub fn level_filter(&self) -> LevelFilter {
        match self.level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            // tracing has no level above ERROR.
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }

    /// Severity threshold for records bridged from the `log` crate.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

struct Handles {
    filter: reload::Handle<LevelFilter, Registry>,
    format: reload::Handle<FormatLayer, Filtered>,
    installed: bool,
    profile: Mutex<Option<LogProfile>>,
}

static LOGGING: OnceLock<Handles> = OnceLock::new();

/// Configure process-wide logging for `level`.
///
/// Safe to call repeatedly: each call replaces the previous level and renderer.
/// If a foreign global subscriber is already installed, nothing is installed and
/// the profile is only recorded.
pub fn configure(level: LogLevel) -> LogProfile {
    let profile = LogProfile::for_level(level);
    let handles = LOGGING.get_or_init(|| install(profile));

    if handles.installed {
        if let Err(e) = handles.filter.reload(profile.level_filter()) {
            eprintln!("failed to reload log filter: {}", e);
        }
        if let Err(e) = handles.format.reload(format_layer(profile.format)) {
            eprintln!("failed to reload log format: {}", e);
        }
        log::set_max_level(profile.log_level_filter());
    }

    *handles
        .profile
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(profile);

    profile
}

/// The profile applied by the most recent [`configure`] call.
pub fn current() -> Option<LogProfile> {
    LOGGING.get().and_then(|handles| {
        *handles
            .profile
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    })
}

/// Whether this module owns the global subscriber.
pub fn is_installed() -> bool {
    LOGGING.get().map(|handles| handles.installed).unwrap_or(false)
}

fn install(profile: LogProfile) -> Handles {
    let (filter, filter_handle) = reload::Layer::new(profile.level_filter());
    let (format, format_handle) = reload::Layer::new(format_layer(profile.format));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .is_ok();

    Handles {
        filter: filter_handle,
        format: format_handle,
        installed,
        profile: Mutex::new(None),
    }
}

fn format_layer(format: LogFormat) -> FormatLayer {
    match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stdout)
            .boxed(),
    }
}
