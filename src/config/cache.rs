//! Memoized settings.
//!
//! The composition root owns a [`SettingsCache`]; the first access parses the
//! environment and every later access hands out the same `Arc`.

use std::sync::{Arc, OnceLock};

use crate::config::schema::Settings;

/// Compute-once holder for [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsCache {
    slot: OnceLock<Arc<Settings>>,
}

impl SettingsCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the cached settings, loading them from the environment on first use.
    pub fn get_or_load(&self) -> Arc<Settings> {
        self.get_or_init(Settings::load)
    }

    /// Return the cached settings, building them with `init` on first use.
    pub fn get_or_init<F>(&self, init: F) -> Arc<Settings>
    where
        F: FnOnce() -> Settings,
    {
        self.slot.get_or_init(|| Arc::new(init())).clone()
    }

    /// Settings if already materialized.
    pub fn get(&self) -> Option<Arc<Settings>> {
        self.slot.get().cloned()
    }
}

static PROCESS_SETTINGS: SettingsCache = SettingsCache::new();

/// Process-wide cached settings.
///
/// The first call loads from the environment; later calls return the
/// identical instance for the lifetime of the process.
pub fn cached_load() -> Arc<Settings> {
    PROCESS_SETTINGS.get_or_load()
}
