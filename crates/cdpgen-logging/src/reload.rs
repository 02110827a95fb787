//! Log level reloading once the config file has been read

use crate::layer::build_filter;
use cdpgen_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::{EnvFilter, Registry, reload};

/// Handle for swapping the stderr filter after startup
pub struct ReloadHandle {
    handle: Mutex<Option<reload::Handle<EnvFilter, Registry>>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called by [`crate::init_logging`])
    pub fn set_handle(&self, handle: reload::Handle<EnvFilter, Registry>) {
        *self.handle.lock() = Some(handle);
    }

    /// Switch to a new level; `RUST_LOG` still takes precedence
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let guard = self.handle.lock();
        if let Some(handle) = guard.as_ref() {
            handle
                .reload(build_filter(level))
                .map_err(|e| format!("Failed to reload filter: {e}"))?;
            Ok(())
        } else {
            Err("Reload handle not initialized".to_string())
        }
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
