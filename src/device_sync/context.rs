use std::sync::{Arc, Mutex, MutexGuard};
use crate::common::error::SyncError;
use crate::common::http::DeviceApi;
use crate::common::setting::Timeout;
use crate::panel::panel::{lock_panel, Panel, SharedPanel};
use crate::{debug, warn};

/// what every sync component is constructed with
#[derive(Clone)]
pub struct SyncContext {
    pub api: Arc<dyn DeviceApi>,
    pub panel: SharedPanel,
    pub timeouts: Timeout,
}

impl SyncContext {
    pub fn new(api: Arc<dyn DeviceApi>, panel: SharedPanel, timeouts: Timeout) -> Self {
        SyncContext { api, panel, timeouts }
    }

    pub fn panel(&self) -> MutexGuard<'_, Panel> {
        lock_panel(&self.panel)
    }
}

/// lock a component mutex, poisoning never loses the last known value
pub fn lock_or_recover<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// read cycle failures end up here: log only, the cycle retries on its own schedule
pub fn log_cycle_failure(tag: &str, resource: &str, e: &SyncError) {
    if e.is_superseded() {
        debug!(tag, "{} result dropped: {}", resource, e);
    } else {
        warn!(tag, "{} cycle failed, keeping last known value: {}", resource, e);
    }
}
