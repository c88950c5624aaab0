//! I2C bus scan
//! Idle -> Scanning -> Done(outcome); only one scan runs at a time,
//! every scan replaces the previous result table

use std::fmt;
use std::sync::Mutex;
use crate::common::error::{ErrorCode, SyncError};
use crate::entity::bo::state_bo::I2cDeviceBo;
use crate::entity::dto::scan_dto::ScanResultDto;
use crate::panel::projection::{
    scan_failure_text, scan_found_text, scan_rows, SCAN_BUTTON_BUSY, SCAN_BUTTON_IDLE, SCAN_INVALID, SCAN_IN_PROGRESS,
    SCAN_NO_DEVICES,
};
use crate::util::payload::parse_json;
use crate::{error, info, warn};
use super::context::{lock_or_recover, SyncContext};

const LOG_TAG: &str = "scan_cycle";

const SCAN_PATH: &str = "scan";

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Found(Vec<I2cDeviceBo>),
    NoDevices,
    // 2xx reply with scanComplete false
    Invalid,
    Failed(ErrorCode),
}

/// the last outcome stays in `Done` until the next scan starts
#[derive(Debug, Clone, PartialEq)]
pub enum ScanPhase {
    Idle,
    Scanning,
    Done(ScanOutcome),
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanPhase::Idle => write!(f, "idle"),
            ScanPhase::Scanning => write!(f, "scanning"),
            ScanPhase::Done(ScanOutcome::Found(devices)) => write!(f, "done, {} device(s)", devices.len()),
            ScanPhase::Done(ScanOutcome::NoDevices) => write!(f, "done, no devices"),
            ScanPhase::Done(ScanOutcome::Invalid) => write!(f, "done, invalid reply"),
            ScanPhase::Done(ScanOutcome::Failed(code)) => write!(f, "failed, error code {}", *code as u16),
        }
    }
}

pub struct ScanCycle {
    ctx: SyncContext,
    phase: Mutex<ScanPhase>,
}

impl ScanCycle {
    pub fn new(ctx: SyncContext) -> Self {
        ScanCycle { ctx, phase: Mutex::new(ScanPhase::Idle) }
    }

    pub fn phase(&self) -> ScanPhase {
        lock_or_recover(&self.phase).clone()
    }

    /// claim the bus and show the busy state; rejected while a scan is running
    pub fn start_scan(&self) -> Result<(), SyncError> {
        {
            let mut phase = lock_or_recover(&self.phase);
            if *phase == ScanPhase::Scanning {
                return Err(SyncError::validation("scan already in progress"));
            }
            *phase = ScanPhase::Scanning;
        }
        let mut panel = self.ctx.panel();
        panel.scanner.button_enabled = false;
        panel.scanner.button_label = SCAN_BUTTON_BUSY.to_string();
        panel.scanner.status = SCAN_IN_PROGRESS.to_string();
        panel.scanner.table_visible = false;
        info!(LOG_TAG, "scanning i2c bus");
        Ok(())
    }

    /// second half of a scan claimed by `start_scan`
    pub async fn run_scan(&self) -> ScanOutcome {
        let result = self.request().await;
        let outcome = self.complete(result);
        *lock_or_recover(&self.phase) = ScanPhase::Done(outcome.clone());
        outcome
    }

    async fn request(&self) -> Result<ScanResultDto, SyncError> {
        let body = self
            .ctx
            .api
            .get(SCAN_PATH, self.ctx.timeouts.scan())
            .await?
            .success_body()?;
        parse_json::<ScanResultDto>(&body)
    }

    fn complete(&self, result: Result<ScanResultDto, SyncError>) -> ScanOutcome {
        let outcome = match result {
            Ok(dto) if !dto.scan_complete => {
                warn!(LOG_TAG, "device reported an incomplete scan");
                ScanOutcome::Invalid
            }
            Ok(dto) if dto.devices.is_empty() => ScanOutcome::NoDevices,
            Ok(dto) => ScanOutcome::Found(dto.devices.into_iter().map(I2cDeviceBo::from).collect()),
            Err(e) => {
                error!(LOG_TAG, "scan failed: {}", e);
                let text = scan_failure_text(&e);
                let mut panel = self.ctx.panel();
                panel.scanner.status = text;
                panel.scanner.rows.clear();
                ScanOutcome::Failed(e.code)
            }
        };

        let mut panel = self.ctx.panel();
        panel.scanner.button_enabled = true;
        panel.scanner.button_label = SCAN_BUTTON_IDLE.to_string();
        match &outcome {
            ScanOutcome::Found(found) => {
                info!(LOG_TAG, "scan found {} device(s)", found.len());
                panel.scanner.status = scan_found_text(found.len());
                panel.scanner.rows = scan_rows(found);
                panel.scanner.table_visible = true;
            }
            ScanOutcome::NoDevices => {
                panel.scanner.status = SCAN_NO_DEVICES.to_string();
                panel.scanner.rows.clear();
            }
            ScanOutcome::Invalid => {
                panel.scanner.status = SCAN_INVALID.to_string();
                panel.scanner.rows.clear();
            }
            ScanOutcome::Failed(_) => {}
        }
        outcome
    }
}
