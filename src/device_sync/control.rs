//! LED and DAC sync
//! reads go through a cycle slot, writes are optimistic and invalidate any read in flight

use std::sync::Mutex;
use crate::common::error::SyncError;
use crate::entity::bo::state_bo::AnalogOutputBo;
use crate::panel::projection::{dac_value_text, led_status_text, voltage_text};
use crate::util::payload::{parse_bool_text, parse_uint_text};
use crate::{debug, info};
use super::context::{lock_or_recover, SyncContext};
use super::cycle::CycleSlot;

const LOG_TAG: &str = "control_sync";

const LED_STATE_PATH: &str = "ledstate";
const DAC_STATE_PATH: &str = "dacstate";

pub struct LedSync {
    ctx: SyncContext,
    slot: CycleSlot,
    state: Mutex<Option<bool>>,
}

impl LedSync {
    pub fn new(ctx: SyncContext) -> Self {
        LedSync { ctx, slot: CycleSlot::new("led"), state: Mutex::new(None) }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<bool> {
        *lock_or_recover(&self.state)
    }

    pub async fn refresh(&self) -> Result<bool, SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.default_timeout();
        let body = self
            .slot
            .run(&ticket, async { self.ctx.api.get(LED_STATE_PATH, timeout).await?.success_body() })
            .await?;
        let on = parse_bool_text(&body)?;
        self.slot.apply_if_current(&ticket, || self.apply(on))?;
        info!(LOG_TAG, "led state read: {}", on);
        Ok(on)
    }

    /// optimistic: the panel shows the new state before the device confirms
    pub async fn set(&self, on: bool) -> Result<(), SyncError> {
        self.slot.invalidate();
        self.apply(on);
        // firmware reads the value with toInt(), it must be 1 or 0
        let path = format!("led?state={}", if on { 1 } else { 0 });
        let body = self
            .ctx
            .api
            .get(&path, self.ctx.timeouts.default_timeout())
            .await?
            .success_body()?;
        info!(LOG_TAG, "led set to {}, device replied: {}", on, body.trim());
        Ok(())
    }

    fn apply(&self, on: bool) {
        let previous = lock_or_recover(&self.state).replace(on);
        if previous != Some(on) {
            debug!(LOG_TAG, "led {:?} -> {}", previous, on);
        }
        self.ctx.panel().controls.led_status = led_status_text(on);
    }
}

pub struct DacSync {
    ctx: SyncContext,
    slot: CycleSlot,
    state: Mutex<Option<AnalogOutputBo>>,
}

impl DacSync {
    pub fn new(ctx: SyncContext) -> Self {
        DacSync { ctx, slot: CycleSlot::new("dac"), state: Mutex::new(None) }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<AnalogOutputBo> {
        *lock_or_recover(&self.state)
    }

    pub async fn refresh(&self) -> Result<AnalogOutputBo, SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.default_timeout();
        let body = self
            .slot
            .run(&ticket, async { self.ctx.api.get(DAC_STATE_PATH, timeout).await?.success_body() })
            .await?;
        let raw = parse_uint_text(&body)?;
        let value = u8::try_from(raw)
            .map_err(|_| SyncError::payload(format!("dac state out of range: {}", raw)))?;
        let dac = AnalogOutputBo::new(value);
        self.slot.apply_if_current(&ticket, || self.apply(dac))?;
        info!(LOG_TAG, "dac state read: {}", value);
        Ok(dac)
    }

    pub async fn set(&self, dac: AnalogOutputBo) -> Result<(), SyncError> {
        self.slot.invalidate();
        self.apply(dac);
        let path = format!("dac?value={}", dac.value());
        let body = self
            .ctx
            .api
            .get(&path, self.ctx.timeouts.default_timeout())
            .await?
            .success_body()?;
        info!(LOG_TAG, "dac set to {}, device replied: {}", dac.value(), body.trim());
        Ok(())
    }

    fn apply(&self, dac: AnalogOutputBo) {
        let previous = lock_or_recover(&self.state).replace(dac);
        if previous != Some(dac) {
            debug!(LOG_TAG, "dac {:?} -> {}", previous.map(|d| d.value()), dac.value());
        }
        let mut panel = self.ctx.panel();
        panel.controls.dac_slider = dac.value();
        panel.controls.dac_value = dac_value_text(&dac);
        panel.controls.voltage = voltage_text(&dac);
    }
}
