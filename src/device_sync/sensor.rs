use std::sync::Mutex;
use crate::common::error::SyncError;
use crate::entity::bo::state_bo::EnvironmentBo;
use crate::entity::dto::sensor_dto::SensorDto;
use crate::panel::projection::sensor_texts;
use crate::util::payload::parse_json;
use crate::debug;
use super::context::{lock_or_recover, SyncContext};
use super::cycle::CycleSlot;

const LOG_TAG: &str = "sensor_sync";

const SENSOR_PATH: &str = "sensor";

/// temperature / humidity poller
pub struct SensorSync {
    ctx: SyncContext,
    slot: CycleSlot,
    state: Mutex<Option<EnvironmentBo>>,
}

impl SensorSync {
    pub fn new(ctx: SyncContext) -> Self {
        SensorSync { ctx, slot: CycleSlot::new("sensor"), state: Mutex::new(None) }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<EnvironmentBo> {
        *lock_or_recover(&self.state)
    }

    pub async fn refresh(&self) -> Result<EnvironmentBo, SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.default_timeout();
        let body = self
            .slot
            .run(&ticket, async { self.ctx.api.get(SENSOR_PATH, timeout).await?.success_body() })
            .await?;
        let env = EnvironmentBo::from(parse_json::<SensorDto>(&body)?);
        self.slot.apply_if_current(&ticket, || {
            if lock_or_recover(&self.state).replace(env) != Some(env) {
                debug!(LOG_TAG, "sensor changed: {:?}", env);
            }
            let (temperature, humidity) = sensor_texts(&env);
            let mut panel = self.ctx.panel();
            panel.controls.temperature = temperature;
            panel.controls.humidity = humidity;
        })?;
        Ok(env)
    }
}
