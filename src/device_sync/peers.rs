use std::sync::Mutex;
use crate::common::error::SyncError;
use crate::entity::bo::state_bo::PeerCountBo;
use crate::panel::projection::peer_projection;
use crate::util::payload::parse_uint_text;
use crate::debug;
use super::context::{lock_or_recover, SyncContext};
use super::cycle::CycleSlot;

const LOG_TAG: &str = "peer_sync";

const CLIENTS_PATH: &str = "clients";

/// number of stations on the device access point
pub struct PeerCountSync {
    ctx: SyncContext,
    slot: CycleSlot,
    state: Mutex<Option<PeerCountBo>>,
}

impl PeerCountSync {
    pub fn new(ctx: SyncContext) -> Self {
        PeerCountSync { ctx, slot: CycleSlot::new("clients"), state: Mutex::new(None) }
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<PeerCountBo> {
        *lock_or_recover(&self.state)
    }

    pub async fn refresh(&self) -> Result<PeerCountBo, SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.default_timeout();
        let body = self
            .slot
            .run(&ticket, async { self.ctx.api.get(CLIENTS_PATH, timeout).await?.success_body() })
            .await?;
        let peers = PeerCountBo(parse_uint_text(&body)?);
        self.slot.apply_if_current(&ticket, || {
            let previous = lock_or_recover(&self.state).replace(peers);
            if previous != Some(peers) {
                debug!(LOG_TAG, "{} station(s) connected", peers.0);
            }
            let (count, indicator, text) = peer_projection(&peers);
            let mut panel = self.ctx.panel();
            panel.controls.client_count = count;
            panel.controls.connection = indicator;
            panel.controls.connection_text = text;
        })?;
        Ok(peers)
    }
}
