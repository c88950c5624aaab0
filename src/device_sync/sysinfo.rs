//! system info refresher
//! manual refreshes alert the operator on failure, automatic ones only log;
//! at most one auto-refresh loop is alive at any time

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use crate::common::error::SyncError;
use crate::entity::dto::sysinfo_dto::SystemInfoDto;
use crate::panel::projection::{sysinfo_view, SYSINFO_MANUAL_FAILURE};
use crate::util::payload::parse_json;
use crate::{debug, info};
use super::context::{lock_or_recover, log_cycle_failure, SyncContext};
use super::cycle::CycleSlot;
use super::scheduler::spawn_repeating;

const LOG_TAG: &str = "sysinfo_sync";

const SYSINFO_PATH: &str = "sysinfo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    Manual,
    Automatic,
}

pub struct SysInfoSync {
    ctx: SyncContext,
    slot: CycleSlot,
    period: Option<Duration>,
    root: CancellationToken,
    auto_refresh: Mutex<Option<CancellationToken>>,
    loops: Mutex<Vec<JoinHandle<()>>>,
}

impl SysInfoSync {
    /// `period` None disables the auto-refresh loop
    pub fn new(ctx: SyncContext, period: Option<Duration>, root: &CancellationToken) -> Self {
        SysInfoSync {
            ctx,
            slot: CycleSlot::new("sysinfo"),
            period,
            root: root.clone(),
            auto_refresh: Mutex::new(None),
            loops: Mutex::new(Vec::new()),
        }
    }

    pub async fn refresh(&self, mode: RefreshMode) -> Result<(), SyncError> {
        let ticket = self.slot.begin();
        let timeout = self.ctx.timeouts.sysinfo();
        let result = self
            .slot
            .run(&ticket, async {
                let body = self.ctx.api.get(SYSINFO_PATH, timeout).await?.success_body()?;
                parse_json::<SystemInfoDto>(&body)
            })
            .await
            .and_then(|info| {
                let view = sysinfo_view(&info);
                self.slot.apply_if_current(&ticket, || self.ctx.panel().sysinfo = view)
            });

        if let Err(e) = &result {
            if mode == RefreshMode::Manual && !e.is_superseded() {
                self.ctx.panel().alert(SYSINFO_MANUAL_FAILURE);
            }
        } else {
            debug!(LOG_TAG, "{:?} refresh applied", mode);
        }
        result
    }

    /// stops any running loop, then starts a fresh one
    pub fn start_auto_refresh(self: &Arc<Self>) {
        self.stop_auto_refresh();
        let Some(period) = self.period else {
            debug!(LOG_TAG, "auto refresh disabled");
            return;
        };

        let token = self.root.child_token();
        *lock_or_recover(&self.auto_refresh) = Some(token.clone());
        let this = Arc::clone(self);
        let handle = spawn_repeating("sysinfo", period, token, move || {
            let this = Arc::clone(&this);
            async move {
                if let Err(e) = this.refresh(RefreshMode::Automatic).await {
                    log_cycle_failure(LOG_TAG, "sysinfo", &e);
                }
            }
        });
        let mut loops = lock_or_recover(&self.loops);
        loops.retain(|h| !h.is_finished());
        loops.push(handle);
        info!(LOG_TAG, "auto refresh started, every {:?}", period);
    }

    pub fn stop_auto_refresh(&self) {
        if let Some(token) = lock_or_recover(&self.auto_refresh).take() {
            token.cancel();
            info!(LOG_TAG, "auto refresh stopped");
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        lock_or_recover(&self.auto_refresh).is_some()
    }

    /// loops whose task is still running
    pub fn active_loops(&self) -> usize {
        let mut loops = lock_or_recover(&self.loops);
        loops.retain(|h| !h.is_finished());
        loops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorCode;
    use crate::common::http::mock::MockDeviceApi;
    use crate::common::setting::Timeout;
    use crate::panel::panel::{lock_panel, shared_panel, PLACEHOLDER};

    const SYSINFO: &str = r#"{
        "network": {"mode":"AP","ip":"192.168.4.1","apIP":"192.168.4.1","ssid":"Feather","stations":1,"rssi":-55,"mac":"AA:BB:CC:DD:EE:FF"},
        "board": {"chipModel":"ESP32-S3","chipRevision":0,"sdkVersion":"v4.4","uptime":3725}
    }"#;

    fn sysinfo(api: &Arc<MockDeviceApi>, period_ms: u64) -> (Arc<SysInfoSync>, SyncContext, CancellationToken) {
        let ctx = SyncContext::new(api.clone(), shared_panel(), Timeout::default());
        let root = CancellationToken::new();
        let period = Some(Duration::from_millis(period_ms));
        (Arc::new(SysInfoSync::new(ctx.clone(), period, &root)), ctx, root)
    }

    #[tokio::test]
    async fn test_refresh_projects_sections() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("sysinfo", 200, SYSINFO);
        let (sync, ctx, _root) = sysinfo(&api, 1000);
        sync.refresh(RefreshMode::Manual).await.unwrap();

        let panel = lock_panel(&ctx.panel);
        assert_eq!(panel.sysinfo.network.wifi_ssid, "Feather");
        assert_eq!(panel.sysinfo.network.wifi_rssi, "-55 dBm (Good)");
        assert_eq!(panel.sysinfo.board.uptime, "1 hours, 2 minutes, 5 seconds");
        // no resources section in the payload
        assert_eq!(panel.sysinfo.resources.cpu_freq, PLACEHOLDER);
        assert!(panel.alerts.is_empty());
        assert_eq!(api.requests()[0].timeout, Duration::from_millis(10000));
    }

    #[tokio::test]
    async fn test_manual_failure_alerts_automatic_does_not() {
        let api = Arc::new(MockDeviceApi::new());
        api.fail("sysinfo", SyncError::transport("unreachable"));
        let (sync, ctx, _root) = sysinfo(&api, 1000);

        let err = sync.refresh(RefreshMode::Automatic).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TransportError);
        assert!(lock_panel(&ctx.panel).alerts.is_empty());

        sync.refresh(RefreshMode::Manual).await.unwrap_err();
        assert_eq!(lock_panel(&ctx.panel).take_alerts(), vec![SYSINFO_MANUAL_FAILURE]);
    }

    #[tokio::test]
    async fn test_manual_malformed_reply_alerts_and_keeps_view() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("sysinfo", 200, SYSINFO).reply("sysinfo", 200, "{\"board\":");
        let (sync, ctx, _root) = sysinfo(&api, 1000);
        sync.refresh(RefreshMode::Manual).await.unwrap();

        let err = sync.refresh(RefreshMode::Manual).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PayloadError);
        let mut panel = lock_panel(&ctx.panel);
        assert_eq!(panel.take_alerts(), vec![SYSINFO_MANUAL_FAILURE]);
        assert_eq!(panel.sysinfo.board.uptime, "1 hours, 2 minutes, 5 seconds");
    }

    #[tokio::test]
    async fn test_slow_device_still_updates_panel() {
        let api = Arc::new(MockDeviceApi::new());
        // every reply takes longer than the refresh period
        api.reply_after("sysinfo", Duration::from_millis(30), 200, SYSINFO);
        let (sync, ctx, _root) = sysinfo(&api, 20);
        sync.start_auto_refresh();
        tokio::time::sleep(Duration::from_millis(200)).await;
        sync.stop_auto_refresh();

        assert!(api.count("sysinfo") >= 2);
        assert_eq!(lock_panel(&ctx.panel).sysinfo.board.uptime, "1 hours, 2 minutes, 5 seconds");
    }

    #[tokio::test]
    async fn test_start_twice_keeps_one_loop() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("sysinfo", 200, SYSINFO);
        let (sync, _ctx, _root) = sysinfo(&api, 20);
        sync.start_auto_refresh();
        sync.start_auto_refresh();
        tokio::time::sleep(Duration::from_millis(110)).await;
        assert!(sync.is_auto_refreshing());
        assert_eq!(sync.active_loops(), 1);
        // one loop at 20ms over ~110ms, two loops would double this
        assert!(api.count("sysinfo") <= 6);

        sync.stop_auto_refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!sync.is_auto_refreshing());
        assert_eq!(sync.active_loops(), 0);
        let stopped_at = api.count("sysinfo");
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(api.count("sysinfo"), stopped_at);
    }

    #[tokio::test]
    async fn test_root_cancel_ends_loop() {
        let api = Arc::new(MockDeviceApi::new());
        api.reply("sysinfo", 200, SYSINFO);
        let (sync, _ctx, root) = sysinfo(&api, 20);
        sync.start_auto_refresh();
        root.cancel();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sync.active_loops(), 0);
    }
}
