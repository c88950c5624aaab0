//! dashboard: owns every sync component and the polling timers
//! start sequence:
//! 1. initial reads: led, dac, ethernet status, one sensor reading
//! 2. clients / sensor / ethernet timers
//! 3. activate the initial tab

use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use crate::common::error::SyncError;
use crate::common::setting::Poll;
use crate::entity::bo::state_bo::AnalogOutputBo;
use crate::panel::panel::SharedPanel;
use crate::panel::tab::Tab;
use crate::{debug, info, warn};
use super::context::{lock_or_recover, log_cycle_failure, SyncContext};
use super::control::{DacSync, LedSync};
use super::ethernet::EthernetSync;
use super::peers::PeerCountSync;
use super::scanner::ScanCycle;
use super::scheduler::PollingScheduler;
use super::sensor::SensorSync;
use super::sysinfo::{RefreshMode, SysInfoSync};

const LOG_TAG: &str = "dashboard";

/// run a cycle in the background, its failure is logged and nothing else
pub fn spawn_cycle<T, F>(resource: &'static str, cycle: F)
where
    T: Send + 'static,
    F: Future<Output = Result<T, SyncError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = cycle.await {
            log_cycle_failure(LOG_TAG, resource, &e);
        }
    });
}

pub struct Dashboard {
    ctx: SyncContext,
    poll: Poll,
    pub led: Arc<LedSync>,
    pub dac: Arc<DacSync>,
    pub sensor: Arc<SensorSync>,
    pub peers: Arc<PeerCountSync>,
    pub scanner: Arc<ScanCycle>,
    pub sysinfo: Arc<SysInfoSync>,
    pub ethernet: Arc<EthernetSync>,
    // None once shut down
    scheduler: Mutex<Option<PollingScheduler>>,
}

impl Dashboard {
    pub fn new(ctx: SyncContext, poll: Poll, root: &CancellationToken) -> Self {
        Dashboard {
            led: Arc::new(LedSync::new(ctx.clone())),
            dac: Arc::new(DacSync::new(ctx.clone())),
            sensor: Arc::new(SensorSync::new(ctx.clone())),
            peers: Arc::new(PeerCountSync::new(ctx.clone())),
            scanner: Arc::new(ScanCycle::new(ctx.clone())),
            sysinfo: Arc::new(SysInfoSync::new(ctx.clone(), Poll::period(poll.sysinfo_ms), root)),
            ethernet: Arc::new(EthernetSync::new(ctx.clone(), poll.blur_grace())),
            scheduler: Mutex::new(Some(PollingScheduler::new(root))),
            ctx,
            poll,
        }
    }

    pub fn panel(&self) -> SharedPanel {
        self.ctx.panel.clone()
    }

    pub fn start(&self, initial_tab: Tab) {
        info!(LOG_TAG, "bootstrapping panel");
        let led = self.led.clone();
        spawn_cycle("led", async move { led.refresh().await });
        let dac = self.dac.clone();
        spawn_cycle("dac", async move { dac.refresh().await });
        let ethernet = self.ethernet.clone();
        spawn_cycle("ethernet", async move { ethernet.refresh().await });
        let sensor = self.sensor.clone();
        spawn_cycle("sensor", async move { sensor.refresh().await });

        if let Some(scheduler) = lock_or_recover(&self.scheduler).as_mut() {
            if let Some(period) = Poll::period(self.poll.clients_ms) {
                let peers = self.peers.clone();
                scheduler.every("clients", period, move || {
                    let peers = peers.clone();
                    async move {
                        if let Err(e) = peers.refresh().await {
                            log_cycle_failure(LOG_TAG, "clients", &e);
                        }
                    }
                });
            }
            if let Some(period) = Poll::period(self.poll.sensor_ms) {
                let sensor = self.sensor.clone();
                scheduler.every("sensor", period, move || {
                    let sensor = sensor.clone();
                    async move {
                        if let Err(e) = sensor.refresh().await {
                            log_cycle_failure(LOG_TAG, "sensor", &e);
                        }
                    }
                });
            }
            if let Some(period) = Poll::period(self.poll.ethernet_status_ms) {
                let ethernet = self.ethernet.clone();
                scheduler.every("ethernet", period, move || {
                    let ethernet = ethernet.clone();
                    async move {
                        if let Err(e) = ethernet.refresh().await {
                            log_cycle_failure(LOG_TAG, "ethernet", &e);
                        }
                    }
                });
            }
            info!(LOG_TAG, "{} polling timer(s) running", scheduler.len());
        } else {
            warn!(LOG_TAG, "dashboard already shut down, no polling timers started");
        }

        self.activate_tab(initial_tab);
    }

    /// system info only refreshes while its tab is visible
    pub fn activate_tab(&self, tab: Tab) {
        self.ctx.panel().active_tab = tab;
        info!(LOG_TAG, "tab {} active", tab);
        if tab == Tab::SysInfo {
            let sysinfo = self.sysinfo.clone();
            spawn_cycle("sysinfo", async move { sysinfo.refresh(RefreshMode::Manual).await });
            self.sysinfo.start_auto_refresh();
        } else if self.sysinfo.is_auto_refreshing() {
            self.sysinfo.stop_auto_refresh();
        }
    }

    pub fn set_led(&self, on: bool) {
        let led = self.led.clone();
        spawn_cycle("led write", async move { led.set(on).await });
    }

    pub fn set_dac(&self, dac: AnalogOutputBo) {
        let sync = self.dac.clone();
        spawn_cycle("dac write", async move { sync.set(dac).await });
    }

    /// Err when a scan is already running, nothing is sent then
    pub fn scan(&self) -> Result<(), SyncError> {
        self.scanner.start_scan()?;
        let scanner = self.scanner.clone();
        tokio::spawn(async move {
            scanner.run_scan().await;
        });
        Ok(())
    }

    pub fn refresh_sysinfo(&self) {
        let sysinfo = self.sysinfo.clone();
        spawn_cycle("sysinfo", async move { sysinfo.refresh(RefreshMode::Manual).await });
    }

    pub fn refresh_ethernet(&self) {
        let ethernet = self.ethernet.clone();
        spawn_cycle("ethernet", async move { ethernet.refresh().await });
    }

    pub fn save_ethernet(&self) {
        let ethernet = self.ethernet.clone();
        spawn_cycle("ethernet save", async move { ethernet.save().await });
    }

    pub async fn shutdown(&self) {
        self.sysinfo.stop_auto_refresh();
        let scheduler = lock_or_recover(&self.scheduler).take();
        if let Some(scheduler) = scheduler {
            scheduler.shutdown().await;
        }
        debug!(LOG_TAG, "{} sysinfo loop(s) still winding down", self.sysinfo.active_loops());
        info!(LOG_TAG, "dashboard stopped");
    }
}
