//! polling scheduler
//! one repeating timer per polled resource; each tick spawns its own cycle,
//! a slow cycle never holds back the next tick

use std::future::Future;
use std::time::Duration;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use crate::{debug, info};

const LOG_TAG: &str = "scheduler";

/// start a repeating timer, the first tick fires one period after start
pub fn spawn_repeating<F, Fut>(name: &'static str, period: Duration, token: CancellationToken, job: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(LOG_TAG, "timer {} started, period {:?}", name, period);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!(LOG_TAG, "timer {} stopped", name);
                    return;
                }
                _ = ticker.tick() => {
                    debug!(LOG_TAG, "timer {} tick", name);
                    let cycle = job();
                    let cycle_token = token.clone();
                    tokio::spawn(async move {
                        tokio::select! {
                            _ = cycle_token.cancelled() => {}
                            _ = cycle => {}
                        }
                    });
                }
            }
        }
    })
}

/// owns the fixed set of timers started at load
pub struct PollingScheduler {
    token: CancellationToken,
    timers: Vec<JoinHandle<()>>,
}

impl PollingScheduler {
    pub fn new(parent: &CancellationToken) -> Self {
        PollingScheduler { token: parent.child_token(), timers: Vec::new() }
    }

    pub fn every<F, Fut>(&mut self, name: &'static str, period: Duration, job: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.timers.push(spawn_repeating(name, period, self.token.clone(), job));
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// cancel every timer and wait for them to finish
    pub async fn shutdown(self) {
        self.token.cancel();
        join_all(self.timers).await;
    }
}
