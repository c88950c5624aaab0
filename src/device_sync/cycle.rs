//! per resource request generation
//! - `begin` hands out a ticket with a new, higher generation; reads may overlap
//! - a result is applied only if nothing newer was applied before it
//! - `invalidate` (writes) cancels every read in flight and drops all older tickets

use std::future::Future;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use crate::common::error::SyncError;
use super::context::lock_or_recover;

#[derive(Debug)]
pub struct CycleTicket {
    generation: u64,
    token: CancellationToken,
}

#[derive(Debug, Default)]
struct SlotState {
    // last generation handed out
    issued: u64,
    // newest generation whose result reached the panel
    applied: u64,
    // tickets at or below this were invalidated by a write
    floor: u64,
    // shared by every read begun since the last invalidate
    epoch: CancellationToken,
}

#[derive(Debug)]
pub struct CycleSlot {
    resource: &'static str,
    state: Mutex<SlotState>,
}

impl CycleSlot {
    pub fn new(resource: &'static str) -> Self {
        CycleSlot { resource, state: Mutex::new(SlotState::default()) }
    }

    /// start a new read; reads already in flight keep running
    pub fn begin(&self) -> CycleTicket {
        let mut state = lock_or_recover(&self.state);
        state.issued += 1;
        CycleTicket { generation: state.issued, token: state.epoch.clone() }
    }

    /// drop every read begun so far, used by writes
    pub fn invalidate(&self) {
        let mut state = lock_or_recover(&self.state);
        state.epoch.cancel();
        state.epoch = CancellationToken::new();
        state.floor = state.issued;
    }

    /// drive the request unless a write invalidates it first
    pub async fn run<T, F>(&self, ticket: &CycleTicket, request: F) -> Result<T, SyncError>
    where
        F: Future<Output = Result<T, SyncError>>,
    {
        tokio::select! {
            biased;
            _ = ticket.token.cancelled() => Err(SyncError::superseded(self.resource)),
            result = request => result,
        }
    }

    /// apply a result unless a newer one already landed, the slot stays locked while applying
    pub fn apply_if_current<R>(&self, ticket: &CycleTicket, apply: impl FnOnce() -> R) -> Result<R, SyncError> {
        let mut state = lock_or_recover(&self.state);
        if ticket.generation <= state.floor || ticket.generation <= state.applied {
            return Err(SyncError::superseded(self.resource));
        }
        state.applied = ticket.generation;
        Ok(apply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generation_is_monotonic() {
        let slot = CycleSlot::new("test");
        let first = slot.begin();
        let second = slot.begin();
        assert!(second.generation > first.generation);
    }

    #[test]
    fn test_older_result_after_newer_is_dropped() {
        let slot = CycleSlot::new("test");
        let old = slot.begin();
        let new = slot.begin();
        assert_eq!(slot.apply_if_current(&new, || 7).unwrap(), 7);
        assert!(slot.apply_if_current(&old, || ()).unwrap_err().is_superseded());
    }

    #[test]
    fn test_older_result_first_is_still_applied() {
        let slot = CycleSlot::new("test");
        let old = slot.begin();
        let new = slot.begin();
        assert_eq!(slot.apply_if_current(&old, || 1).unwrap(), 1);
        assert_eq!(slot.apply_if_current(&new, || 2).unwrap(), 2);
    }

    #[test]
    fn test_invalidate_drops_earlier_tickets() {
        let slot = CycleSlot::new("test");
        let before = slot.begin();
        slot.invalidate();
        let after = slot.begin();
        assert!(slot.apply_if_current(&before, || ()).unwrap_err().is_superseded());
        assert!(slot.apply_if_current(&after, || ()).is_ok());
    }

    #[tokio::test]
    async fn test_begin_leaves_in_flight_request_running() {
        let slot = CycleSlot::new("test");
        let old = slot.begin();
        let slow = slot.run(&old, async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, SyncError>(1)
        });
        let newer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            slot.begin()
        };
        let (result, _ticket) = tokio::join!(slow, newer);
        assert_eq!(result.unwrap(), 1);
        assert!(slot.apply_if_current(&old, || ()).is_ok());
    }

    #[tokio::test]
    async fn test_invalidate_cancels_in_flight_request() {
        let slot = CycleSlot::new("test");
        let old = slot.begin();
        let slow = slot.run(&old, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, SyncError>(1)
        });
        let write = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            slot.invalidate();
        };
        let (result, _) = tokio::join!(slow, write);
        assert!(result.unwrap_err().is_superseded());
    }
}
