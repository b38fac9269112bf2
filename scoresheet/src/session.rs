use crate::match_manager::MatchManager;
use handball_common::match_snapshot::MatchSnapshot;
use log::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::{
    sync::watch,
    task::{self, JoinHandle},
    time::{Duration, Instant, MissedTickBehavior, interval_at},
};

/// Owns a running match and the two periodic tasks that drive it.
///
/// Both tasks are aborted when the session is closed or dropped.
#[derive(Debug)]
pub struct MatchSession {
    manager: Arc<Mutex<MatchManager>>,
    snapshot_tx: Arc<watch::Sender<MatchSnapshot>>,
    clock_join: JoinHandle<()>,
    display_join: JoinHandle<()>,
}

impl MatchSession {
    /// Must be called from within a tokio runtime
    pub fn open(manager: MatchManager) -> Self {
        let period = manager.config().tick_period();
        let (snapshot_tx, _) = watch::channel(manager.snapshot());
        let snapshot_tx = Arc::new(snapshot_tx);
        let manager = Arc::new(Mutex::new(manager));

        info!("Opening match session, tick period {period:?}");

        let clock_join = task::spawn(clock_loop(manager.clone(), snapshot_tx.clone(), period));
        let display_join =
            task::spawn(display_loop(manager.clone(), snapshot_tx.clone(), period));

        Self {
            manager,
            snapshot_tx,
            clock_join,
            display_join,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MatchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Runs `f` with the lock held, then publishes the resulting snapshot
    pub fn with_manager<R>(&self, f: impl FnOnce(&mut MatchManager) -> R) -> R {
        let mut manager = lock(&self.manager);
        let result = f(&mut manager);
        publish(&self.snapshot_tx, manager.snapshot());
        result
    }

    /// Read-only access, nothing is published
    pub fn inspect<R>(&self, f: impl FnOnce(&MatchManager) -> R) -> R {
        f(&lock(&self.manager))
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        lock(&self.manager).snapshot()
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> Arc<Mutex<MatchManager>> {
        self.manager.clone()
    }

    pub fn close(self) {
        info!("Closing match session");
        // Tasks are stopped by `Drop`
    }
}

impl Drop for MatchSession {
    fn drop(&mut self) {
        self.clock_join.abort();
        self.display_join.abort();
    }
}

fn lock(manager: &Mutex<MatchManager>) -> MutexGuard<'_, MatchManager> {
    manager.lock().unwrap_or_else(PoisonError::into_inner)
}

fn publish(tx: &watch::Sender<MatchSnapshot>, snapshot: MatchSnapshot) {
    tx.send_if_modified(|current| {
        if *current != snapshot {
            *current = snapshot;
            true
        } else {
            false
        }
    });
}

async fn clock_loop(
    manager: Arc<Mutex<MatchManager>>,
    tx: Arc<watch::Sender<MatchSnapshot>>,
    period: Duration,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;
        let snapshot = {
            let mut manager = lock(&manager);
            manager.tick();
            manager.snapshot()
        };
        publish(&tx, snapshot);
    }
}

async fn display_loop(
    manager: Arc<Mutex<MatchManager>>,
    tx: Arc<watch::Sender<MatchSnapshot>>,
    period: Duration,
) {
    // Half a period out of phase with the clock so it never reads a tick in progress
    let mut interval = interval_at(Instant::now() + period + period / 2, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let snapshot = {
            let mut manager = lock(&manager);
            manager.refresh_timeout_display();
            manager.snapshot()
        };
        publish(&tx, snapshot);
    }
}
