use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::constants::defaults;
use crate::pipeline::CycleError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Termination {
    /// One-shot run finished (or the timer channel closed).
    Completed,
    /// A shutdown signal was received; no further cycles were started.
    ShutdownRequested,
}

/// Drives pipeline cycles. One-shot and scheduled operation are the same
/// runner under two policies: whether a timer is armed, and whether a
/// failed cycle terminates the process or is logged and awaited out.
pub struct Runner {
    interval: Option<Duration>,
    terminate_on_failure: bool,
}

impl Runner {
    pub fn one_shot() -> Runner {
        Runner {
            interval: None,
            terminate_on_failure: true,
        }
    }

    pub fn scheduled(interval: Duration) -> Runner {
        Runner {
            interval: Some(interval),
            terminate_on_failure: false,
        }
    }

    /// Run the first cycle immediately, then (in scheduled operation)
    /// re-run on every timer tick until `shutdown` is set.
    ///
    /// At most one cycle is ever in flight: the timer thread checks the
    /// in-progress flag and skips, with a warning, any tick that fires
    /// while a cycle is still running. A shutdown request never
    /// interrupts a cycle already in progress.
    pub fn run<F>(&self, shutdown: &AtomicBool, mut cycle: F) -> Result<Termination, CycleError>
    where
        F: FnMut() -> Result<(), CycleError>,
    {
        let in_progress = Arc::new(AtomicBool::new(false));
        self.run_cycle_guarded(&in_progress, &mut cycle)?;

        let Some(interval) = self.interval else {
            return Ok(Termination::Completed);
        };

        let (tick_tx, tick_rx) = flume::bounded::<()>(0);
        let timer_guard = Arc::clone(&in_progress);
        thread::spawn(move || loop {
            thread::sleep(interval);
            if timer_guard.load(Ordering::SeqCst) {
                log::warn!("Previous cycle still in progress; skipping this tick");
            } else if tick_tx.send(()).is_err() {
                break;
            }
        });

        loop {
            if shutdown.load(Ordering::SeqCst) {
                log::info!("Shutdown requested; no further cycles will be started");
                return Ok(Termination::ShutdownRequested);
            }
            match tick_rx.recv_timeout(defaults::SHUTDOWN_POLL_INTERVAL) {
                Ok(()) => self.run_cycle_guarded(&in_progress, &mut cycle)?,
                Err(flume::RecvTimeoutError::Timeout) => continue,
                Err(flume::RecvTimeoutError::Disconnected) => return Ok(Termination::Completed),
            }
        }
    }

    fn run_cycle_guarded<F>(&self, in_progress: &AtomicBool, cycle: &mut F) -> Result<(), CycleError>
    where
        F: FnMut() -> Result<(), CycleError>,
    {
        in_progress.store(true, Ordering::SeqCst);
        let result = cycle();
        in_progress.store(false, Ordering::SeqCst);
        if let Err(e) = result {
            log::error!("Data collection cycle failed: {e}");
            if self.terminate_on_failure {
                return Err(e);
            }
        }
        Ok(())
    }
}
