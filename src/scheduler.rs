//! Fixed-period tick source.
//!
//! The game loop never owns a timer directly: a [`Ticker`] pushes
//! [`Signal::Tick`] onto the same channel the key reader feeds, and can be
//! stopped when a game ends and started again on restart.

use log::debug;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::input::KeyAction;

/// Everything the game loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Tick,
    Key(KeyAction),
    /// The screen needs repainting, e.g. after a resize
    Redraw,
}

pub struct Ticker {
    period: Duration,
    tx: UnboundedSender<Signal>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration, tx: UnboundedSender<Signal>) -> Self {
        Self {
            period,
            tx,
            handle: None,
        }
    }

    /// Start ticking. The first tick arrives one full period from now.
    /// Any previous run is stopped first. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let period = self.period;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if tx.send(Signal::Tick).is_err() {
                    break;
                }
            }
        }));
        debug!("ticker started every {period:?}");
    }

    /// Stop ticking. Returns false if the ticker was not running.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                debug!("ticker stopped");
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
