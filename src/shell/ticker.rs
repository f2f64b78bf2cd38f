use std::{pin::Pin, time::Duration};

use tokio::time::{self, Instant, Interval, MissedTickBehavior, Sleep};

/// How the next tick is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPolicy {
    /// Wait one period after the previous tick finished. Slow ticks push
    /// later ones back, so the schedule drifts.
    #[default]
    FixedDelay,
    /// Fire on a fixed grid of periods. Ticks missed while busy are
    /// skipped, not replayed.
    Interval,
}

/// Timer driving the shell's ticks.
#[derive(Debug)]
pub(super) enum Ticker {
    FixedDelay {
        sleep: Pin<Box<Sleep>>,
        period: Duration,
    },
    Interval(Interval),
}

impl Ticker {
    /// Creates a ticker whose first fire is one period from now.
    pub(super) fn new(policy: TickPolicy, period: Duration) -> Self {
        let first = Instant::now() + period;
        match policy {
            TickPolicy::FixedDelay => Ticker::FixedDelay {
                sleep: Box::pin(time::sleep_until(first)),
                period,
            },
            TickPolicy::Interval => {
                let mut interval = time::interval_at(first, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                Ticker::Interval(interval)
            }
        }
    }

    /// Completes when the next tick is due. Cancel safe.
    pub(super) async fn fired(&mut self) {
        match self {
            Ticker::FixedDelay { sleep, .. } => sleep.as_mut().await,
            Ticker::Interval(interval) => {
                interval.tick().await;
            }
        }
    }

    /// Schedules the next fire after a tick has been handled.
    pub(super) fn rearm(&mut self) {
        if let Ticker::FixedDelay { sleep, period } = self {
            let next = Instant::now() + *period;
            sleep.as_mut().reset(next);
        }
    }
}
