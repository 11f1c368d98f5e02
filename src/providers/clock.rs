// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::traits::Clock;

/// Wall clock backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Tracks a time budget against any [`Clock`].
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start<C: Clock + ?Sized>(clock: &C, budget: Duration) -> Self {
        Self {
            started: clock.now(),
            budget,
        }
    }

    pub fn elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        clock.now().saturating_duration_since(self.started)
    }

    /// Zero once the budget is spent.
    pub fn remaining<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        self.budget.saturating_sub(self.elapsed(clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeClock;

    #[tokio::test]
    async fn test_deadline_counts_down_with_clock() {
        let clock = FakeClock::new();
        let deadline = Deadline::start(&clock, Duration::from_secs(30));
        assert_eq!(deadline.remaining(&clock), Duration::from_secs(30));

        clock.sleep(Duration::from_secs(20)).await;
        assert_eq!(deadline.elapsed(&clock), Duration::from_secs(20));
        assert_eq!(deadline.remaining(&clock), Duration::from_secs(10));

        clock.advance(Duration::from_secs(15));
        assert!(deadline.remaining(&clock).is_zero());
        assert_eq!(deadline.elapsed(&clock), Duration::from_secs(35));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_sleeps() {
        let before = tokio::time::Instant::now();
        TokioClock.sleep(Duration::from_secs(5)).await;
        assert!(tokio::time::Instant::now() - before >= Duration::from_secs(5));
    }
}
