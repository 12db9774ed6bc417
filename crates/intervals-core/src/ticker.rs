//! Periodic pulse source for a session.
//!
//! The ticker owns no thread or task. It holds at most one deadline, and the
//! owner awaits [`Ticker::tick`] from its event loop. Disarming drops the
//! deadline synchronously, so nothing can fire afterwards. Each arm/disarm
//! also starts a new generation, and tokens from older generations are
//! rejected by [`Ticker::accepts`].

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// One pulse per second.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Proof that a tick was produced by a particular arming of the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken {
    generation: u64,
}

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            deadline: None,
            generation: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start a fresh generation with the first pulse one period from now.
    ///
    /// Pulses missed while disarmed are not replayed.
    pub fn arm(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = Some(Instant::now() + self.period);
    }

    pub fn disarm(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
    }

    /// Whether `token` belongs to the current, armed generation.
    pub fn accepts(&self, token: TickToken) -> bool {
        self.is_armed() && token.generation == self.generation
    }

    /// Wait for the next pulse. Never completes while disarmed.
    ///
    /// Cancel-safe: dropping the future before it completes keeps the
    /// pending deadline for the next call.
    pub async fn tick(&mut self) -> TickToken {
        let Some(deadline) = self.deadline else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        // Fixed delay: the next pulse is measured from this one's delivery.
        self.deadline = Some(Instant::now() + self.period);
        TickToken {
            generation: self.generation,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut ticker = Ticker::default();
        ticker.arm();
        let start = Instant::now();

        let token = ticker.tick().await;
        assert!(ticker.accepts(token));
        assert!(start.elapsed() >= Duration::from_secs(1));

        ticker.tick().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::default();
        assert!(timeout(Duration::from_secs(60), ticker.tick()).await.is_err());

        ticker.arm();
        ticker.disarm();
        assert!(!ticker.is_armed());
        assert!(timeout(Duration::from_secs(60), ticker.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn tokens_from_previous_generation_are_rejected() {
        let mut ticker = Ticker::default();
        ticker.arm();
        let token = ticker.tick().await;

        ticker.disarm();
        assert!(!ticker.accepts(token));

        ticker.arm();
        assert!(!ticker.accepts(token));
        let fresh = ticker.tick().await;
        assert!(ticker.accepts(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wait_keeps_deadline() {
        let mut ticker = Ticker::default();
        ticker.arm();
        let start = Instant::now();
        assert!(timeout(Duration::from_millis(400), ticker.tick()).await.is_err());
        ticker.tick().await;
        assert!(start.elapsed() < Duration::from_millis(1100));
    }

    #[test]
    fn zero_period_is_clamped() {
        assert_eq!(Ticker::new(Duration::ZERO).period(), MIN_PERIOD);
    }
}
