use std::time::Duration;

/// Converts irregular frame callbacks into fixed-rate game ticks.
///
/// Elapsed frame time is accumulated; once it exceeds one tick period a
/// tick is due and the remainder carries over. At most one tick fires per
/// frame, so a long stall slows the game down instead of skipping moves.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            period: (Duration::from_secs(1) / ticks_per_second.max(1))
                .max(Duration::from_nanos(1)),
            accumulated: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time carried towards the next tick
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Feed one frame's elapsed time. Returns true if a tick is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.accumulated += elapsed;

        if self.accumulated > self.period {
            let remainder = self.accumulated.as_nanos() % self.period.as_nanos();
            self.accumulated = Duration::from_nanos(remainder as u64);
            true
        } else {
            false
        }
    }

    /// Drop any carried time, e.g. when resuming from pause
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        assert_eq!(TickClock::new(5).period(), Duration::from_millis(200));
        assert_eq!(TickClock::new(0).period(), Duration::from_secs(1));
    }

    #[test]
    fn test_ticks_only_after_period_exceeded() {
        let mut clock = TickClock::new(10);

        assert!(!clock.advance(Duration::from_millis(60)));
        assert!(!clock.advance(Duration::from_millis(40)));
        // Exactly one period is not enough
        assert_eq!(clock.accumulated(), Duration::from_millis(100));
        assert!(clock.advance(Duration::from_millis(16)));
        assert_eq!(clock.accumulated(), Duration::from_millis(16));
    }

    #[test]
    fn test_remainder_carries_forward() {
        let mut clock = TickClock::new(10);

        assert!(clock.advance(Duration::from_millis(130)));
        assert_eq!(clock.accumulated(), Duration::from_millis(30));
        assert!(!clock.advance(Duration::from_millis(60)));
        assert!(clock.advance(Duration::from_millis(20)));
        assert_eq!(clock.accumulated(), Duration::from_millis(10));
    }

    #[test]
    fn test_long_stall_yields_single_tick() {
        let mut clock = TickClock::new(10);

        assert!(clock.advance(Duration::from_millis(1050)));
        assert_eq!(clock.accumulated(), Duration::from_millis(50));
        assert!(!clock.advance(Duration::ZERO));
    }

    #[test]
    fn test_extreme_rate_keeps_nonzero_period() {
        let mut clock = TickClock::new(u32::MAX);
        assert_eq!(clock.period(), Duration::from_nanos(1));
        assert!(clock.advance(Duration::from_millis(16)));
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn test_huge_configured_rate_ticks() {
        let config = crate::game::GameConfig {
            ticks_per_second: 2_000_000_000,
            ..Default::default()
        }
        .normalized();
        let mut clock = TickClock::new(config.ticks_per_second);

        assert_eq!(clock.period(), Duration::from_millis(1));
        assert!(clock.advance(Duration::from_millis(16)));
    }

    #[test]
    fn test_reset() {
        let mut clock = TickClock::new(10);
        clock.advance(Duration::from_millis(90));
        clock.reset();
        assert!(!clock.advance(Duration::from_millis(90)));
    }
}
