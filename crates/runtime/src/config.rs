//! Operational knobs for a session runtime (spec.md §6 "single configuration
//! knob `H`" plus the mailbox/idle/buffer knobs §4.6 and §5 imply).
//!
//! Constructible two ways: `Config::parse()` for the demo binary (clap
//! derive, matching the teacher's root crate), or `Config::default()`/struct
//! literal for an embedding caller that wants to wire a session up
//! programmatically without touching the CLI surface.

use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Copy, Parser)]
pub struct Config {
    /// Tick rate `H`, in ticks per second (spec.md §3).
    #[arg(long, default_value_t = 20)]
    pub tick_rate_hz: u32,

    /// Seconds a game may sit idle (no intents, still `waiting`) before the
    /// runtime reaps it without sealing a replay (spec.md §4.6).
    #[arg(long, default_value_t = 600)]
    pub idle_reap_secs: u64,

    /// Bound on the inbound intent mailbox (spec.md §5 suspension point
    /// "waiting on the intent mailbox").
    #[arg(long, default_value_t = 256)]
    pub mailbox_capacity: usize,

    /// Bound on each subscriber's snapshot buffer (spec.md §4.8, §5
    /// "bounded per-subscriber buffers with drop-slow-subscriber policy").
    #[arg(long, default_value_t = 64)]
    pub subscriber_buffer_capacity: usize,
}

impl Config {
    pub fn idle_reap_deadline(&self) -> Duration {
        Duration::from_secs(self.idle_reap_secs)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tick_rate_hz: 20,
            idle_reap_secs: 600,
            mailbox_capacity: 256,
            subscriber_buffer_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_period_is_the_reciprocal_of_the_tick_rate() {
        let config = Config {
            tick_rate_hz: 10,
            ..Config::default()
        };
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }
}
