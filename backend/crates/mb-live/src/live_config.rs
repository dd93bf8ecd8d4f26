use mb_config::Config;

use std::time::Duration;

/// Engine settings derived from the loaded configuration
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Events buffered per room before a slow subscriber starts skipping
    pub channel_capacity: usize,
    /// Deadline for the durable part of one join or leave
    pub write_timeout: Duration,
}

impl LiveConfig {
    pub fn new(channel_capacity: usize, write_timeout: Duration) -> Self {
        Self {
            // A zero-sized broadcast channel cannot be created
            channel_capacity: channel_capacity.max(1),
            write_timeout,
        }
    }
}

impl From<&Config> for LiveConfig {
    fn from(config: &Config) -> Self {
        Self::new(
            config.broadcast.channel_capacity,
            Duration::from_secs(config.membership.write_timeout_secs),
        )
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
