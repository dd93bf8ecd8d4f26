use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Durable write deadline constraints (seconds)
pub const MIN_WRITE_TIMEOUT_SECS: u64 = 1;
pub const MAX_WRITE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

// SSE keep-alive constraints (seconds)
pub const MIN_SSE_KEEP_ALIVE_SECS: u64 = 5;
pub const MAX_SSE_KEEP_ALIVE_SECS: u64 = 300;
pub const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;

/// Join/leave processing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MembershipConfig {
    /// Deadline for the durable part of a join or leave
    pub write_timeout_secs: u64,
    /// Interval between keep-alive comments on idle live streams
    pub sse_keep_alive_secs: u64,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
        }
    }
}

impl MembershipConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.write_timeout_secs < MIN_WRITE_TIMEOUT_SECS
            || self.write_timeout_secs > MAX_WRITE_TIMEOUT_SECS
        {
            return Err(ConfigError::membership(format!(
                "membership.write_timeout_secs must be {}-{}, got {}",
                MIN_WRITE_TIMEOUT_SECS, MAX_WRITE_TIMEOUT_SECS, self.write_timeout_secs
            )));
        }

        if self.sse_keep_alive_secs < MIN_SSE_KEEP_ALIVE_SECS
            || self.sse_keep_alive_secs > MAX_SSE_KEEP_ALIVE_SECS
        {
            return Err(ConfigError::membership(format!(
                "membership.sse_keep_alive_secs must be {}-{}, got {}",
                MIN_SSE_KEEP_ALIVE_SECS, MAX_SSE_KEEP_ALIVE_SECS, self.sse_keep_alive_secs
            )));
        }

        Ok(())
    }
}
