use crate::limits::{pool_size_from_env, DEFAULT_POOL_SIZE, MAX_POOL_SIZE};
use serde::{Deserialize, Serialize};

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of jobs allowed to run at the same time
    pub pool_size: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl RunnerConfig {
    pub fn with_pool_size(pool_size: usize) -> Self {
        Self { pool_size }
    }

    /// Pool size from `SSR_POOL_SIZE`, falling back to sequential execution
    pub fn from_env() -> Self {
        Self {
            pool_size: pool_size_from_env(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.pool_size == 0 {
            return Err("pool size must be > 0".to_string());
        }
        if self.pool_size > MAX_POOL_SIZE {
            return Err(format!(
                "pool size ({}) cannot exceed {MAX_POOL_SIZE}",
                self.pool_size
            ));
        }
        Ok(())
    }
}
