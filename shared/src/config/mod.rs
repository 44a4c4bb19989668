//! Runtime configuration
//!
//! This module validates the process environment once per process:
//! - `runtime` - the NOT_READY -> READY configuration guard and its snapshot
//! - `environment` - environment-variable names and logging configuration

pub mod environment;
pub mod runtime;

pub use environment::{env_keys, process_env, EnvMap, LoggingConfig};
pub use runtime::{
    AppConfigState, HistoryTableConfig, RuntimeConfig, SenderConfig,
    DEFAULT_HISTORY_TTL_IN_MINUTES, DEFAULT_POLICY_PATH, DEFAULT_THROTTLE_PERIOD_IN_MINUTES,
};
