//! Engine configuration structures and loaders.
//!
//! Values come from `Default` and can be overridden through environment
//! variables. Unparseable values are ignored rather than rejected, so a typo
//! in the environment never prevents the host from starting.

use std::env;

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub pool: PoolConfig,
    pub scheduler: SchedulerConfig,
}

impl EngineConfig {
    pub const fn new(pool: PoolConfig, scheduler: SchedulerConfig) -> Self {
        Self { pool, scheduler }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ACTION_POOL_MAX_IDLE` - Idle instances kept per action type (default: 64)
    /// - `ACTION_SCHEDULER_CAPACITY` - Root slots reserved up front (default: 16)
    /// - `ACTION_MAX_DELTA` - Upper bound for a single tick's delta in seconds (default: unbounded)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Construct configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(max_idle) = parse::<usize>(&lookup, "ACTION_POOL_MAX_IDLE") {
            config.pool.max_idle_per_kind = max_idle;
        }

        if let Some(capacity) = parse::<usize>(&lookup, "ACTION_SCHEDULER_CAPACITY") {
            config.scheduler.initial_capacity = capacity;
        }

        if let Some(max_delta) = parse::<f32>(&lookup, "ACTION_MAX_DELTA")
            && max_delta.is_finite()
        {
            config.scheduler.max_delta = Some(max_delta.max(0.0));
        }

        config
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PoolConfig {
    /// Idle instances kept per action type; extra recycled instances are
    /// dropped. Zero disables pooling.
    pub max_idle_per_kind: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_kind: 64,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    pub initial_capacity: usize,
    /// Clamp applied to every tick's delta. `None` passes deltas through
    /// (negative deltas are still clamped to zero).
    pub max_delta: Option<f32>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_delta: None,
        }
    }
}

impl SchedulerConfig {
    /// Applies the configured clamp to a raw frame delta.
    pub fn clamp_delta(&self, delta_time: f32) -> f32 {
        let delta = delta_time.max(0.0);
        match self.max_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
