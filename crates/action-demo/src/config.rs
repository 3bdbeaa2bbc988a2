//! Demo host configuration.

use std::env;
use std::path::PathBuf;

use action_engine::EngineConfig;

#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Target frame rate of the host loop.
    pub fps: u32,
    /// Hard stop after this many frames, even if actions are still running.
    pub frames: u32,
    /// Optional directory for a `demo.log` file next to stderr output.
    pub log_dir: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            frames: 150,
            log_dir: None,
            engine: EngineConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ACTION_DEMO_FPS` - Frames per second (default: 60, minimum: 1)
    /// - `ACTION_DEMO_FRAMES` - Frame budget (default: 150)
    /// - `ACTION_DEMO_LOG_DIR` - Also log to `<dir>/demo.log` (default: unset)
    ///
    /// Engine settings are read through [`EngineConfig::from_env`].
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            engine: EngineConfig::from_source(&lookup),
            ..Self::default()
        };

        if let Some(fps) = read::<u32>(&lookup, "ACTION_DEMO_FPS") {
            config.fps = fps.max(1);
        }
        if let Some(frames) = read::<u32>(&lookup, "ACTION_DEMO_FRAMES") {
            config.frames = frames;
        }
        if let Some(dir) = lookup("ACTION_DEMO_LOG_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Nominal duration of one frame, in seconds.
    pub fn frame_seconds(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = DemoConfig::from_source(|_| None);
        assert_eq!(config.fps, 60);
        assert_eq!(config.frames, 150);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_demo_and_engine_keys() {
        let config = DemoConfig::from_source(|key| match key {
            "ACTION_DEMO_FPS" => Some("0".into()),
            "ACTION_DEMO_FRAMES" => Some("30".into()),
            "ACTION_DEMO_LOG_DIR" => Some("/tmp/demo-logs".into()),
            "ACTION_POOL_MAX_IDLE" => Some("4".into()),
            _ => None,
        });

        assert_eq!(config.fps, 1);
        assert_eq!(config.frames, 30);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/demo-logs")));
        assert_eq!(config.engine.pool.max_idle_per_kind, 4);
    }
}
