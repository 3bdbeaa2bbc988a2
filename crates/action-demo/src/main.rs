//! Action engine demo host.
//!
//! Plays a small scripted scene and logs transform values every frame.
//! The host owns the frame loop: it paces frames with a tokio interval,
//! measures the real elapsed time and feeds it to the scheduler.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug cargo run -p action-demo
//! ACTION_DEMO_FPS=30 ACTION_MAX_DELTA=0.05 cargo run -p action-demo
//! ```

mod config;
mod logging;
mod scene;

use std::time::Duration;

use action_engine::Scheduler;
use anyhow::Result;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::DemoConfig;
use crate::scene::Scene;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = DemoConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting action demo");
    tracing::info!("Frame rate: {} fps, budget: {} frames", config.fps, config.frames);
    tracing::debug!(engine = ?config.engine, "engine configuration");

    let mut scheduler = Scheduler::new(config.engine.clone());
    let scene = Scene::new();
    let timeline = scene.schedule(&mut scheduler);

    let mut interval = tokio::time::interval(Duration::from_secs_f32(config.frame_seconds()));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last = Instant::now();
    let mut frame = 0;
    while frame < config.frames && scheduler.is_running(timeline) {
        interval.tick().await;

        let now = Instant::now();
        let delta = now.duration_since(last).as_secs_f32();
        last = now;

        let finished = scheduler.tick(delta);
        scene.report(frame);
        if finished > 0 {
            tracing::debug!(frame, finished, "roots finished");
        }
        frame += 1;
    }

    if scheduler.is_running(timeline) {
        tracing::warn!("Frame budget exhausted, cancelling remaining actions");
        scheduler.clear();
    }

    tracing::info!(
        frames = frame,
        landings = scene.landings.get(),
        camera = ?scene.camera.borrow().position,
        crate_position = ?scene.crate_box.borrow().position,
        "Demo finished"
    );
    tracing::debug!(idle = scheduler.pool().total_idle(), "pooled actions");

    Ok(())
}
