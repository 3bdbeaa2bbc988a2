//! Frame-driven action and tween engine.
//!
//! Callers build time-based actions (value tweens, scripted callbacks and
//! composite groupings) and drive them once per rendered frame with the
//! elapsed time since the previous frame.
//!
//! - **Caller-owned time**: there is no internal clock; every `update` receives
//!   the frame delta
//! - **Single-threaded**: a whole action tree is driven synchronously from one
//!   thread; actions capture `Rc` state and are not `Send`
//! - **External state**: tweens read and write caller-owned values through
//!   getter/setter closures and never own those values
//! - **Deterministic**: identical delta sequences reproduce identical output,
//!   shakes included
//!
//! # Architecture
//!
//! - [`Action`]: lifecycle contract (`begin`, `update`, `complete`, `rewind`, `kill`)
//! - [`ActionBase`] + [`ActionHooks`]: shared state machine and per-type hooks
//! - Composites: [`ParallelAction`], [`SequenceAction`]
//! - Leaves: [`ScriptAction`], [`DelayAction`], [`TweenAction`],
//!   [`ShakeTweenAction`], [`PathAction`]
//! - [`ActionPool`]: recycling of killed actions
//! - [`Scheduler`]: per-frame driver for root actions
//! - [`TransformExt`]: tween shortcuts bound to a [`Transform`]

pub mod action;
pub mod builder;
pub mod composite;
pub mod config;
pub mod easing;
pub mod error;
pub mod leaf;
pub mod pool;
pub mod scheduler;
pub mod status;
pub mod transform;
pub mod tween;

// Re-export core types for ergonomic API
pub use action::{Action, ActionBase, ActionHooks, IntoAction, OwnerId};
pub use composite::{ParallelAction, ParallelHooks, SequenceAction, SequenceHooks};
pub use config::{EngineConfig, PoolConfig, SchedulerConfig};
pub use easing::{Easing, EasingFn};
pub use error::SchedulerError;
pub use leaf::{DelayAction, DelayHooks, ScriptAction, ScriptHooks};
pub use pool::ActionPool;
pub use scheduler::{ActionId, CancelMode, Scheduler};
pub use status::{LifecycleState, PlayState};
pub use transform::{SharedTransform, Transform, TransformExt};
pub use tween::{
    FloatTweenAction, PathAction, PathHooks, ShakeHooks, ShakeTweenAction, Tween, TweenAction,
    TweenHooks, Vec3TweenAction,
};

pub use glam::Vec3;
