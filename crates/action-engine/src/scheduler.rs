//! Per-frame driver for root actions.
//!
//! The scheduler owns root actions in a slot arena and hands out generational
//! [`ActionId`] handles. Each [`tick`](Scheduler::tick) updates every running
//! root once, in slot order; a root that reports completion is completed,
//! killed and returned to the scheduler's [`ActionPool`].

use std::fmt;

use crate::config::{EngineConfig, SchedulerConfig};
use crate::error::{Result, SchedulerError};
use crate::{Action, ActionBase, ActionHooks, ActionPool, IntoAction, LifecycleState};

/// Handle to a root action owned by a [`Scheduler`].
///
/// Handles go stale once the action finishes or is cancelled; a stale handle
/// never aliases a newer action in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}v{}", self.index, self.generation)
    }
}

/// How [`Scheduler::cancel`] ends a running action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CancelMode {
    /// Discard in-flight progress; external state stays where it is.
    Kill,
    /// Force completion so external state snaps to its final value.
    Complete,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    action: Option<Box<dyn Action>>,
}

pub struct Scheduler {
    config: SchedulerConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    running: usize,
    pool: ActionPool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Self {
        let EngineConfig { pool, scheduler } = config;
        Self {
            slots: Vec::with_capacity(scheduler.initial_capacity),
            free: Vec::new(),
            running: 0,
            pool: ActionPool::new(pool),
            config: scheduler,
        }
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    #[inline]
    pub fn pool(&self) -> &ActionPool {
        &self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut ActionPool {
        &mut self.pool
    }

    /// Acquires a ready-to-configure action from the scheduler's pool.
    pub fn prepare<H>(&mut self) -> Box<ActionBase<H>>
    where
        H: ActionHooks + Default + 'static,
    {
        self.pool.acquire::<H>()
    }

    /// Begins `action` and schedules it as a root.
    pub fn run(&mut self, action: impl IntoAction) -> ActionId {
        let mut action = action.into_action();
        action.begin();

        let kind = action.kind();
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.action = Some(action);
                ActionId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    action: Some(action),
                });
                ActionId {
                    index,
                    generation: 0,
                }
            }
        };

        self.running += 1;
        tracing::debug!(%id, kind, "action scheduled");
        id
    }

    /// Advances every running root by `delta_time` seconds.
    ///
    /// Returns the number of roots that finished during this tick.
    pub fn tick(&mut self, delta_time: f32) -> usize {
        let delta = self.config.clamp_delta(delta_time);
        let mut finished = 0;

        for index in 0..self.slots.len() {
            let done = match self.slots[index].action.as_mut() {
                Some(action) => action.update(delta),
                None => continue,
            };
            if !done {
                continue;
            }

            if let Some(mut action) = self.release(index) {
                action.complete();
                tracing::debug!(index, kind = action.kind(), "action finished");
                self.pool.recycle(action);
                finished += 1;
            }
        }

        finished
    }

    /// Stops a running root early.
    pub fn cancel(&mut self, id: ActionId, mode: CancelMode) -> Result<()> {
        self.lookup(id)?;
        let Some(mut action) = self.release(id.index as usize) else {
            return Err(SchedulerError::UnknownAction(id));
        };

        match mode {
            CancelMode::Kill => action.kill(),
            CancelMode::Complete => action.complete(),
        }
        tracing::debug!(%id, %mode, "action cancelled");
        self.pool.recycle(action);
        Ok(())
    }

    /// Rewinds a running root and begins it again.
    pub fn restart(&mut self, id: ActionId) -> Result<()> {
        let action = self.lookup_mut(id)?;
        action.rewind();
        action.begin();
        tracing::debug!(%id, "action restarted");
        Ok(())
    }

    pub fn is_running(&self, id: ActionId) -> bool {
        self.lookup(id).is_ok()
    }

    pub fn state(&self, id: ActionId) -> Result<LifecycleState> {
        self.lookup(id).map(|action| action.state())
    }

    /// Number of running roots.
    #[inline]
    pub fn len(&self) -> usize {
        self.running
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.running == 0
    }

    /// Kills every running root and recycles it.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            if let Some(action) = self.release(index) {
                self.pool.recycle(action);
            }
        }
    }

    fn lookup(&self, id: ActionId) -> Result<&dyn Action> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.action.as_deref())
            .ok_or(SchedulerError::UnknownAction(id))
    }

    fn lookup_mut(&mut self, id: ActionId) -> Result<&mut Box<dyn Action>> {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation => {
                slot.action.as_mut().ok_or(SchedulerError::UnknownAction(id))
            }
            _ => {
                tracing::warn!(%id, "stale action handle");
                Err(SchedulerError::UnknownAction(id))
            }
        }
    }

    /// Empties slot `index`, invalidating its handle.
    fn release(&mut self, index: usize) -> Option<Box<dyn Action>> {
        let slot = self.slots.get_mut(index)?;
        let action = slot.action.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index as u32);
        self.running -= 1;
        Some(action)
    }
}
