//! Recycling of finished actions.
//!
//! Actions hold boxed closures and, for composites and paths, growable
//! buffers. Recycling a killed action keeps its box and buffer allocations
//! around so the next acquisition of the same type reuses them instead of
//! allocating again.
//!
//! The pool is a free list per hook type. It never hands out an instance that
//! is still referenced elsewhere: ownership of the box moves in and out.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::config::PoolConfig;
use crate::{Action, ActionBase, ActionHooks};

/// Free lists of killed actions, keyed by concrete action type.
#[derive(Default)]
pub struct ActionPool {
    config: PoolConfig,
    idle: HashMap<TypeId, Vec<Box<dyn Any>>>,
}

impl ActionPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            idle: HashMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns an unbegun, default-configured action of type `ActionBase<H>`,
    /// recycled if one is idle.
    pub fn acquire<H>(&mut self) -> Box<ActionBase<H>>
    where
        H: ActionHooks + Default + 'static,
    {
        let recycled = self
            .idle
            .get_mut(&TypeId::of::<ActionBase<H>>())
            .and_then(Vec::pop)
            .and_then(|idle| idle.downcast::<ActionBase<H>>().ok());

        match recycled {
            Some(mut action) => {
                action.reset_lifecycle();
                tracing::debug!(kind = H::KIND, "reusing pooled action");
                action
            }
            None => {
                tracing::debug!(kind = H::KIND, "allocating new action");
                Box::default()
            }
        }
    }

    /// Kills `action` if needed and keeps it for reuse, together with every
    /// action below it in the tree.
    ///
    /// Actions beyond the per-kind idle limit are dropped.
    pub fn recycle(&mut self, mut action: Box<dyn Action>) {
        if !action.state().is_killed() {
            action.kill();
        }
        for child in action.drain_children() {
            self.recycle(child);
        }

        let kind = action.kind();
        let any = action.into_any();
        let idle = self.idle.entry((*any).type_id()).or_default();

        if idle.len() >= self.config.max_idle_per_kind {
            tracing::debug!(kind, "pool full, dropping action");
            return;
        }

        idle.push(any);
        tracing::debug!(kind, idle = idle.len(), "action recycled");
    }

    /// Number of idle `ActionBase<H>` instances.
    pub fn idle_count<H: ActionHooks + 'static>(&self) -> usize {
        self.idle
            .get(&TypeId::of::<ActionBase<H>>())
            .map_or(0, Vec::len)
    }

    /// Total number of idle instances across all kinds.
    pub fn total_idle(&self) -> usize {
        self.idle.values().map(Vec::len).sum()
    }

    /// Drops every idle instance.
    pub fn clear(&mut self) {
        self.idle.clear();
    }
}
