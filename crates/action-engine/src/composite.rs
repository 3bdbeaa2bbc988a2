//! Composite actions.
//!
//! Composites own a list of child actions and drive them through the same
//! lifecycle they receive. This module provides [`ParallelAction`] (all
//! children at once) and [`SequenceAction`] (one child after another).
//!
//! Both keep an index-aligned [`PlayState`] table next to the children. The
//! table is what guarantees that every child receives exactly one `complete`
//! per activation, whether the child finished on its own or the composite was
//! force-completed.

use crate::{Action, ActionBase, ActionHooks, IntoAction, LifecycleState, OwnerId, PlayState};

/// Runs every child concurrently within each tick.
///
/// # Semantics
///
/// - `begin` begins every child, regardless of its previous state
/// - `update` visits children in insertion order, skipping finished ones; a
///   child that reports completion is completed **in the same tick**
/// - the group reports completion once every child is complete (an empty
///   group completes on its first update)
/// - `complete` force-completes the children that have not finished yet
/// - `kill` kills every child and detaches it; detached children stay parked
///   until [`Action::drain_children`] hands them to a pool
pub struct ParallelHooks {
    id: OwnerId,
    actions: Vec<Box<dyn Action>>,
    play_states: Vec<PlayState>,
    spent: Vec<Box<dyn Action>>,
}

impl Default for ParallelHooks {
    fn default() -> Self {
        Self {
            id: OwnerId::next(),
            actions: Vec::new(),
            play_states: Vec::new(),
            spent: Vec::new(),
        }
    }
}

impl ParallelHooks {
    /// Owner id stamped on every child added to this group.
    #[inline]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline]
    pub fn children(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    #[inline]
    pub fn play_states(&self) -> &[PlayState] {
        &self.play_states
    }
}

impl ActionHooks for ParallelHooks {
    const KIND: &'static str = "parallel";

    fn on_begin(&mut self) {
        for action in &mut self.actions {
            action.begin();
        }
    }

    fn on_update(&mut self, delta_time: f32) -> bool {
        let mut all_completed = true;

        for (action, play_state) in self.actions.iter_mut().zip(self.play_states.iter_mut()) {
            if play_state.is_complete() {
                continue;
            }

            if !action.update(delta_time) {
                all_completed = false;
                continue;
            }

            action.complete();
            *play_state = PlayState::Complete;
        }

        all_completed
    }

    fn on_complete(&mut self) {
        for (action, play_state) in self.actions.iter_mut().zip(self.play_states.iter_mut()) {
            if play_state.is_complete() {
                continue;
            }

            action.complete();
            *play_state = PlayState::Complete;
        }
    }

    fn on_rewind(&mut self) {
        self.play_states.clear();

        for action in &mut self.actions {
            action.rewind();
            self.play_states.push(PlayState::Incomplete);
        }
    }

    fn on_kill(&mut self) {
        for action in &mut self.actions {
            action.kill();
        }
        self.spent.append(&mut self.actions);
        self.play_states.clear();
    }

    fn drain_children(&mut self) -> Vec<Box<dyn Action>> {
        self.play_states.clear();
        let mut children = std::mem::take(&mut self.spent);
        children.append(&mut self.actions);
        children
    }
}

pub type ParallelAction = ActionBase<ParallelHooks>;

impl ActionBase<ParallelHooks> {
    /// Creates a group from the given children, in order.
    pub fn with_children<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoAction,
    {
        let mut group = Self::default();
        for child in children {
            group.add(child);
        }
        group
    }

    /// Adopts `child`, marking it incomplete.
    pub fn add(&mut self, child: impl IntoAction) -> &mut Self {
        let hooks = self.hooks_mut();
        let mut child = child.into_action();
        child.set_owner(hooks.id);
        hooks.actions.push(child);
        hooks.play_states.push(PlayState::Incomplete);
        self
    }
}

/// Runs children one after another.
///
/// # Semantics
///
/// - `begin` begins the current child only
/// - `update` feeds the tick to the current child; when it finishes it is
///   completed, the next child is begun and immediately updated with a zero
///   delta, so instantaneous children (scripts) chain within a single tick
/// - the sequence reports completion once the last child is complete
/// - `complete` begins any child that never started and completes every
///   unfinished child, in order
/// - `kill` detaches children the same way [`ParallelHooks`] does
pub struct SequenceHooks {
    id: OwnerId,
    actions: Vec<Box<dyn Action>>,
    play_states: Vec<PlayState>,
    cursor: usize,
    spent: Vec<Box<dyn Action>>,
}

impl Default for SequenceHooks {
    fn default() -> Self {
        Self {
            id: OwnerId::next(),
            actions: Vec::new(),
            play_states: Vec::new(),
            cursor: 0,
            spent: Vec::new(),
        }
    }
}

impl SequenceHooks {
    #[inline]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of the child currently running.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn play_states(&self) -> &[PlayState] {
        &self.play_states
    }
}

impl ActionHooks for SequenceHooks {
    const KIND: &'static str = "sequence";

    fn on_begin(&mut self) {
        if let Some(action) = self.actions.get_mut(self.cursor) {
            action.begin();
        }
    }

    fn on_update(&mut self, delta_time: f32) -> bool {
        let mut delta = delta_time;

        while let Some(action) = self.actions.get_mut(self.cursor) {
            if !action.update(delta) {
                return false;
            }

            action.complete();
            self.play_states[self.cursor] = PlayState::Complete;
            self.cursor += 1;

            if let Some(next) = self.actions.get_mut(self.cursor) {
                next.begin();
            }
            delta = 0.0;
        }

        true
    }

    fn on_complete(&mut self) {
        for (action, play_state) in self.actions.iter_mut().zip(self.play_states.iter_mut()) {
            if play_state.is_complete() {
                continue;
            }

            if action.state() == LifecycleState::Unbegun {
                action.begin();
            }
            action.complete();
            *play_state = PlayState::Complete;
        }
        self.cursor = self.actions.len();
    }

    fn on_rewind(&mut self) {
        self.play_states.clear();

        for action in &mut self.actions {
            action.rewind();
            self.play_states.push(PlayState::Incomplete);
        }
        self.cursor = 0;
    }

    fn on_kill(&mut self) {
        for action in &mut self.actions {
            action.kill();
        }
        self.spent.append(&mut self.actions);
        self.play_states.clear();
        self.cursor = 0;
    }

    fn drain_children(&mut self) -> Vec<Box<dyn Action>> {
        self.play_states.clear();
        self.cursor = 0;
        let mut children = std::mem::take(&mut self.spent);
        children.append(&mut self.actions);
        children
    }
}

pub type SequenceAction = ActionBase<SequenceHooks>;

impl ActionBase<SequenceHooks> {
    /// Creates a sequence from the given children, in order.
    pub fn with_children<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoAction,
    {
        let mut sequence = Self::default();
        for child in children {
            sequence.append(child);
        }
        sequence
    }

    /// Appends `child` to the end of the sequence.
    pub fn append(&mut self, child: impl IntoAction) -> &mut Self {
        let hooks = self.hooks_mut();
        let mut child = child.into_action();
        child.set_owner(hooks.id);
        hooks.actions.push(child);
        hooks.play_states.push(PlayState::Incomplete);
        self
    }
}
