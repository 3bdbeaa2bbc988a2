//! Free functions for assembling one-off action trees.
//!
//! Each helper returns an erased `Box<dyn Action>`, so a timeline reads as a
//! nested expression: `sequence(vec![script(..), delay(0.5), parallel(..)])`.
//! Instances come straight from the allocator; trees built every frame should
//! go through [`ActionPool`](crate::ActionPool) or
//! [`Scheduler::prepare`](crate::Scheduler::prepare) instead.

use crate::{Action, DelayAction, ParallelAction, ScriptAction, SequenceAction};

/// Group whose children all run every tick.
#[inline]
pub fn parallel(children: Vec<Box<dyn Action>>) -> Box<dyn Action> {
    Box::new(ParallelAction::with_children(children))
}

/// Children run one after another, in the given order.
#[inline]
pub fn sequence(children: Vec<Box<dyn Action>>) -> Box<dyn Action> {
    Box::new(SequenceAction::with_children(children))
}

/// Creates a fire-once script action.
#[inline]
pub fn script(f: impl FnMut() + 'static) -> Box<dyn Action> {
    let mut action = ScriptAction::default();
    action.set_script(f);
    Box::new(action)
}

/// Creates a delay of `seconds`.
#[inline]
pub fn delay(seconds: f32) -> Box<dyn Action> {
    let mut action = DelayAction::default();
    action.set_duration(seconds);
    Box::new(action)
}
