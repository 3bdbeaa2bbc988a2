//! Leaf actions that do not interpolate anything.
//!
//! - [`ScriptAction`]: runs a callback once when begun
//! - [`DelayAction`]: waits for a fixed amount of time

use crate::{ActionBase, ActionHooks};

/// Zero-argument side-effecting callback.
pub type Script = Box<dyn FnMut()>;

/// Runs its callback on `begin` and completes on the first update.
#[derive(Default)]
pub struct ScriptHooks {
    script: Option<Script>,
}

impl ScriptHooks {
    #[inline]
    pub fn has_script(&self) -> bool {
        self.script.is_some()
    }
}

impl ActionHooks for ScriptHooks {
    const KIND: &'static str = "script";

    fn on_begin(&mut self) {
        if let Some(script) = self.script.as_mut() {
            script();
        }
    }

    fn on_kill(&mut self) {
        self.script = None;
    }
}

pub type ScriptAction = ActionBase<ScriptHooks>;

impl ActionBase<ScriptHooks> {
    pub fn set_script(&mut self, script: impl FnMut() + 'static) -> &mut Self {
        self.hooks_mut().script = Some(Box::new(script));
        self
    }
}

/// Finishes once the accumulated delta reaches the configured duration.
#[derive(Default)]
pub struct DelayHooks {
    duration: f32,
    elapsed: f32,
}

impl DelayHooks {
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl ActionHooks for DelayHooks {
    const KIND: &'static str = "delay";

    fn on_update(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time;
        self.elapsed >= self.duration
    }

    fn on_rewind(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_kill(&mut self) {
        *self = Self::default();
    }
}

pub type DelayAction = ActionBase<DelayHooks>;

impl ActionBase<DelayHooks> {
    pub fn set_duration(&mut self, duration: f32) -> &mut Self {
        self.hooks_mut().duration = duration;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{Action, LifecycleState};

    #[test]
    fn script_runs_once_on_begin_and_completes_same_tick() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let mut action = ScriptAction::default();
        action.set_script(move || counter.set(counter.get() + 1));

        action.begin();
        assert_eq!(calls.get(), 1);
        assert!(action.update(0.016));
        action.complete();
        assert_eq!(calls.get(), 1);
        assert_eq!(action.state(), LifecycleState::Completed);
    }

    #[test]
    fn missing_script_is_a_no_op() {
        let mut action = ScriptAction::default();
        assert!(!action.hooks().has_script());
        action.begin();
        assert!(action.update(0.0));
        action.complete();
    }

    #[test]
    fn script_replays_after_rewind() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut action = ScriptAction::default();
        action.set_script(move || counter.set(counter.get() + 1));

        action.begin();
        action.complete();
        action.rewind();
        action.begin();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn kill_drops_script() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut action = ScriptAction::default();
        action.set_script(move || counter.set(counter.get() + 1));

        action.kill();
        assert!(!action.hooks().has_script());
        assert_eq!(Rc::strong_count(&calls), 1);
    }

    #[test]
    fn delay_waits_for_duration() {
        let mut action = DelayAction::default();
        action.set_duration(0.5);
        action.begin();
        assert!(!action.update(0.2));
        assert!(!action.update(0.2));
        assert!(action.update(0.2));

        action.rewind();
        assert_eq!(action.hooks().elapsed(), 0.0);
        assert_eq!(action.hooks().duration(), 0.5);
    }
}
