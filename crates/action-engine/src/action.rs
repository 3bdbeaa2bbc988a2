//! Core action contract.
//!
//! Every action, leaf or composite, is driven through the same five-step
//! protocol: [`begin`](Action::begin), [`update`](Action::update),
//! [`complete`](Action::complete), [`rewind`](Action::rewind) and
//! [`kill`](Action::kill). The protocol bookkeeping lives in [`ActionBase`];
//! concrete behaviour is supplied through [`ActionHooks`], so a new action type
//! only implements the hooks it cares about.
//!
//! Fluent setters are written against the concrete base type
//! (`impl ActionBase<ShakeHooks> { ... }`), which keeps chained configuration
//! typed as the concrete action.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::LifecycleState;

/// Identifies a composite that has adopted an action.
///
/// This is a plain identifier, not a pointer: it records which composite an
/// action belongs to and is never dereferenced or used to reach the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    /// Allocates a process-unique owner id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// A unit of frame-driven behaviour.
///
/// # Driving contract
///
/// The driver (a [`Scheduler`](crate::Scheduler) or an enclosing composite)
/// calls `begin` once, then `update` every tick until it returns `true`, then
/// `complete` exactly once. `rewind` restarts progress without touching
/// configuration; `kill` cancels and releases everything the action holds.
///
/// Actions are single-threaded: they capture shared state through `Rc` and are
/// not meant to cross threads.
pub trait Action {
    /// Activates the action and captures any baseline it needs.
    fn begin(&mut self);

    /// Advances the action by `delta_time` seconds.
    ///
    /// Returns `true` once the work is finished; the caller is then
    /// responsible for calling [`complete`](Action::complete).
    fn update(&mut self, delta_time: f32) -> bool;

    /// Snaps external state to its exact final value and marks the action
    /// completed. Valid even if `update` never reported completion.
    fn complete(&mut self);

    /// Resets progress back to the pre-begin state, keeping configuration.
    fn rewind(&mut self);

    /// Releases callbacks and accessors and resets configuration to defaults.
    fn kill(&mut self);

    /// Records the composite this action belongs to.
    fn set_owner(&mut self, owner: OwnerId);

    fn owner(&self) -> Option<OwnerId>;

    fn state(&self) -> LifecycleState;

    /// Short static name of the action type, used in logs.
    fn kind(&self) -> &'static str;

    /// Moves out every child this action owns, killed or not.
    ///
    /// Leaves report none. Used by [`ActionPool`](crate::ActionPool) to recycle
    /// a whole tree instead of just its root.
    fn drain_children(&mut self) -> Vec<Box<dyn Action>> {
        Vec::new()
    }

    /// Converts the boxed action into `Any` so a pool can recover its
    /// concrete type.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind())
            .field("state", &self.state())
            .field("owner", &self.owner())
            .finish()
    }
}

/// Per-type behaviour plugged into [`ActionBase`].
///
/// All hooks have no-op defaults; the default `on_update` reports completion
/// immediately, which makes an action without an update hook instantaneous.
pub trait ActionHooks {
    /// Name used in logs.
    const KIND: &'static str;

    fn on_begin(&mut self) {}

    fn on_update(&mut self, delta_time: f32) -> bool {
        let _ = delta_time;
        true
    }

    fn on_complete(&mut self) {}

    fn on_rewind(&mut self) {}

    fn on_kill(&mut self) {}

    /// Backs [`Action::drain_children`]; composites override it.
    fn drain_children(&mut self) -> Vec<Box<dyn Action>> {
        Vec::new()
    }
}

/// Lifecycle state machine shared by every action type.
///
/// # Guards
///
/// - `begin` always runs `on_begin` and moves to `Active`, including on an
///   action that is already active (composites fan `begin` out freely) and on
///   a killed action that has been reconfigured for reuse.
/// - `update` on a completed action returns `true` without running the hook.
/// - `complete` runs `on_complete` at most once per activation.
/// - `update`, `complete` and `rewind` on a killed action are ignored.
#[derive(Default)]
pub struct ActionBase<H> {
    hooks: H,
    state: LifecycleState,
    owner: Option<OwnerId>,
}

impl<H: ActionHooks> ActionBase<H> {
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            state: LifecycleState::Unbegun,
            owner: None,
        }
    }

    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[inline]
    pub(crate) fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Puts a recycled instance back into the freshly-acquired state.
    pub(crate) fn reset_lifecycle(&mut self) {
        self.state = LifecycleState::Unbegun;
        self.owner = None;
    }
}

impl<H: ActionHooks + 'static> Action for ActionBase<H> {
    fn begin(&mut self) {
        if self.state.is_killed() {
            tracing::trace!(kind = H::KIND, "reviving killed action");
        }
        self.hooks.on_begin();
        self.state = LifecycleState::Active;
        tracing::trace!(kind = H::KIND, owner = ?self.owner, "action begun");
    }

    fn update(&mut self, delta_time: f32) -> bool {
        match self.state {
            LifecycleState::Completed => return true,
            LifecycleState::Killed => {
                tracing::warn!(kind = H::KIND, "update on killed action ignored");
                return true;
            }
            LifecycleState::Unbegun | LifecycleState::Active => {}
        }
        self.hooks.on_update(delta_time)
    }

    fn complete(&mut self) {
        match self.state {
            LifecycleState::Completed => {
                tracing::trace!(kind = H::KIND, "action already completed");
                return;
            }
            LifecycleState::Killed => {
                tracing::warn!(kind = H::KIND, "complete on killed action ignored");
                return;
            }
            LifecycleState::Unbegun | LifecycleState::Active => {}
        }
        self.hooks.on_complete();
        self.state = LifecycleState::Completed;
        tracing::trace!(kind = H::KIND, "action completed");
    }

    fn rewind(&mut self) {
        if self.state.is_killed() {
            tracing::warn!(kind = H::KIND, "rewind on killed action ignored");
            return;
        }
        self.hooks.on_rewind();
        self.state = LifecycleState::Unbegun;
        tracing::trace!(kind = H::KIND, "action rewound");
    }

    fn kill(&mut self) {
        if self.state.is_killed() {
            return;
        }
        self.hooks.on_kill();
        self.state = LifecycleState::Killed;
        self.owner = None;
        tracing::trace!(kind = H::KIND, "action killed");
    }

    fn set_owner(&mut self, owner: OwnerId) {
        self.owner = Some(owner);
    }

    fn owner(&self) -> Option<OwnerId> {
        self.owner
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn kind(&self) -> &'static str {
        H::KIND
    }

    fn drain_children(&mut self) -> Vec<Box<dyn Action>> {
        self.hooks.drain_children()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Conversion into a boxed, type-erased action.
///
/// Lets composites and the scheduler accept concrete actions, boxed concrete
/// actions and already-erased `Box<dyn Action>` alike.
pub trait IntoAction {
    fn into_action(self) -> Box<dyn Action>;
}

impl IntoAction for Box<dyn Action> {
    #[inline]
    fn into_action(self) -> Box<dyn Action> {
        self
    }
}

impl<H: ActionHooks + 'static> IntoAction for ActionBase<H> {
    #[inline]
    fn into_action(self) -> Box<dyn Action> {
        Box::new(self)
    }
}

impl<H: ActionHooks + 'static> IntoAction for Box<ActionBase<H>> {
    #[inline]
    fn into_action(self) -> Box<dyn Action> {
        self
    }
}
