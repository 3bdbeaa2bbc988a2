//! Numeric tween actions.
//!
//! A tween reads an externally owned value through a getter when it begins,
//! writes interpolated values through a setter on every update and writes the
//! exact terminal value on completion. The tween never owns the value itself.
//!
//! - [`TweenAction`]: start-to-end interpolation ([`FloatTweenAction`],
//!   [`Vec3TweenAction`])
//! - [`ShakeTweenAction`]: decaying oscillation around the starting value
//! - [`PathAction`]: movement along a polyline

pub mod path;
pub mod shake;

use glam::Vec3;

use crate::{ActionBase, ActionHooks, EasingFn, easing};

pub use path::{PathAction, PathHooks};
pub use shake::{ShakeHooks, ShakeTweenAction};

/// Reads the current value of an external slot.
pub type Getter<T> = Box<dyn Fn() -> T>;

/// Writes a new value into an external slot.
pub type Setter<T> = Box<dyn FnMut(T)>;

/// Values that a [`TweenAction`] can interpolate.
pub trait Tween: Copy + Default + 'static {
    /// Interpolates from `self` towards `target`; `t` may leave `[0, 1]`.
    fn lerp(self, target: Self, t: f32) -> Self;
}

impl Tween for f32 {
    #[inline]
    fn lerp(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Tween for Vec3 {
    #[inline]
    fn lerp(self, target: Self, t: f32) -> Self {
        Vec3::lerp(self, target, t)
    }
}

/// Normalized progress, `elapsed / duration` clamped to `[0, 1]`.
#[inline]
pub(crate) fn progress(elapsed: f32, duration: f32) -> f32 {
    (elapsed / duration).clamp(0.0, 1.0)
}

/// Start-to-end interpolation of an external value.
pub struct TweenHooks<T: Tween> {
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
    start: T,
    end: T,
    duration: f32,
    easing: Option<EasingFn>,
    elapsed: f32,
}

impl<T: Tween> Default for TweenHooks<T> {
    fn default() -> Self {
        Self {
            getter: None,
            setter: None,
            start: T::default(),
            end: T::default(),
            duration: 0.0,
            easing: None,
            elapsed: 0.0,
        }
    }
}

impl<T: Tween> TweenHooks<T> {
    fn write(&mut self, value: T) {
        match self.setter.as_mut() {
            Some(setter) => setter(value),
            None => tracing::warn!(kind = <Self as ActionHooks>::KIND, "tween has no setter"),
        }
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn end_value(&self) -> T {
        self.end
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<T: Tween> ActionHooks for TweenHooks<T> {
    const KIND: &'static str = "tween";

    fn on_begin(&mut self) {
        match self.getter.as_ref() {
            Some(getter) => self.start = getter(),
            None => tracing::warn!(kind = Self::KIND, "tween has no getter"),
        }
    }

    fn on_update(&mut self, delta_time: f32) -> bool {
        if self.duration <= 0.0 {
            return true;
        }

        self.elapsed += delta_time;

        let p = progress(self.elapsed, self.duration);
        let eased = easing::ease(self.easing.as_ref(), p);
        let value = self.start.lerp(self.end, eased);
        self.write(value);

        p >= 1.0
    }

    fn on_complete(&mut self) {
        self.write(self.end);
    }

    fn on_rewind(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_kill(&mut self) {
        *self = Self::default();
    }
}

/// Tween action over any [`Tween`] value.
pub type TweenAction<T> = ActionBase<TweenHooks<T>>;

pub type FloatTweenAction = TweenAction<f32>;

pub type Vec3TweenAction = TweenAction<Vec3>;

impl<T: Tween> ActionBase<TweenHooks<T>> {
    pub fn set_getter(&mut self, getter: impl Fn() -> T + 'static) -> &mut Self {
        self.hooks_mut().getter = Some(Box::new(getter));
        self
    }

    pub fn set_setter(&mut self, setter: impl FnMut(T) + 'static) -> &mut Self {
        self.hooks_mut().setter = Some(Box::new(setter));
        self
    }

    pub fn set_end_value(&mut self, end: T) -> &mut Self {
        self.hooks_mut().end = end;
        self
    }

    pub fn set_duration(&mut self, duration: f32) -> &mut Self {
        self.hooks_mut().duration = duration;
        self
    }

    pub fn set_easing(&mut self, easing: impl Into<EasingFn>) -> &mut Self {
        self.hooks_mut().easing = Some(easing.into());
        self
    }
}
