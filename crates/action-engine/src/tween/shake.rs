//! Decaying oscillation around a captured baseline.
//!
//! # Algorithm
//!
//! With `p = clamp(elapsed / duration)` and `e = easing(p)`:
//!
//! - amplitude decays linearly: `strength * (1 - e)`
//! - shape: `sin(vibrato * e * π)`
//! - direction: fixed ±1 tables indexed by `floor(vibrato * e) mod 11`
//!
//! The direction tables make every shake with the same configuration and the
//! same delta sequence reproduce exactly; there is no random source involved.

use std::f32::consts::PI;

use glam::Vec3;

use super::{Getter, Setter, progress};
use crate::{ActionBase, ActionHooks, EasingFn, easing};

const DIR_X: [f32; 11] = [1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
const DIR_Y: [f32; 11] = [-1.0, 1.0, 1.0, -1.0, 1.0, -1.0, -1.0, -1.0, 1.0, -1.0, 1.0];
const DIR_Z: [f32; 11] = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, -1.0, 1.0];

const DEFAULT_STRENGTH: Vec3 = Vec3::ONE;
const DEFAULT_VIBRATO: f32 = 10.0;

/// Direction for oscillation step `iteration`, wrapping around the tables.
fn direction(iteration: i64) -> Vec3 {
    let i = iteration.rem_euclid(DIR_X.len() as i64) as usize;
    Vec3::new(DIR_X[i], DIR_Y[i], DIR_Z[i])
}

/// Offset from the baseline for the given configuration and eased progress.
pub fn shake_offset(strength: Vec3, vibrato: f32, eased: f32) -> Vec3 {
    let current_strength = strength * (1.0 - eased);
    let height = (vibrato * eased * PI).sin();
    let iteration = (vibrato * eased).floor() as i64;
    current_strength * direction(iteration) * height
}

pub struct ShakeHooks {
    getter: Option<Getter<Vec3>>,
    setter: Option<Setter<Vec3>>,
    baseline: Vec3,
    strength: Vec3,
    vibrato: f32,
    duration: f32,
    easing: Option<EasingFn>,
    elapsed: f32,
}

impl Default for ShakeHooks {
    fn default() -> Self {
        Self {
            getter: None,
            setter: None,
            baseline: Vec3::ZERO,
            strength: DEFAULT_STRENGTH,
            vibrato: DEFAULT_VIBRATO,
            duration: 0.0,
            easing: None,
            elapsed: 0.0,
        }
    }
}

impl ShakeHooks {
    fn write(&mut self, value: Vec3) {
        match self.setter.as_mut() {
            Some(setter) => setter(value),
            None => tracing::warn!(kind = Self::KIND, "shake has no setter"),
        }
    }

    #[inline]
    pub fn baseline(&self) -> Vec3 {
        self.baseline
    }

    #[inline]
    pub fn strength(&self) -> Vec3 {
        self.strength
    }

    #[inline]
    pub fn vibrato(&self) -> f32 {
        self.vibrato
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl ActionHooks for ShakeHooks {
    const KIND: &'static str = "shake_tween";

    fn on_begin(&mut self) {
        match self.getter.as_ref() {
            Some(getter) => self.baseline = getter(),
            None => tracing::warn!(kind = Self::KIND, "shake has no getter"),
        }
    }

    fn on_update(&mut self, delta_time: f32) -> bool {
        if self.duration <= 0.0 || self.vibrato <= 0.0 {
            return true;
        }

        self.elapsed += delta_time;

        let p = progress(self.elapsed, self.duration);
        let eased = easing::ease(self.easing.as_ref(), p);
        let offset = shake_offset(self.strength, self.vibrato, eased);
        self.write(self.baseline + offset);

        p >= 1.0
    }

    fn on_complete(&mut self) {
        self.write(self.baseline);
    }

    fn on_rewind(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_kill(&mut self) {
        *self = Self::default();
    }
}

pub type ShakeTweenAction = ActionBase<ShakeHooks>;

impl ActionBase<ShakeHooks> {
    pub fn set_getter(&mut self, getter: impl Fn() -> Vec3 + 'static) -> &mut Self {
        self.hooks_mut().getter = Some(Box::new(getter));
        self
    }

    pub fn set_setter(&mut self, setter: impl FnMut(Vec3) + 'static) -> &mut Self {
        self.hooks_mut().setter = Some(Box::new(setter));
        self
    }

    /// Peak displacement per axis.
    pub fn set_strength(&mut self, strength: Vec3) -> &mut Self {
        self.hooks_mut().strength = strength;
        self
    }

    /// Number of half-oscillations over the whole shake.
    pub fn set_vibrato(&mut self, vibrato: f32) -> &mut Self {
        self.hooks_mut().vibrato = vibrato;
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
