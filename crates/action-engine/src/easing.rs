//! Easing curves.
//!
//! An easing function maps normalized progress in `[0, 1]` to eased progress.
//! The output is not clamped: `back_*` and `elastic_out` overshoot on purpose,
//! and tweens are expected to cope with values slightly outside `[0, 1]`.

use std::f32::consts::PI;
use std::fmt;
use std::rc::Rc;

/// Pluggable easing curve.
///
/// Built from an [`Easing`] variant, a plain function such as [`quad_in`], or
/// any closure, so curves can carry their own parameters. Cloning shares the
/// underlying curve.
#[derive(Clone)]
pub struct EasingFn(Rc<dyn Fn(f32) -> f32>);

impl EasingFn {
    pub fn new(curve: impl Fn(f32) -> f32 + 'static) -> Self {
        Self(Rc::new(curve))
    }

    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        (self.0)(t)
    }
}

impl fmt::Debug for EasingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EasingFn(..)")
    }
}

impl<F> From<F> for EasingFn
where
    F: Fn(f32) -> f32 + 'static,
{
    fn from(curve: F) -> Self {
        Self::new(curve)
    }
}

impl From<Easing> for EasingFn {
    fn from(easing: Easing) -> Self {
        Self::new(easing.function())
    }
}

/// Applies `easing`, falling back to [`quad_out`] when none is configured.
#[inline]
pub(crate) fn ease(easing: Option<&EasingFn>, t: f32) -> f32 {
    match easing {
        Some(curve) => curve.apply(t),
        None => quad_out(t),
    }
}

/// Named easing curves, parseable from configuration strings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    QuadIn,
    #[default]
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    BackIn,
    BackOut,
    BackInOut,
    ElasticOut,
    BounceOut,
}

impl Easing {
    /// Returns the function implementing this curve.
    pub fn function(self) -> fn(f32) -> f32 {
        match self {
            Easing::Linear => linear,
            Easing::QuadIn => quad_in,
            Easing::QuadOut => quad_out,
            Easing::QuadInOut => quad_in_out,
            Easing::CubicIn => cubic_in,
            Easing::CubicOut => cubic_out,
            Easing::CubicInOut => cubic_in_out,
            Easing::SineIn => sine_in,
            Easing::SineOut => sine_out,
            Easing::SineInOut => sine_in_out,
            Easing::ExpoIn => expo_in,
            Easing::ExpoOut => expo_out,
            Easing::ExpoInOut => expo_in_out,
            Easing::BackIn => back_in,
            Easing::BackOut => back_out,
            Easing::BackInOut => back_in_out,
            Easing::ElasticOut => elastic_out,
            Easing::BounceOut => bounce_out,
        }
    }

    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

const BACK_OVERSHOOT: f32 = 1.70158;

pub fn linear(t: f32) -> f32 {
    t
}

pub fn quad_in(t: f32) -> f32 {
    t * t
}

/// Default curve for tweens: `1 - (1 - t)²`.
pub fn quad_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}

pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

pub fn cubic_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

pub fn sine_in(t: f32) -> f32 {
    1.0 - (t * PI / 2.0).cos()
}

pub fn sine_out(t: f32) -> f32 {
    (t * PI / 2.0).sin()
}

pub fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

pub fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

pub fn expo_out(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f32.powf(-10.0 * t)
    }
}

pub fn expo_in_out(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f32.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
    }
}

pub fn back_in(t: f32) -> f32 {
    let c3 = BACK_OVERSHOOT + 1.0;
    c3 * t * t * t - BACK_OVERSHOOT * t * t
}

pub fn back_out(t: f32) -> f32 {
    let c3 = BACK_OVERSHOOT + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u * u * u + BACK_OVERSHOOT * u * u
}

pub fn back_in_out(t: f32) -> f32 {
    let c2 = BACK_OVERSHOOT * 1.525;
    if t < 0.5 {
        let u = 2.0 * t;
        u * u * ((c2 + 1.0) * u - c2) / 2.0
    } else {
        let u = 2.0 * t - 2.0;
        (u * u * ((c2 + 1.0) * u + c2) + 2.0) / 2.0
    }
}

pub fn elastic_out(t: f32) -> f32 {
    const C4: f32 = (2.0 * PI) / 3.0;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
    }
}

pub fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    const EPS: f32 = 1e-4;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in Easing::iter() {
            assert!(easing.apply(0.0).abs() < EPS, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{easing} at 1");
        }
    }

    #[test]
    fn quad_out_matches_closed_form() {
        for t in [0.1, 0.25, 0.5, 0.9] {
            let expected = 1.0 - (1.0 - t) * (1.0 - t);
            assert!((quad_out(t) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn back_out_overshoots() {
        assert!(back_out(0.7) > 1.0);
    }

    #[test]
    fn easing_parses_from_snake_case() {
        assert_eq!(Easing::from_str("cubic_in_out").ok(), Some(Easing::CubicInOut));
        assert_eq!(Easing::from_str("Linear").ok(), Some(Easing::Linear));
        assert_eq!(Easing::default(), Easing::QuadOut);
    }

    #[test]
    fn easing_fn_accepts_variants_functions_and_closures() {
        let named = EasingFn::from(Easing::CubicIn);
        let plain = EasingFn::from(cubic_in);
        let steps = 4.0;
        let stepped = EasingFn::from(move |t: f32| (t * steps).floor() / steps);

        assert_eq!(named.apply(0.5), 0.125);
        assert_eq!(plain.apply(0.5), 0.125);
        assert_eq!(stepped.apply(0.6), 0.5);
        assert_eq!(stepped.clone().apply(1.0), 1.0);
    }

    #[test]
    fn missing_easing_falls_back_to_quad_out() {
        assert_eq!(ease(None, 0.5), quad_out(0.5));
        assert_eq!(ease(Some(&EasingFn::from(linear)), 0.5), 0.5);
    }
}
