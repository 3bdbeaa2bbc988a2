//! Movement along a polyline.
//!
//! Progress is measured in arc length, so the speed along the path is uniform
//! for linear easing regardless of how the points are spaced.

use glam::Vec3;

use super::{Setter, progress};
use crate::{ActionBase, ActionHooks, EasingFn, easing};

#[derive(Default)]
pub struct PathHooks {
    setter: Option<Setter<Vec3>>,
    points: Vec<Vec3>,
    duration: f32,
    easing: Option<EasingFn>,
    elapsed: f32,
}

impl PathHooks {
    fn write(&mut self, value: Vec3) {
        match self.setter.as_mut() {
            Some(setter) => setter(value),
            None => tracing::warn!(kind = Self::KIND, "path has no setter"),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Total length of the polyline.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    /// Point at arc-length fraction `t`; `t` outside `[0, 1]` clamps to the
    /// end points.
    pub fn sample(&self, t: f32) -> Option<Vec3> {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return None,
        };
        if t <= 0.0 {
            return Some(first);
        }
        if t >= 1.0 {
            return Some(last);
        }

        let total = self.length();
        if total <= f32::EPSILON {
            return Some(first);
        }

        let mut remaining = total * t;
        for w in self.points.windows(2) {
            let segment = w[0].distance(w[1]);
            if remaining <= segment {
                if segment <= f32::EPSILON {
                    return Some(w[1]);
                }
                return Some(w[0].lerp(w[1], remaining / segment));
            }
            remaining -= segment;
        }
        Some(last)
    }
}

impl ActionHooks for PathHooks {
    const KIND: &'static str = "path";

    fn on_update(&mut self, delta_time: f32) -> bool {
        if self.duration <= 0.0 {
            return true;
        }

        self.elapsed += delta_time;

        let p = progress(self.elapsed, self.duration);
        let eased = easing::ease(self.easing.as_ref(), p);
        if let Some(point) = self.sample(eased) {
            self.write(point);
        }

        p >= 1.0
    }

    fn on_complete(&mut self) {
        if let Some(last) = self.points.last().copied() {
            self.write(last);
        }
    }

    fn on_rewind(&mut self) {
        self.elapsed = 0.0;
    }

    fn on_kill(&mut self) {
        self.setter = None;
        self.points.clear();
        self.duration = 0.0;
        self.easing = None;
        self.elapsed = 0.0;
    }
}

pub type PathAction = ActionBase<PathHooks>;

impl ActionBase<PathHooks> {
    pub fn set_setter(&mut self, setter: impl FnMut(Vec3) + 'static) -> &mut Self {
        self.hooks_mut().setter = Some(Box::new(setter));
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

    pub fn add_point(&mut self, point: Vec3) -> &mut Self {
        self.hooks_mut().points.push(point);
        self
    }

    pub fn add_points(&mut self, points: impl IntoIterator<Item = Vec3>) -> &mut Self {
        self.hooks_mut().points.extend(points);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{Action, Easing};

    fn path(slot: &Rc<Cell<Vec3>>, points: &[Vec3], duration: f32) -> PathAction {
        let write = Rc::clone(slot);
        let mut action = PathAction::default();
        action
            .set_setter(move |v| write.set(v))
            .set_duration(duration)
            .set_easing(Easing::Linear)
            .add_points(points.iter().copied());
        action
    }

    #[test]
    fn moves_by_arc_length() {
        let slot = Rc::new(Cell::new(Vec3::ZERO));
        // Segment lengths 1 and 3: halfway is 1 unit into the second segment.
        let points = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 3.0, 0.0)];
        let mut action = path(&slot, &points, 4.0);

        action.begin();
        assert!(!action.update(2.0));
        assert!(slot.get().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5));

        assert!(action.update(2.0));
        action.complete();
        assert_eq!(slot.get(), Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn empty_path_never_writes() {
        let slot = Rc::new(Cell::new(Vec3::splat(7.0)));
        let mut action = path(&slot, &[], 1.0);

        action.begin();
        assert!(action.update(1.0));
        action.complete();
        assert_eq!(slot.get(), Vec3::splat(7.0));
    }

    #[test]
    fn single_point_snaps_to_it() {
        let slot = Rc::new(Cell::new(Vec3::ZERO));
        let mut action = path(&slot, &[Vec3::Y], 1.0);
        action.begin();
        action.update(0.5);
        assert_eq!(slot.get(), Vec3::Y);
    }

    #[test]
    fn kill_clears_points_but_keeps_allocation() {
        let slot = Rc::new(Cell::new(Vec3::ZERO));
        let mut action = path(&slot, &[Vec3::ZERO, Vec3::X, Vec3::Y], 1.0);
        action.kill();

        assert!(action.hooks().points().is_empty());
        assert!(action.hooks().points.capacity() >= 3);
        assert_eq!(Rc::strong_count(&slot), 1);
    }
}
