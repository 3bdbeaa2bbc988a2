//! Tween shortcuts bound to a [`Transform`].
//!
//! [`TransformExt`] acquires an action from a pool, wires its getter and
//! setter to one transform field and fills in the target and duration. The
//! caller can keep configuring the returned action (easing, vibrato, ...)
//! before adding it to a composite or handing it to a scheduler.
//!
//! `Transform` here is a flat bag of independent fields; there is no parent
//! hierarchy, so `position` and `local_position` do not affect each other.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::{
    ActionPool, FloatTweenAction, PathAction, PathHooks, ShakeHooks, ShakeTweenAction,
    TweenHooks, Vec3TweenAction,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub local_position: Vec3,
    pub euler_angles: Vec3,
    pub local_euler_angles: Vec3,
    pub local_scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            local_position: Vec3::ZERO,
            euler_angles: Vec3::ZERO,
            local_euler_angles: Vec3::ZERO,
            local_scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            local_position: position,
            ..Self::default()
        }
    }

    /// Wraps the transform for sharing with actions.
    pub fn shared(self) -> SharedTransform {
        Rc::new(RefCell::new(self))
    }
}

/// Transform shared between the application and the actions animating it.
pub type SharedTransform = Rc<RefCell<Transform>>;

type Vec3Field = (fn(&Transform) -> Vec3, fn(&mut Transform, Vec3));
type AxisField = (fn(&Transform) -> f32, fn(&mut Transform, f32));

const POSITION: Vec3Field = (|t| t.position, |t, v| t.position = v);
const LOCAL_POSITION: Vec3Field = (|t| t.local_position, |t, v| t.local_position = v);
const EULER_ANGLES: Vec3Field = (|t| t.euler_angles, |t, v| t.euler_angles = v);
const LOCAL_EULER_ANGLES: Vec3Field = (|t| t.local_euler_angles, |t, v| t.local_euler_angles = v);
const LOCAL_SCALE: Vec3Field = (|t| t.local_scale, |t, v| t.local_scale = v);

const POSITION_X: AxisField = (|t| t.position.x, |t, v| t.position.x = v);
const POSITION_Y: AxisField = (|t| t.position.y, |t, v| t.position.y = v);
const POSITION_Z: AxisField = (|t| t.position.z, |t, v| t.position.z = v);
const LOCAL_X: AxisField = (|t| t.local_position.x, |t, v| t.local_position.x = v);
const LOCAL_Y: AxisField = (|t| t.local_position.y, |t, v| t.local_position.y = v);
const LOCAL_Z: AxisField = (|t| t.local_position.z, |t, v| t.local_position.z = v);

/// Builds pooled tween actions that animate a [`SharedTransform`].
pub trait TransformExt {
    fn move_to(&self, pool: &mut ActionPool, position: Vec3, duration: f32) -> Box<Vec3TweenAction>;
    fn move_x(&self, pool: &mut ActionPool, x: f32, duration: f32) -> Box<FloatTweenAction>;
    fn move_y(&self, pool: &mut ActionPool, y: f32, duration: f32) -> Box<FloatTweenAction>;
    fn move_z(&self, pool: &mut ActionPool, z: f32, duration: f32) -> Box<FloatTweenAction>;

    fn local_move_to(&self, pool: &mut ActionPool, position: Vec3, duration: f32) -> Box<Vec3TweenAction>;
    fn local_move_x(&self, pool: &mut ActionPool, x: f32, duration: f32) -> Box<FloatTweenAction>;
    fn local_move_y(&self, pool: &mut ActionPool, y: f32, duration: f32) -> Box<FloatTweenAction>;
    fn local_move_z(&self, pool: &mut ActionPool, z: f32, duration: f32) -> Box<FloatTweenAction>;

    fn scale_to(&self, pool: &mut ActionPool, scale: Vec3, duration: f32) -> Box<Vec3TweenAction>;
    fn scale_uniform(&self, pool: &mut ActionPool, scale: f32, duration: f32) -> Box<Vec3TweenAction>;

    fn rotate_to(&self, pool: &mut ActionPool, angles: Vec3, duration: f32) -> Box<Vec3TweenAction>;
    fn local_rotate_to(&self, pool: &mut ActionPool, angles: Vec3, duration: f32) -> Box<Vec3TweenAction>;

    fn path(&self, pool: &mut ActionPool, duration: f32, points: &[Vec3]) -> Box<PathAction>;
    fn local_path(&self, pool: &mut ActionPool, duration: f32, points: &[Vec3]) -> Box<PathAction>;

    fn shake_position(
        &self,
        pool: &mut ActionPool,
        strength: Vec3,
        vibrato: f32,
        duration: f32,
    ) -> Box<ShakeTweenAction>;
}

impl TransformExt for SharedTransform {
    fn move_to(&self, pool: &mut ActionPool, position: Vec3, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, POSITION, position, duration)
    }

    fn move_x(&self, pool: &mut ActionPool, x: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, POSITION_X, x, duration)
    }

    fn move_y(&self, pool: &mut ActionPool, y: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, POSITION_Y, y, duration)
    }

    fn move_z(&self, pool: &mut ActionPool, z: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, POSITION_Z, z, duration)
    }

    fn local_move_to(&self, pool: &mut ActionPool, position: Vec3, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, LOCAL_POSITION, position, duration)
    }

    fn local_move_x(&self, pool: &mut ActionPool, x: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, LOCAL_X, x, duration)
    }

    fn local_move_y(&self, pool: &mut ActionPool, y: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, LOCAL_Y, y, duration)
    }

    fn local_move_z(&self, pool: &mut ActionPool, z: f32, duration: f32) -> Box<FloatTweenAction> {
        axis_tween(self, pool, LOCAL_Z, z, duration)
    }

    fn scale_to(&self, pool: &mut ActionPool, scale: Vec3, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, LOCAL_SCALE, scale, duration)
    }

    fn scale_uniform(&self, pool: &mut ActionPool, scale: f32, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, LOCAL_SCALE, Vec3::splat(scale), duration)
    }

    fn rotate_to(&self, pool: &mut ActionPool, angles: Vec3, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, EULER_ANGLES, angles, duration)
    }

    fn local_rotate_to(&self, pool: &mut ActionPool, angles: Vec3, duration: f32) -> Box<Vec3TweenAction> {
        vec3_tween(self, pool, LOCAL_EULER_ANGLES, angles, duration)
    }

    fn path(&self, pool: &mut ActionPool, duration: f32, points: &[Vec3]) -> Box<PathAction> {
        path_along(self, pool, POSITION, duration, points)
    }

    fn local_path(&self, pool: &mut ActionPool, duration: f32, points: &[Vec3]) -> Box<PathAction> {
        path_along(self, pool, LOCAL_POSITION, duration, points)
    }

    fn shake_position(
        &self,
        pool: &mut ActionPool,
        strength: Vec3,
        vibrato: f32,
        duration: f32,
    ) -> Box<ShakeTweenAction> {
        let (get, set) = POSITION;
        let read = Rc::clone(self);
        let write = Rc::clone(self);

        let mut action = pool.acquire::<ShakeHooks>();
        action
            .set_getter(move || get(&read.borrow()))
            .set_setter(move |v| set(&mut write.borrow_mut(), v))
            .set_strength(strength)
            .set_vibrato(vibrato)
            .set_duration(duration);
        action
    }
}

fn vec3_tween(
    transform: &SharedTransform,
    pool: &mut ActionPool,
    (get, set): Vec3Field,
    end: Vec3,
    duration: f32,
) -> Box<Vec3TweenAction> {
    let read = Rc::clone(transform);
    let write = Rc::clone(transform);

    let mut action = pool.acquire::<TweenHooks<Vec3>>();
    action
        .set_getter(move || get(&read.borrow()))
        .set_setter(move |v| set(&mut write.borrow_mut(), v))
        .set_end_value(end)
        .set_duration(duration);
    action
}

fn axis_tween(
    transform: &SharedTransform,
    pool: &mut ActionPool,
    (get, set): AxisField,
    end: f32,
    duration: f32,
) -> Box<FloatTweenAction> {
    let read = Rc::clone(transform);
    let write = Rc::clone(transform);

    let mut action = pool.acquire::<TweenHooks<f32>>();
    action
        .set_getter(move || get(&read.borrow()))
        .set_setter(move |v| set(&mut write.borrow_mut(), v))
        .set_end_value(end)
        .set_duration(duration);
    action
}

fn path_along(
    transform: &SharedTransform,
    pool: &mut ActionPool,
    (_, set): Vec3Field,
    duration: f32,
    points: &[Vec3],
) -> Box<PathAction> {
    let write = Rc::clone(transform);

    let mut action = pool.acquire::<PathHooks>();
    action
        .set_setter(move |v| set(&mut write.borrow_mut(), v))
        .set_duration(duration)
        .add_points(points.iter().copied());
    action
}
