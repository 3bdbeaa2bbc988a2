//! Demo scene: a camera shake on impact while a crate slides along a path,
//! pops in scale and announces its landing.

use std::cell::Cell;
use std::rc::Rc;

use action_engine::{
    ActionId, DelayHooks, Easing, ParallelHooks, Scheduler, ScriptHooks, SequenceHooks,
    SharedTransform, Transform, TransformExt, Vec3,
};

pub struct Scene {
    pub camera: SharedTransform,
    pub crate_box: SharedTransform,
    pub landings: Rc<Cell<u32>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            camera: Transform::at(Vec3::new(0.0, 5.0, -10.0)).shared(),
            crate_box: Transform::at(Vec3::ZERO).shared(),
            landings: Rc::new(Cell::new(0)),
        }
    }

    /// Builds the action tree from pooled instances and schedules it.
    ///
    /// ```text
    /// sequence
    /// ├── parallel
    /// │   ├── crate path
    /// │   └── crate scale pop
    /// ├── script "landed"
    /// ├── parallel
    /// │   ├── camera shake
    /// │   └── crate settle (move_y)
    /// └── delay
    /// ```
    pub fn schedule(&self, scheduler: &mut Scheduler) -> ActionId {
        let pool = scheduler.pool_mut();

        let mut slide = self.crate_box.path(
            pool,
            1.0,
            &[
                Vec3::ZERO,
                Vec3::new(2.0, 3.0, 0.0),
                Vec3::new(4.0, 1.0, 0.0),
            ],
        );
        slide.set_easing(Easing::SineInOut);

        let mut pop = self.crate_box.scale_uniform(pool, 1.5, 1.0);
        pop.set_easing(Easing::BackOut);

        let mut approach = pool.acquire::<ParallelHooks>();
        approach.add(slide).add(pop);

        let mut landed = pool.acquire::<ScriptHooks>();
        let landings = Rc::clone(&self.landings);
        landed.set_script(move || {
            landings.set(landings.get() + 1);
            tracing::info!("crate landed");
        });

        let mut shake = self
            .camera
            .shake_position(pool, Vec3::new(0.4, 0.25, 0.0), 12.0, 0.6);
        shake.set_easing(Easing::CubicOut);

        let mut settle = self.crate_box.move_y(pool, 0.0, 0.3);
        settle.set_easing(Easing::BounceOut);

        let mut impact = pool.acquire::<ParallelHooks>();
        impact.add(shake).add(settle);

        let mut rest = pool.acquire::<DelayHooks>();
        rest.set_duration(0.25);

        let mut timeline = pool.acquire::<SequenceHooks>();
        timeline
            .append(approach)
            .append(landed)
            .append(impact)
            .append(rest);

        scheduler.run(timeline)
    }

    pub fn report(&self, frame: u32) {
        let camera = self.camera.borrow();
        let crate_box = self.crate_box.borrow();
        tracing::debug!(
            frame,
            camera = ?camera.position,
            crate_position = ?crate_box.position,
            crate_scale = ?crate_box.local_scale,
            "frame"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_finishes_and_restores_camera() {
        let scene = Scene::new();
        let start = scene.camera.borrow().position;
        let mut scheduler = Scheduler::default();
        let id = scene.schedule(&mut scheduler);

        let mut frame = 0;
        while scheduler.is_running(id) {
            scheduler.tick(1.0 / 60.0);
            frame += 1;
            assert!(frame < 600, "timeline never finished");
        }

        assert_eq!(scene.landings.get(), 1);
        assert_eq!(scene.camera.borrow().position, start);
        assert_eq!(scene.crate_box.borrow().position, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(scene.crate_box.borrow().local_scale, Vec3::splat(1.5));
        assert_eq!(Rc::strong_count(&scene.camera), 1);
    }
}
