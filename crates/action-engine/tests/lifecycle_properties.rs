use std::cell::{Cell, RefCell};
use std::rc::Rc;

use action_engine::{
    Action, ActionBase, ActionHooks, CancelMode, Easing, LifecycleState, ParallelAction,
    ParallelHooks, Scheduler, ScriptAction, ScriptHooks, ShakeHooks, ShakeTweenAction, Transform,
    TransformExt, TweenHooks, Vec3,
};

/// Counts `complete` calls and finishes after a fixed number of updates.
struct Counter {
    frames: u32,
    seen: u32,
    completes: Rc<Cell<u32>>,
}

impl ActionHooks for Counter {
    const KIND: &'static str = "counter";

    fn on_update(&mut self, _delta_time: f32) -> bool {
        self.seen += 1;
        self.seen >= self.frames
    }

    fn on_complete(&mut self) {
        self.completes.set(self.completes.get() + 1);
    }

    fn on_rewind(&mut self) {
        self.seen = 0;
    }
}

fn counter(frames: u32) -> (ActionBase<Counter>, Rc<Cell<u32>>) {
    let completes = Rc::new(Cell::new(0));
    let action = ActionBase::new(Counter {
        frames,
        seen: 0,
        completes: Rc::clone(&completes),
    });
    (action, completes)
}

fn shake_on(slot: &Rc<Cell<Vec3>>, writes: &Rc<RefCell<Vec<Vec3>>>) -> ShakeTweenAction {
    let read = Rc::clone(slot);
    let write = Rc::clone(slot);
    let log = Rc::clone(writes);

    let mut shake = ShakeTweenAction::default();
    shake
        .set_getter(move || read.get())
        .set_setter(move |v| {
            write.set(v);
            log.borrow_mut().push(v);
        })
        .set_strength(Vec3::new(1.0, 0.0, 0.0))
        .set_vibrato(10.0)
        .set_duration(2.0);
    shake
}

#[test]
fn parallel_completes_every_child_exactly_once_for_any_mix() {
    for frame_counts in [vec![1, 1, 1], vec![1, 5, 3, 2], vec![7], vec![2, 9]] {
        let mut group = ParallelAction::default();
        let mut counters = Vec::new();
        for frames in &frame_counts {
            let (child, completes) = counter(*frames);
            group.add(child);
            counters.push(completes);
        }

        group.begin();
        // Stop early on some runs so the parent's forced completion is exercised.
        for _ in 0..4 {
            if group.update(0.016) {
                break;
            }
        }
        group.complete();

        for (completes, frames) in counters.iter().zip(&frame_counts) {
            assert_eq!(completes.get(), 1, "child needing {frames} frames");
        }
    }
}

#[test]
fn parallel_reports_completion_only_when_all_children_are_complete() {
    let (fast, _) = counter(1);
    let (slow, _) = counter(3);
    let mut group = ParallelAction::with_children([fast, slow]);

    group.begin();
    assert!(!group.update(0.1));
    assert!(!group.update(0.1));
    assert!(group.update(0.1));
    assert!(group.hooks().play_states().iter().all(|s| s.is_complete()));
}

#[test]
fn killed_parallel_behaves_like_a_fresh_one() {
    let (a, _) = counter(2);
    let mut group = ParallelAction::with_children([a]);
    group.begin();
    group.update(0.1);
    group.kill();
    assert!(group.hooks().is_empty());

    let (b, b_completes) = counter(1);
    group.add(b);
    group.begin();
    assert!(group.update(0.1));
    group.complete();
    assert_eq!(b_completes.get(), 1);
    assert_eq!(group.state(), LifecycleState::Completed);
}

#[test]
fn shake_stays_in_bounds_and_snaps_back() {
    let baseline = Vec3::new(10.0, 5.0, 0.0);
    let slot = Rc::new(Cell::new(baseline));
    let writes = Rc::new(RefCell::new(Vec::new()));
    let mut shake = shake_on(&slot, &writes);

    shake.begin();
    assert!(!shake.update(0.0));
    assert_eq!(slot.get(), baseline);

    let deltas = [0.05, 0.3, 0.01, 0.4, 0.2, 0.6, 0.3];
    let total: f32 = deltas.iter().sum();
    assert!(total < 2.0);
    for dt in deltas {
        assert!(!shake.update(dt));
        let offset = slot.get() - baseline;
        assert!(offset.x.abs() <= 1.0 + 1e-5);
        assert_eq!(offset.y, 0.0);
        assert_eq!(offset.z, 0.0);
    }

    assert!(shake.update(2.0 - total + 0.01));
    shake.complete();
    assert_eq!(slot.get(), baseline);
}

#[test]
fn degenerate_shake_never_writes_before_complete() {
    let slot = Rc::new(Cell::new(Vec3::ONE));
    let writes = Rc::new(RefCell::new(Vec::new()));
    let mut shake = shake_on(&slot, &writes);
    shake.set_duration(0.0);

    shake.begin();
    assert!(shake.update(5.0));
    assert!(writes.borrow().is_empty());
    shake.complete();
    assert_eq!(writes.borrow().as_slice(), &[Vec3::ONE]);
}

#[test]
fn rewind_after_complete_reproduces_output() {
    let slot = Rc::new(Cell::new(Vec3::ZERO));
    let writes = Rc::new(RefCell::new(Vec::new()));
    let mut shake = shake_on(&slot, &writes);
    shake.set_easing(Easing::SineOut);
    let deltas = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];

    let run = |shake: &mut ShakeTweenAction| {
        shake.begin();
        for dt in deltas {
            if shake.update(dt) {
                break;
            }
        }
        shake.complete();
        writes.borrow_mut().drain(..).collect::<Vec<_>>()
    };

    let first = run(&mut shake);
    shake.rewind();
    let second = run(&mut shake);
    assert_eq!(first, second);
}

#[test]
fn script_completes_on_the_tick_it_begins() {
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let mut script = ScriptAction::default();
    script.set_script(move || flag.set(true));

    script.begin();
    assert!(fired.get());
    assert!(script.update(0.0));
}

#[test]
fn scheduler_drives_a_pooled_tree() {
    let mut scheduler = Scheduler::default();
    let transform = Transform::at(Vec3::new(0.0, 1.0, 0.0)).shared();
    let landed = Rc::new(Cell::new(false));

    let mut group = scheduler.prepare::<ParallelHooks>();
    let shake = transform.shake_position(scheduler.pool_mut(), Vec3::splat(0.5), 8.0, 0.5);
    let mut grow = transform.scale_uniform(scheduler.pool_mut(), 3.0, 1.0);
    grow.set_easing(Easing::Linear);
    let mut on_land = scheduler.prepare::<ScriptHooks>();
    let flag = Rc::clone(&landed);
    on_land.set_script(move || flag.set(true));
    group.add(shake).add(grow).add(on_land);

    let id = scheduler.run(group);
    assert!(landed.get());

    let mut frames = 0;
    while scheduler.is_running(id) {
        scheduler.tick(1.0 / 60.0);
        frames += 1;
        assert!(frames < 120, "tree never finished");
    }

    let tr = transform.borrow();
    assert_eq!(tr.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(tr.local_scale, Vec3::splat(3.0));
    drop(tr);

    // The whole tree went back to the pool, children released from the transform.
    let pool = scheduler.pool();
    assert_eq!(pool.idle_count::<ParallelHooks>(), 1);
    assert_eq!(pool.idle_count::<ShakeHooks>(), 1);
    assert_eq!(pool.idle_count::<TweenHooks<Vec3>>(), 1);
    assert_eq!(pool.idle_count::<ScriptHooks>(), 1);
    assert_eq!(Rc::strong_count(&transform), 1);
    assert_eq!(Rc::strong_count(&landed), 1);
}

#[test]
fn rebuilt_tree_reuses_pooled_leaves() {
    let mut scheduler = Scheduler::default();
    let transform = Transform::at(Vec3::ZERO).shared();

    for round in 0..3 {
        let mut group = scheduler.prepare::<ParallelHooks>();
        let shake = transform.shake_position(scheduler.pool_mut(), Vec3::ONE, 10.0, 0.1);
        let slide = transform.move_x(scheduler.pool_mut(), 1.0, 0.1);
        group.add(shake).add(slide);
        assert_eq!(scheduler.pool().total_idle(), 0, "round {round}");

        let id = scheduler.run(group);
        while scheduler.is_running(id) {
            scheduler.tick(0.05);
        }
        assert_eq!(scheduler.pool().total_idle(), 3, "round {round}");
    }
}

#[test]
fn cancelled_shake_can_be_completed_by_the_scheduler() {
    let mut scheduler = Scheduler::default();
    let transform = Transform::at(Vec3::ZERO).shared();

    let shake = transform.shake_position(scheduler.pool_mut(), Vec3::ONE, 10.0, 3.0);
    let id = scheduler.run(shake);
    scheduler.tick(0.4);
    assert_ne!(transform.borrow().position, Vec3::ZERO);

    scheduler.cancel(id, CancelMode::Complete).unwrap();
    assert_eq!(transform.borrow().position, Vec3::ZERO);
    assert_eq!(scheduler.pool().idle_count::<ShakeHooks>(), 1);
}
