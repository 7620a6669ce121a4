#![allow(unused)]

use rosu_map::util::Pos;
use rosu_strain::{EvalFlags, TimedObject, TimedObjects};

pub const AIM_SKILL_MULTIPLIER: f64 = 23.55;
pub const AIM_STRAIN_DECAY_BASE: f64 = 0.15;

pub fn constant<T>(value: f64) -> impl Fn(&TimedObject<T>, &[TimedObject<T>], EvalFlags) -> f64 {
    move |_, _, _| value
}

/// Uses the payload itself as raw difficulty.
pub fn payload(curr: &TimedObject<f64>, _: &[TimedObject<f64>], _: EvalFlags) -> f64 {
    curr.base
}

/// Toy aim model: distance to the previous object per second, zero for the
/// first object. Sliders count twice if enabled.
pub fn jump_distance(
    curr: &TimedObject<(Pos, bool)>,
    objects: &[TimedObject<(Pos, bool)>],
    flags: EvalFlags,
) -> f64 {
    let Some(prev) = curr.previous(0, objects) else {
        return 0.0;
    };

    let (pos, is_slider) = curr.base;
    let dist = f64::from((pos - prev.base.0).length());
    let time = curr.delta_time.max(25.0);
    let slider_bonus = if flags.include_sliders && is_slider { 2.0 } else { 1.0 };

    dist / time * slider_bonus
}

/// A short stream of alternating jumps every 200ms.
pub fn jumps(len: usize) -> TimedObjects<(Pos, bool)> {
    let items = (0..len).map(|i| {
        let x = if i % 2 == 0 { 64.0 } else { 448.0 };
        let pos = Pos::new(x, 192.0);

        (i as f64 * 200.0, (pos, i % 3 == 0))
    });

    TimedObjects::new(items).unwrap()
}

pub fn times(times: &[f64]) -> TimedObjects<()> {
    TimedObjects::new(times.iter().map(|&t| (t, ()))).unwrap()
}

#[track_caller]
pub fn assert_eq_float(actual: f64, expected: f64) {
    const THRESHOLD: f64 = 1e-9;

    let diff = (actual - expected).abs();

    assert!(
        diff < THRESHOLD,
        "actual={actual} | expected={expected} | diff={diff}"
    );
}
