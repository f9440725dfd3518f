// src/intersect.rs

use crate::cooperative::GroupScratch;
use crate::geometry::Segment;

/// Below this determinant magnitude a side pair is treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-10;

struct RawCrossing {
    /// Progress along the first segment.
    t: f32,
    /// Progress along the second segment.
    u: f32,
    degenerate: bool,
}

fn solve(a: &Segment, b: &Segment) -> RawCrossing {
    let d1 = a.direction();
    let d2 = b.direction();
    let denominator = d1.cross(&d2);

    if denominator.abs() < PARALLEL_EPSILON {
        return RawCrossing { t: 0.0, u: 0.0, degenerate: true };
    }

    let offset = b.a.sub(&a.a);
    RawCrossing {
        t: offset.cross(&d2) / denominator,
        u: offset.cross(&d1) / denominator,
        degenerate: false,
    }
}

/// Raw line-line progress along `a`, unclamped. A near-parallel pair sets
/// `early_exit` and leaves the returned progress meaningless; the flag is
/// only ever raised here, never cleared, so one degenerate pair taints the
/// whole call it belongs to.
pub fn intersection_progress(a: &Segment, b: &Segment, early_exit: &mut bool) -> f32 {
    let raw = solve(a, b);
    if raw.degenerate {
        *early_exit = true;
    }
    raw.t
}

/// Same arithmetic as [`intersection_progress`], but the degeneracy verdict
/// is published to the shared scratch slot owned by `lane` so every thread
/// of the group observes it after the next barrier.
pub fn intersection_progress_group(
    a: &Segment,
    b: &Segment,
    scratch: &GroupScratch,
    lane: usize,
) -> f32 {
    let raw = solve(a, b);
    if raw.degenerate {
        scratch.publish_degenerate(lane);
    }
    raw.t
}

/// One side-of-quad-1 against side-of-quad-2 check, range rules applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PairOutcome {
    /// Progress along the quad-1 side, valid only when `genuine`.
    pub progress: f32,
    pub genuine: bool,
    pub degenerate: bool,
}

/// Range conventions: strict (0, 1) on the quad-1 side, so a crossing that
/// lands exactly on a quad-1 corner is not recorded (the corner mask already
/// accounts for that vertex), and inclusive [0, 1] on the quad-2 side, so a
/// quad-2 corner touching a quad-1 side still counts as a crossing.
pub fn check_pair(side1: &Segment, side2: &Segment) -> PairOutcome {
    let raw = solve(side1, side2);
    if raw.degenerate {
        return PairOutcome { progress: 0.0, genuine: false, degenerate: true };
    }
    let genuine = raw.t > 0.0 && raw.t < 1.0 && raw.u >= 0.0 && raw.u <= 1.0;
    PairOutcome { progress: raw.t, genuine, degenerate: false }
}
