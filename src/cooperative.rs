// src/cooperative.rs

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Barrier;
use std::thread;

use crate::geometry::{inside_mask, CornerMask, Quad};
use crate::intersect::{check_pair, PairOutcome};
use crate::overlap::{finish, IntersectionOutput};

/// Number of threads cooperating on one quad pair.
pub const GROUP_SIZE: usize = 8;

const STATUS_GENUINE: u32 = 1;
const STATUS_DEGENERATE: u32 = 2;

#[derive(Default)]
struct ScratchSlot {
    progress: AtomicU32,
    status: AtomicU32,
}

/// 64-byte staging area shared by one group, one slot per thread. Progress
/// values travel as raw bits so nothing is lost between publish and drain.
#[repr(C, align(64))]
#[derive(Default)]
pub struct GroupScratch {
    slots: [ScratchSlot; GROUP_SIZE],
}

impl GroupScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn publish_outcome(&self, lane: usize, outcome: &PairOutcome) {
        let mut status = 0;
        if outcome.genuine {
            status |= STATUS_GENUINE;
        }
        if outcome.degenerate {
            status |= STATUS_DEGENERATE;
        }
        self.slots[lane]
            .progress
            .store(outcome.progress.to_bits(), Ordering::Relaxed);
        self.slots[lane].status.store(status, Ordering::Release);
    }

    /// Raises the degenerate bit in `lane`'s slot without touching the rest
    /// of the slot.
    pub fn publish_degenerate(&self, lane: usize) {
        self.slots[lane].status.fetch_or(STATUS_DEGENERATE, Ordering::Release);
    }

    pub(crate) fn outcome(&self, lane: usize) -> PairOutcome {
        let status = self.slots[lane].status.load(Ordering::Acquire);
        PairOutcome {
            progress: f32::from_bits(self.slots[lane].progress.load(Ordering::Relaxed)),
            genuine: status & STATUS_GENUINE != 0,
            degenerate: status & STATUS_DEGENERATE != 0,
        }
    }

    /// Whether any group member has published a degenerate side pair.
    pub fn early_exit(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.status.load(Ordering::Acquire) & STATUS_DEGENERATE != 0)
    }
}

/// Position of one thread inside the group, a 2x4 layout of two quadgroups
/// with four threads each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadCoords {
    pub thread_id: usize,
    pub quadgroup_id: usize,
    pub id_in_quadgroup: usize,
}

impl ThreadCoords {
    pub fn new(thread_id: usize) -> Self {
        debug_assert!(thread_id < GROUP_SIZE);
        ThreadCoords {
            thread_id,
            quadgroup_id: thread_id / 4,
            id_in_quadgroup: thread_id % 4,
        }
    }

    /// The side pair this thread checks in the given batch. The first batch
    /// covers quad-1 sides 0 and 1, the second covers sides 2 and 3, so
    /// draining lanes in order reproduces the serial scan order exactly.
    fn side_pair(&self, batch: usize) -> (usize, usize) {
        (2 * batch + self.quadgroup_id, self.id_in_quadgroup)
    }
}

/// Per-thread body of the cooperative scan: checks the one side pair owned
/// by `coords` in `batch` and publishes the outcome to the thread's scratch
/// slot. Exported so hosts with their own thread pool can embed the scan;
/// the driver below runs it on transient scoped threads.
pub fn thread_main(
    coords: ThreadCoords,
    batch: usize,
    quad1: &Quad,
    quad2: &Quad,
    scratch: &GroupScratch,
) {
    let (side1, side2) = coords.side_pair(batch);
    let outcome = check_pair(&quad1.side(side1), &quad2.side(side2));
    scratch.publish_outcome(coords.thread_id, &outcome);
}

fn drain_batch(scratch: &GroupScratch, batch: usize, out: &mut IntersectionOutput) {
    for lane in 0..GROUP_SIZE {
        let (side1, side2) = ThreadCoords::new(lane).side_pair(batch);
        let outcome = scratch.outcome(lane);
        if outcome.degenerate {
            out.degenerate_pair = true;
        }
        if outcome.genuine {
            out.record_crossing(side1, side2, outcome.progress);
        }
    }
}

/// Group-cooperative variant of [`crate::overlap::intersect_into`]. Eight
/// transient threads split the sixteen side pairs into two barrier-separated
/// batches; thread zero, played by the caller, drains the scratch between
/// barriers and finishes the assembly alone. The output is bit-identical to
/// the serial variant's.
pub fn intersect_cooperative_into(
    quad1: &Quad,
    quad2: &Quad,
    ones: CornerMask,
    out: &mut IntersectionOutput,
) {
    *out = IntersectionOutput::default();

    let scratch = GroupScratch::new();
    let barrier = Barrier::new(GROUP_SIZE);

    thread::scope(|scope| {
        for thread_id in 1..GROUP_SIZE {
            let scratch = &scratch;
            let barrier = &barrier;
            scope.spawn(move || {
                let coords = ThreadCoords::new(thread_id);
                thread_main(coords, 0, quad1, quad2, scratch);
                barrier.wait();
                // Thread zero reads every slot before the second batch may
                // overwrite them.
                barrier.wait();
                thread_main(coords, 1, quad1, quad2, scratch);
                barrier.wait();
            });
        }

        let coords = ThreadCoords::new(0);
        thread_main(coords, 0, quad1, quad2, &scratch);
        barrier.wait();
        drain_batch(&scratch, 0, out);
        barrier.wait();
        thread_main(coords, 1, quad1, quad2, &scratch);
        barrier.wait();
        drain_batch(&scratch, 1, out);
    });

    finish(quad1, quad2, ones, out);
}

/// Owned-result convenience over [`intersect_cooperative_into`], computing
/// the quad-1 mask itself.
pub fn intersect_cooperative(quad1: &Quad, quad2: &Quad) -> IntersectionOutput {
    let mut out = IntersectionOutput::default();
    intersect_cooperative_into(quad1, quad2, inside_mask(quad1, quad2), &mut out);
    out
}
