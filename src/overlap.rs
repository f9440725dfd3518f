// src/overlap.rs

use crate::classify::{classify, CrossingRecord, TriangleIndexType};
use crate::geometry::{inside_mask, CornerMask, Point2, Quad, MAX_PERIMETER_VERTICES};
use crate::intersect::check_pair;
use crate::tables::triangle_indices;

/// Buffer sizing summary for one overlap: how many perimeter vertices were
/// produced, how many triangles of the case table apply, and how many outline
/// segments close the perimeter loop.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GeometryCounts {
    pub vertices: u8,
    pub triangles: u8,
    pub outline_segments: u8,
}

/// Everything one quad pair produces. Crossing records stay in quad-1 side
/// order so the classifier can read the layout positionally; the perimeter
/// holds corners and crossings in assembly order, appended quad-2 corners
/// last.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntersectionOutput {
    /// Crossing progress along each quad-1 side, ascending per side.
    pub progresses: [[f32; 2]; 4],
    /// Quad-2 side that produced the matching crossing.
    pub ids: [[u8; 2]; 4],
    pub crossings_per_side: [u8; 4],
    pub perimeter: [Point2; MAX_PERIMETER_VERTICES],
    pub counts: GeometryCounts,
    /// Index of the last written perimeter slot, zero when nothing was.
    pub max_perimeter_index: u16,
    pub case: TriangleIndexType,
    /// A near-parallel side pair was met somewhere in the scan. The results
    /// are still complete; callers wanting exact output should fall back to
    /// a general clipper for this pair.
    pub degenerate_pair: bool,
}

impl IntersectionOutput {
    /// The classified triangles, resolved to perimeter coordinates.
    pub fn triangles(&self) -> impl Iterator<Item = [Point2; 3]> + '_ {
        triangle_indices(self.case)
            .iter()
            .take(self.counts.triangles as usize)
            .map(move |triple| {
                [
                    self.perimeter[triple[0] as usize],
                    self.perimeter[triple[1] as usize],
                    self.perimeter[triple[2] as usize],
                ]
            })
    }

    /// Total overlap area covered by the classified triangles.
    pub fn overlap_area(&self) -> f32 {
        self.triangles()
            .map(|[a, b, c]| b.sub(&a).cross(&c.sub(&a)) * 0.5)
            .sum()
    }

    pub(crate) fn record_crossing(&mut self, side1: usize, side2: usize, progress: f32) {
        match self.crossings_per_side[side1] {
            0 => {
                self.progresses[side1][0] = progress;
                self.ids[side1][0] = side2 as u8;
                self.crossings_per_side[side1] = 1;
            }
            1 => {
                if progress < self.progresses[side1][0] {
                    self.progresses[side1][1] = self.progresses[side1][0];
                    self.ids[side1][1] = self.ids[side1][0];
                    self.progresses[side1][0] = progress;
                    self.ids[side1][0] = side2 as u8;
                } else {
                    self.progresses[side1][1] = progress;
                    self.ids[side1][1] = side2 as u8;
                }
                self.crossings_per_side[side1] = 2;
            }
            _ => {
                // A side of a convex quad meets another convex boundary at
                // most twice unless the contact is razor thin.
                debug_assert!(false, "third crossing on side {}", side1);
                log::warn!("dropping surplus crossing on quad-1 side {}", side1);
            }
        }
    }

    fn crossing_record(&self) -> CrossingRecord {
        CrossingRecord { per_side: self.crossings_per_side, ids: self.ids }
    }
}

fn push_slot(out: &mut IntersectionOutput, cursor: &mut usize, point: Point2) {
    if *cursor < MAX_PERIMETER_VERTICES {
        out.perimeter[*cursor] = point;
        *cursor += 1;
    } else {
        debug_assert!(false, "perimeter overflow at {:?}", point);
        log::warn!("dropping perimeter vertex {:?}", point);
    }
}

/// Serial overlap resolution for one counter-clockwise quad pair. `ones`
/// says which quad-1 corners lie inside quad-2; hosts that track the mask
/// already pass it straight through, everyone else gets it from
/// [`inside_mask`].
///
/// The scan order is fixed, quad-1 sides outer and quad-2 sides inner, so
/// the recorded layout is deterministic and matches what the cooperative
/// variant produces for the same pair.
pub fn intersect_into(quad1: &Quad, quad2: &Quad, ones: CornerMask, out: &mut IntersectionOutput) {
    *out = IntersectionOutput::default();

    for side1 in 0..4 {
        let s1 = quad1.side(side1);
        for side2 in 0..4 {
            let outcome = check_pair(&s1, &quad2.side(side2));
            if outcome.degenerate {
                out.degenerate_pair = true;
            }
            if outcome.genuine {
                out.record_crossing(side1, side2, outcome.progress);
            }
        }
    }

    finish(quad1, quad2, ones, out);
}

/// Assembly, classification, and count derivation over a filled crossing
/// record. Shared verbatim by both scan variants so their outputs agree to
/// the bit. The quad-2 mask is never part of the calling convention and is
/// derived here with the same boundary-tolerant test hosts use for `ones`.
pub(crate) fn finish(quad1: &Quad, quad2: &Quad, ones: CornerMask, out: &mut IntersectionOutput) {
    let twos = inside_mask(quad2, quad1);

    let mut cursor = 0;
    for side in 0..4 {
        if ones.contains(side) {
            push_slot(out, &mut cursor, quad1.corners[side]);
        }
        for k in 0..out.crossings_per_side[side] as usize {
            let point = quad1.side(side).point_at(out.progresses[side][k]);
            push_slot(out, &mut cursor, point);
        }
    }
    if let Some(start) = twos.run_start() {
        for step in 0..4 {
            let corner = (start + step) % 4;
            if twos.contains(corner) {
                push_slot(out, &mut cursor, quad2.corners[corner]);
            }
        }
    }

    out.case = classify(ones, twos, &out.crossing_record());

    let table = triangle_indices(out.case);
    let mut triangles = 0;
    for triple in table {
        if triple.iter().all(|&slot| (slot as usize) < cursor) {
            triangles += 1;
        } else {
            break;
        }
    }
    debug_assert_eq!(
        triangles,
        table.len().min(cursor.saturating_sub(2)),
        "case {:?} does not fit its {} perimeter slots",
        out.case,
        cursor
    );

    out.counts = GeometryCounts {
        vertices: cursor as u8,
        triangles: triangles as u8,
        outline_segments: if cursor >= 3 { cursor as u8 } else { 0 },
    };
    out.max_perimeter_index = cursor.saturating_sub(1) as u16;

    log::trace!(
        "overlap classified as {:?} with {} perimeter vertices",
        out.case,
        cursor
    );
}

/// Owned-result convenience over [`intersect_into`], computing the quad-1
/// mask itself.
pub fn intersect(quad1: &Quad, quad2: &Quad) -> IntersectionOutput {
    let mut out = IntersectionOutput::default();
    intersect_into(quad1, quad2, inside_mask(quad1, quad2), &mut out);
    out
}
