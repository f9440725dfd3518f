// src/classify.rs

use crate::geometry::CornerMask;

/// Verdict for one quad pair. The discriminant is what downstream buffers
/// store, so the numeric layout is part of the contract: families are grouped
/// by how many quad-2 corners lie inside quad-1 ("twos") and how many quad-1
/// corners lie inside quad-2 ("ones"), with positional sub-variants keyed to
/// where the corner runs sit.
#[repr(u16)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::NoUninit)]
pub enum TriangleIndexType {
    #[default]
    AllZeroes = 0,
    ZeroTwosTwoOnes0 = 1,
    ZeroTwosTwoOnes1 = 2,
    ZeroTwosTwoOnes2 = 3,
    ZeroTwosTwoOnes3 = 4,
    ZeroTwosTwoOnes4 = 5,
    ZeroTwosTwoOnes5 = 6,
    ZeroTwosFourOnes = 7,
    OneTwoZeroOnes0 = 8,
    OneTwoZeroOnes1 = 9,
    OneTwoZeroOnes2 = 10,
    OneTwoZeroOnes3 = 11,
    OneTwoTwoOnes1 = 12,
    OneTwoTwoOnes2 = 13,
    OneTwoTwoOnes3 = 14,
    OneTwoTwoOnes4 = 15,
    TwoTwosZeroOnesSingle0 = 16,
    TwoTwosZeroOnesSingle1 = 17,
    TwoTwosZeroOnesSingle2 = 18,
    TwoTwosZeroOnesSingle3 = 19,
    TwoTwosZeroOnesDouble0 = 20,
    TwoTwosZeroOnesDouble1 = 21,
    TwoTwosZeroOnesDouble2 = 22,
    TwoTwosZeroOnesDouble3 = 23,
    TwoTwosTwoOnes = 24,
    ThreeTwosZeroOnes0 = 25,
    ThreeTwosZeroOnes1 = 26,
    ThreeTwosZeroOnes2 = 27,
    FourTwosZeroOnes = 28,
}

impl TriangleIndexType {
    /// Output buffers start zeroed, so tag zero doubles as "never written".
    pub const NOT_INITIALIZED: Self = Self::AllZeroes;

    /// A quad-2 corner rides a quad-1 side without producing a clean crossing
    /// pair. The surviving slots form the same short fan the four-ones case
    /// uses, so the two configurations share a tag.
    pub const GRAZING_ONE_TWO: Self = Self::ZeroTwosFourOnes;
}

/// Where the genuine crossings landed, in quad-1 side order. `ids[s][k]` is
/// the quad-2 side that produced the k-th crossing recorded on quad-1 side
/// `s`, after the per-side sort by progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrossingRecord {
    pub per_side: [u8; 4],
    pub ids: [[u8; 2]; 4],
}

impl CrossingRecord {
    pub fn total(&self) -> u32 {
        self.per_side.iter().map(|&n| u32::from(n)).sum()
    }
}

/// Maps the two corner masks plus the crossing layout to a verdict. Exact
/// for every configuration in the case inventory; anything outside it traps
/// in debug builds and degrades to empty geometry in release builds.
pub fn classify(ones: CornerMask, twos: CornerMask, crossings: &CrossingRecord) -> TriangleIndexType {
    use TriangleIndexType::*;

    if twos.count() == 4 {
        // Checked first so the coincident-quad configuration, where every
        // corner of each quad sits on the other's boundary, lands here.
        return FourTwosZeroOnes;
    }
    if ones.count() == 4 {
        return ZeroTwosFourOnes;
    }

    match (ones.count(), twos.count()) {
        (0, 0) => {
            if crossings.total() == 0 {
                AllZeroes
            } else {
                unsupported(ones, twos, crossings)
            }
        }
        (2, 0) => {
            if ones.is_opposite_pair() {
                if ones.contains(0) {
                    ZeroTwosTwoOnes4
                } else {
                    ZeroTwosTwoOnes5
                }
            } else {
                match ones.run_start() {
                    Some(0) => ZeroTwosTwoOnes0,
                    Some(1) => ZeroTwosTwoOnes1,
                    Some(2) => ZeroTwosTwoOnes2,
                    Some(3) => ZeroTwosTwoOnes3,
                    _ => unsupported(ones, twos, crossings),
                }
            }
        }
        (0, 1) => match twos.run_start() {
            Some(0) => OneTwoZeroOnes0,
            Some(1) => OneTwoZeroOnes1,
            Some(2) => OneTwoZeroOnes2,
            Some(3) => OneTwoZeroOnes3,
            _ => unsupported(ones, twos, crossings),
        },
        (2, 1) => {
            if crossings.total() < 2 {
                return TriangleIndexType::GRAZING_ONE_TWO;
            }
            if ones.is_opposite_pair() {
                return unsupported(ones, twos, crossings);
            }
            match ones.run_start() {
                Some(0) => OneTwoTwoOnes1,
                Some(1) => OneTwoTwoOnes2,
                Some(2) => OneTwoTwoOnes3,
                Some(3) => OneTwoTwoOnes4,
                _ => unsupported(ones, twos, crossings),
            }
        }
        (0, 2) => {
            if twos.is_opposite_pair() {
                return unsupported(ones, twos, crossings);
            }
            match twos.run_start() {
                Some(run_start) if crossings.total() >= 4 => {
                    pass_through_variant(run_start, ones, twos, crossings)
                }
                Some(0) => TwoTwosZeroOnesSingle0,
                Some(1) => TwoTwosZeroOnesSingle1,
                Some(2) => TwoTwosZeroOnesSingle2,
                Some(3) => TwoTwosZeroOnesSingle3,
                _ => unsupported(ones, twos, crossings),
            }
        }
        (2, 2) => {
            if crossings.total() < 2 {
                // Flush edges: a corner pair of each quad rides the other's
                // boundary with no crossing surviving the strict range. The
                // four colinear slots take the same short fan the grazing
                // alias uses, not the hexagon table.
                return ZeroTwosFourOnes;
            }
            TwoTwosTwoOnes
        }
        (0, 3) => match twos.run_start() {
            Some(0) => ThreeTwosZeroOnes0,
            Some(3) => ThreeTwosZeroOnes1,
            Some(_) => ThreeTwosZeroOnes2,
            None => unsupported(ones, twos, crossings),
        },
        _ => unsupported(ones, twos, crossings),
    }
}

/// Quad-2 pokes clean through quad-1: the inside corner pair plus a crossing
/// pair on each of two opposite quad-1 sides. The sub-variant records which
/// opposite pair was crossed and which of the two sides hands the boundary
/// over to the inside corner chain.
fn pass_through_variant(
    run_start: usize,
    ones: CornerMask,
    twos: CornerMask,
    crossings: &CrossingRecord,
) -> TriangleIndexType {
    use TriangleIndexType::*;

    let crossed_even = crossings.per_side[0] == 2 && crossings.per_side[2] == 2;
    let crossed_odd = crossings.per_side[1] == 2 && crossings.per_side[3] == 2;
    if crossed_even == crossed_odd {
        return unsupported(ones, twos, crossings);
    }
    let (lower, upper) = if crossed_even { (0, 2) } else { (1, 3) };

    // The handover crossing carries the id of the quad-2 side that arrives
    // at the chain's first corner, and sits second on its quad-1 side.
    let entry_id = ((run_start + 3) % 4) as u8;
    debug_assert!(
        crossings.ids[lower][1] == entry_id || crossings.ids[upper][1] == entry_id,
        "pass-through layout without a handover crossing: {:?}",
        crossings
    );
    let chain_after_upper = crossings.ids[upper][1] == entry_id;

    match (crossed_odd, chain_after_upper) {
        (false, false) => TwoTwosZeroOnesDouble0,
        (false, true) => TwoTwosZeroOnesDouble1,
        (true, false) => TwoTwosZeroOnesDouble2,
        (true, true) => TwoTwosZeroOnesDouble3,
    }
}

#[cold]
fn unsupported(ones: CornerMask, twos: CornerMask, crossings: &CrossingRecord) -> TriangleIndexType {
    debug_assert!(
        false,
        "overlap outside the case inventory: ones={:04b} twos={:04b} per_side={:?}",
        ones.bits(),
        twos.bits(),
        crossings.per_side
    );
    log::warn!(
        "unclassifiable overlap (ones={:04b} twos={:04b} crossings={:?}); emitting empty geometry",
        ones.bits(),
        twos.bits(),
        crossings.per_side
    );
    TriangleIndexType::AllZeroes
}
