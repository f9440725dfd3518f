// src/tables.rs

use crate::classify::TriangleIndexType;

/// One fan or strip triangle, as indices into the perimeter slot array.
pub type TriangleSlots = [u8; 3];

// Each table triangulates the canonical perimeter layout of its case and is
// prefix-ordered: when fewer crossings were recorded than the full layout
// carries, the leading triples still tile the smaller polygon on their own.
// Slot numbering follows the assembly walk, corners and sorted crossings per
// quad-1 side first, inside quad-2 corners appended after.

const EMPTY: &[TriangleSlots] = &[];

// Two adjacent quad-1 corners survive. Four slots for the plain clip, six
// when the clipper also shaves a sliver off the far side.
const TWO_ONES_RUN0: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];
const TWO_ONES_RUN1: &[TriangleSlots] = &[[1, 2, 3], [1, 3, 0], [3, 4, 5], [3, 5, 0]];
const TWO_ONES_RUN2: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [3, 4, 5], [3, 5, 0]];
const TWO_ONES_RUN3: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];

// Two opposite quad-1 corners survive: always a six-slot band.
const TWO_ONES_OPPOSITE: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];

// Whole-quad fan. Also serves grazing contacts, whose shorter slot runs use
// the leading prefix.
const FOUR_CORNER_FAN: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3]];

// A single quad-2 corner pokes through one quad-1 side.
const POKE_TRIANGLE: &[TriangleSlots] = &[[0, 1, 2]];

// A quad-2 corner inside plus an adjacent quad-1 corner pair. The corner
// chain splices between the two crossings, so the cycle is not in slot
// order for every run position.
const CHAIN_RUN0: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 4], [0, 4, 3]];
const CHAIN_RUN1: &[TriangleSlots] = &[[1, 2, 3], [1, 3, 4], [1, 4, 0]];
const CHAIN_RUN2: &[TriangleSlots] = &[[1, 2, 3], [1, 3, 4], [1, 4, 0]];
const CHAIN_RUN3: &[TriangleSlots] = &[[3, 0, 1], [3, 1, 4], [3, 4, 2]];

// Adjacent quad-2 pair inside, both crossings on one quad-1 side.
const TUCKED_PAIR: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3]];

// Adjacent quad-2 pair inside, quad-2 passing clean through. Variant A has
// the corner chain spliced after the lower crossed side's pair, variant B
// after the upper one's.
const PASS_THROUGH_A: &[TriangleSlots] = &[[0, 1, 4], [0, 4, 5], [0, 5, 2], [0, 2, 3]];
const PASS_THROUGH_B: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5]];

// Hexagon with one corner pair from each quad.
const MIXED_HEXAGON: &[TriangleSlots] = &[[1, 2, 3], [1, 3, 4], [1, 4, 5], [1, 5, 0]];

// Three quad-2 corners inside, one poking out.
const EMBEDDED_TRIPLE: &[TriangleSlots] = &[[0, 1, 2], [0, 2, 3], [0, 3, 4]];

/// Triangulation recipe for a classified overlap, in perimeter slot indices.
pub fn triangle_indices(case: TriangleIndexType) -> &'static [TriangleSlots] {
    use TriangleIndexType::*;

    match case {
        AllZeroes => EMPTY,
        ZeroTwosTwoOnes0 => TWO_ONES_RUN0,
        ZeroTwosTwoOnes1 => TWO_ONES_RUN1,
        ZeroTwosTwoOnes2 => TWO_ONES_RUN2,
        ZeroTwosTwoOnes3 => TWO_ONES_RUN3,
        ZeroTwosTwoOnes4 | ZeroTwosTwoOnes5 => TWO_ONES_OPPOSITE,
        ZeroTwosFourOnes => FOUR_CORNER_FAN,
        OneTwoZeroOnes0 | OneTwoZeroOnes1 | OneTwoZeroOnes2 | OneTwoZeroOnes3 => POKE_TRIANGLE,
        OneTwoTwoOnes1 => CHAIN_RUN0,
        OneTwoTwoOnes2 => CHAIN_RUN1,
        OneTwoTwoOnes3 => CHAIN_RUN2,
        OneTwoTwoOnes4 => CHAIN_RUN3,
        TwoTwosZeroOnesSingle0
        | TwoTwosZeroOnesSingle1
        | TwoTwosZeroOnesSingle2
        | TwoTwosZeroOnesSingle3 => TUCKED_PAIR,
        TwoTwosZeroOnesDouble0 | TwoTwosZeroOnesDouble2 => PASS_THROUGH_A,
        TwoTwosZeroOnesDouble1 | TwoTwosZeroOnesDouble3 => PASS_THROUGH_B,
        TwoTwosTwoOnes => MIXED_HEXAGON,
        ThreeTwosZeroOnes0 | ThreeTwosZeroOnes1 | ThreeTwosZeroOnes2 => EMBEDDED_TRIPLE,
        FourTwosZeroOnes => FOUR_CORNER_FAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MAX_PERIMETER_VERTICES;

    const ALL_CASES: [TriangleIndexType; 29] = [
        TriangleIndexType::AllZeroes,
        TriangleIndexType::ZeroTwosTwoOnes0,
        TriangleIndexType::ZeroTwosTwoOnes1,
        TriangleIndexType::ZeroTwosTwoOnes2,
        TriangleIndexType::ZeroTwosTwoOnes3,
        TriangleIndexType::ZeroTwosTwoOnes4,
        TriangleIndexType::ZeroTwosTwoOnes5,
        TriangleIndexType::ZeroTwosFourOnes,
        TriangleIndexType::OneTwoZeroOnes0,
        TriangleIndexType::OneTwoZeroOnes1,
        TriangleIndexType::OneTwoZeroOnes2,
        TriangleIndexType::OneTwoZeroOnes3,
        TriangleIndexType::OneTwoTwoOnes1,
        TriangleIndexType::OneTwoTwoOnes2,
        TriangleIndexType::OneTwoTwoOnes3,
        TriangleIndexType::OneTwoTwoOnes4,
        TriangleIndexType::TwoTwosZeroOnesSingle0,
        TriangleIndexType::TwoTwosZeroOnesSingle1,
        TriangleIndexType::TwoTwosZeroOnesSingle2,
        TriangleIndexType::TwoTwosZeroOnesSingle3,
        TriangleIndexType::TwoTwosZeroOnesDouble0,
        TriangleIndexType::TwoTwosZeroOnesDouble1,
        TriangleIndexType::TwoTwosZeroOnesDouble2,
        TriangleIndexType::TwoTwosZeroOnesDouble3,
        TriangleIndexType::TwoTwosTwoOnes,
        TriangleIndexType::ThreeTwosZeroOnes0,
        TriangleIndexType::ThreeTwosZeroOnes1,
        TriangleIndexType::ThreeTwosZeroOnes2,
        TriangleIndexType::FourTwosZeroOnes,
    ];

    #[test]
    fn slot_indices_stay_within_the_perimeter_buffer() {
        for case in ALL_CASES {
            for triple in triangle_indices(case) {
                for &slot in triple {
                    assert!(
                        (slot as usize) < MAX_PERIMETER_VERTICES,
                        "{:?} references slot {}",
                        case,
                        slot
                    );
                }
            }
        }
    }

    #[test]
    fn triples_use_three_distinct_slots() {
        for case in ALL_CASES {
            for triple in triangle_indices(case) {
                assert!(
                    triple[0] != triple[1] && triple[1] != triple[2] && triple[0] != triple[2],
                    "{:?} holds a degenerate triple {:?}",
                    case,
                    triple
                );
            }
        }
    }

    #[test]
    fn discriminants_cover_the_contract_range() {
        for (position, case) in ALL_CASES.iter().enumerate() {
            assert_eq!(*case as u16, position as u16);
        }
    }
}
