//! Identification of corner cubies on a facelet configuration.
//!
//! Every corner cubie owns three stickers that always travel together. We
//! list each corner's home slots clockwise, as seen from outside the cube,
//! starting with its up or down sticker. Because all corners are listed with
//! the same handedness, a turn maps each slot triple onto another one up to a
//! cyclic rotation, and the rotation offsets of all eight corners always sum
//! to a multiple of three.

use crate::facelets::{CubeState, SOLVED_STATES};

pub const CORNERS: usize = 8;

/// The three facelet slots of one corner position.
pub type SlotTriple = [u8; 3];

/// Home slots of the corners, in the order UBL UBR UFL UFR DFL DFR DBL DBR.
pub const CORNER_SLOTS: [SlotTriple; CORNERS] = [
    [0, 4, 11],
    [1, 10, 9],
    [12, 6, 5],
    [13, 8, 7],
    [2, 17, 18],
    [3, 19, 20],
    [14, 23, 16],
    [15, 21, 22],
];

/// The corner that pins the spatial orientation of the cube: the solved
/// reference of a configuration is the one that agrees with it on this
/// corner.
pub const PIVOT: usize = 0;

fn colors_at(state: &CubeState, slots: &SlotTriple) -> [u8; 3] {
    slots.map(|slot| state.colors()[usize::from(slot)])
}

/// Find the solved orientation whose colors on `pivot` are exactly those of
/// `current`, in the same order. Returns `None` only for configurations that
/// cannot be reached by turning a solved cube.
#[must_use]
pub fn find_target(pivot: &SlotTriple, current: &CubeState) -> Option<&'static CubeState> {
    let expected = colors_at(current, pivot);
    SOLVED_STATES
        .iter()
        .find(|solved| colors_at(solved, pivot) == expected)
}

/// If `observed` is `reference` rotated left by `r` places, return `r`. A
/// `None` means the two triples are different cubies.
#[must_use]
pub fn twist_between(observed: [u8; 3], reference: [u8; 3]) -> Option<u8> {
    (0..3_u8).find(|&r| {
        let r = usize::from(r);
        (0..3).all(|j| observed[j] == reference[(j + r) % 3])
    })
}

/// Locates corner cubies of `current` relative to a solved `target`. Targets
/// are always members of [`SOLVED_STATES`], so they outlive the indexer.
#[derive(Clone, Copy, Debug)]
pub struct CubieIndexer<'a> {
    current: &'a CubeState,
    target: &'static CubeState,
}

impl<'a> CubieIndexer<'a> {
    #[must_use]
    pub fn new(current: &'a CubeState, target: &'static CubeState) -> Self {
        Self { current, target }
    }

    /// Pair `current` with the solved orientation that agrees with it on the
    /// pivot corner.
    #[must_use]
    pub fn pivoted(current: &'a CubeState) -> Option<Self> {
        find_target(&CORNER_SLOTS[PIVOT], current).map(|target| Self::new(current, target))
    }

    #[must_use]
    pub fn target(&self) -> &'static CubeState {
        self.target
    }

    /// The cubie that belongs in `slot`: the index of the corner position
    /// whose current colors are, up to a twist, the colors the target has at
    /// `slot`.
    #[must_use]
    pub fn cubie_index(&self, slot: &SlotTriple) -> Option<usize> {
        let expected = colors_at(self.target, slot);
        CORNER_SLOTS
            .iter()
            .position(|home| twist_between(colors_at(self.current, home), expected).is_some())
    }

    /// The twist of the cubie that belongs in `slot`, which currently sits at
    /// the corner position `identity`.
    #[must_use]
    pub fn cubie_orientation(&self, identity: usize, slot: &SlotTriple) -> Option<u8> {
        twist_between(
            colors_at(self.current, &CORNER_SLOTS[identity]),
            colors_at(self.target, slot),
        )
    }
}
