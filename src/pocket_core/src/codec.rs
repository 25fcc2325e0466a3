//! A bijection between pocket cube configurations, taken up to the spatial
//! orientation of the whole cube, and 23 bit integers.
//!
//! A configuration is first compared to the solved orientation that agrees
//! with it on the pivot corner. Relative to that target the pivot cubie is
//! always home and untwisted, so only seven cubies carry information: their
//! arrangement is one of 7! = 5040 permutations and their twists one of
//! 3^6 = 729 combinations, because the twists sum to a multiple of three.
//! The code is `(permutation rank << 10) | orientation rank`.

use crate::{
    cubie::{CORNER_SLOTS, CORNERS, CubieIndexer, PIVOT},
    facelets::{CubeState, FACELETS},
    math::{factorial, lehmer, n_ary},
    moves::MoveInstance,
};
use std::fmt::Display;
use thiserror::Error;

/// Number of bits that must be shifted to get the permutation.
pub const PERMUTATION_OFFSET: u32 = 10;
/// Mask the bits of a code that represent the orientation.
pub const ORIENTATION_MASK: u32 = (1 << PERMUTATION_OFFSET) - 1;
/// Arrangements of the seven cubies other than the pivot.
pub const PERMUTATION_COUNT: u32 = factorial(CORNERS - 1);
/// Twists of the six cubies whose twist is stored.
pub const ORIENTATION_COUNT: u32 = 3_u32.pow(CORNERS as u32 - 2);
/// Number of configurations up to spatial orientation, 3,674,160.
pub const STATE_COUNT: usize = PERMUTATION_COUNT as usize * ORIENTATION_COUNT as usize;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CodecError {
    #[error("No solved orientation matches the pivot corner; the configuration is not reachable")]
    NoTarget,
    #[error("The stickers at corner slot {slot} do not belong to any cubie")]
    UnknownCubie { slot: usize },
    #[error("Cubie {identity} appears at more than one corner slot")]
    DuplicateCubie { identity: usize },
    #[error("The corner twists sum to {0}, which is not a multiple of three")]
    TwistedCorner(u32),
    #[error("Permutation rank {0} is not below {PERMUTATION_COUNT}")]
    PermutationOutOfRange(u32),
    #[error("Orientation rank {0} is not below {ORIENTATION_COUNT}")]
    OrientationOutOfRange(u32),
    #[error("Dense index {0} is not below {STATE_COUNT}")]
    DenseIndexOutOfRange(usize),
    #[error("{0} moves the pivot corner")]
    PivotMoved(MoveInstance),
}

/// An encoded configuration. Every value of this type is a valid code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateCode(u32);

impl StateCode {
    /// The code of every solved configuration.
    pub const SOLVED: Self = Self(0);

    /// Pack a permutation rank and an orientation rank.
    ///
    /// # Errors
    ///
    /// If either rank is out of its range.
    pub fn new(permutation: u32, orientation: u32) -> Result<Self, CodecError> {
        if permutation >= PERMUTATION_COUNT {
            return Err(CodecError::PermutationOutOfRange(permutation));
        }
        if orientation >= ORIENTATION_COUNT {
            return Err(CodecError::OrientationOutOfRange(orientation));
        }
        Ok(Self((permutation << PERMUTATION_OFFSET) | orientation))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn permutation(self) -> u32 {
        self.0 >> PERMUTATION_OFFSET
    }

    #[must_use]
    pub fn orientation(self) -> u32 {
        self.0 & ORIENTATION_MASK
    }

    /// The code without the unused orientation values, in `0..STATE_COUNT`.
    #[must_use]
    pub fn dense_index(self) -> usize {
        self.permutation() as usize * ORIENTATION_COUNT as usize + self.orientation() as usize
    }

    /// # Errors
    ///
    /// If `index` is not below [`STATE_COUNT`].
    pub fn from_dense_index(index: usize) -> Result<Self, CodecError> {
        if index >= STATE_COUNT {
            return Err(CodecError::DenseIndexOutOfRange(index));
        }
        let orientation_count = ORIENTATION_COUNT as usize;
        Self::new(
            (index / orientation_count) as u32,
            (index % orientation_count) as u32,
        )
    }

    /// The code as three big-endian bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 3] {
        let [_, high, mid, low] = self.0.to_be_bytes();
        [high, mid, low]
    }

    /// # Errors
    ///
    /// If the bytes do not hold a valid code.
    pub fn from_bytes([high, mid, low]: [u8; 3]) -> Result<Self, CodecError> {
        Self::try_from(u32::from_be_bytes([0, high, mid, low]))
    }
}

impl TryFrom<u32> for StateCode {
    type Error = CodecError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::new(code >> PERMUTATION_OFFSET, code & ORIENTATION_MASK)
    }
}

impl From<StateCode> for u32 {
    fn from(code: StateCode) -> Self {
        code.0
    }
}

impl Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configuration in cubie form, relative to a solved target.
///
/// For every corner slot `i`, `identities[i]` is the corner slot currently
/// holding the cubie that belongs in `i`, and `twists[i]` is how far that
/// cubie is rotated. The pivot cubie is always home and untwisted, and the
/// twists always sum to a multiple of three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cubies {
    identities: [u8; CORNERS],
    twists: [u8; CORNERS],
}

impl Cubies {
    pub const SOLVED: Self = Self {
        identities: [0, 1, 2, 3, 4, 5, 6, 7],
        twists: [0; CORNERS],
    };

    /// Read the cubies of `state` relative to the solved orientation that
    /// agrees with it on the pivot corner, and return that target as well.
    ///
    /// # Errors
    ///
    /// If `state` cannot be reached by turning a solved cube.
    pub fn from_state(state: &CubeState) -> Result<(Self, &'static CubeState), CodecError> {
        let indexer = CubieIndexer::pivoted(state).ok_or(CodecError::NoTarget)?;
        let mut identities = [0; CORNERS];
        let mut twists = [0; CORNERS];
        let mut seen = [false; CORNERS];
        for (i, slot) in CORNER_SLOTS.iter().enumerate() {
            let identity = indexer
                .cubie_index(slot)
                .ok_or(CodecError::UnknownCubie { slot: i })?;
            if std::mem::replace(&mut seen[identity], true) {
                return Err(CodecError::DuplicateCubie { identity });
            }
            // A matching identity guarantees a twist exists
            twists[i] = indexer
                .cubie_orientation(identity, slot)
                .ok_or(CodecError::UnknownCubie { slot: i })?;
            identities[i] = identity as u8;
        }
        let twist_sum = twists.iter().map(|&twist| u32::from(twist)).sum::<u32>();
        if twist_sum % 3 != 0 {
            return Err(CodecError::TwistedCorner(twist_sum));
        }
        debug_assert_eq!((identities[PIVOT], twists[PIVOT]), (PIVOT as u8, 0));
        Ok((Self { identities, twists }, indexer.target()))
    }

    /// Unpack a code. The twist of the pivot is zero and the twist of the
    /// cubie after it is whatever makes the sum a multiple of three.
    #[must_use]
    pub fn from_code(code: StateCode) -> Self {
        // Codes are validated on construction, so neither unrank can fail
        let identities = lehmer::unrank::<CORNERS>(code.permutation()).unwrap_or_default();
        let stored = n_ary::unrank::<{ CORNERS - 2 }>(code.orientation(), 3).unwrap_or_default();
        let stored_sum = stored.iter().map(|&twist| u32::from(twist)).sum::<u32>();
        let mut twists = [0; CORNERS];
        twists[1] = ((3 - stored_sum % 3) % 3) as u8;
        twists[2..].copy_from_slice(&stored);
        Self { identities, twists }
    }

    #[must_use]
    pub fn code(&self) -> StateCode {
        // The pivot is home, so the rank stays below 7!
        let permutation = lehmer::rank(&self.identities);
        let orientation = n_ary::rank(&self.twists[2..], 3);
        StateCode((permutation << PERMUTATION_OFFSET) | orientation)
    }

    #[must_use]
    pub fn identities(&self) -> &[u8; CORNERS] {
        &self.identities
    }

    #[must_use]
    pub fn twists(&self) -> &[u8; CORNERS] {
        &self.twists
    }

    /// Paint the cubies onto a facelet array using the colors of `target`.
    #[must_use]
    pub fn to_state(&self, target: &CubeState) -> CubeState {
        let target = target.colors();
        let mut colors = [0; FACELETS];
        for (i, home) in CORNER_SLOTS.iter().enumerate() {
            let current = &CORNER_SLOTS[usize::from(self.identities[i])];
            let twist = usize::from(self.twists[i]);
            for (j, &slot) in current.iter().enumerate() {
                colors[usize::from(slot)] = target[usize::from(home[(j + twist) % 3])];
            }
        }
        CubeState::from_colors_unchecked(colors)
    }

    /// Apply a move that keeps the pivot corner in place.
    #[must_use]
    pub fn apply(&self, move_: &CornerMove) -> Self {
        let mut result = *self;
        for i in 0..CORNERS {
            let position = usize::from(self.identities[i]);
            result.identities[i] = move_.destinations[position];
            result.twists[i] = (self.twists[i] + move_.twist_deltas[position]) % 3;
        }
        result
    }
}

/// The effect of a move on cubie form. Only moves that leave the pivot corner
/// alone have one, because moving the pivot changes the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerMove {
    move_: MoveInstance,
    destinations: [u8; CORNERS],
    twist_deltas: [u8; CORNERS],
}

impl CornerMove {
    /// Derive the effect of `move_` from its facelet permutation.
    ///
    /// # Errors
    ///
    /// If `move_` turns a face containing the pivot corner.
    pub fn new(move_: MoveInstance) -> Result<Self, CodecError> {
        let mut state = CubeState::INITIAL;
        state.apply_move(move_);
        let (cubies, target) = Cubies::from_state(&state)?;
        if *target != CubeState::INITIAL {
            return Err(CodecError::PivotMoved(move_));
        }
        // Starting from solved, the cubie that belongs in slot `i` is the one
        // that was in slot `i` before the move
        Ok(Self {
            move_,
            destinations: cubies.identities,
            twist_deltas: cubies.twists,
        })
    }

    #[must_use]
    pub fn move_instance(&self) -> MoveInstance {
        self.move_
    }
}

/// Encode a configuration, relative to the solved orientation that agrees
/// with it on the pivot corner.
///
/// # Errors
///
/// If `state` cannot be reached by turning a solved cube.
pub fn encode(state: &CubeState) -> Result<StateCode, CodecError> {
    Cubies::from_state(state).map(|(cubies, _)| cubies.code())
}

/// Decode a raw code, painting it with the colors of `target`.
///
/// The code is the packed `(permutation << 10) | orientation` form, which
/// spans 23 bits: a single `R` already encodes to 4,553,901. Validity is
/// checked per field: the permutation must be below 5040 and the orientation
/// below 729, so 3,674,160 is a valid code. The contiguous range
/// `0..STATE_COUNT` is that of [`StateCode::dense_index`].
///
/// # Errors
///
/// If the permutation or orientation field is out of range.
pub fn decode(code: u32, target: &CubeState) -> Result<CubeState, CodecError> {
    StateCode::try_from(code).map(|code| Cubies::from_code(code).to_state(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cube_move,
        facelets::SOLVED_STATES,
        moves::{ALL_MOVES, Direction, Face},
    };

    #[test]
    fn test_constants() {
        assert_eq!(PERMUTATION_COUNT, 5040);
        assert_eq!(ORIENTATION_COUNT, 729);
        assert_eq!(STATE_COUNT, 3_674_160);
        let largest = StateCode::new(PERMUTATION_COUNT - 1, ORIENTATION_COUNT - 1).unwrap();
        assert!(largest.get() < 1 << 23);
    }

    #[test]
    fn test_solved_encode_to_zero() {
        for solved in &SOLVED_STATES {
            assert_eq!(encode(solved), Ok(StateCode::SOLVED));
            let (cubies, target) = Cubies::from_state(solved).unwrap();
            assert_eq!(cubies, Cubies::SOLVED);
            assert_eq!(target, solved);
        }
    }

    #[test]
    fn test_roundtrip_random_walks() {
        let mut rng = fastrand::Rng::with_seed(23);
        for _ in 0..500 {
            let mut cube = SOLVED_STATES[rng.usize(..SOLVED_STATES.len())].clone();
            for _ in 0..rng.usize(0..30) {
                cube.apply_move(ALL_MOVES[rng.usize(..ALL_MOVES.len())]);
            }
            let (cubies, target) = Cubies::from_state(&cube).unwrap();
            let code = encode(&cube).unwrap();
            assert_eq!(cubies.code(), code);
            assert_eq!(Cubies::from_code(code), cubies);
            assert_eq!(decode(code.get(), target), Ok(cube));
        }
    }

    #[test]
    fn test_decoded_twists_sum_to_zero() {
        for orientation in 0..ORIENTATION_COUNT {
            let code = StateCode::new(orientation * 7 % PERMUTATION_COUNT, orientation).unwrap();
            let cubies = Cubies::from_code(code);
            assert_eq!(cubies.twists().iter().map(|&t| u32::from(t)).sum::<u32>() % 3, 0);
            assert_eq!(cubies.twists()[PIVOT], 0);
            assert_eq!(cubies.identities()[PIVOT], 0);
            assert_eq!(cubies.code(), code);
        }
    }

    #[test]
    fn test_decode_validates() {
        let target = &CubeState::INITIAL;
        assert_eq!(
            decode(5040 << PERMUTATION_OFFSET, target),
            Err(CodecError::PermutationOutOfRange(5040))
        );
        assert_eq!(decode(729, target), Err(CodecError::OrientationOutOfRange(729)));
        assert_eq!(
            decode(u32::MAX, target),
            Err(CodecError::PermutationOutOfRange(u32::MAX >> PERMUTATION_OFFSET))
        );
        assert_eq!(decode(0, target), Ok(CubeState::INITIAL));

        // Packed codes are not contiguous, so values past the dense range
        // are still valid when both fields are
        let packed = u32::try_from(STATE_COUNT).unwrap();
        let code = StateCode::try_from(packed).unwrap();
        assert_eq!((code.permutation(), code.orientation()), (3588, 48));
        let decoded = decode(packed, target).unwrap();
        assert_eq!(encode(&decoded), Ok(code));
    }

    #[test]
    fn test_target_outlives_state() {
        let target = {
            let mut cube = CubeState::INITIAL;
            cube.apply_sequence("L F2 U'");
            Cubies::from_state(&cube).unwrap().1
        };
        assert!(target.is_solved());
    }

    #[test]
    fn test_dense_index() {
        assert_eq!(StateCode::SOLVED.dense_index(), 0);
        for index in [0, 1, 728, 729, 1_000_000, STATE_COUNT - 1] {
            assert_eq!(StateCode::from_dense_index(index).unwrap().dense_index(), index);
        }
        assert_eq!(
            StateCode::from_dense_index(STATE_COUNT),
            Err(CodecError::DenseIndexOutOfRange(STATE_COUNT))
        );
    }

    #[test]
    fn test_bytes() {
        let code = StateCode::new(PERMUTATION_COUNT - 1, 5).unwrap();
        let bytes = code.to_bytes();
        assert_eq!(
            (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]),
            code.get()
        );
        assert_eq!(StateCode::from_bytes(bytes), Ok(code));
        assert!(StateCode::from_bytes([0xff; 3]).is_err());
    }

    #[test]
    fn test_invalid_configurations() {
        // Swap two stickers of one corner: a mirrored cubie
        let mut colors = *CubeState::INITIAL.colors();
        colors.swap(1, 10);
        let mirrored = CubeState::from_colors(colors).unwrap();
        assert_eq!(encode(&mirrored), Err(CodecError::UnknownCubie { slot: 1 }));

        // Twist a single corner in place
        let mut colors = *CubeState::INITIAL.colors();
        let [a, b, c] = CORNER_SLOTS[3].map(usize::from);
        (colors[a], colors[b], colors[c]) = (colors[b], colors[c], colors[a]);
        let twisted = CubeState::from_colors(colors).unwrap();
        assert_eq!(encode(&twisted), Err(CodecError::TwistedCorner(1)));

        // Break the pivot corner so that no orientation matches it
        let mut colors = *CubeState::INITIAL.colors();
        colors.swap(0, 4);
        let broken = CubeState::from_colors(colors).unwrap();
        assert_eq!(encode(&broken), Err(CodecError::NoTarget));
    }

    #[test]
    fn test_corner_moves() {
        let preserving = ALL_MOVES
            .iter()
            .filter_map(|&move_| CornerMove::new(move_).ok())
            .map(|corner_move| corner_move.move_instance().face)
            .collect::<Vec<_>>();
        assert_eq!(preserving.len(), 9);
        assert!(
            preserving
                .iter()
                .all(|face| matches!(face, Face::D | Face::R | Face::F))
        );
        assert_eq!(
            CornerMove::new(cube_move!(U, Normal)),
            Err(CodecError::PivotMoved(cube_move!(U, Normal)))
        );
    }

    #[test]
    fn test_corner_moves_match_facelets() {
        let corner_moves = ALL_MOVES
            .iter()
            .filter_map(|&move_| CornerMove::new(move_).ok())
            .collect::<Vec<_>>();
        let mut rng = fastrand::Rng::with_seed(31);
        for _ in 0..200 {
            let mut cube = CubeState::INITIAL;
            cube.scramble_with(&mut rng);
            let (cubies, _) = Cubies::from_state(&cube).unwrap();
            for corner_move in &corner_moves {
                let mut moved = cube.clone();
                moved.apply_move(corner_move.move_instance());
                let (expected, _) = Cubies::from_state(&moved).unwrap();
                assert_eq!(cubies.apply(corner_move), expected);
            }
        }
    }

    #[test]
    fn test_single_move_decodes_to_move() {
        let mut cube = CubeState::INITIAL;
        cube.apply_move(MoveInstance::new(Face::R, Direction::Normal));
        let code = encode(&cube).unwrap();
        assert_ne!(code, StateCode::SOLVED);
        let (_, target) = Cubies::from_state(&cube).unwrap();
        assert_eq!(decode(code.get(), target), Ok(cube));
    }
}
