//! The facelet model of the pocket cube.
//!
//! A configuration is an array of 24 colors, one per sticker. Colors are the
//! digits 1 to 6 and each appears exactly four times. The sticker slots are
//! laid out as follows, with the up face on top of the front face:
//!
//! ```text
//!             | 0| 1|
//!             |12|13|
//! | 4| 5|| 6| 7|| 8| 9||10|11|
//! |16|17||18|19||20|21||22|23|
//!             | 2| 3|
//!             |14|15|
//! ```
//!
//! Left, front, right and back are unfolded left to right, and down is
//! unfolded below the front face.

use crate::moves::{ALL_MOVES, MoveInstance, MoveSequence};
use std::{fmt::Display, ops::Range, str::FromStr};
use thiserror::Error;

pub const FACELETS: usize = 24;
pub const COLORS: u8 = 6;

/// How many random moves `scramble` applies.
pub const SCRAMBLE_LENGTH: Range<usize> = 10..20;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FaceletError {
    #[error("Expected {FACELETS} facelets, got {0}")]
    WrongLength(usize),
    #[error("Invalid character {0:?}, colors are the digits 1 to 6")]
    InvalidDigit(char),
    #[error("Invalid color {0}, colors are 1 to 6")]
    InvalidColor(u8),
    #[error("Color {color} appears {count} times instead of 4")]
    ColorCount { color: u8, count: usize },
}

/// A permutation of facelet slots: after applying it, slot `i` holds the
/// sticker that was previously in slot `self.0[i]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceletPermutation([u8; FACELETS]);

impl FaceletPermutation {
    pub const IDENTITY: Self = {
        let mut arr = [0; FACELETS];
        let mut i = 0;
        while i < FACELETS {
            arr[i] = i as u8;
            i += 1;
        }
        Self(arr)
    };

    /// The permutation that applies `self` and then `then`.
    #[must_use]
    pub const fn then(&self, then: &Self) -> Self {
        let mut arr = [0; FACELETS];
        let mut i = 0;
        while i < FACELETS {
            arr[i] = self.0[then.0[i] as usize];
            i += 1;
        }
        Self(arr)
    }

    #[must_use]
    pub const fn pow(&self, exponent: usize) -> Self {
        let mut result = Self::IDENTITY;
        let mut i = 0;
        while i < exponent {
            result = result.then(self);
            i += 1;
        }
        result
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut arr = [0; FACELETS];
        for (slot, &source) in self.0.iter().enumerate() {
            arr[source as usize] = slot as u8;
        }
        Self(arr)
    }

    /// The slot whose sticker lands in `slot`.
    #[must_use]
    pub fn source(&self, slot: usize) -> u8 {
        self.0[slot]
    }

    /// The permutation of the given move, from a table built at compile time.
    #[must_use]
    pub fn of(move_: MoveInstance) -> &'static Self {
        &MOVE_PERMUTATIONS[move_.index()]
    }

    fn apply(&self, colors: &[u8; FACELETS]) -> [u8; FACELETS] {
        std::array::from_fn(|slot| colors[self.0[slot] as usize])
    }
}

/// Clockwise quarter turns of each face, in `Face` order.
const GENERATORS: [FaceletPermutation; 6] = [
    // U
    FaceletPermutation([
        12, 0, 2, 3, 6, 7, 8, 9, 10, 11, 4, 5, 13, 1, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
    ]),
    // D
    FaceletPermutation([
        0, 1, 14, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 3, 22, 23, 16, 17, 18, 19, 20, 21,
    ]),
    // L
    FaceletPermutation([
        23, 1, 6, 3, 16, 4, 0, 7, 8, 9, 10, 14, 11, 13, 18, 15, 17, 5, 12, 19, 20, 21, 22, 2,
    ]),
    // R
    FaceletPermutation([
        0, 7, 2, 22, 4, 5, 6, 3, 20, 8, 13, 11, 12, 19, 14, 10, 16, 17, 18, 15, 21, 9, 1, 23,
    ]),
    // F
    FaceletPermutation([
        0, 1, 20, 8, 4, 2, 18, 6, 12, 9, 10, 11, 17, 5, 14, 15, 16, 3, 19, 7, 13, 21, 22, 23,
    ]),
    // B
    FaceletPermutation([
        9, 21, 2, 3, 1, 5, 6, 7, 8, 15, 22, 10, 12, 13, 4, 16, 0, 17, 18, 19, 20, 14, 23, 11,
    ]),
];

/// Every move token resolved to its permutation, indexed like `ALL_MOVES`.
/// Prime moves are the cube of their generator and double moves the square.
static MOVE_PERMUTATIONS: [FaceletPermutation; 18] = {
    let mut arr = [FaceletPermutation::IDENTITY; 18];
    let mut i = 0;
    while i < ALL_MOVES.len() {
        let move_ = ALL_MOVES[i];
        arr[i] = GENERATORS[move_.face as usize].pow(move_.dir.quarter_turns());
        i += 1;
    }
    arr
};

const fn digits(s: &str) -> [u8; FACELETS] {
    let bytes = s.as_bytes();
    let mut arr = [0; FACELETS];
    let mut i = 0;
    while i < FACELETS {
        arr[i] = bytes[i] - b'0';
        i += 1;
    }
    arr
}

/// The solved cube in each of its 24 spatial orientations.
pub static SOLVED_STATES: [CubeState; 24] = [
    CubeState::from_digits("446611332255446611332255"),
    CubeState::from_digits("446655113322446655113322"),
    CubeState::from_digits("446622551133446622551133"),
    CubeState::from_digits("446633225511446633225511"),
    CubeState::from_digits("221144336655221144336655"),
    CubeState::from_digits("221155443366221155443366"),
    CubeState::from_digits("221166554433221166554433"),
    CubeState::from_digits("221133665544221133665544"),
    CubeState::from_digits("664422331155664422331155"),
    CubeState::from_digits("664455223311664455223311"),
    CubeState::from_digits("664411552233664411552233"),
    CubeState::from_digits("664433115522664433115522"),
    CubeState::from_digits("112266334455112266334455"),
    CubeState::from_digits("112255663344112255663344"),
    CubeState::from_digits("112244556633112244556633"),
    CubeState::from_digits("112233445566112233445566"),
    CubeState::from_digits("553366114422553366114422"),
    CubeState::from_digits("553322661144553322661144"),
    CubeState::from_digits("553344226611553344226611"),
    CubeState::from_digits("553311442266553311442266"),
    CubeState::from_digits("335566224411335566224411"),
    CubeState::from_digits("335511662244335511662244"),
    CubeState::from_digits("335544116622335544116622"),
    CubeState::from_digits("335522441166335522441166"),
];

/// The underlying struct for representing a configuration of the pocket cube
/// as its 24 sticker colors.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CubeState {
    colors: [u8; FACELETS],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl CubeState {
    /// The solved cube with up = 1, down = 2, left = 3, front = 4, right = 5
    /// and back = 6.
    pub const INITIAL: Self = Self::from_digits("112233445566112233445566");

    const fn from_digits(s: &str) -> Self {
        Self { colors: digits(s) }
    }

    /// Create a configuration from raw colors.
    ///
    /// # Errors
    ///
    /// If a color is not in `1..=6` or the colors do not each appear four
    /// times.
    pub fn from_colors(colors: [u8; FACELETS]) -> Result<Self, FaceletError> {
        let mut counts = [0; COLORS as usize];
        for &color in &colors {
            if !(1..=COLORS).contains(&color) {
                return Err(FaceletError::InvalidColor(color));
            }
            counts[usize::from(color - 1)] += 1;
        }
        if let Some((i, &count)) = counts.iter().enumerate().find(|(_, count)| **count != 4) {
            return Err(FaceletError::ColorCount {
                color: i as u8 + 1,
                count,
            });
        }
        Ok(Self { colors })
    }

    /// For callers that only ever rearrange the stickers of a valid state.
    pub(crate) fn from_colors_unchecked(colors: [u8; FACELETS]) -> Self {
        debug_assert!(Self::from_colors(colors).is_ok());
        Self { colors }
    }

    #[must_use]
    pub fn colors(&self) -> &[u8; FACELETS] {
        &self.colors
    }

    /// Sets the pocket cube back to its initial position.
    pub fn reset(&mut self) {
        *self = Self::INITIAL;
    }

    /// Whether the stickers exactly match one of the 24 solved orientations.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        SOLVED_STATES.contains(self)
    }

    pub fn apply_permutation(&mut self, permutation: &FaceletPermutation) {
        self.colors = permutation.apply(&self.colors);
    }

    /// Applies a move to a pocket cube configuration.
    pub fn apply_move(&mut self, move_: MoveInstance) {
        self.apply_permutation(FaceletPermutation::of(move_));
    }

    /// Applies a sequence of moves, in order.
    pub fn apply_moves(&mut self, moves: &MoveSequence) {
        for &move_ in moves.iter() {
            self.apply_move(move_);
        }
    }

    /// Applies a single move token. Anything that is not exactly one token is
    /// ignored and leaves the cube untouched.
    pub fn parse_token(&mut self, token: &str) {
        if let Ok(move_) = token.parse() {
            self.apply_move(move_);
        }
    }

    /// Applies every move token found in `text`, left to right. See
    /// [`MoveSequence::scan`].
    pub fn apply_sequence(&mut self, text: &str) {
        self.apply_moves(&MoveSequence::scan(text));
    }

    /// Applies between 10 and 19 uniformly random moves and returns them.
    pub fn scramble(&mut self) -> MoveSequence {
        self.scramble_with(&mut fastrand::Rng::new())
    }

    /// Like [`CubeState::scramble`], drawing from the given generator.
    pub fn scramble_with(&mut self, rng: &mut fastrand::Rng) -> MoveSequence {
        let moves: MoveSequence = (0..rng.usize(SCRAMBLE_LENGTH))
            .map(|_| ALL_MOVES[rng.usize(..ALL_MOVES.len())])
            .collect();
        self.apply_moves(&moves);
        moves
    }
}

/// The canonical serialization: 24 color digits in slot order.
impl Display for CubeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for color in self.colors {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

impl FromStr for CubeState {
    type Err = FaceletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != FACELETS {
            return Err(FaceletError::WrongLength(count));
        }
        let mut colors = [0; FACELETS];
        for (color, c) in colors.iter_mut().zip(s.chars()) {
            *color = match c.to_digit(10) {
                Some(digit @ 1..=6) => digit as u8,
                _ => return Err(FaceletError::InvalidDigit(c)),
            };
        }
        Self::from_colors(colors)
    }
}
