//! Move tokens of the pocket cube.
//!
//! A move turns one face a quarter turn clockwise, a quarter turn
//! counter-clockwise, or a half turn. The textual form of a move is the face
//! letter optionally followed by `'` (counter-clockwise) or `2` (half turn),
//! so there are eighteen tokens in total.

use itertools::Itertools;
use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
    str::FromStr,
};
use strum_macros::EnumString;
use thiserror::Error;

/// An enum for the faces of the pocket cube.
///
/// - U: top face
/// - D: bottom face
/// - L: left face
/// - R: right face
/// - F: front face
/// - B: back face
#[derive(PartialEq, Eq, EnumString, Debug, Clone, Copy, Hash)]
pub enum Face {
    U,
    D,
    L,
    R,
    F,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Represents the direction which to turn a face. `Prime` represents
/// a counter-clockwise rotation of a face, and `Double` represents
/// a 180 degree rotation of a face.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Direction {
    Normal,
    Prime,
    Double,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Normal, Direction::Prime, Direction::Double];

    /// The number of clockwise quarter turns equivalent to this direction.
    #[must_use]
    pub const fn quarter_turns(self) -> usize {
        match self {
            Direction::Normal => 1,
            Direction::Prime => 3,
            Direction::Double => 2,
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Direction::Normal),
            "'" => Some(Direction::Prime),
            "2" => Some(Direction::Double),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Normal => write!(f, ""),
            Direction::Prime => write!(f, "'"),
            Direction::Double => write!(f, "2"),
        }
    }
}

/// An instantiation of a certain face equipped with a direction.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub struct MoveInstance {
    pub face: Face,
    pub dir: Direction,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("{0:?} is not a move token")]
    InvalidToken(String),
}

impl MoveInstance {
    #[must_use]
    pub fn new(face: Face, dir: Direction) -> Self {
        Self { face, dir }
    }

    /// The move that cancels this one. Half turns are their own inverse.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            face: self.face,
            dir: match self.dir {
                Direction::Normal => Direction::Prime,
                Direction::Prime => Direction::Normal,
                Direction::Double => Direction::Double,
            },
        }
    }

    /// Position of this move in [`ALL_MOVES`].
    #[must_use]
    pub fn index(&self) -> usize {
        self.face as usize * 3 + self.dir as usize
    }
}

impl Display for MoveInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.dir)
    }
}

/// Strict parsing: the whole string must be exactly one token.
impl FromStr for MoveInstance {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s.split_at_checked(1).and_then(|(face, suffix)| {
            Some(MoveInstance::new(
                face.parse().ok()?,
                Direction::from_suffix(suffix)?,
            ))
        });
        parsed.ok_or_else(|| MoveParseError::InvalidToken(s.to_owned()))
    }
}

/// A shorthand macro that can be used to construct MoveInstances.
///
/// ```
/// use pocket_core::cube_move;
/// use pocket_core::moves::{Direction, Face, MoveInstance};
///
/// let r_prime: MoveInstance = cube_move!(R, Prime);
/// let u2: MoveInstance = cube_move!(U, Double);
/// assert_eq!(r_prime.to_string(), "R'");
/// assert_eq!(u2.to_string(), "U2");
/// ```
#[macro_export]
macro_rules! cube_move {
    ($face: ident, $dir:ident) => {{
        MoveInstance {
            face: Face::$face,
            dir: Direction::$dir,
        }
    }};
}

/// A vector of all allowed moves on a pocket cube, ordered so that
/// `ALL_MOVES[m.index()] == m`.
pub const ALL_MOVES: [MoveInstance; 18] = [
    cube_move!(U, Normal),
    cube_move!(U, Prime),
    cube_move!(U, Double),
    cube_move!(D, Normal),
    cube_move!(D, Prime),
    cube_move!(D, Double),
    cube_move!(L, Normal),
    cube_move!(L, Prime),
    cube_move!(L, Double),
    cube_move!(R, Normal),
    cube_move!(R, Prime),
    cube_move!(R, Double),
    cube_move!(F, Normal),
    cube_move!(F, Prime),
    cube_move!(F, Double),
    cube_move!(B, Normal),
    cube_move!(B, Prime),
    cube_move!(B, Double),
];

/// A struct representing sequences of moves, used for representing
/// scramble sequences and solution sequences.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct MoveSequence(Vec<MoveInstance>);

impl MoveSequence {
    #[must_use]
    pub fn from(vec: Vec<MoveInstance>) -> Self {
        Self(vec)
    }

    /// Extract every move token that occurs in free text, left to right.
    /// Characters that cannot start a token are skipped, and a face letter
    /// takes the `'` or `2` that directly follows it, so `"xR2y U'"` scans
    /// as `R2 U'`.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut moves = vec![];
        let mut rest = text;
        while let Some(letter) = rest.chars().next() {
            let (head, tail) = rest.split_at(letter.len_utf8());
            rest = tail;
            let Ok(face) = Face::from_str(head) else {
                continue;
            };
            let dir = match rest.get(..1).and_then(Direction::from_suffix) {
                Some(Direction::Normal) | None => Direction::Normal,
                Some(dir) => {
                    rest = &rest[1..];
                    dir
                }
            };
            moves.push(MoveInstance::new(face, dir));
        }
        Self(moves)
    }

    /// The sequence that undoes this one: every move inverted, in reverse
    /// order.
    #[must_use]
    pub fn invert(&self) -> Self {
        self.iter().rev().map(MoveInstance::invert).collect()
    }
}

impl FromIterator<MoveInstance> for MoveSequence {
    fn from_iter<T: IntoIterator<Item = MoveInstance>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for MoveSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().join(" "))
    }
}

impl Deref for MoveSequence {
    type Target = Vec<MoveInstance>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveSequence {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Produce the token text that undoes the moves found in `text`.
#[must_use]
pub fn reverse_sequence(text: &str) -> String {
    MoveSequence::scan(text).invert().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_moves_index() {
        for (i, move_) in ALL_MOVES.iter().enumerate() {
            assert_eq!(move_.index(), i);
        }
    }

    #[test]
    fn test_face_letters() {
        for face in Face::ALL {
            assert_eq!(face.to_string().parse::<Face>(), Ok(face));
        }
        assert_eq!(Face::from_str("F"), Ok(Face::F));
        assert!(Face::from_str("f").is_err());
        assert!(Face::from_str("FR").is_err());
    }

    #[test]
    fn test_token_roundtrip() {
        for move_ in ALL_MOVES {
            assert_eq!(move_.to_string().parse::<MoveInstance>(), Ok(move_));
        }
    }

    #[test]
    fn test_strict_parse_rejects() {
        for token in ["", "X", "R3", "R''", "r", "R2 ", " R", "UD", "é", "Ré"] {
            assert_eq!(
                token.parse::<MoveInstance>(),
                Err(MoveParseError::InvalidToken(token.to_owned()))
            );
        }
    }

    #[test]
    fn test_invert() {
        assert_eq!(cube_move!(R, Normal).invert(), cube_move!(R, Prime));
        assert_eq!(cube_move!(R, Prime).invert(), cube_move!(R, Normal));
        assert_eq!(cube_move!(R, Double).invert(), cube_move!(R, Double));
    }

    #[test]
    fn test_scan_free_text() {
        assert_eq!(MoveSequence::scan("R U R' U'").to_string(), "R U R' U'");
        assert_eq!(MoveSequence::scan("RUR'U'").to_string(), "R U R' U'");
        assert_eq!(MoveSequence::scan("xR2y, u F'!").to_string(), "R2 F'");
        assert_eq!(MoveSequence::scan("R22'").to_string(), "R2");
        assert!(MoveSequence::scan("hello world 2'").is_empty());
        assert_eq!(MoveSequence::scan("é R'ü D2").to_string(), "R' D2");
    }

    #[test]
    fn test_reverse_sequence() {
        assert_eq!(reverse_sequence("R U2 F'"), "F U2 R'");
        assert_eq!(reverse_sequence("D"), "D'");
        assert_eq!(reverse_sequence(""), "");
    }
}
