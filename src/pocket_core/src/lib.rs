#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::module_name_repetitions)]

pub mod codec;
pub mod cubie;
pub mod facelets;
pub mod math;
pub mod moves;

pub use codec::{CodecError, StateCode, decode, encode};
pub use facelets::{CubeState, FaceletError};
pub use moves::{ALL_MOVES, Direction, Face, MoveInstance, MoveSequence};
