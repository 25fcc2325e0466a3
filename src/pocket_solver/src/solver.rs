use crate::{pruning::DistanceTable, start, success};
use log::debug;
use pocket_core::{ALL_MOVES, CodecError, CubeState, MoveSequence, encode};
use std::{sync::Arc, time::Instant};
use thiserror::Error;

/// Finds optimal solutions by walking down an exact distance table.
#[derive(Clone)]
pub struct Solver {
    table: Arc<DistanceTable>,
    max_solution_length: Option<usize>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SolverError {
    #[error("The configuration is not in the distance table, so no solution exists")]
    SolutionDoesNotExist,
    #[error("Max solution length exceeded")]
    MaxSolutionLengthExceeded,
    #[error("The configuration cannot be reached from a solved cube")]
    InvalidState(#[from] CodecError),
}

impl Solver {
    #[must_use]
    pub fn new(table: Arc<DistanceTable>) -> Self {
        Self {
            table,
            max_solution_length: None,
        }
    }

    /// A solver backed by [`DistanceTable::shared`].
    #[must_use]
    pub fn shared() -> Self {
        Self::new(DistanceTable::shared())
    }

    #[must_use]
    pub fn with_max_solution_length(mut self, max_solution_length: usize) -> Self {
        self.max_solution_length = Some(max_solution_length);
        self
    }

    #[must_use]
    pub fn table(&self) -> &DistanceTable {
        &self.table
    }

    /// The length of an optimal solution of `cube`.
    ///
    /// # Errors
    ///
    /// If `cube` cannot be reached from a solved cube.
    pub fn distance(&self, cube: &CubeState) -> Result<u8, SolverError> {
        self.table
            .distance(encode(cube)?)
            .ok_or(SolverError::SolutionDoesNotExist)
    }

    /// Find an optimal sequence of moves that solves `cube`. Applying the
    /// result to `cube` makes [`CubeState::is_solved`] true, and a solved
    /// cube gets the empty sequence.
    ///
    /// # Errors
    ///
    /// If `cube` cannot be reached from a solved cube, or its solution is
    /// longer than the configured maximum.
    pub fn solve(&self, cube: &CubeState) -> Result<MoveSequence, SolverError> {
        debug!(start!("Solving {}"), cube);
        let start = Instant::now();

        let mut distance = self.distance(cube)?;
        if let Some(max_solution_length) = self.max_solution_length
            && usize::from(distance) > max_solution_length
        {
            return Err(SolverError::MaxSolutionLengthExceeded);
        }

        let mut cube = cube.clone();
        let mut solution = MoveSequence::default();
        while distance > 0 {
            // An exact table always has a neighbour one step closer
            let (move_, next, next_distance) = ALL_MOVES
                .iter()
                .find_map(|&move_| {
                    let mut next = cube.clone();
                    next.apply_move(move_);
                    let next_distance = self.distance(&next).ok()?;
                    (next_distance < distance).then_some((move_, next, next_distance))
                })
                .ok_or(SolverError::SolutionDoesNotExist)?;
            solution.push(move_);
            cube = next;
            distance = next_distance;
        }

        debug!(
            success!("Found the {} move solution {} in {:.3}s"),
            solution.len(),
            solution,
            start.elapsed().as_secs_f64()
        );
        Ok(solution)
    }

    /// [`Solver::solve`], formatted as space separated move tokens.
    ///
    /// # Errors
    ///
    /// See [`Solver::solve`].
    pub fn solve_text(&self, cube: &CubeState) -> Result<String, SolverError> {
        self.solve(cube).map(|solution| solution.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_core::{
        cube_move,
        moves::{Direction, Face, MoveInstance},
    };

    #[test_log::test]
    fn test_single_moves() {
        let solver = Solver::shared();
        for move_ in ALL_MOVES {
            let mut cube = CubeState::INITIAL;
            cube.apply_move(move_);
            assert_eq!(solver.distance(&cube), Ok(1));
            let solution = solver.solve(&cube).unwrap();
            assert_eq!(solution.len(), 1);
            cube.apply_moves(&solution);
            assert!(cube.is_solved());
        }
    }

    #[test_log::test]
    fn test_max_solution_length() {
        let mut cube = CubeState::INITIAL;
        cube.apply_sequence("R U R' U'");
        let solver = Solver::shared().with_max_solution_length(2);
        assert_eq!(
            solver.solve(&cube),
            Err(SolverError::MaxSolutionLengthExceeded)
        );
        let solver = solver.with_max_solution_length(4);
        assert_eq!(solver.solve(&cube).map(|solution| solution.len()), Ok(4));
    }

    #[test_log::test]
    fn test_invalid_state() {
        let mut colors = *CubeState::INITIAL.colors();
        colors.swap(0, 4);
        let cube = CubeState::from_colors(colors).unwrap();
        assert_eq!(
            Solver::shared().solve(&cube),
            Err(SolverError::InvalidState(CodecError::NoTarget))
        );
    }

    #[test_log::test]
    fn test_rotated_solved() {
        let solver = Solver::shared();
        let mut cube = CubeState::INITIAL;
        // R L' turns the whole cube
        cube.apply_move(cube_move!(R, Normal));
        cube.apply_move(cube_move!(L, Prime));
        assert!(cube.is_solved());
        assert_eq!(solver.solve_text(&cube), Ok(String::new()));
    }
}
