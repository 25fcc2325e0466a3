//! An exact distance-to-solved table over every encoded configuration.
//!
//! The table is filled by a breadth-first search from the solved code. Only
//! the nine moves that leave the pivot corner in place are expanded, since
//! the code is taken relative to the pivot. Every other move is one of these
//! followed by a whole-cube rotation (U is D' rotated, L is R' rotated and B
//! is F' rotated) and rotations do not change the code, so the distances are
//! exactly those of the eighteen move half-turn metric.

use crate::{start, success, working};
use itertools::Itertools;
use log::{debug, info};
use pocket_core::{
    ALL_MOVES,
    codec::{CornerMove, Cubies, STATE_COUNT, StateCode},
};
use std::{
    sync::{Arc, LazyLock},
    time::Instant,
};

/// The distance of a code that the search never reached.
pub const UNVISITED: u8 = u8::MAX;

static SHARED: LazyLock<Arc<DistanceTable>> = LazyLock::new(|| Arc::new(DistanceTable::generate()));

pub struct DistanceTable {
    distances: Box<[u8]>,
    depth_counts: Vec<usize>,
}

impl DistanceTable {
    /// Run the breadth-first search.
    #[must_use]
    pub fn generate() -> Self {
        info!(start!("Generating the distance table"));
        let start = Instant::now();

        let corner_moves = ALL_MOVES
            .iter()
            .filter_map(|&move_| CornerMove::new(move_).ok())
            .collect_vec();

        let mut distances = vec![UNVISITED; STATE_COUNT].into_boxed_slice();
        distances[StateCode::SOLVED.dense_index()] = 0;
        let mut depth_counts = vec![1];
        let mut frontier = vec![Cubies::SOLVED];
        let mut depth = 0;
        while !frontier.is_empty() {
            let depth_start = Instant::now();
            depth += 1;
            let mut next = vec![];
            for cubies in &frontier {
                for corner_move in &corner_moves {
                    let moved = cubies.apply(corner_move);
                    let distance = &mut distances[moved.code().dense_index()];
                    if *distance == UNVISITED {
                        *distance = depth;
                        next.push(moved);
                    }
                }
            }
            if !next.is_empty() {
                debug!(
                    working!("Found {} configurations at depth {} in {:.3}s"),
                    next.len(),
                    depth,
                    depth_start.elapsed().as_secs_f64()
                );
                depth_counts.push(next.len());
            }
            frontier = next;
        }

        let table = Self {
            distances,
            depth_counts,
        };
        info!(
            success!("Distance table generated in {:.3}s, {} configurations, max depth {}"),
            start.elapsed().as_secs_f64(),
            table.reached(),
            table.max_depth()
        );
        table
    }

    /// The table of this process, generated on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// The least number of moves that solve `code`, or `None` if no sequence
    /// of moves reaches it.
    #[must_use]
    pub fn distance(&self, code: StateCode) -> Option<u8> {
        match self.distances[code.dense_index()] {
            UNVISITED => None,
            distance => Some(distance),
        }
    }

    /// How many configurations lie at each distance, starting at zero.
    #[must_use]
    pub fn depth_counts(&self) -> &[usize] {
        &self.depth_counts
    }

    /// The greatest distance of any configuration.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        (self.depth_counts.len() - 1) as u8
    }

    /// The number of configurations the search reached.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.depth_counts.iter().sum()
    }
}
