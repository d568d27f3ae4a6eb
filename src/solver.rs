use num_bigint::BigUint;
use strum::Display;
use thiserror::Error;
use tracing::{debug, info};

use crate::farm::Farm;
use crate::groups::{search_groups, Group};
use crate::paths::{enumerate_paths, Path};
use crate::schedule::{assign, render, Assignment, MoveLog};
use crate::select::select_group;

/// Pipeline stages that can run out of room.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Stage {
    /// Depth-first search for every simple path.
    #[strum(serialize = "path enumeration")]
    PathEnumeration,
    /// Backtracking search for interior-disjoint groups.
    #[strum(serialize = "group search")]
    GroupSearch,
}

/// Reasons a [`Solver`] may fail.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SolveError {
    /// No path connects the start room to the end room, i.e. the farm as stated is unsolvable.
    #[error("no route from the start room to the end room")]
    NoRoute,
    /// A search stage did more work than its configured limit allows.
    #[error("{stage} exceeded its limit of {limit}")]
    ResourceExhausted {
        /// The stage that gave up.
        stage: Stage,
        /// The limit it ran into.
        limit: usize,
    },
    /// The group search came back empty.
    /// This should never happen, since any single path forms a group.
    #[error("no group of paths to choose from")]
    NoGroup,
}

/// Bounds on the two exponential stages of the pipeline.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SolverLimits {
    /// Most simple paths the enumerator may find.
    pub max_paths: usize,
    /// Most rooms the enumerator may enter, counting every branch including dead ends.
    pub max_expansions: usize,
    /// Most groups the disjoint search may record.
    pub max_groups: usize,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_paths: 10_000,
            max_expansions: 10_000_000,
            max_groups: 1_000_000,
        }
    }
}

impl SolverLimits {
    /// No bounds at all; pathological farms will run for a very long time.
    pub fn unbounded() -> Self {
        Self {
            max_paths: usize::MAX,
            max_expansions: usize::MAX,
            max_groups: usize::MAX,
        }
    }

    /// Replace [`Self::max_paths`].
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    /// Replace [`Self::max_expansions`].
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Replace [`Self::max_groups`].
    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }
}

/// Everything the solver worked out for one farm.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every simple path from start to end, shortest first.
    pub paths: Vec<Path>,
    /// The paths in use, as indices into [`Self::paths`].
    pub group: Group,
    /// Estimated turn count the group was chosen by. See [`score`](crate::select::score).
    pub score: BigUint,
    /// Agent `n` (1-indexed) follows `assignments[n - 1]`.
    pub assignments: Vec<Assignment>,
    /// The moves, ready for printing.
    pub log: MoveLog,
}

/// Runs the routing pipeline over one [`Farm`]: path enumeration, disjoint group search, group selection, then assignment and move rendering.
/// Use [`Self::solve`] to run it.
pub struct Solver<'a> {
    farm: &'a Farm,
    limits: SolverLimits,
}

impl<'a> Solver<'a> {
    /// Prepare to solve `farm` within `limits`.
    pub fn new(farm: &'a Farm, limits: SolverLimits) -> Self {
        Self { farm, limits }
    }

    /// Solve the farm, returning [`Ok`] with a [`Solution`] or [`Err`] with a [`SolveError`] reason.
    /// Nothing is returned from a run that fails partway.
    pub fn solve(&self) -> Result<Solution, SolveError> {
        let agents = self.farm.agents();
        debug!(rooms = self.farm.rooms.len(), tunnels = self.farm.tunnels.len(), agents, "solving farm");

        let paths = enumerate_paths(self.farm, &self.limits)?;
        let groups = search_groups(&paths, agents, self.farm.rooms.len(), self.limits.max_groups)?;
        let (group, score) = select_group(&groups, &paths, agents)?;

        let assignments = assign(&group, &paths, agents);
        let log = render(self.farm, &paths, &assignments);
        info!(paths = paths.len(), groups = groups.len(), width = group.len(), turns = log.turns(), "solved farm");

        Ok(Solution {
            paths,
            group,
            score,
            assignments,
            log,
        })
    }
}
