use fixedbitset::FixedBitSet;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::paths::Path;
use crate::solver::{SolveError, Stage};

/// Indices into the enumerated path list, in the order the paths joined the group.
pub type Group = Vec<usize>;

struct Search {
    // interior rooms of each path, by path index
    interiors: Vec<FixedBitSet>,
    agents: usize,
    groups: Vec<Group>,
    max_groups: usize,
}

impl Search {
    fn extend(&mut self, candidates: &[usize], group: &mut Group, claimed: &FixedBitSet) -> Result<(), SolveError> {
        if group.len() == self.agents {
            // every agent already has a path of its own
            return self.record(group);
        }

        for (position, &candidate) in candidates.iter().enumerate() {
            if !self.interiors[candidate].is_disjoint(claimed) {
                continue;
            }

            let remaining = candidates.iter()
                .enumerate()
                .filter(|(other, _)| *other != position)
                .map(|(_, path)| *path)
                .collect_vec();
            let mut next_claimed = claimed.clone();
            next_claimed.union_with(&self.interiors[candidate]);

            group.push(candidate);
            self.extend(&remaining, group, &next_claimed)?;
            group.pop();
        }

        if !group.is_empty() {
            self.record(group)?;
        }
        Ok(())
    }

    fn record(&mut self, group: &Group) -> Result<(), SolveError> {
        if self.groups.len() >= self.max_groups {
            return Err(SolveError::ResourceExhausted { stage: Stage::GroupSearch, limit: self.max_groups });
        }

        trace!(?group, "recorded group");
        self.groups.push(group.clone());
        Ok(())
    }
}

/// Collect every group of interior-disjoint paths reached by a backtracking walk over `paths`.
///
/// `paths` must be sorted shortest first, as [`enumerate_paths`](crate::paths::enumerate_paths) leaves them.
/// A group is recorded when it reaches `agents` paths, and otherwise once every remaining candidate has been tried.
/// Each branch works on its own copy of the candidate list.
/// If the shortest path is a direct tunnel it sits at the front of every group, since it has no interior to conflict over.
///
/// Groups come back in the order they were recorded, which is the tie-break order for [`select_group`](crate::select::select_group).
pub fn search_groups(paths: &[Path], agents: usize, room_count: usize, max_groups: usize) -> Result<Vec<Group>, SolveError> {
    let mut search = Search {
        interiors: paths.iter().map(|path| path.interior_set(room_count)).collect_vec(),
        agents,
        groups: Vec::new(),
        max_groups,
    };

    let (candidates, mut group) = match paths.first() {
        Some(shortest) if shortest.is_direct() => ((1..paths.len()).collect_vec(), vec![0]),
        _ => ((0..paths.len()).collect_vec(), Vec::new()),
    };
    search.extend(&candidates, &mut group, &FixedBitSet::with_capacity(room_count))?;

    debug!(count = search.groups.len(), "searched disjoint groups");
    Ok(search.groups)
}
