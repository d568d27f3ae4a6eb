use num_bigint::BigUint;
use tracing::debug;

use crate::groups::Group;
use crate::paths::Path;
use crate::solver::SolveError;

/// Estimated turns to move `agents` agents through `group`.
///
/// With path lengths `L1..Lk`, `bandwidth = L1 * ... * Lk` and `weight = bandwidth / L1 + ... + bandwidth / Lk`, the estimate is `agents * bandwidth / weight`
/// in floor division. Only good for ranking groups against each other.
pub fn score(group: &Group, paths: &[Path], agents: usize) -> BigUint {
    let lengths = group.iter().map(|index| BigUint::from(paths[*index].len()));
    let bandwidth: BigUint = lengths.clone().product();
    let weight: BigUint = lengths.map(|length| &bandwidth / length).sum();

    BigUint::from(agents) * bandwidth / weight
}

/// Pick the group with the lowest [`score`]; the first one wins a tie.
///
/// Fails with [`SolveError::NoGroup`] if `groups` is empty.
pub fn select_group(groups: &[Group], paths: &[Path], agents: usize) -> Result<(Group, BigUint), SolveError> {
    let mut best: Option<(&Group, BigUint)> = None;
    for group in groups {
        let turns = score(group, paths, agents);
        if best.as_ref().map_or(true, |(_, best_turns)| turns < *best_turns) {
            best = Some((group, turns));
        }
    }

    let (group, turns) = best.ok_or(SolveError::NoGroup)?;
    debug!(?group, %turns, "selected group");
    Ok((group.clone(), turns))
}
