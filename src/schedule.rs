use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::farm::Farm;
use crate::groups::Group;
use crate::paths::Path;
use crate::room::AGENT_PREFIX;

/// Which path an agent takes and the turn of its first move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Assignment {
    /// Index into the enumerated path list.
    pub path: usize,
    /// 1-indexed turn on which the agent leaves the start room.
    pub start_turn: usize,
}

/// One agent stepping into one room.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// 1-indexed agent number.
    pub agent: usize,
    /// Name of the room entered.
    pub room: String,
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}-{}", AGENT_PREFIX, self.agent, self.room)
    }
}

/// Every move of a solved farm, grouped by turn.
///
/// Displays as one line per turn with that turn's moves separated by spaces, and no trailing newline.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MoveLog {
    turns: Vec<Vec<Move>>,
}

impl MoveLog {
    /// Number of turns until the last agent arrives.
    pub fn turns(&self) -> usize {
        self.turns.len()
    }

    /// Moves made on each turn; the first entry is turn 1.
    pub fn moves(&self) -> &[Vec<Move>] {
        &self.turns
    }

    /// Each turn rendered as a line.
    pub fn lines(&self) -> Vec<String> {
        self.turns.iter().map(|moves| moves.iter().join(" ")).collect_vec()
    }
}

impl Display for MoveLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Give each of `agents` agents a path from `group` and a departure turn.
///
/// Agents take the paths round-robin, a new wave leaving every turn.
/// Each of the last `group.len()` agents looks ahead at the slots of the agents after it and takes whichever slot arrives earliest, keeping its own unless a later one is strictly sooner.
pub fn assign(group: &Group, paths: &[Path], agents: usize) -> Vec<Assignment> {
    let width = group.len();
    let slot = |agent: usize| Assignment { path: group[agent % width], start_turn: agent / width + 1 };
    let arrival = |assignment: &Assignment| paths[assignment.path].len() + assignment.start_turn;

    (0..agents)
        .map(|agent| {
            let mut chosen = slot(agent);
            if agents < agent + width {
                for later in agent + 1..agent + width {
                    let candidate = slot(later);
                    if arrival(&candidate) < arrival(&chosen) {
                        chosen = candidate;
                    }
                }
            }
            chosen
        })
        .collect_vec()
}

/// Lay out every agent's walk, turn by turn. Agent `n` (1-indexed) is `assignments[n - 1]`.
pub fn render(farm: &Farm, paths: &[Path], assignments: &[Assignment]) -> MoveLog {
    let mut turns: BTreeMap<usize, Vec<Move>> = BTreeMap::new();
    for (agent, assignment) in assignments.iter().enumerate() {
        // the start room is never entered
        for (offset, room) in paths[assignment.path].rooms().iter().skip(1).enumerate() {
            turns.entry(assignment.start_turn + offset).or_default().push(Move {
                agent: agent + 1,
                room: farm.room(*room).name().to_owned(),
            });
        }
    }

    MoveLog { turns: turns.into_values().collect_vec() }
}
