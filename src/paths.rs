use fixedbitset::FixedBitSet;
use itertools::Itertools;
use petgraph::algo::has_path_connecting;
use tracing::debug;

use crate::farm::Farm;
use crate::room::RoomId;
use crate::solver::{SolveError, SolverLimits, Stage};

/// A simple route from the start room to the end room, both included.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Path {
    rooms: Vec<RoomId>,
}

impl Path {
    /// Every room on the path, start first and end last.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of rooms on the path. A direct tunnel from start to end has length 2.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// The rooms strictly between start and end.
    pub fn interior(&self) -> &[RoomId] {
        &self.rooms[1..self.rooms.len() - 1]
    }

    /// Whether start and end are adjacent on this path, leaving it with no interior at all.
    pub fn is_direct(&self) -> bool {
        self.rooms.len() == 2
    }

    /// Mark every interior room of this path in a set sized for `room_count` rooms.
    pub(crate) fn interior_set(&self, room_count: usize) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(room_count);
        self.interior().iter().for_each(|room| set.insert(room.0));
        set
    }

    /// Room names along the path, joined like `start-a-b-end`.
    pub fn describe(&self, farm: &Farm) -> String {
        self.rooms.iter().map(|room| farm.room(*room).name()).join("-")
    }
}

/// One room on the current DFS branch and how many of its neighbors have been tried.
struct Frame {
    room: RoomId,
    next: usize,
}

/// DFS state for one enumeration run.
///
/// The branch lives in an explicit stack of [`Frame`]s, so path length is bounded by memory rather than by the call stack.
struct Walk<'a> {
    farm: &'a Farm,
    // neighbors of each room, by room index
    adjacency: Vec<Vec<RoomId>>,
    visited: FixedBitSet,
    // child -> the room it was entered from
    parents: Vec<Option<RoomId>>,
    found: Vec<Path>,
    expansions: usize,
    limits: SolverLimits,
}

impl Walk<'_> {
    fn run(&mut self) -> Result<(), SolveError> {
        let start = self.farm.start;
        self.expand()?;
        self.visited.insert(start.0);
        let mut stack = vec![Frame { room: start, next: 0 }];

        while let Some(frame) = stack.last_mut() {
            let room = frame.room;
            let Some(&child) = self.adjacency[room.0].get(frame.next) else {
                // every neighbor tried; free the room for other branches
                self.visited.set(room.0, false);
                stack.pop();
                continue;
            };
            frame.next += 1;
            if self.visited.contains(child.0) {
                continue;
            }

            self.parents[child.0] = Some(room);
            self.expand()?;
            if child == self.farm.end {
                self.record()?;
                continue;
            }
            self.visited.insert(child.0);
            stack.push(Frame { room: child, next: 0 });
        }

        Ok(())
    }

    fn expand(&mut self) -> Result<(), SolveError> {
        if self.expansions >= self.limits.max_expansions {
            return Err(SolveError::ResourceExhausted { stage: Stage::PathEnumeration, limit: self.limits.max_expansions });
        }

        self.expansions += 1;
        Ok(())
    }

    fn record(&mut self) -> Result<(), SolveError> {
        if self.found.len() >= self.limits.max_paths {
            return Err(SolveError::ResourceExhausted { stage: Stage::PathEnumeration, limit: self.limits.max_paths });
        }

        let mut rooms = vec![self.farm.end];
        let mut cursor = self.farm.end;
        while cursor != self.farm.start {
            // every room on the current branch other than start has a parent
            let Some(parent) = self.parents[cursor.0] else { break };
            rooms.push(parent);
            cursor = parent;
        }
        rooms.reverse();

        self.found.push(Path { rooms });
        Ok(())
    }
}

/// Find every simple path from the start room to the end room of `farm`, shortest first.
///
/// Neighbors are explored in tunnel order and paths of equal length keep the order they were found in.
/// Fails with [`SolveError::NoRoute`] if the two rooms are disconnected, which is checked before any enumeration starts.
/// Fails with [`SolveError::ResourceExhausted`] once more than `limits.max_paths` paths turn up or the search enters more than `limits.max_expansions` rooms.
pub fn enumerate_paths(farm: &Farm, limits: &SolverLimits) -> Result<Vec<Path>, SolveError> {
    if !has_path_connecting(&farm.graph, farm.start, farm.end, None) {
        return Err(SolveError::NoRoute);
    }

    let room_count = farm.rooms.len();
    let mut walk = Walk {
        farm,
        adjacency: (0..room_count).map(|index| farm.neighbors(RoomId(index)).collect_vec()).collect_vec(),
        visited: FixedBitSet::with_capacity(room_count),
        parents: vec![None; room_count],
        found: Vec::new(),
        expansions: 0,
        limits: *limits,
    };
    walk.run()?;

    let mut paths = walk.found;
    // stable, so discovery order breaks ties
    paths.sort_by_key(Path::len);
    debug!(count = paths.len(), expansions = walk.expansions, "enumerated paths");

    if paths.is_empty() {
        return Err(SolveError::NoRoute);
    }
    Ok(paths)
}

#[cfg(test)]
pub(crate) fn path_of(rooms: Vec<RoomId>) -> Path {
    Path { rooms }
}
