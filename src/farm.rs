use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::num::NonZero;

use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::room::{Role, Room, RoomId, Tunnel};
use crate::solver::{Solution, SolveError, Solver, SolverLimits};

/// Build the neighbor lookup for `room_count` rooms connected by `tunnels`.
///
/// Every room gets a node, even one with no tunnels.
/// The neighbor list of each room follows tunnel order, which later fixes the order paths are discovered in.
pub(crate) fn build_adjacency(room_count: usize, tunnels: &[Tunnel]) -> UnGraphMap<RoomId, ()> {
    let mut graph = UnGraphMap::with_capacity(room_count, tunnels.len());
    for index in 0..room_count {
        graph.add_node(RoomId(index));
    }
    for UnorderedPair(a, b) in tunnels {
        graph.add_edge(*a, *b, ());
    }

    graph
}

/// A validated puzzle instance: rooms, tunnels, the start and end rooms and the number of agents waiting at the start.
///
/// [`Farm`]s should be built using a [`FarmBuilder`](crate::builder::FarmBuilder) or read with [`parse_farm`](crate::parse::parse_farm).
#[derive(Clone, Debug)]
pub struct Farm {
    pub(crate) agents: NonZero<usize>,
    pub(crate) rooms: Vec<Room>,
    pub(crate) tunnels: Vec<Tunnel>,
    pub(crate) start: RoomId,
    pub(crate) end: RoomId,
    pub(crate) names: HashMap<String, RoomId>,
    pub(crate) graph: UnGraphMap<RoomId, ()>,
}

impl Farm {
    /// Number of agents waiting in the start room.
    pub fn agents(&self) -> usize {
        self.agents.get()
    }

    /// The room every agent starts in.
    pub fn start(&self) -> RoomId {
        self.start
    }

    /// The room every agent must reach.
    pub fn end(&self) -> RoomId {
        self.end
    }

    /// All rooms in declaration order; a [`RoomId`] indexes this slice.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The room `id` refers to.
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Look a room up by its declared name.
    pub fn room_by_name(&self, name: &str) -> Option<RoomId> {
        self.names.get(name).copied()
    }

    /// All tunnels in declaration order.
    pub fn tunnels(&self) -> &[Tunnel] {
        &self.tunnels
    }

    /// Rooms one tunnel away from `room`, in tunnel declaration order.
    pub fn neighbors(&self, room: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.graph.neighbors(room)
    }

    /// Solve this farm with [`SolverLimits::default`].
    ///
    /// Returns according to the result of [`Solver::solve`].
    pub fn solve(&self) -> Result<Solution, SolveError> {
        self.solve_with(&SolverLimits::default())
    }

    /// Solve this farm, failing with [`SolveError::ResourceExhausted`] if either search grows past `limits`.
    pub fn solve_with(&self, limits: &SolverLimits) -> Result<Solution, SolveError> {
        Solver::new(self, *limits).solve()
    }
}

impl Display for Farm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.agents)?;
        for room in &self.rooms {
            if room.role != Role::Plain {
                writeln!(f, "##{}", room.role)?;
            }
            writeln!(f, "{}", room)?;
        }
        for UnorderedPair(a, b) in &self.tunnels {
            writeln!(f, "{}-{}", self.room(*a).name, self.room(*b).name)?;
        }

        Ok(())
    }
}
