#![warn(missing_docs)]

//! # `lemin`
//!
//! A solver for the ant-farm routing puzzle: a colony of agents waits in the start room of a network of rooms and tunnels and must all reach the end room in as few turns as possible.
//! Every turn, each agent may cross at most one tunnel, and no room other than start and end may hold more than one agent at once.
//!
//! Begin by building a [`Farm`] with a [`FarmBuilder`](builder::FarmBuilder), or read one from its text description with [`parse_farm`](parse::parse_farm).
//! Then call [`solve()`](crate::Farm::solve), yielding a [`Solution`] whose [`MoveLog`](schedule::MoveLog) prints the moves turn by turn.
//!
//! # Internals
//! Solving is a single pipeline over one farm:
//!
//! 1. Every simple path from start to end is enumerated by depth-first search with backtracking and sorted shortest first.
//! 2. A backtracking search collects groups of paths which share no room besides start and end, so that the paths of a group can all be used at once.
//! If start and end are adjacent, that direct tunnel is in every group.
//! 3. Each group is scored by a load-balancing estimate of how many turns it would need for all agents, and the lowest score wins.
//! This is a heuristic; it does not prove the chosen group optimal.
//! 4. Agents are dealt out to the paths of the winning group round-robin, one wave leaving per turn, with the last few agents allowed to swap onto a later slot that arrives sooner.
//!
//! Both searches are exponential in the worst case, so each is capped by [`SolverLimits`].

pub use builder::FarmBuilder;
pub use farm::Farm;
pub use location::Location;
pub use parse::{parse_farm, ParseError};
pub use room::{Role, Room, RoomId, Tunnel};
pub use solver::{Solution, SolveError, Solver, SolverLimits, Stage};

pub mod builder;
pub(crate) mod farm;
pub mod groups;
pub(crate) mod location;
pub mod parse;
pub mod paths;
pub(crate) mod room;
pub mod schedule;
pub mod select;
pub(crate) mod solver;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
