use std::fmt::{Display, Formatter};

use strum::Display as StrumDisplay;
use unordered_pair::UnorderedPair;

use crate::location::Location;

/// Prefix of every agent label in a move log; room names may not start with it.
pub const AGENT_PREFIX: char = 'L';

/// Index of a room inside its [`Farm`](crate::Farm). Ids are dense and follow declaration order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RoomId(pub(crate) usize);

impl RoomId {
    /// Position of this room in [`Farm::rooms`](crate::Farm::rooms).
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a room is used for in the puzzle.
///
/// The textual form of [`Start`](Role::Start) and [`End`](Role::End) is the directive word used in farm descriptions, i.e. `##start`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Where every agent begins.
    Start,
    /// Where every agent must arrive.
    End,
    /// Any other room, which holds at most one agent at a time.
    #[default]
    Plain,
}

/// A room as declared in a farm description.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room {
    pub(crate) name: String,
    pub(crate) location: Location,
    pub(crate) role: Role,
}

impl Room {
    /// Unique name, used in move logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared coordinates, unique across the farm.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Whether this is the start room, the end room or neither.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.location)
    }
}

/// An undirected tunnel between two rooms.
pub type Tunnel = UnorderedPair<RoomId>;
