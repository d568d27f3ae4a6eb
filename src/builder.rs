use std::collections::{HashMap, HashSet};
use std::num::NonZero;

use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::farm::{build_adjacency, Farm};
use crate::location::Location;
use crate::room::{Role, Room, RoomId, Tunnel, AGENT_PREFIX};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A room name is empty, starts with the agent label prefix `L` or the comment marker `#`, or contains `-` or whitespace.
    #[error("invalid room name")]
    BadRoomName,
    /// Two rooms share a name.
    #[error("duplicate room name")]
    DuplicateName,
    /// Two rooms share a coordinate pair.
    #[error("duplicate room coordinates")]
    DuplicateLocation,
    /// A second start room was declared.
    #[error("more than one start room")]
    DuplicateStart,
    /// A second end room was declared.
    #[error("more than one end room")]
    DuplicateEnd,
    /// No start room was declared.
    #[error("no start room found")]
    MissingStart,
    /// No end room was declared.
    #[error("no end room found")]
    MissingEnd,
    /// A tunnel names a room that was never declared.
    #[error("tunnel references an unknown room")]
    UnknownRoom,
    /// A tunnel connects a room to itself.
    #[error("tunnel connects a room to itself")]
    SelfTunnel,
    /// The same pair of rooms was connected twice.
    #[error("duplicate tunnel")]
    DuplicateTunnel,
}

/// A builder for [`Farm`]s.
///
/// Room-level problems invalidate the builder as soon as they are found; after that every call does nothing.
/// Problems which need the whole picture, like a missing end room or a tunnel to an unknown room, are reported by [`build`](Self::build).
/// Builders can be [`Clone`]d to save their state at some point.
#[derive(Clone, Debug)]
pub struct FarmBuilder {
    agents: NonZero<usize>,
    rooms: Vec<Room>,
    names: HashMap<String, RoomId>,
    locations: HashSet<Location>,
    start: Option<RoomId>,
    end: Option<RoomId>,
    // by name, resolved on build
    tunnels: Vec<(String, String)>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl FarmBuilder {
    /// Construct an empty builder for a farm holding `agents` agents in its start room.
    pub fn with_agents(agents: NonZero<usize>) -> Self {
        Self {
            agents,
            rooms: Default::default(),
            names: Default::default(),
            locations: Default::default(),
            start: None,
            end: None,
            tunnels: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add an ordinary room.
    ///
    /// May cause the builder to enter a [`BadRoomName`](BuilderInvalidReason::BadRoomName), [`DuplicateName`](BuilderInvalidReason::DuplicateName)
    /// or [`DuplicateLocation`](BuilderInvalidReason::DuplicateLocation) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_room(&mut self, name: &str, location: Location) -> &mut Self {
        self.add_room_as(name, location, Role::Plain)
    }

    /// Add the room every agent starts in. Same conditions as [`Self::add_room`], and additionally
    /// [`DuplicateStart`](BuilderInvalidReason::DuplicateStart) if a start room already exists.
    pub fn add_start(&mut self, name: &str, location: Location) -> &mut Self {
        self.add_room_as(name, location, Role::Start)
    }

    /// Add the room every agent must reach. Same conditions as [`Self::add_room`], and additionally
    /// [`DuplicateEnd`](BuilderInvalidReason::DuplicateEnd) if an end room already exists.
    pub fn add_end(&mut self, name: &str, location: Location) -> &mut Self {
        self.add_room_as(name, location, Role::End)
    }

    /// Add a room playing `role`.
    pub fn add_room_as(&mut self, name: &str, location: Location, role: Role) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let reason = if !is_valid_name(name) {
            Some(BuilderInvalidReason::BadRoomName)
        } else if self.names.contains_key(name) {
            Some(BuilderInvalidReason::DuplicateName)
        } else if self.locations.contains(&location) {
            Some(BuilderInvalidReason::DuplicateLocation)
        } else {
            match role {
                Role::Start if self.start.is_some() => Some(BuilderInvalidReason::DuplicateStart),
                Role::End if self.end.is_some() => Some(BuilderInvalidReason::DuplicateEnd),
                _ => None,
            }
        };
        if let Some(reason) = reason {
            self.invalid_reasons.push(reason);
            return self;
        }

        let id = RoomId(self.rooms.len());
        match role {
            Role::Start => self.start = Some(id),
            Role::End => self.end = Some(id),
            Role::Plain => {}
        }
        self.names.insert(name.to_owned(), id);
        self.locations.insert(location);
        self.rooms.push(Room { name: name.to_owned(), location, role });

        self
    }

    /// Connect the rooms named `a` and `b`. The rooms need not exist yet; names are resolved by [`Self::build`].
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tunnel(&mut self, a: &str, b: &str) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.tunnels.push((a.to_owned(), b.to_owned()));
        self
    }

    /// Check the validity of this builder so far.
    ///
    /// Returns `None` if no room-level [`BuilderInvalidReason`] has arisen, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Farm`], computing its adjacency.
    /// If the builder is invalid for any reason, a [`Vec`] of every [`BuilderInvalidReason`] found indicates why.
    pub fn build(&self) -> Result<Farm, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let mut reasons = Vec::new();
        if self.start.is_none() {
            reasons.push(BuilderInvalidReason::MissingStart);
        }
        if self.end.is_none() {
            reasons.push(BuilderInvalidReason::MissingEnd);
        }

        let mut tunnels: Vec<Tunnel> = Vec::with_capacity(self.tunnels.len());
        let mut seen = HashSet::with_capacity(self.tunnels.len());
        for (a, b) in &self.tunnels {
            let (Some(a), Some(b)) = (self.names.get(a), self.names.get(b)) else {
                reasons.push(BuilderInvalidReason::UnknownRoom);
                continue;
            };
            if a == b {
                reasons.push(BuilderInvalidReason::SelfTunnel);
                continue;
            }

            let tunnel = UnorderedPair::from((*a, *b));
            if !seen.insert(tunnel) {
                reasons.push(BuilderInvalidReason::DuplicateTunnel);
                continue;
            }
            tunnels.push(tunnel);
        }

        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(reasons);
        };
        if !reasons.is_empty() {
            return Err(reasons);
        }

        let graph = build_adjacency(self.rooms.len(), &tunnels);
        Ok(Farm {
            agents: self.agents,
            rooms: self.rooms.clone(),
            tunnels,
            start,
            end,
            names: self.names.clone(),
            graph,
        })
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(AGENT_PREFIX)
        && !name.starts_with('#')
        && !name.contains('-')
        && !name.contains(char::is_whitespace)
}
