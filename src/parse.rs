//! Reading farms from their text description.
//!
//! ```text
//! 3
//! ##start
//! 0 1 0
//! ##end
//! 1 5 0
//! 2 9 0
//! 0-2
//! 2-1
//! ```
//!
//! The first line is the agent count. Room lines (`name x y`) come next, each optionally preceded by a `##start` or `##end` directive, followed by tunnel lines (`a-b`).
//! Blank lines and other lines starting with `#` are ignored.

use std::num::NonZero;
use std::str::FromStr;

use itertools::Itertools;
use strum::EnumString;
use thiserror::Error;
use tracing::trace;

use crate::builder::{BuilderInvalidReason, FarmBuilder};
use crate::farm::Farm;
use crate::location::{Coord, Location};
use crate::room::Role;

/// Reasons a farm description may fail to parse. Line numbers count from 1.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// Nothing but blank lines and comments.
    #[error("the description is empty")]
    Empty,
    /// The first line is not a positive integer.
    #[error("line {line}: invalid number of agents")]
    BadAgentCount {
        /// Offending line.
        line: usize,
    },
    /// A room line is not `name x y` with integer coordinates.
    #[error("line {line}: invalid room format")]
    BadRoom {
        /// Offending line.
        line: usize,
    },
    /// A tunnel line is not `a-b`.
    #[error("line {line}: invalid tunnel format")]
    BadTunnel {
        /// Offending line.
        line: usize,
    },
    /// A `##start` or `##end` directive is not followed by a room.
    #[error("line {line}: directive does not precede a room")]
    DanglingDirective {
        /// Line of the directive.
        line: usize,
    },
    /// A room line appears after tunnel lines began.
    #[error("line {line}: room declared after the first tunnel")]
    RoomAfterTunnels {
        /// Offending line.
        line: usize,
    },
    /// The description parsed but does not make a valid farm.
    #[error("invalid farm: {}", .0.iter().join(", "))]
    Invalid(Vec<BuilderInvalidReason>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Directive {
    Start,
    End,
}

impl From<Directive> for Role {
    fn from(value: Directive) -> Self {
        match value {
            Directive::Start => Role::Start,
            Directive::End => Role::End,
        }
    }
}

fn parse_directive(line: &str) -> Option<Directive> {
    line.strip_prefix("##").and_then(|word| Directive::from_str(word).ok())
}

fn parse_room(fields: &[&str], line: usize) -> Result<Location, ParseError> {
    let coord = |field: &str| Coord::from_str(field).map_err(|_| ParseError::BadRoom { line });
    Ok(Location(coord(fields[1])?, coord(fields[2])?))
}

fn parse_tunnel(text: &str, line: usize) -> Result<(&str, &str), ParseError> {
    match text.split_once('-') {
        Some((a, b)) if !a.is_empty() && !b.is_empty() && !b.contains('-') => Ok((a, b)),
        _ => Err(ParseError::BadTunnel { line }),
    }
}

/// Read a farm from its text description, validating it along the way.
pub fn parse_farm(input: &str) -> Result<Farm, ParseError> {
    let mut lines = input.lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty());

    let (line, text) = lines.find(|(_, text)| !text.starts_with('#')).ok_or(ParseError::Empty)?;
    let agents = usize::from_str(text).ok()
        .and_then(NonZero::new)
        .ok_or(ParseError::BadAgentCount { line })?;
    let mut builder = FarmBuilder::with_agents(agents);

    let mut pending: Option<(usize, Directive)> = None;
    let mut in_tunnels = false;
    for (line, text) in lines {
        if let Some(directive) = parse_directive(text) {
            if let Some((line, _)) = pending {
                return Err(ParseError::DanglingDirective { line });
            }
            pending = Some((line, directive));
            continue;
        }
        if text.starts_with('#') {
            continue;
        }

        let fields = text.split_whitespace().collect_vec();
        match fields.len() {
            3 => {
                if in_tunnels {
                    return Err(ParseError::RoomAfterTunnels { line });
                }
                let location = parse_room(&fields, line)?;
                let role = pending.take().map(|(_, directive)| Role::from(directive)).unwrap_or_default();
                trace!(name = fields[0], %role, line, "room");
                builder.add_room_as(fields[0], location, role);
            }
            1 if text.contains('-') => {
                if let Some((line, _)) = pending {
                    return Err(ParseError::DanglingDirective { line });
                }
                let (a, b) = parse_tunnel(text, line)?;
                in_tunnels = true;
                builder.add_tunnel(a, b);
            }
            _ if in_tunnels => return Err(ParseError::BadTunnel { line }),
            _ => return Err(ParseError::BadRoom { line }),
        }
    }

    if let Some((line, _)) = pending {
        return Err(ParseError::DanglingDirective { line });
    }
    builder.build().map_err(ParseError::Invalid)
}
