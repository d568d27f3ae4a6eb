use std::fmt::{Display, Formatter};

pub(crate) type Coord = i64;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// The `(x, y)` coordinates declared for a room.
///
/// Coordinates carry no geometry; they only have to be unique across a farm.
pub struct Location(pub Coord, pub Coord);

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}
