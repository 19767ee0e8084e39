//! Integer cell coordinates for maze-space operations

/// A 2D cell coordinate in maze space
///
/// `x` indexes columns (increasing rightward), `y` indexes rows (increasing
/// downward). Coordinates are plain values and hash by component, so they
/// serve directly as map and set keys during pathfinding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl Coord {
    /// Create a coordinate from column and row indices
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub const fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Coordinate displaced by the given deltas
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four axis-aligned neighbors in north, east, south, west order
    pub const fn neighbors4(self) -> [Self; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }

    /// Whether another coordinate differs by exactly one step on one axis
    pub const fn is_adjacent4(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
