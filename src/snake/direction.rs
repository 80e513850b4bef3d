use ratatui::layout::{Position, Size};

/// Direction of travel on the grid.  `y` grows downwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit vector `(dx, dy)` for this direction
    pub(crate) fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that cell lies outside of `[0, grid.width) × [0, grid.height)`.
    pub(crate) fn advance(self, pos: Position, grid: Size) -> Option<Position> {
        let (dx, dy) = self.vector();
        let x = u16::try_from(i32::from(pos.x) + dx)
            .ok()
            .filter(|&x| x < grid.width)?;
        let y = u16::try_from(i32::from(pos.y) + dy)
            .ok()
            .filter(|&y| y < grid.height)?;
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
