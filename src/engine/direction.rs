use ratatui::layout::Position;

/// A heading on the grid.  `y` grows downwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit step `(dx, dy)` taken when moving in this direction
    pub(crate) fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the cell one step from `pos` in this direction on a square grid
    /// with `side` cells per side, or `None` if that step leaves the grid.
    pub(crate) fn advance(self, pos: Position, side: u16) -> Option<Position> {
        let (dx, dy) = self.delta();
        let x = pos.x.checked_add_signed(dx).filter(|&x| x < side)?;
        let y = pos.y.checked_add_signed(dy).filter(|&y| y < side)?;
        Some(Position { x, y })
    }

    /// True if `other`'s delta is the exact negation of this one's
    pub(crate) fn is_reverse_of(self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx == -ox && dy == -oy
    }
}
