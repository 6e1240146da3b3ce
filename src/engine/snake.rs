use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake's body on the grid
///
/// All positions are grid cells, with the origin at the top-left corner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake, from the neck (front) to the
    /// tip of the tail (back)
    pub(super) body: VecDeque<Position>,
}

impl Snake {
    /// Create a one-cell snake at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the number of cells the snake occupies
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Return whether any part of the snake lies on `pos`
    pub(super) fn contains(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Return the snake's cells, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Return whether moving the head onto `pos` would run into the body.
    ///
    /// Unless the snake is growing this tick, its tail moves out of the way at
    /// the same time and is not an obstacle.
    pub(super) fn would_bite(&self, pos: Position, growing: bool) -> bool {
        let obstacles = if growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        pos == self.head || self.body.iter().take(obstacles).any(|&p| p == pos)
    }

    /// Move the head to `pos`, dragging the body behind it.  When `grow` is
    /// true the tail stays put, lengthening the snake by one cell.
    pub(super) fn advance(&mut self, pos: Position, grow: bool) {
        self.body.push_front(self.head);
        self.head = pos;
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}
