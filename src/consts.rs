//! Assorted constants & hard-coded configuration
use crate::engine::Direction;
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};

/// Number of cells along each side of the square grid
pub(crate) const GRID_SIZE: u16 = 20;

/// Where the snake's single segment is placed at the start of a run
pub(crate) const SNAKE_START: Position = Position { x: 10, y: 10 };

/// The snake's heading at the start of a run
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Right;

/// The speed level goes up by one each time the score reaches a multiple of
/// this
pub(crate) const SPEED_UP_EVERY: u32 = 5;

/// Ticks per second before any speed levels are added
pub(crate) const BASE_TICK_RATE: u64 = 5;

/// Additional ticks per second for each speed level
pub(crate) const TICK_RATE_PER_SPEED: u64 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one grid cell, so that cells come
/// out roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_GLYPH: &str = "^^";

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_GLYPH: &str = "vv";

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_GLYPH: &str = "<<";

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_GLYPH: &str = ">>";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_GLYPH: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_GLYPH: &str = "()";

/// Glyph for the snake's head once it has crashed
pub(crate) const COLLISION_GLYPH: &str = "XX";

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_GLYPH`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
