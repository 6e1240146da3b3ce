use crate::consts;
use crate::engine::{Direction, GameState, Snapshot, SnapshotSink};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// A [`SnapshotSink`] that holds on to the most recent snapshot until the
/// next frame is drawn
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LatestSnapshot(Option<Snapshot>);

impl LatestSnapshot {
    pub(crate) fn latest(&self) -> Option<&Snapshot> {
        self.0.as_ref()
    }
}

impl SnapshotSink for LatestSnapshot {
    fn show(&mut self, snapshot: Snapshot) {
        self.0 = Some(snapshot);
    }
}

/// The game screen: score bar, board, and a line of instructions
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameScreen<'a> {
    /// Nothing has been played yet
    Idle { high_score: u32 },
    Run(&'a Snapshot),
}

impl GameScreen<'_> {
    fn state(self) -> GameState {
        match self {
            GameScreen::Idle { .. } => GameState::Idle,
            GameScreen::Run(snap) => snap.state,
        }
    }

    fn score_bar(self) -> String {
        let (score, speed, high_score) = match self {
            GameScreen::Idle { high_score } => (0, 1, high_score),
            GameScreen::Run(snap) => (snap.score, snap.speed, snap.high_score),
        };
        format!(" Score: {score}   Speed: {speed}   High Score: {high_score}")
    }

    fn message(self) -> Line<'static> {
        let key = |k: &'static str| Span::styled(k, consts::KEY_STYLE);
        match self.state() {
            GameState::Idle => Line::from_iter([
                Span::raw(" Press "),
                key("Space"),
                Span::raw(" to start, "),
                key("q"),
                Span::raw(" to quit"),
            ]),
            GameState::Playing => Line::from_iter([
                Span::raw(" Steer with the arrow keys, "),
                key("r"),
                Span::raw(" to restart, "),
                key("q"),
                Span::raw(" to quit"),
            ]),
            GameState::GameOver => Line::from_iter([
                Span::raw(" GAME OVER! Press "),
                key("Space"),
                Span::raw(" to play again, "),
                key("q"),
                Span::raw(" to quit"),
            ]),
        }
    }
}

impl Widget for GameScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(self.score_bar(), consts::SCORE_BAR_STYLE).render(score_area, buf);

        let block_area = center_rect(
            board_area,
            Size {
                width: consts::GRID_SIZE * consts::CELL_WIDTH + 2,
                height: consts::GRID_SIZE + 2,
            },
        );
        Block::bordered().render(block_area, buf);
        if let GameScreen::Run(snap) = self {
            let mut board = Canvas {
                area: block_area.inner(Margin::new(1, 1)),
                buf,
            };
            board.draw_cell(snap.food, consts::FOOD_GLYPH, consts::FOOD_STYLE);
            if let Some((&head, body)) = snap.snake.split_first() {
                for &p in body {
                    board.draw_cell(p, consts::SNAKE_BODY_GLYPH, consts::SNAKE_STYLE);
                }
                if snap.state == GameState::GameOver {
                    board.draw_cell(head, consts::COLLISION_GLYPH, consts::COLLISION_STYLE);
                } else {
                    board.draw_cell(head, head_glyph(snap.direction), consts::SNAKE_STYLE);
                }
            }
        }

        self.message().render(msg_area, buf);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_GLYPH,
        Direction::Down => consts::SNAKE_HEAD_DOWN_GLYPH,
        Direction::Left => consts::SNAKE_HEAD_LEFT_GLYPH,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_GLYPH,
    }
}

/// The board's interior, addressed in grid cells rather than terminal cells
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, glyph: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (ch, x) in glyph.chars().zip(x..) {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}
