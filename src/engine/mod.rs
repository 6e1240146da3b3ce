//! The snake simulation: movement, collisions, growth, food, and speed-ups.
//!
//! [`GameEngine`] owns the state of the current run and talks to the outside
//! world only through the collaborators it is built with: a random number
//! generator for food placement, a [`HighScoreStore`], a [`TickSource`] that
//! decides when [`GameEngine::tick()`] gets called, and a [`SnapshotSink`]
//! that receives a [`Snapshot`] after every change.
mod direction;
mod snake;
pub(crate) use self::direction::Direction;
use self::snake::Snake;
use crate::consts;
use crate::highscore::HighScoreStore;
use crate::ticker::TickSource;
use log::{debug, info, warn};
use rand::Rng;
use ratatui::layout::Position;
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum GameState {
    /// No run has been started yet
    #[default]
    Idle,
    Playing,
    /// The last run ended in a collision
    GameOver,
}

/// Everything a renderer needs to draw the current run
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    /// The snake's cells, head first
    pub(crate) snake: Vec<Position>,
    pub(crate) food: Position,
    pub(crate) direction: Direction,
    pub(crate) score: u32,
    pub(crate) speed: u32,
    pub(crate) high_score: u32,
    pub(crate) state: GameState,
}

/// Receiver for the snapshots emitted after `start()` and every `tick()`
pub(crate) trait SnapshotSink {
    fn show(&mut self, snapshot: Snapshot);
}

/// What happens to the tick schedule when the speed level goes up
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SpeedUpPolicy {
    /// Cancel the schedule and start a new one at the faster interval.  Any
    /// time already waited toward the next tick is lost.
    #[default]
    Restart,

    /// Shorten the live schedule's interval, counting the time already
    /// waited toward the first tick at the new speed
    CarryOver,
}

#[derive(Debug)]
pub(crate) struct GameEngine<R, H, T: TickSource, V> {
    rng: R,
    store: H,
    ticker: T,
    view: V,
    policy: SpeedUpPolicy,
    state: GameState,
    high_score: u32,
    /// The current or most recent run; `None` until the first `start()`
    run: Option<Run>,
    /// The live tick schedule, if any
    tick_handle: Option<T::Handle>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Run {
    snake: Snake,
    food: Position,
    /// The heading used for the most recent move
    direction: Direction,
    /// The heading to use for the next move
    pending: Direction,
    score: u32,
    speed: u32,
}

impl<R: Rng, H: HighScoreStore, T: TickSource, V: SnapshotSink> GameEngine<R, H, T, V> {
    /// Create an idle engine.  The high score is read from `store` here and
    /// nowhere else.
    pub(crate) fn new(rng: R, mut store: H, ticker: T, view: V, policy: SpeedUpPolicy) -> Self {
        let high_score = match store.read_high_score() {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                warn!("{:#}", anyhow::Error::new(e));
                0
            }
        };
        GameEngine {
            rng,
            store,
            ticker,
            view,
            policy,
            state: GameState::Idle,
            high_score,
            run: None,
            tick_handle: None,
        }
    }

    /// Begin a fresh run, discarding whatever run came before
    pub(crate) fn start(&mut self) {
        self.cancel_ticks();
        let snake = Snake::new(consts::SNAKE_START);
        let food = place_food(&mut self.rng, &snake);
        self.run = Some(Run {
            snake,
            food,
            direction: consts::INITIAL_DIRECTION,
            pending: consts::INITIAL_DIRECTION,
            score: 0,
            speed: 1,
        });
        self.state = GameState::Playing;
        self.tick_handle = Some(self.ticker.schedule(tick_interval(1)));
        info!("Starting new run; high score is {}", self.high_score);
        self.emit();
    }

    /// Request that the snake head in `direction` on the next tick.
    ///
    /// Ignored unless a run is in progress or if `direction` would turn the
    /// snake straight back on itself.  Later requests before the same tick
    /// replace earlier ones.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if !direction.is_reverse_of(run.direction) {
            run.pending = direction;
        }
    }

    /// Advance the simulation by one step
    pub(crate) fn tick(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.direction = run.pending;
        let target = run.direction.advance(run.snake.head(), consts::GRID_SIZE);
        let eating = target == Some(run.food);
        let Some(head) = target.filter(|&p| !run.snake.would_bite(p, eating)) else {
            self.game_over();
            return;
        };
        run.snake.advance(head, eating);
        if eating {
            run.score += 1;
            run.food = place_food(&mut self.rng, &run.snake);
            if run.score % consts::SPEED_UP_EVERY == 0 {
                run.speed += 1;
                let speed = run.speed;
                self.speed_up(speed);
            }
        }
        self.emit();
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        self.cancel_ticks();
        let score = self.run.as_ref().map_or(0, |run| run.score);
        info!("Game over with a score of {score}");
        if score > self.high_score {
            info!("New high score: {score} (previously {})", self.high_score);
            self.high_score = score;
            if let Err(e) = self.store.write_high_score(score) {
                warn!("{:#}", anyhow::Error::new(e));
            }
        }
        self.emit();
    }

    fn speed_up(&mut self, speed: u32) {
        let interval = tick_interval(speed);
        debug!("Speed level is now {speed}; ticking every {interval:?}");
        match (self.policy, self.tick_handle) {
            (SpeedUpPolicy::CarryOver, Some(handle)) => self.ticker.retime(handle, interval),
            _ => {
                self.cancel_ticks();
                self.tick_handle = Some(self.ticker.schedule(interval));
            }
        }
    }

    fn cancel_ticks(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.ticker.cancel(handle);
        }
    }

    fn emit(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.view.show(snapshot);
        }
    }
}

impl<R, H, T: TickSource, V> GameEngine<R, H, T, V> {
    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    pub(crate) fn store(&self) -> &H {
        &self.store
    }

    pub(crate) fn ticker(&self) -> &T {
        &self.ticker
    }

    pub(crate) fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub(crate) fn view(&self) -> &V {
        &self.view
    }

    /// Return the state of the current or most recent run, or `None` if no
    /// run has been started
    pub(crate) fn snapshot(&self) -> Option<Snapshot> {
        self.run.as_ref().map(|run| Snapshot {
            snake: run.snake.cells().collect(),
            food: run.food,
            direction: run.direction,
            score: run.score,
            speed: run.speed,
            high_score: self.high_score,
            state: self.state,
        })
    }
}

/// Return the time between ticks at the given speed level
pub(crate) fn tick_interval(speed: u32) -> Duration {
    let rate = consts::BASE_TICK_RATE + consts::TICK_RATE_PER_SPEED * u64::from(speed);
    Duration::from_millis((1000 / rate).max(1))
}

/// Pick a cell for the food uniformly at random from those not covered by
/// `snake`.
///
/// The snake must leave at least one cell of the grid free; otherwise this
/// never returns.
fn place_food<R: Rng>(rng: &mut R, snake: &Snake) -> Position {
    debug_assert!(
        snake.len() < usize::from(consts::GRID_SIZE) * usize::from(consts::GRID_SIZE),
        "snake covers the whole grid"
    );
    loop {
        let pos = Position {
            x: rng.random_range(0..consts::GRID_SIZE),
            y: rng.random_range(0..consts::GRID_SIZE),
        };
        if !snake.contains(pos) {
            return pos;
        }
    }
}
