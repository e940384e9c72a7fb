//! Game state module - the session state machine
//!
//! Owns the board, the active piece, the bag, the hold slot and the score
//! tracker, and sequences every mutation. Commands are synchronous and
//! return plain booleans: a rejected move is ordinary, not an error. Time
//! enters through a single [`GameState::advance`] call per frame; there is
//! no internal concurrency.
//!
//! Lifecycle: `Menu -> Playing <-> Paused`, `Playing -> GameOver`. The only
//! way out of `GameOver` is a fresh [`GameState::start`].

use std::collections::VecDeque;

use blockfall_types::{GameCommand, GamePhase, PieceKind, Rotation, LOCK_DELAY_MS, MAX_FRAME_DELTA_MS};

use crate::board::{Board, ClearedRows};
use crate::pieces::{self, PieceShape, SPAWN_POSITION};
use crate::rng::SevenBag;
use crate::scoring::{drop_interval_ms, ScoreBoard};

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Fresh piece at the spawn position, rotation North
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Cell offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        pieces::get_shape(self.kind, self.rotation)
    }
}

/// Observable session events, drained via [`GameState::poll_event`]
///
/// Informational only: correctness never depends on whether a collaborator
/// drains the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The active piece was written into the board
    PieceLocked,
    /// One or more rows were cleared by the last lock
    LinesCleared { count: u32, rows: ClearedRows },
    /// The line total crossed a level threshold
    LevelUp { from: u32, to: u32 },
    /// A freshly spawned piece collided immediately
    GameOver,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    hold: Option<PieceKind>,
    bag: SevenBag,
    score_board: ScoreBoard,
    phase: GamePhase,
    /// Milliseconds accumulated toward the next automatic gravity step
    drop_timer_ms: u32,
    /// Milliseconds the piece has rested without a successful move
    lock_timer_ms: u32,
    /// One hold per spawn
    can_hold: bool,
    /// Set for one frame after a lock that cleared rows; input dispatch
    /// checks it to suppress piece commands during the clear animation
    animation_locking: bool,
    /// External speed factor applied to the gravity interval
    difficulty: f64,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// New session in the menu phase, nothing spawned yet
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            bag: SevenBag::new(seed),
            score_board: ScoreBoard::new(),
            phase: GamePhase::Menu,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            can_hold: true,
            animation_locking: false,
            difficulty: 1.0,
            events: VecDeque::new(),
        }
    }

    /// Start (or restart) a session: full reset, then spawn the first piece
    ///
    /// Valid from `Menu` and `GameOver`. Returns false while a session is
    /// underway.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            return false;
        }

        self.board.reset();
        self.score_board.reset();
        self.bag.reset();
        self.hold = None;
        self.events.clear();
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.animation_locking = false;
        self.phase = GamePhase::Playing;
        self.spawn_piece();
        true
    }

    /// Draw from the bag and place a fresh piece at spawn
    ///
    /// A spawn that collides immediately is the terminal condition: the
    /// piece is not placed and the session transitions to `GameOver`.
    fn spawn_piece(&mut self) {
        let piece = Tetromino::new(self.bag.next());

        if self.board.is_top_out(&piece.shape(), piece.x, piece.y) {
            self.active = None;
            self.phase = GamePhase::GameOver;
            self.events.push_back(GameEvent::GameOver);
            return;
        }

        self.active = Some(piece);
        self.can_hold = true;
        self.lock_timer_ms = 0;
    }

    /// Piece commands require a live piece and no clear animation in flight
    fn accepts_piece_commands(&self) -> bool {
        self.phase == GamePhase::Playing && self.active.is_some() && !self.animation_locking
    }

    /// Translate the active piece by (dx, dy) if the target is legal
    ///
    /// Every successful translation resets the lock-delay timer, which
    /// permits indefinite stalling at the bottom via repeated taps.
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let (new_x, new_y) = (piece.x + dx, piece.y + dy);
        if self.board.collides(&piece.shape(), new_x, new_y) {
            return false;
        }

        self.active = Some(Tetromino {
            x: new_x,
            y: new_y,
            ..piece
        });
        self.lock_timer_ms = 0;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.accepts_piece_commands() && self.shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.accepts_piece_commands() && self.shift(1, 0)
    }

    /// One manual downward step
    ///
    /// Awards one soft-drop point on success. When the step is blocked the
    /// piece locks immediately instead of waiting out the lock delay; the
    /// command is reported as handled in both cases.
    pub fn soft_drop(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }

        if self.shift(0, 1) {
            self.score_board.add_soft_drop(1);
        } else {
            self.lock_piece();
        }
        true
    }

    /// Drop straight to the resting row and lock, 2 points per cell
    ///
    /// Bypasses the lock-delay timer entirely.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let distance = self.board.drop_distance(&piece.shape(), piece.x, piece.y);
        self.active = Some(Tetromino {
            y: piece.y + distance,
            ..piece
        });
        self.score_board.add_hard_drop(distance as u32);
        self.lock_piece();
        true
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.accepts_piece_commands() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let result = pieces::try_rotate(
            piece.kind,
            piece.rotation,
            piece.x,
            piece.y,
            clockwise,
            |x, y| self.board.is_valid(x, y),
        );

        match result {
            Some((_, rotation, (dx, dy))) => {
                self.active = Some(Tetromino {
                    rotation,
                    x: piece.x + dx,
                    y: piece.y + dy,
                    ..piece
                });
                self.lock_timer_ms = 0;
                true
            }
            None => false,
        }
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false)
    }

    /// Bank the active piece, once per spawn
    ///
    /// Empty slot: store the active kind and draw from the bag. Occupied
    /// slot: swap, with the held kind re-entering fresh at spawn (position
    /// and rotation are never carried through hold). A swap that collides
    /// at spawn ends the session just like a spawn would.
    pub fn hold(&mut self) -> bool {
        if !self.accepts_piece_commands() || !self.can_hold {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        match self.hold.replace(piece.kind) {
            Some(held) => {
                let swapped = Tetromino::new(held);
                if self.board.is_top_out(&swapped.shape(), swapped.x, swapped.y) {
                    self.active = None;
                    self.phase = GamePhase::GameOver;
                    self.events.push_back(GameEvent::GameOver);
                } else {
                    self.active = Some(swapped);
                    self.lock_timer_ms = 0;
                }
            }
            None => {
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Toggle Playing <-> Paused; no effect in Menu or GameOver
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                true
            }
            _ => false,
        }
    }

    /// Dispatch a single command
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::RotateCw => self.rotate_cw(),
            GameCommand::RotateCcw => self.rotate_ccw(),
            GameCommand::Hold => self.hold(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Start => self.start(),
        }
    }

    /// Write the active piece into the board, clear rows, score, respawn
    ///
    /// The ordering is the whole contract: placement must be visible to
    /// `full_rows` before clearing, and clearing must complete before the
    /// next spawn's top-out check.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        self.board
            .place(&piece.shape(), piece.x, piece.y, piece.kind);
        self.events.push_back(GameEvent::PieceLocked);

        let rows = self.board.full_rows();
        if !rows.is_empty() {
            self.board.clear_rows(&rows);
            let outcome = self.score_board.add_lines(rows.len());
            self.events.push_back(GameEvent::LinesCleared {
                count: rows.len() as u32,
                rows,
            });
            if let Some((from, to)) = outcome.level_up {
                self.events.push_back(GameEvent::LevelUp { from, to });
            }
            self.animation_locking = true;
        }

        self.spawn_piece();
    }

    /// Advance simulated time by `delta_ms`
    ///
    /// Ignored outside Playing or without an active piece. An oversized
    /// delta (a backgrounded host, a debugger pause) is dropped for that
    /// call rather than replayed as an avalanche of gravity steps.
    ///
    /// The gravity accumulator always runs and fires exactly one unscored
    /// downward step per elapsed interval boundary. The lock-delay
    /// accumulator runs only while the piece is resting on support; it is
    /// zeroed by any successful move and forces a lock at the threshold.
    pub fn advance(&mut self, delta_ms: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.animation_locking = false;

        if self.active.is_none() || delta_ms > MAX_FRAME_DELTA_MS {
            return;
        }

        self.drop_timer_ms += delta_ms;
        if self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms = 0;
            // Automatic step: no soft-drop points.
            self.shift(0, 1);
        }
        if self.active.is_none() {
            return;
        }

        if self.is_grounded() {
            self.lock_timer_ms += delta_ms;
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_piece();
            }
        } else {
            self.lock_timer_ms = 0;
        }
    }

    /// Whether the active piece is resting on the floor or the stack
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(piece) => self.board.collides(&piece.shape(), piece.x, piece.y + 1),
            None => false,
        }
    }

    /// Origin the active piece would occupy after a hard drop
    pub fn ghost_position(&self) -> Option<(i8, i8)> {
        let piece = self.active?;
        let distance = self.board.drop_distance(&piece.shape(), piece.x, piece.y);
        Some((piece.x, piece.y + distance))
    }

    /// Pop the oldest pending event, if any
    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted setups (garbage rows, puzzles)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    /// Shape of the active piece at its current rotation
    pub fn active_shape(&self) -> Option<PieceShape> {
        self.active.map(|piece| piece.shape())
    }

    /// The kind shown in the "next" preview
    pub fn next_piece(&self) -> PieceKind {
        self.bag.peek()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_animation_locking(&self) -> bool {
        self.animation_locking
    }

    pub fn score(&self) -> u32 {
        self.score_board.score()
    }

    pub fn lines(&self) -> u32 {
        self.score_board.lines()
    }

    pub fn level(&self) -> u32 {
        self.score_board.level()
    }

    pub fn score_text(&self) -> String {
        self.score_board.score_text()
    }

    pub fn level_text(&self) -> String {
        self.score_board.level_text()
    }

    pub fn lines_text(&self) -> String {
        self.score_board.lines_text()
    }

    /// Current gravity interval under the session's difficulty factor
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.score_board.level(), self.difficulty)
    }

    /// Set the external speed factor; non-positive values are ignored
    pub fn set_difficulty(&mut self, factor: f64) {
        if factor > 0.0 {
            self.difficulty = factor;
        }
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
