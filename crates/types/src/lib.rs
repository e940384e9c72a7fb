//! Shared data types and constants for the rules engine
//!
//! Pure data structures with no external dependencies, usable from any
//! collaborator (renderer, input dispatch, scheduler, headless harness).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19), row 0 at the top
//! - **Spawn origin**: (4, 1), piece cells land in the top two rows
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LOCK_DELAY_MS` | 500 | Grace period before a resting piece locks |
//! | `MAX_FRAME_DELTA_MS` | 250 | Frame deltas above this are dropped |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_INTERVAL_MIN_MS` | 30 | Hard gravity floor after difficulty scaling |
//!
//! # Gravity by Level
//!
//! Gravity speeds up stepwise with level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1-9 | max(100, 1000 - (level-1)*100) |
//! | 10-19 | 100ms |
//! | 20+ | 50ms |
//!
//! An external difficulty factor scales the interval multiplicatively; the
//! result never goes below `DROP_INTERVAL_MIN_MS`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, GameCommand, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, parsed);
//!
//! let rotation = Rotation::North;
//! assert_eq!(rotation.rotate_cw(), Rotation::East);
//!
//! let command = GameCommand::from_str("moveLeft").unwrap();
//! assert_eq!(command, GameCommand::MoveLeft);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn origin x for a freshly drawn piece
pub const SPAWN_X: i8 = 4;

/// Spawn origin y for a freshly drawn piece
pub const SPAWN_Y: i8 = 1;

/// Base gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Grace period before a resting piece locks (500ms)
///
/// Every successful translation or rotation restarts this window, with no
/// reset cap: a piece can be stalled on the floor indefinitely by repeated
/// taps. That behavior is intended and load-bearing for game feel.
pub const LOCK_DELAY_MS: u32 = 500;

/// Frame deltas above this are dropped for that call (250ms)
///
/// Protects against an avalanche of simulated gravity steps when the host
/// was backgrounded and hands the core a huge elapsed time.
pub const MAX_FRAME_DELTA_MS: u32 = 250;

/// Hard gravity floor in milliseconds, applied after difficulty scaling
pub const DROP_INTERVAL_MIN_MS: u32 = 30;

/// Score ceiling - the widest value an 8-digit counter can show
pub const SCORE_CEILING: u32 = 99_999_999;

/// Line clear scoring table: base points for clearing N lines
///
/// Index by line count (1-4); index 0 is unused. The base is multiplied by
/// the level reached *after* the clear's level recompute.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell descended via a manual soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell descended via hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct four-cell shape:
/// - **I**: horizontal bar
/// - **O**: 2x2 square (rotation-invariant)
/// - **T**: T-shaped
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order (one bag's worth)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Non-zero cell code for grid snapshots (1-7; 0 means empty)
    pub fn code(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
///
/// The clockwise cycle is North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North (0-3)
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Session lifecycle states
///
/// `Menu → Playing ⇄ Paused`, `Playing → GameOver`. The only way out of
/// `GameOver` is a fresh `start`, which resets everything and re-enters
/// `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl GamePhase {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Discrete player commands accepted by the session
///
/// Both human input dispatch and headless harnesses feed these. Each
/// command reports acceptance as a plain boolean, never an error: rejected
/// moves are expected and frequent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (scored), locking immediately if blocked
    SoftDrop,
    /// Instantly drop piece to its resting row and lock
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    RotateCw,
    /// Rotate piece 90° counter-clockwise with wall kicks
    RotateCcw,
    /// Bank the current piece, swapping with any previously held one
    Hold,
    /// Toggle Playing ⇄ Paused
    TogglePause,
    /// Start a fresh session (from the menu or after game over)
    Start,
}

impl GameCommand {
    /// Parse command from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "hold" => Some(GameCommand::Hold),
            "togglepause" => Some(GameCommand::TogglePause),
            "start" => Some(GameCommand::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::Hold => "hold",
            GameCommand::TogglePause => "togglePause",
            GameCommand::Start => "start",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty cell
/// - `Some(PieceKind)`: cell filled with the given piece kind
pub type Cell = Option<PieceKind>;
