//! Snapshot module - a flat, render-ready view of the session
//!
//! Collaborators (renderers, persistence, test harnesses) consume the core
//! through value snapshots instead of reaching into live state. The board
//! is encoded as a u8 matrix (0 = empty, 1-7 = piece kind code) and
//! [`GameState::snapshot_into`] refreshes a caller-owned buffer without
//! allocating.

use blockfall_types::{GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

use crate::game_state::{GameState, Tetromino};

/// Active piece as plain values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(piece: Tetromino) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Value snapshot of everything a frame needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    /// Settled cells, row-major, 0 = empty, 1-7 = piece kind code
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Origin the active piece would occupy after a hard drop
    pub ghost: Option<(i8, i8)>,
    pub hold: Option<PieceKind>,
    pub next: PieceKind,
    pub can_hold: bool,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            next: PieceKind::I,
            can_hold: true,
            phase: GamePhase::Menu,
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}

impl GameState {
    /// Refresh a caller-owned snapshot buffer in place
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board().write_u8_grid(&mut out.board);
        out.active = self.active().copied().map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.hold = self.hold_piece();
        out.next = self.next_piece();
        out.can_hold = self.can_hold();
        out.phase = self.phase();
        out.score = self.score();
        out.level = self.level();
        out.lines = self.lines();
    }

    /// Build a fresh snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
