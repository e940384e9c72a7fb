//! Scoring module - score, line and level tracking
//!
//! Score and lines only ever grow; level is a pure function of lines
//! (`lines / 10 + 1`) and therefore monotonic too. Score saturates at the
//! 8-digit display ceiling instead of wrapping. Line clears are worth
//! `base(n) * level` where the level is the one reached *after* the clear
//! is counted - a clear that triggers a level-up already pays out at the
//! new level.

use blockfall_types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, HARD_DROP_POINTS, LINE_SCORES, SCORE_CEILING,
    SOFT_DROP_POINTS,
};

/// Result of crediting a line clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClearOutcome {
    /// Points awarded for this clear (after the ceiling clamp)
    pub awarded: u32,
    /// `(old, new)` when the clear pushed the level up
    pub level_up: Option<(u32, u32)>,
}

/// Monotonic score/lines/level counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    lines: u32,
    level: u32,
}

impl ScoreBoard {
    /// Fresh tracker: zero score and lines, level 1
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Credit a clear of `n` lines (1-4)
    ///
    /// Recomputes the level first, then awards `base(n) * level` with the
    /// recomputed level. Reports the level transition so the session can
    /// surface it as an observable event.
    pub fn add_lines(&mut self, n: usize) -> LineClearOutcome {
        if n == 0 || n > 4 {
            return LineClearOutcome::default();
        }

        let prior_level = self.level;
        self.lines += n as u32;
        self.level = self.lines / 10 + 1;

        let before = self.score;
        self.add_points(LINE_SCORES[n].saturating_mul(self.level));

        LineClearOutcome {
            awarded: self.score - before,
            level_up: (self.level > prior_level).then_some((prior_level, self.level)),
        }
    }

    /// +1 point per cell descended via a manual soft drop
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.add_points(cells.saturating_mul(SOFT_DROP_POINTS));
    }

    /// +2 points per cell descended via hard drop
    ///
    /// `cells` is the distance actually traveled (rows moved, not rows
    /// moved plus the resting row).
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.add_points(cells.saturating_mul(HARD_DROP_POINTS));
    }

    /// Saturating add, clamped at the display ceiling
    fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points).min(SCORE_CEILING);
    }

    /// Zero score and lines, return to level 1
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Score as a zero-padded 8-digit string
    pub fn score_text(&self) -> String {
        format!("{:08}", self.score)
    }

    /// Level as a zero-padded 2-digit string
    pub fn level_text(&self) -> String {
        format!("{:02}", self.level)
    }

    /// Lines as a zero-padded 3-digit string
    pub fn lines_text(&self) -> String {
        format!("{:03}", self.lines)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Gravity tick period in milliseconds for a level
///
/// Levels 1-9 step down from 1000ms by 100ms per level; levels 10-19 hold
/// at 100ms; level 20 and above at 50ms. The external difficulty factor
/// scales the result multiplicatively, then the hard 30ms floor applies.
pub fn drop_interval_ms(level: u32, difficulty: f64) -> u32 {
    let base = match level {
        0..=9 => (BASE_DROP_MS - level.saturating_sub(1) * 100).max(100),
        10..=19 => 100,
        _ => 50,
    };

    let scaled = (base as f64 * difficulty) as u32;
    scaled.max(DROP_INTERVAL_MIN_MS)
}
