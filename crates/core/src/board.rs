//! Board module - manages the playfield grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece
//! kind. Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) with x in 0..9 (left to right), y in 0..19 (top to
//! bottom). The board is the single authority on move legality: every
//! movement, rotation and spawn decision routes through [`Board::collides`].

use arrayvec::ArrayVec;

use blockfall_types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::pieces::PieceShape;

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// Row indices cleared by a single lock, bottom-bounded by the piece size
pub type ClearedRows = ArrayVec<usize, 4>;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a shape at origin (x, y) overlaps a filled cell or
    /// extends outside the grid
    ///
    /// The single legality test for the whole engine.
    pub fn collides(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape
            .iter()
            .any(|&(dx, dy)| !self.is_valid(x + dx, y + dy))
    }

    /// Top-out test at spawn time
    ///
    /// Same predicate as [`Board::collides`], under the name that signals a
    /// terminal session state rather than a rejected move.
    pub fn is_top_out(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        self.collides(shape, x, y)
    }

    /// Write a shape's kind into every occupied cell
    ///
    /// No bounds or overlap check: the caller must have verified the
    /// position via [`Board::collides`] already. Out-of-grid cells are
    /// silently skipped so the grid invariant can never break.
    pub fn place(&mut self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) {
        for &(dx, dy) in shape.iter() {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Row indices where every cell is filled, in ascending order
    pub fn full_rows(&self) -> ClearedRows {
        let mut rows = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) && !rows.is_full() {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove the given rows, shifting rows above each removed row down by
    /// one and inserting empty rows at the top
    ///
    /// The final grid is the same regardless of the order the rows are
    /// passed in: removal happens top-first, which keeps the remaining
    /// indices stable (deleting a row only displaces rows above it).
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let mut sorted: ClearedRows = rows.iter().copied().take(4).collect();
        sorted.sort_unstable();
        for &y in sorted.iter() {
            self.remove_row(y);
        }
    }

    /// Remove a single row and shift all rows above down by one
    fn remove_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges safely.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Rows a shape at (x, y) can descend before the next step collides
    ///
    /// The returned distance composed with one more downward step always
    /// collides; the position at the returned distance itself never does.
    pub fn drop_distance(&self, shape: &PieceShape, x: i8, y: i8) -> i8 {
        let mut distance: i8 = 0;
        while !self.collides(shape, x, y + distance + 1) {
            distance += 1;
        }
        distance
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Encode the grid into a u8 matrix (0 = empty, 1-7 = piece kind code)
    ///
    /// Allocation-free write into a caller-owned snapshot buffer.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..width {
                out[y][x] = match self.cells[y * width + x] {
                    Some(kind) => kind.code(),
                    None => 0,
                };
            }
        }
    }

    /// Clear the grid to all-empty
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                let start = y * width;
                let end = start + width;
                self.cells[start..end].to_vec()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_shape() -> PieceShape {
        [(0, 0), (1, 0), (0, 1), (1, 1)]
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_out_of_bounds() {
        let board = Board::new();
        let shape = square_shape();

        // In bounds on an empty board: no collision.
        assert!(!board.collides(&shape, 4, 4));

        assert!(board.collides(&shape, -1, 0));
        assert!(board.collides(&shape, 9, 0)); // right cell at x = 10
        assert!(board.collides(&shape, 0, -1));
        assert!(board.collides(&shape, 0, 19)); // bottom cells at y = 20
    }

    #[test]
    fn test_collides_with_filled_cell() {
        let mut board = Board::new();
        board.set(5, 5, Some(PieceKind::T));

        let shape = square_shape();
        assert!(board.collides(&shape, 5, 5));
        assert!(board.collides(&shape, 4, 4)); // (1,1) offset lands on (5,5)
        assert!(!board.collides(&shape, 6, 6));
    }

    #[test]
    fn test_place_writes_kind() {
        let mut board = Board::new();
        let shape = square_shape();

        board.place(&shape, 3, 5, PieceKind::O);

        assert_eq!(board.get(3, 5), Some(Some(PieceKind::O)));
        assert_eq!(board.get(4, 5), Some(Some(PieceKind::O)));
        assert_eq!(board.get(3, 6), Some(Some(PieceKind::O)));
        assert_eq!(board.get(4, 6), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_full_rows_ascending() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x as i8, 19, Some(PieceKind::I));
            board.set(x as i8, 10, Some(PieceKind::T));
        }

        let rows = board.full_rows();
        assert_eq!(rows.as_slice(), &[10, 19]);
    }

    #[test]
    fn test_clear_rows_shifts_down() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x as i8, 19, Some(PieceKind::I));
        }
        board.set(0, 17, Some(PieceKind::T));

        board.clear_rows(&[19]);

        // Marker fell one row, top row is empty, full row is gone.
        assert_eq!(board.get(0, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(0, 17), Some(None));
        assert!(!board.is_row_full(19));
    }

    #[test]
    fn test_clear_rows_order_independent() {
        let make_board = || {
            let mut board = Board::new();
            for x in 0..BOARD_WIDTH {
                board.set(x as i8, 18, Some(PieceKind::I));
                board.set(x as i8, 19, Some(PieceKind::O));
            }
            board.set(0, 17, Some(PieceKind::T));
            board
        };

        let mut ascending = make_board();
        ascending.clear_rows(&[18, 19]);

        let mut descending = make_board();
        descending.clear_rows(&[19, 18]);

        assert_eq!(ascending, descending);
        // Marker dropped by two.
        assert_eq!(ascending.get(0, 19), Some(Some(PieceKind::T)));
    }

    #[test]
    fn test_clear_rows_nonadjacent() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x as i8, 5, Some(PieceKind::T));
            board.set(x as i8, 10, Some(PieceKind::I));
            board.set(x as i8, 15, Some(PieceKind::O));
        }
        board.set(0, 4, Some(PieceKind::J));
        board.set(0, 9, Some(PieceKind::L));
        board.set(0, 14, Some(PieceKind::S));

        let rows = board.full_rows();
        assert_eq!(rows.as_slice(), &[5, 10, 15]);
        board.clear_rows(&rows);

        // Each marker drops by the number of cleared rows below it.
        // J at 4 has 3 cleared rows below it -> lands at 7.
        assert_eq!(board.get(0, 7), Some(Some(PieceKind::J)));
        // L at 9 has 2 cleared rows below -> 11.
        assert_eq!(board.get(0, 11), Some(Some(PieceKind::L)));
        // S at 14 has 1 cleared row below -> 15.
        assert_eq!(board.get(0, 15), Some(Some(PieceKind::S)));
    }

    #[test]
    fn test_drop_distance_properties() {
        let mut board = Board::new();
        board.set(4, 15, Some(PieceKind::Z));

        let shape = square_shape();
        let d = board.drop_distance(&shape, 4, 0);

        // Resting position never collides; one more step always does.
        assert!(!board.collides(&shape, 4, d));
        assert!(board.collides(&shape, 4, d + 1));
        // Square spans y..y+1, obstacle at 15 -> bottom row rests at 14.
        assert_eq!(d, 13);
    }

    #[test]
    fn test_drop_distance_empty_board() {
        let board = Board::new();
        let shape = square_shape();
        // Bottom cells end at y + 1; floor at 19.
        assert_eq!(board.drop_distance(&shape, 0, 0), 18);
    }

    #[test]
    fn test_is_top_out_matches_collides() {
        let mut board = Board::new();
        let shape = square_shape();
        assert!(!board.is_top_out(&shape, 4, 0));

        board.set(4, 0, Some(PieceKind::I));
        assert!(board.is_top_out(&shape, 4, 0));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH {
            board.set(x as i8, 5, Some(PieceKind::T));
        }

        board.reset();

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                assert_eq!(board.get(x, y), Some(None));
            }
        }
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);

        assert_eq!(grid[0][0], PieceKind::I.code());
        assert_eq!(grid[10][5], PieceKind::T.code());
        assert_eq!(grid[0][1], 0);
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 20];
        cells_2d[5][3] = Some(PieceKind::O);
        cells_2d[10][7] = Some(PieceKind::L);

        let board = Board::from_cells(cells_2d.clone());
        let back_2d = board.to_cells();

        assert_eq!(cells_2d, back_2d);
    }
}
