//! Board tests - collision authority and line clearing

use blockfall::core::pieces::get_spawn_shape;
use blockfall::core::Board;
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(PieceKind::I));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_collides_at_every_edge() {
    let board = Board::new();

    // A single-cell probe against each out-of-bounds direction.
    for kind in PieceKind::ALL {
        let shape = get_spawn_shape(kind);
        let min_dx = shape.iter().map(|&(dx, _)| dx).min().unwrap();
        let max_dx = shape.iter().map(|&(dx, _)| dx).max().unwrap();
        let min_dy = shape.iter().map(|&(_, dy)| dy).min().unwrap();
        let max_dy = shape.iter().map(|&(_, dy)| dy).max().unwrap();

        assert!(board.collides(&shape, -1 - min_dx, 5));
        assert!(board.collides(&shape, BOARD_WIDTH as i8 - max_dx, 5));
        assert!(board.collides(&shape, 4, -1 - min_dy));
        assert!(board.collides(&shape, 4, BOARD_HEIGHT as i8 - max_dy));
    }
}

#[test]
fn test_collides_with_stack() {
    let mut board = Board::new();
    board.set(4, 10, Some(PieceKind::S));

    let shape = get_spawn_shape(PieceKind::O);
    // O occupies (x..x+1, y-1..y).
    assert!(board.collides(&shape, 4, 10));
    assert!(board.collides(&shape, 4, 11));
    assert!(board.collides(&shape, 3, 10));
    assert!(!board.collides(&shape, 5, 10));
    assert!(!board.collides(&shape, 4, 13));
}

#[test]
fn test_full_rows_reports_ascending_indices() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    fill_row(&mut board, 12);
    fill_row(&mut board, 15);

    assert_eq!(board.full_rows().as_slice(), &[12, 15, 19]);
}

#[test]
fn test_almost_full_row_is_not_full() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(3, 19, None);

    assert!(board.full_rows().is_empty());
    assert!(!board.is_row_full(19));
}

#[test]
fn test_clear_two_rows_equals_clearing_individually() {
    let seed_board = || {
        let mut board = Board::new();
        fill_row(&mut board, 14);
        fill_row(&mut board, 17);
        board.set(2, 10, Some(PieceKind::J));
        board.set(7, 16, Some(PieceKind::Z));
        board
    };

    let mut together = seed_board();
    together.clear_rows(&[14, 17]);

    let mut one_by_one = seed_board();
    one_by_one.clear_rows(&[17]);
    one_by_one.clear_rows(&[14]);

    assert_eq!(together, one_by_one);
    // Markers fell by the number of cleared rows below them.
    assert_eq!(together.get(2, 12), Some(Some(PieceKind::J)));
    assert_eq!(together.get(7, 18), Some(Some(PieceKind::Z)));
}

#[test]
fn test_clear_bottom_row_inserts_empty_top_row() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(0, 0, Some(PieceKind::T));

    board.clear_rows(&[19]);

    assert_eq!(board.get(0, 1), Some(Some(PieceKind::T)));
    for x in 0..BOARD_WIDTH as i8 {
        assert_eq!(board.get(x, 0), Some(None));
    }
}

#[test]
fn test_drop_distance_never_collides_next_step_always_does() {
    let mut board = Board::new();
    board.set(2, 16, Some(PieceKind::L));
    board.set(6, 12, Some(PieceKind::L));

    for kind in PieceKind::ALL {
        let shape = get_spawn_shape(kind);
        for x in 0..BOARD_WIDTH as i8 {
            if board.collides(&shape, x, 1) {
                continue;
            }
            let d = board.drop_distance(&shape, x, 1);
            assert!(!board.collides(&shape, x, 1 + d));
            assert!(board.collides(&shape, x, 1 + d + 1));
        }
    }
}

#[test]
fn test_place_then_clear_roundtrip() {
    let mut board = Board::new();
    let shape = get_spawn_shape(PieceKind::I);

    // I at rotation North is a flat row of four.
    board.place(&shape, 1, 19, PieceKind::I);
    board.place(&shape, 5, 19, PieceKind::I);
    // Cells 0..3 and 4..7 filled; finish the row by hand.
    for x in 8..BOARD_WIDTH as i8 {
        board.set(x, 19, Some(PieceKind::O));
    }

    let rows = board.full_rows();
    assert_eq!(rows.as_slice(), &[19]);

    board.clear_rows(&rows);
    assert_eq!(board, Board::new());
}
