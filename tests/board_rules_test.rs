//! Board rules: placement, rotation, gravity score and level progression.

use proptest::prelude::*;

use zen_tetris::core::pieces::rotation_count;
use zen_tetris::core::scoring::advance_level;
use zen_tetris::core::{
    absolute_cells, get_cells, line_clear_score, next_rotation, ActivePiece, Board,
};
use zen_tetris::types::{
    BlockColor, InputFlags, ShapeKind, SoftDropStyle, BOARD_WIDTH, MAX_LEVEL,
};

fn shape() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::ALL.len()).prop_map(|i| ShapeKind::ALL[i])
}

/// Inside the walls and above the floor; the ceiling is never checked.
fn in_bounds(x: i16, y: i16) -> bool {
    (0..BOARD_WIDTH as i16).contains(&x) && y >= 0
}

proptest! {
    #[test]
    fn can_place_matches_cell_bounds_on_empty_grid(
        kind in shape(),
        rot in 0u8..4,
        x in any::<i8>(),
        y in any::<i8>(),
    ) {
        let rot = rot % rotation_count(kind) as u8;
        let board = Board::default();
        let expected = get_cells(kind, rot)
            .iter()
            .all(|&(dx, dy)| in_bounds(i16::from(x) + i16::from(dx), i16::from(y) - i16::from(dy)));
        prop_assert_eq!(board.can_place(kind, rot, x, y), expected);
    }

    #[test]
    fn can_place_rejects_any_occupied_cell(
        kind in shape(),
        rot in 0u8..4,
        x in 0i8..7,
        y in 3i8..20,
        which in 0usize..4,
    ) {
        let rot = rot % rotation_count(kind) as u8;
        let mut board = Board::default();
        prop_assume!(board.can_place(kind, rot, x, y));

        let (cx, cy) = absolute_cells(kind, rot, x, y)[which];
        board.grid_mut().set(cx, cy, Some(BlockColor::Gray));
        prop_assert!(!board.can_place(kind, rot, x, y));
    }

    #[test]
    fn rotation_cycles_back_to_start(kind in shape(), start in 0u8..4) {
        let start = start % rotation_count(kind) as u8;
        let mut rot = start;
        for _ in 0..rotation_count(kind) {
            rot = next_rotation(kind, rot);
        }
        prop_assert_eq!(rot, start);
    }
}

#[test]
fn test_rotation_counts() {
    assert_eq!(rotation_count(ShapeKind::O), 1);
    assert_eq!(rotation_count(ShapeKind::I), 2);
    assert_eq!(rotation_count(ShapeKind::S), 2);
    assert_eq!(rotation_count(ShapeKind::Z), 2);
    assert_eq!(rotation_count(ShapeKind::T), 4);
    assert_eq!(rotation_count(ShapeKind::J), 4);
    assert_eq!(rotation_count(ShapeKind::L), 4);
}

#[test]
fn test_cells_above_ceiling_are_not_checked() {
    let board = Board::default();
    // I vertical: box column 2, rows y..y-3
    assert!(board.can_place(ShapeKind::I, 0, 0, 21));
    assert!(!board.can_place(ShapeKind::I, 0, 0, 2));
}

#[test]
fn test_can_place_at_extreme_origins_does_not_overflow() {
    let board = Board::default();
    assert!(!board.can_place(ShapeKind::I, 1, 125, 10));
    assert!(!board.can_place(ShapeKind::I, 0, i8::MAX, i8::MAX));
    assert!(!board.can_place(ShapeKind::T, 0, i8::MIN, i8::MIN));
    assert!(!board.can_place(ShapeKind::O, 0, 3, i8::MIN));
    // Far above the ceiling still fits.
    assert!(board.can_place(ShapeKind::O, 0, 3, i8::MAX));
}

#[test]
fn test_every_gravity_attempt_scores_two() {
    let mut board = Board::new(3, SoftDropStyle::Tap, false);
    assert!(board.set_active(ActivePiece {
        kind: ShapeKind::O,
        rotation: 0,
        x: 3,
        y: 2,
    }));

    // y=2 -> 1 (moved), then 1 -> 0 is blocked by the floor: lock.
    board.advance_gravity(1.0);
    assert_eq!(board.score(), 2);
    assert_eq!(board.active().map(|p| p.y), Some(1));

    board.advance_gravity(1.0);
    assert_eq!(board.score(), 4);
    assert!(board.active().is_none());
    assert_eq!(board.grid().occupied_count(), 4);

    // The spawn step itself is free.
    board.advance_gravity(1.0);
    assert!(board.active().is_some());
    assert_eq!(board.score(), 4);
}

#[test]
fn test_soft_drop_forces_gravity_before_timer() {
    let mut board = Board::new(3, SoftDropStyle::Tap, false);
    board.tick(0.016, InputFlags::NONE);
    let y0 = board.active().unwrap().y;

    board.tick(
        0.016,
        InputFlags {
            down: true,
            ..InputFlags::NONE
        },
    );
    assert_eq!(board.active().unwrap().y, y0 - 1);
    assert_eq!(board.score(), 2);
}

#[test]
fn test_line_clear_scores_double_per_row() {
    assert_eq!(line_clear_score(1), 10);
    assert_eq!(line_clear_score(2), 20);
    assert_eq!(line_clear_score(3), 40);
    assert_eq!(line_clear_score(4), 80);
}

#[test]
fn test_level_up_drops_remainder() {
    let p = advance_level(0, 3, 3);
    assert_eq!((p.level, p.counter), (1, 0));
    assert!(p.leveled_up);

    let p = advance_level(1, 1, 2);
    assert_eq!((p.level, p.counter), (1, 3));
    assert!(!p.leveled_up);
}

#[test]
fn test_level_is_capped() {
    let p = advance_level(MAX_LEVEL, 3, 4);
    assert_eq!(p.level, MAX_LEVEL);
    assert_eq!(p.counter, 0);
    assert!(p.threshold_reached);
    assert!(!p.leveled_up);
}
