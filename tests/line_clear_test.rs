//! Line-clear animation and game over, end to end through `Board::tick`.

use zen_tetris::core::{
    ActivePiece, AnimationPhase, Board, MatchConfig, MatchCoordinator, MatchStatus,
};
use zen_tetris::types::{
    fall_interval_secs, BlockColor, InputFlags, MatchMode, ShapeKind, SoftDropStyle, SoundKind,
    MAX_LEVEL,
};

fn rigged_single_row() -> Board {
    let mut board = Board::new(9, SoftDropStyle::Tap, false);
    for x in 2..10 {
        board.grid_mut().set(x, 0, Some(BlockColor::Gray));
    }
    assert!(board.set_active(ActivePiece {
        kind: ShapeKind::O,
        rotation: 0,
        x: -1,
        y: 1,
    }));
    board
}

/// Rows 0-3 full except columns 0-1 of rows 0-1, where an O piece locks on
/// the next gravity step.
fn rig_four_rows(board: &mut Board) {
    for y in 0..4 {
        let from = if y < 2 { 2 } else { 0 };
        for x in from..10 {
            board.grid_mut().set(x, y, Some(BlockColor::Gray));
        }
    }
    assert!(board.set_active(ActivePiece {
        kind: ShapeKind::O,
        rotation: 0,
        x: -1,
        y: 1,
    }));
}

fn all_moves() -> InputFlags {
    InputFlags {
        up: true,
        down: true,
        left: true,
        right: true,
    }
}

#[test]
fn test_clear_runs_seven_frames_then_compacts() {
    let mut board = rigged_single_row();

    board.tick(0.1, InputFlags::NONE);
    assert!(board.active().is_none());
    assert_eq!(board.animation().frame(), Some(1));
    assert_eq!(board.take_sounds().as_slice(), &[SoundKind::Lock]);

    for frame in 2..=7 {
        board.tick(0.1, InputFlags::NONE);
        assert_eq!(board.animation().frame(), Some(frame));
        let snap = board.snapshot();
        assert_eq!(snap.phase, AnimationPhase::LineClear { frame });
        assert!(snap.clearing_rows[0]);
        // The row stays in the grid until the last frame expires.
        assert!(board.grid().is_row_full(0));
    }

    board.tick(0.1, InputFlags::NONE);
    assert!(!board.animation().is_active());
    assert_eq!(board.lines(), 1);
    assert_eq!(board.lines_toward_level(), 1);
    assert_eq!(board.score(), 2 + 10);
    assert!(board.take_sounds().contains(&SoundKind::LineClear));

    // The upper half of the O dropped into row 0.
    assert_eq!(board.grid().occupied_count(), 2);
    assert!(board.grid().is_occupied(0, 0));
    assert!(board.grid().is_occupied(1, 0));
    assert!(!board.grid().is_occupied(0, 1));
}

#[test]
fn test_input_during_clear_is_dropped() {
    let mut board = rigged_single_row();
    board.tick(0.1, InputFlags::NONE);

    let before = board.grid().clone();
    for _ in 0..3 {
        board.tick(0.1, all_moves());
    }
    assert_eq!(board.grid(), &before);
    assert!(board.active().is_none());
}

#[test]
fn test_next_piece_spawns_after_clear() {
    let mut board = rigged_single_row();
    for _ in 0..8 {
        board.tick(0.1, InputFlags::NONE);
    }
    assert!(board.active().is_none());

    // The fall timer kept running during the seven animation ticks.
    assert!((board.fall_timer() - 0.3).abs() < 1e-9);
    board.tick(0.5, InputFlags::NONE);
    let piece = board.active().unwrap();
    assert_eq!((piece.x, piece.y), (3, 19));
}

#[test]
fn test_four_row_clear_levels_up_and_speeds_gravity() {
    let mut board = Board::new(9, SoftDropStyle::Tap, false);
    rig_four_rows(&mut board);
    for _ in 0..8 {
        board.tick(0.1, InputFlags::NONE);
    }
    assert_eq!(board.lines(), 4);
    assert_eq!(board.level(), 1);
    assert_eq!(board.lines_toward_level(), 0);
    assert_eq!(
        board.take_sounds().as_slice(),
        &[SoundKind::Lock, SoundKind::LevelUp, SoundKind::LineClear]
    );

    // The spawn step reloads the timer with the level 1 interval.
    board.tick(0.5, InputFlags::NONE);
    assert!(board.active().is_some());
    assert!((board.fall_timer() - 50.0 / 60.0).abs() < 1e-9);
    assert_eq!(board.fall_timer(), fall_interval_secs(1));
}

#[test]
fn test_level_stops_at_the_cap() {
    let mut board = Board::new(9, SoftDropStyle::Tap, false);
    // One second per tick lets every lock tick fire gravity; the animation
    // still advances one frame per tick.
    for round in 1..=MAX_LEVEL {
        rig_four_rows(&mut board);
        for _ in 0..8 {
            board.tick(1.0, InputFlags::NONE);
        }
        assert_eq!(board.level(), round);
        assert!(board.take_sounds().contains(&SoundKind::LevelUp));
    }

    rig_four_rows(&mut board);
    for _ in 0..8 {
        board.tick(1.0, InputFlags::NONE);
    }
    assert_eq!(board.lines(), 4 * (MAX_LEVEL + 1));
    assert_eq!(board.level(), MAX_LEVEL);
    assert_eq!(board.lines_toward_level(), 0);
    let sounds = board.take_sounds();
    assert!(sounds.contains(&SoundKind::LineClear));
    assert!(!sounds.contains(&SoundKind::LevelUp));
}

fn blocked_board() -> Board {
    // Every shape covers part of the two top rows in columns 3-6.
    let mut board = Board::new(4, SoftDropStyle::Tap, false);
    for y in 18..20 {
        for x in 1..10 {
            board.grid_mut().set(x, y, Some(BlockColor::Red));
        }
    }
    board
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut board = blocked_board();
    assert!(!board.spawn_piece());
    assert!(board.game_over());
    assert!(board.active().is_some());
    assert_eq!(board.take_sounds().as_slice(), &[SoundKind::GameOver]);
    assert_eq!(board.animation().sweep_cursor(), Some(0));
}

#[test]
fn test_game_over_ignores_input_and_sweeps_to_gray() {
    let mut board = blocked_board();
    board.tick(0.016, InputFlags::NONE);
    assert!(board.game_over());
    let score = board.score();

    for tick in 0..20 {
        assert!(!board.is_swept(), "swept early at tick {tick}");
        board.tick(0.016, all_moves());
    }
    assert!(board.is_swept());
    assert!(board.active().is_none());
    assert_eq!(board.score(), score);

    // Every block is gray, including the piece frozen into empty cells.
    let cells = board.grid().cells();
    assert!(cells.iter().flatten().all(|c| *c == BlockColor::Gray));
    assert!(board.grid().occupied_count() >= 18);

    let snap = board.snapshot();
    assert!(snap.game_over);
    assert!(!snap.playable());
}

#[test]
fn test_match_finishes_when_every_board_is_over() {
    let mut game = MatchCoordinator::new(MatchConfig::new(MatchMode::Dual), 2).unwrap();
    for y in 16..20 {
        game.board_mut(0).unwrap().grid_mut().fill_row(y, BlockColor::Red);
    }

    game.tick(0.016, &[InputFlags::NONE; 2], &mut ());
    assert_eq!(game.status(), MatchStatus::Running);
    assert_eq!(game.winner(), Some(1));

    // Bury board 1 without completing a row: the falling piece locks in place
    // and the next spawn is blocked.
    for y in 14..20 {
        for x in 1..10 {
            game.board_mut(1).unwrap().grid_mut().set(x, y, Some(BlockColor::Red));
        }
    }
    for _ in 0..100 {
        game.tick(0.1, &[InputFlags::NONE; 2], &mut ());
        if game.status() == MatchStatus::Finished {
            break;
        }
    }
    assert_eq!(game.status(), MatchStatus::Finished);
    assert_eq!(game.winner(), None);
}
