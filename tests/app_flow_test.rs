//! Screen flow of the terminal frontend, driven through key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use zen_tetris::app::{App, AppSettings, Control, Screen};
use zen_tetris::term::{FrameBuffer, MatchView, Viewport};
use zen_tetris::types::{MatchMode, SoftDropStyle};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn app(soft_drop: SoftDropStyle) -> App {
    App::new(AppSettings {
        soft_drop,
        seed: 5,
        muted: false,
    })
}

#[test]
fn test_title_starts_single_and_dual_matches() {
    let mut app = app(SoftDropStyle::Tap);
    assert_eq!(app.screen(), Screen::Title);
    assert!(app.game().is_none());

    assert_eq!(app.handle_key(ch('o')), Control::Continue);
    assert_eq!(app.screen(), Screen::Playing);
    assert_eq!(app.game().unwrap().mode(), MatchMode::Single);
    assert_eq!(app.game().unwrap().board_count(), 1);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.screen(), Screen::Title);

    app.handle_key(ch('t'));
    assert_eq!(app.game().unwrap().mode(), MatchMode::Dual);
    assert_eq!(app.game().unwrap().board_count(), 2);
}

#[test]
fn test_each_match_gets_a_new_seed() {
    let mut app = app(SoftDropStyle::Tap);
    app.handle_key(ch('o'));
    let first = app.game().unwrap().seed();
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(ch('o'));
    assert_ne!(app.game().unwrap().seed(), first);
}

#[test]
fn test_pause_freezes_the_match() {
    let mut app = app(SoftDropStyle::Tap);
    app.handle_key(ch('o'));
    app.tick(0.016);
    let before = app.game().unwrap().board(0).unwrap().active();

    app.handle_key(ch(' '));
    assert_eq!(app.screen(), Screen::Paused);
    app.handle_key(key(KeyCode::Left));
    for _ in 0..200 {
        app.tick(0.016);
    }
    assert_eq!(app.game().unwrap().board(0).unwrap().active(), before);

    app.handle_key(ch(' '));
    assert_eq!(app.screen(), Screen::Playing);
    // The Left press made while paused was dropped.
    app.tick(0.016);
    let after = app.game().unwrap().board(0).unwrap().active();
    assert_eq!(after.map(|p| p.x), before.map(|p| p.x));
}

#[test]
fn test_keys_move_the_falling_piece() {
    let mut app = app(SoftDropStyle::Tap);
    app.handle_key(ch('o'));
    app.tick(0.016);
    let x = app.game().unwrap().board(0).unwrap().active().unwrap().x;

    app.handle_key(key(KeyCode::Right));
    app.tick(0.016);
    assert_eq!(app.game().unwrap().board(0).unwrap().active().unwrap().x, x + 1);
}

#[test]
fn test_quit_keys() {
    let mut app = app(SoftDropStyle::Tap);
    assert_eq!(app.handle_key(ch('q')), Control::Quit);

    app.handle_key(ch('o'));
    assert_eq!(app.handle_key(ch('q')), Control::Continue);
    assert_eq!(
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Control::Quit
    );
}

#[test]
fn test_topped_out_match_holds_until_esc() {
    let mut app = app(SoftDropStyle::Sticky);
    app.handle_key(ch('o'));

    // Nothing moves sideways, so rows never complete and the stack tops out.
    for _ in 0..10_000 {
        if app.screen() == Screen::Finished {
            break;
        }
        app.handle_key(key(KeyCode::Down));
        app.tick(0.016);
    }
    assert_eq!(app.screen(), Screen::Finished);
    assert!(app.game().unwrap().board(0).unwrap().is_swept());

    // The finished boards stay up with their overlay; play keys and ticks do nothing.
    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(&MatchView::default(), Viewport::new(40, 24), &mut fb);
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("SCORE"));

    assert_eq!(app.handle_key(ch(' ')), Control::Continue);
    app.handle_key(key(KeyCode::Left));
    for _ in 0..600 {
        app.tick(0.016);
    }
    assert_eq!(app.screen(), Screen::Finished);
    assert!(app.game().is_some());

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.screen(), Screen::Title);
    assert!(app.game().is_none());
    let info = app.title_info();
    assert!(info.after_match);
    assert_eq!(info.winner, None);
    assert!(info.high_score > 0);
    assert_eq!(app.high_score(), info.high_score);

    app.render_into(&MatchView::default(), Viewport::new(40, 16), &mut fb);
    let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(text.contains("GAME OVER"));

    // The next match starts from the kept high score.
    app.handle_key(ch('o'));
    assert_eq!(app.game().unwrap().high_score(), info.high_score);
}

#[test]
fn test_frames_are_requested_after_changes() {
    let mut app = app(SoftDropStyle::Tap);
    assert!(app.take_dirty());
    assert!(!app.take_dirty());

    app.handle_key(ch('o'));
    assert!(app.take_dirty());
    app.tick(0.016);
    assert!(app.take_dirty());
}
