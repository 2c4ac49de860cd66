//! Key mapping from terminal events to player actions and screen commands.

use crate::types::{MatchMode, PlayerAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Screen-level commands while a match is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    TogglePause,
    /// End the match and return to the title screen
    BackToTitle,
    Quit,
}

/// Commands accepted on the title screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCommand {
    Start(MatchMode),
    Quit,
}

fn is_press(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
}

/// Player one's keys: arrows and WASD.
fn player_one_action(code: KeyCode) -> Option<PlayerAction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(PlayerAction::Rotate),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(PlayerAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(PlayerAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(PlayerAction::SoftDrop),
        _ => None,
    }
}

/// Player two's keys: I rotate, J left, L right, K soft drop.
fn player_two_action(code: KeyCode) -> Option<PlayerAction> {
    match code {
        KeyCode::Char('i') | KeyCode::Char('I') => Some(PlayerAction::Rotate),
        KeyCode::Char('j') | KeyCode::Char('J') => Some(PlayerAction::MoveLeft),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(PlayerAction::MoveRight),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(PlayerAction::SoftDrop),
        _ => None,
    }
}

/// Map a key to the board it controls and the action it performs.
///
/// Player two's keys only exist in a dual match.
pub fn route_key(key: KeyEvent, mode: MatchMode) -> Option<(usize, PlayerAction)> {
    if !is_press(&key) || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    if let Some(action) = player_one_action(key.code) {
        return Some((0, action));
    }
    match mode {
        MatchMode::Dual => player_two_action(key.code).map(|action| (1, action)),
        MatchMode::Single => None,
    }
}

/// Map a key to a screen command while playing or paused.
pub fn handle_play_key(key: KeyEvent) -> Option<PlayCommand> {
    if !is_press(&key) {
        return None;
    }
    if should_quit(key) {
        return Some(PlayCommand::Quit);
    }
    match key.code {
        KeyCode::Char(' ') => Some(PlayCommand::TogglePause),
        KeyCode::Esc => Some(PlayCommand::BackToTitle),
        _ => None,
    }
}

/// Map a key on the title screen.
pub fn handle_title_key(key: KeyEvent) -> Option<TitleCommand> {
    if !is_press(&key) {
        return None;
    }
    if should_quit(key) {
        return Some(TitleCommand::Quit);
    }
    match key.code {
        KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Char('1') => {
            Some(TitleCommand::Start(MatchMode::Single))
        }
        KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Char('2') => {
            Some(TitleCommand::Start(MatchMode::Dual))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(TitleCommand::Quit),
        _ => None,
    }
}

/// Ctrl-C quits from any screen.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
