//! Frontend state machine: title screen, running match, pause, finished match.
//!
//! `App` owns everything between the terminal loop and the core: the current
//! match, the input latch, the sound/redraw sink and the in-memory high score.
//! It does no terminal I/O itself, so key handling and screen flow can be
//! driven directly from tests.

use crossterm::event::KeyEvent;
use log::{error, info};

use crate::core::{ConfigError, MatchConfig, MatchCoordinator, MatchStatus};
use crate::input::{handle_play_key, handle_title_key, InputLatch, PlayCommand, TitleCommand};
use crate::term::{FrameBuffer, MatchView, TerminalSink, TitleInfo, Viewport};
use crate::types::{MatchMode, SoftDropStyle};

/// Settings fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub soft_drop: SoftDropStyle,
    /// Seed of the first match; later matches use the following seeds
    pub seed: u32,
    pub muted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    Paused,
    /// Every board is over and swept; the final boards stay up until Esc.
    Finished,
}

impl Screen {
    /// Stable id for screen fingerprints.
    pub fn id(self) -> u64 {
        match self {
            Screen::Title => 0,
            Screen::Playing => 1,
            Screen::Paused => 2,
            Screen::Finished => 3,
        }
    }
}

/// What the loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    settings: AppSettings,
    screen: Screen,
    game: Option<MatchCoordinator>,
    latch: InputLatch,
    sink: TerminalSink,
    title: TitleInfo,
    matches_started: u32,
    dirty: bool,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            screen: Screen::Title,
            game: None,
            latch: InputLatch::new(MatchMode::Single),
            sink: TerminalSink::new(settings.muted),
            title: TitleInfo::default(),
            matches_started: 0,
            dirty: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> Option<&MatchCoordinator> {
        self.game.as_ref()
    }

    pub fn high_score(&self) -> u32 {
        match &self.game {
            Some(game) => game.high_score().max(self.title.high_score),
            None => self.title.high_score,
        }
    }

    pub fn title_info(&self) -> TitleInfo {
        self.title
    }

    /// Start a new match, keeping the high score of earlier ones.
    pub fn start_match(&mut self, mode: MatchMode) -> Result<(), ConfigError> {
        let config = MatchConfig::new(mode).with_soft_drop(self.settings.soft_drop);
        let seed = self.settings.seed.wrapping_add(self.matches_started);
        let game = MatchCoordinator::with_high_score(config, seed, self.high_score())?;

        self.matches_started += 1;
        self.game = Some(game);
        self.latch = InputLatch::new(mode);
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Leave the current match for the title screen.
    pub fn end_match(&mut self) {
        let Some(game) = self.game.take() else {
            return;
        };
        info!(
            "match over: mode {}, high score {}",
            game.mode().as_str(),
            game.high_score()
        );
        self.title = TitleInfo {
            high_score: self.title.high_score.max(game.high_score()),
            after_match: true,
            winner: game.winner(),
        };
        self.set_screen(Screen::Title);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        match self.screen {
            Screen::Title => match handle_title_key(key) {
                Some(TitleCommand::Start(mode)) => {
                    // A mode always has a matching board count, so this cannot fail.
                    if let Err(err) = self.start_match(mode) {
                        error!("cannot start match: {err}");
                    }
                    Control::Continue
                }
                Some(TitleCommand::Quit) => Control::Quit,
                None => Control::Continue,
            },
            Screen::Playing | Screen::Paused => match handle_play_key(key) {
                Some(PlayCommand::TogglePause) => {
                    let next = if self.screen == Screen::Paused {
                        Screen::Playing
                    } else {
                        Screen::Paused
                    };
                    self.latch.clear();
                    self.set_screen(next);
                    Control::Continue
                }
                Some(PlayCommand::BackToTitle) => {
                    self.end_match();
                    Control::Continue
                }
                Some(PlayCommand::Quit) => Control::Quit,
                None => {
                    if self.screen == Screen::Playing {
                        self.latch.handle_key(key);
                    }
                    Control::Continue
                }
            },
            Screen::Finished => match handle_play_key(key) {
                Some(PlayCommand::BackToTitle) => {
                    self.end_match();
                    Control::Continue
                }
                Some(PlayCommand::Quit) => Control::Quit,
                Some(PlayCommand::TogglePause) | None => Control::Continue,
            },
        }
    }

    /// Advance the running match by `dt` seconds. No-op unless playing.
    ///
    /// Once every board is game over and its sweep has finished, the match
    /// stops and the final boards stay on screen until Esc.
    pub fn tick(&mut self, dt: f64) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(game) = self.game.as_mut() else {
            return;
        };

        let inputs = self.latch.take();
        let report = game.tick(dt, &inputs, &mut self.sink);
        if report.status == MatchStatus::Finished && game.boards().iter().all(|b| b.is_swept()) {
            info!("match finished, winner {:?}", game.winner());
            self.latch.clear();
            self.set_screen(Screen::Finished);
        }
    }

    /// A new frame is needed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        let sink = self.sink.take_redraw();
        std::mem::take(&mut self.dirty) || sink
    }

    /// A sound cue is waiting to be rung.
    pub fn take_bell(&mut self) -> bool {
        self.sink.take_bell()
    }

    pub fn render_into(&self, view: &MatchView, viewport: Viewport, fb: &mut FrameBuffer) {
        match (&self.game, self.screen) {
            (Some(game), Screen::Playing | Screen::Paused | Screen::Finished) => {
                let snap = game.snapshot();
                view.render_match_into(&snap, self.screen == Screen::Paused, viewport, fb);
            }
            _ => view.render_title_into(self.title, viewport, fb),
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.dirty = true;
    }
}
