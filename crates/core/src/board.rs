//! Board module - one player's complete game state
//!
//! A board ties together the grid, the falling piece, its RNG, scoring, the
//! incoming attack channel and the animation sequencer. It is advanced by
//! [`Board::tick`] with the elapsed seconds and the input flags sampled for it.
//!
//! Exactly one of three phases governs a board on any tick:
//!
//! - **normal play**: pending attack rows are applied, then input, then gravity
//! - **line clear**: the clear animation runs; input and gravity are suspended
//! - **game over**: the sweep grays the grid one row per tick, then the board is inert
//!
//! Sounds and redraw requests are queued on the board and drained by the owner
//! (see [`Board::take_sounds`] and [`Board::take_redraw`]).

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::animation::{Animation, LineClearStep};
use crate::attack::{damage_for_clear, AttackChannel};
use crate::grid::Grid;
use crate::pieces::{absolute_cells, get_cells, next_rotation};
use crate::rng::SimpleRng;
use crate::scoring::{advance_level, line_clear_score, GRAVITY_STEP_SCORE};
use crate::snapshot::{ActiveSnapshot, AnimationPhase, BoardSnapshot};
use crate::types::{
    fall_interval_secs, InputFlags, RedrawFlags, ShapeKind, SoftDropStyle, SoundKind,
    BOARD_WIDTH, SPAWN_X, SPAWN_Y,
};

/// Sounds queued between two drains.
pub type SoundQueue = ArrayVec<SoundKind, 8>;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    /// Index into the shape's rotation states
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece in rotation 0 at the spawn origin
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Grid positions covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        absolute_cells(self.kind, self.rotation, self.x, self.y)
    }
}

/// One player's board
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Option<ActivePiece>,
    seed: u32,
    rng: SimpleRng,
    soft_drop: SoftDropStyle,
    attacks_enabled: bool,
    incoming: AttackChannel,
    outgoing: Option<u32>,
    animation: Animation,
    score: u32,
    level: u32,
    /// Total rows cleared
    lines: u32,
    /// Rows cleared since the last level up
    level_counter: u32,
    /// Seconds until the next gravity step
    fall_timer: f64,
    /// Run the next gravity step now, regardless of the timer
    force_fall: bool,
    game_over: bool,
    sounds: SoundQueue,
    redraw: RedrawFlags,
}

impl Board {
    /// Create a ready-to-play board. The first piece spawns on the first gravity step.
    pub fn new(seed: u32, soft_drop: SoftDropStyle, attacks_enabled: bool) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            seed,
            rng: SimpleRng::new(seed),
            soft_drop,
            attacks_enabled,
            incoming: AttackChannel::new(),
            outgoing: None,
            animation: Animation::None,
            score: 0,
            level: 0,
            lines: 0,
            level_counter: 0,
            fall_timer: 0.0,
            force_fall: false,
            game_over: false,
            sounds: SoundQueue::new(),
            redraw: RedrawFlags::default(),
        }
    }

    /// Reset to the initial state: empty grid, no piece, zeroed counters and timers.
    ///
    /// The RNG restarts from the board's seed, so a reset board replays the same
    /// shape sequence.
    pub fn setup(&mut self) {
        *self = Self::new(self.seed, self.soft_drop, self.attacks_enabled);
        self.redraw = RedrawFlags {
            piece_moved: true,
            grid_changed: true,
        };
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_toward_level(&self) -> u32 {
        self.level_counter
    }

    pub fn pending_attack(&self) -> u32 {
        self.incoming.pending()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn fall_timer(&self) -> f64 {
        self.fall_timer
    }

    /// Mutable grid access for scripted setups (tests, benches).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Replace the falling piece (scripted setups). Returns false and leaves the
    /// board untouched if the piece does not fit.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if !self.fits(&piece) {
            return false;
        }
        self.active = Some(piece);
        self.redraw.piece_moved = true;
        true
    }

    /// Input and gravity only act on a falling piece outside any animation.
    pub fn is_falling(&self) -> bool {
        self.active.is_some() && !self.game_over && !self.animation.is_active()
    }

    /// The game-over sweep has grayed every row; nothing is left to animate.
    pub fn is_swept(&self) -> bool {
        self.game_over && self.animation.sweep_finished()
    }

    /// Check whether a shape fits with its box origin at `(x, y)`.
    ///
    /// Cells left of column 0, right of the last column, below the floor or on an
    /// occupied cell fail. Cells above the ceiling are not checked; pieces never
    /// get there from the spawn row.
    ///
    /// Any `i8` origin is accepted; cell positions are computed in `i16` so an
    /// origin at the ends of the range fails instead of overflowing.
    pub fn can_place(&self, kind: ShapeKind, rotation: u8, x: i8, y: i8) -> bool {
        get_cells(kind, rotation).iter().all(|&(dx, dy)| {
            let cx = i16::from(x) + i16::from(dx);
            let cy = i16::from(y) - i16::from(dy);
            if !(0..BOARD_WIDTH as i16).contains(&cx) || cy < 0 {
                return false;
            }
            i8::try_from(cy).map_or(true, |cy| !self.grid.is_occupied(cx as i8, cy))
        })
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.can_place(piece.kind, piece.rotation, piece.x, piece.y)
    }

    /// Advance the board by `dt` seconds with this tick's input flags.
    pub fn tick(&mut self, dt: f64, input: InputFlags) {
        assert!(dt.is_finite() && dt >= 0.0, "tick dt must be finite and >= 0, got {dt}");

        if self.game_over {
            self.advance_game_over_sweep();
            return;
        }

        if self.animation.is_line_clear() {
            // Gravity keeps counting down so the next piece spawns promptly.
            self.fall_timer -= dt;
            self.advance_animation(dt);
            return;
        }

        self.apply_pending_attack();
        self.apply_input(input);
        self.advance_gravity(dt);
    }

    /// Apply one tick of player input: rotate, left, right, then soft drop.
    ///
    /// Ignored unless a piece is falling. Moves that do not fit are reverted.
    pub fn apply_input(&mut self, input: InputFlags) {
        if !self.is_falling() || input.is_empty() {
            return;
        }
        let Some(mut piece) = self.active else {
            return;
        };

        if input.up {
            let prev = piece.rotation;
            piece.rotation = next_rotation(piece.kind, prev);
            if !self.fits(&piece) {
                piece.rotation = prev;
            }
        }
        if input.left {
            piece.x -= 1;
            if !self.fits(&piece) {
                piece.x += 1;
            }
        }
        if input.right {
            piece.x += 1;
            if !self.fits(&piece) {
                piece.x -= 1;
            }
        }
        if input.down {
            self.force_fall = true;
        }

        self.active = Some(piece);
        self.redraw.piece_moved = true;
    }

    /// Count the fall timer down and run a gravity step when it expires or a soft
    /// drop is armed.
    ///
    /// A gravity step spawns a piece if none is falling; otherwise it moves the
    /// piece down one row (worth [`GRAVITY_STEP_SCORE`] whether or not it fits)
    /// and locks it if it cannot move.
    pub fn advance_gravity(&mut self, dt: f64) {
        if self.game_over || self.animation.is_active() {
            return;
        }

        self.fall_timer -= dt;
        if self.fall_timer > 0.0 && !self.force_fall {
            return;
        }

        self.fall_timer = fall_interval_secs(self.level);
        if self.soft_drop == SoftDropStyle::Tap {
            self.force_fall = false;
        }

        let Some(mut piece) = self.active else {
            self.spawn_piece();
            return;
        };

        self.score = self.score.saturating_add(GRAVITY_STEP_SCORE);
        piece.y -= 1;
        if self.fits(&piece) {
            self.active = Some(piece);
            self.redraw.piece_moved = true;
        } else {
            self.lock_active();
        }
    }

    /// Spawn a random shape at the spawn origin. Returns false (and ends the game)
    /// if it does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::spawn(self.rng.next_shape());
        // A blocked spawn still shows; the sweep freezes it into the grid.
        self.active = Some(piece);
        self.redraw.piece_moved = true;
        if self.soft_drop == SoftDropStyle::Sticky {
            self.force_fall = false;
        }

        if !self.fits(&piece) {
            info!("board game over: {:?} blocked at spawn, score {}", piece.kind, self.score);
            self.game_over = true;
            self.animation = Animation::game_over_sweep();
            self.push_sound(SoundKind::GameOver);
            return false;
        }

        debug!("spawned {:?}", piece.kind);
        true
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.grid.stamp(&piece.cells(), piece.kind.color());
        debug!("locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        self.push_sound(SoundKind::Lock);
        self.redraw.piece_moved = true;
        self.redraw.grid_changed = true;
        self.detect_and_clear_lines();
    }

    /// Look for full rows. If any, start the clear animation and return how many;
    /// otherwise the board is ready to spawn on the next gravity step.
    pub fn detect_and_clear_lines(&mut self) -> usize {
        let rows = self.grid.full_rows();
        if rows.is_empty() {
            return 0;
        }
        let count = rows.len();
        debug!("line clear started: rows {:?}", rows.as_slice());
        self.animation = Animation::line_clear(rows);
        self.redraw.grid_changed = true;
        count
    }

    /// Step the line-clear animation; the rows are removed once the last frame expires.
    pub fn advance_animation(&mut self, dt: f64) {
        match self.animation.advance_line_clear(dt) {
            LineClearStep::Hold => {}
            LineClearStep::Frame(_) => self.redraw.grid_changed = true,
            LineClearStep::Done(rows) => self.finish_line_clear(&rows),
        }
    }

    fn finish_line_clear(&mut self, rows: &[u8]) {
        let cleared = self.grid.remove_rows(rows);
        self.lines = self.lines.saturating_add(cleared as u32);

        let progress = advance_level(self.level, self.level_counter, cleared);
        self.level = progress.level;
        self.level_counter = progress.counter;
        if progress.leveled_up {
            info!("level up: {}", self.level);
            self.push_sound(SoundKind::LevelUp);
        }

        self.score = self.score.saturating_add(line_clear_score(cleared));
        debug!("line clear finished: {cleared} row(s), score {}", self.score);

        if self.attacks_enabled {
            if let Some(damage) = damage_for_clear(cleared) {
                info!("attack sent: {damage} row(s)");
                self.outgoing = Some(damage);
            }
        }

        self.push_sound(SoundKind::LineClear);
        self.redraw.grid_changed = true;
    }

    /// Store incoming damage; replaces any damage not yet applied.
    pub fn receive_attack(&mut self, lines: u32) {
        info!("attack received: {lines} row(s)");
        self.incoming.send(lines);
    }

    /// Apply pending damage: for each row, drop the ceiling row and push a random
    /// gray/empty row in at the floor. Returns the number of rows applied.
    pub fn apply_pending_attack(&mut self) -> u32 {
        let lines = self.incoming.take();
        if lines == 0 {
            return 0;
        }
        for _ in 0..lines {
            let row = self.rng.garbage_row();
            self.grid.push_floor_row(&row);
        }
        debug!("applied {lines} damage row(s)");
        self.push_sound(SoundKind::Attacked);
        self.redraw.grid_changed = true;
        lines
    }

    /// Gray out the next row of the game-over sweep.
    ///
    /// The first call freezes the blocked piece into the empty cells it covers.
    pub fn advance_game_over_sweep(&mut self) {
        if self.animation.sweep_cursor() == Some(0) {
            if let Some(piece) = self.active.take() {
                self.grid.fill_empty(&piece.cells(), piece.kind.color());
                self.redraw.piece_moved = true;
            }
        }
        if let Some(row) = self.animation.advance_sweep() {
            self.grid.gray_out_row(row as usize);
            self.redraw.grid_changed = true;
        }
    }

    /// Damage rows produced by the last clear, if not yet delivered.
    pub fn take_outgoing_attack(&mut self) -> Option<u32> {
        self.outgoing.take()
    }

    pub fn take_sounds(&mut self) -> SoundQueue {
        std::mem::take(&mut self.sounds)
    }

    pub fn take_redraw(&mut self) -> RedrawFlags {
        std::mem::take(&mut self.redraw)
    }

    fn push_sound(&mut self, kind: SoundKind) {
        debug!("sound: {}", kind.as_str());
        // Sounds are drained every tick; an overflowing queue only loses cues.
        let _ = self.sounds.try_push(kind);
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.lines_toward_level = self.level_counter;
        out.pending_attack = self.incoming.pending();
        out.game_over = self.game_over;
        out.phase = match &self.animation {
            Animation::None => AnimationPhase::None,
            Animation::LineClear { frame, .. } => AnimationPhase::LineClear { frame: *frame },
            Animation::GameOverSweep { cursor } => AnimationPhase::GameOverSweep { cursor: *cursor },
        };
        out.clearing_rows.fill(false);
        for &row in self.animation.clearing_rows() {
            out.clearing_rows[row as usize] = true;
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1, SoftDropStyle::default(), false)
    }
}
