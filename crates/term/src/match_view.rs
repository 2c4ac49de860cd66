//! MatchView: maps a `core::MatchSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: a header line with the high score, then one board
//! (single) or two boards side by side (dual). Each board sits in a gray wall
//! frame open at the top, with its score and level on the line below. Board row
//! 0 is the floor, so it is drawn on the lowest screen row of the frame.

use crate::core::{AnimationPhase, BoardSnapshot, MatchSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, MatchMode, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the title screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitleInfo {
    pub high_score: u32,
    /// A match has been played (shows "GAME OVER" instead of the title)
    pub after_match: bool,
    /// Winner of the last dual match, if any
    pub winner: Option<usize>,
}

/// Glyph for each line-clear frame (1..=7) of a row being cleared.
const CLEAR_GLYPHS: [char; 7] = ['▓', '▒', '░', '▒', '▓', '░', '·'];

const BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(20, 20, 28);
const WALL: Rgb = Rgb::new(128, 128, 128);

const LABEL: CellStyle = CellStyle::text(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::text(Rgb::new(200, 200, 200));
const HINT: CellStyle = CellStyle::text(Rgb::new(150, 150, 160)).dim();
const OVERLAY: CellStyle = CellStyle::text(Rgb::new(255, 255, 255)).bold();

/// Screen color of a block.
pub fn block_rgb(color: BlockColor) -> Rgb {
    match color {
        BlockColor::Blue => Rgb::new(70, 110, 230),
        BlockColor::Red => Rgb::new(225, 70, 70),
        BlockColor::Purple => Rgb::new(170, 90, 220),
        BlockColor::Green => Rgb::new(90, 210, 110),
        BlockColor::Aqua => Rgb::new(70, 210, 220),
        BlockColor::Yellow => Rgb::new(240, 215, 70),
        BlockColor::Orange => Rgb::new(250, 160, 40),
        BlockColor::Gray => WALL,
    }
}

/// A lightweight terminal renderer for one match.
pub struct MatchView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Columns between the two boards of a dual match.
    gap: u16,
}

impl Default for MatchView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            gap: 4,
        }
    }
}

impl MatchView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    /// Width of one board including its side walls.
    pub fn frame_width(&self) -> u16 {
        (BOARD_WIDTH as u16 + 2) * self.cell_w
    }

    /// Height of one board including its floor.
    pub fn frame_height(&self) -> u16 {
        (BOARD_HEIGHT as u16 + 1) * self.cell_h
    }

    /// Render a match into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_match_into(
        &self,
        snap: &MatchSnapshot,
        paused: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::text(VALUE.fg).on(BG).cell(' '));

        let count = snap.boards.len().max(1) as u16;
        let frame_w = self.frame_width();
        let total_w = frame_w * count + self.gap * (count - 1);
        // Header, frame, stats line.
        let total_h = 1 + self.frame_height() + 1;

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(total_h) / 2;

        self.draw_header(fb, snap, start_x, start_y, total_w);

        for (idx, board) in snap.boards.iter().enumerate() {
            let x = start_x + idx as u16 * (frame_w + self.gap);
            let y = start_y + 1;
            self.draw_board(fb, board, x, y);
            self.draw_stats(fb, board, snap.mode, idx, x, y + self.frame_height());
            if board.game_over {
                self.draw_overlay(fb, x, y, frame_w, self.frame_height(), "GAME OVER");
            }
        }

        if paused {
            let y = start_y + 1;
            self.draw_overlay(fb, start_x, y, total_w, self.frame_height(), "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render_match(&self, snap: &MatchSnapshot, paused: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_match_into(snap, paused, viewport, &mut fb);
        fb
    }

    /// Render the title screen (or the game-over screen after a match).
    pub fn render_title_into(&self, info: TitleInfo, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::text(VALUE.fg).on(BG).cell(' '));

        let w = viewport.width;
        let mut y = viewport.height.saturating_sub(9) / 2;

        let title = if info.after_match { "GAME OVER" } else { "ZEN TETRIS" };
        fb.put_str_centered(0, w, y, title, OVERLAY);
        y += 1;
        if let Some(winner) = info.winner {
            let label = if winner == 0 { "PLAYER 1 WINS" } else { "PLAYER 2 WINS" };
            fb.put_str_centered(0, w, y, label, LABEL);
        }
        y += 2;

        // "HIGH SCORE " + digits, centered as a whole.
        let digits = digit_count(info.high_score);
        let x = w.saturating_sub(11 + digits) / 2;
        let x = fb.put_str(x, y, "HIGH SCORE ", LABEL);
        fb.put_u32(x, y, info.high_score, VALUE);
        y += 2;

        fb.put_str_centered(0, w, y, "O  one player", VALUE);
        y += 1;
        fb.put_str_centered(0, w, y, "T  two players", VALUE);
        y += 1;
        fb.put_str_centered(0, w, y, "Q  quit", VALUE);
        y += 2;
        fb.put_str_centered(0, w, y, "space pause  esc title", HINT);
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &MatchSnapshot, x: u16, y: u16, w: u16) {
        fb.put_str(x, y, "ZEN TETRIS", LABEL);
        let digits = digit_count(snap.high_score);
        let hx = (x + w).saturating_sub(3 + digits);
        let hx = fb.put_str(hx, y, "HI ", LABEL);
        fb.put_u32(hx, y, snap.high_score, VALUE);
    }

    fn draw_board(&self, fb: &mut FrameBuffer, board: &BoardSnapshot, x: u16, y: u16) {
        let wall = CellStyle::text(WALL).on(WALL);
        let rows = BOARD_HEIGHT as u16;
        let cols = BOARD_WIDTH as u16;

        // Side walls and floor.
        fb.fill_rect(x, y, self.cell_w, rows * self.cell_h, '█', wall);
        let right = x + (cols + 1) * self.cell_w;
        fb.fill_rect(right, y, self.cell_w, rows * self.cell_h, '█', wall);
        fb.fill_rect(x, y + rows * self.cell_h, self.frame_width(), self.cell_h, '█', wall);

        let origin_x = x + self.cell_w;
        let clear_glyph = match board.phase {
            AnimationPhase::LineClear { frame } => CLEAR_GLYPHS
                .get((frame as usize).saturating_sub(1))
                .copied(),
            _ => None,
        };

        for row in 0..BOARD_HEIGHT as usize {
            for col in 0..BOARD_WIDTH as usize {
                let (ch, style) = match (clear_glyph, board.clearing_rows[row]) {
                    (Some(glyph), true) => (glyph, CellStyle::text(Rgb::new(240, 240, 240)).on(WELL_BG)),
                    _ => cell_look(board.grid[row][col]),
                };
                self.fill_cell(fb, origin_x, y, col as i8, row as i8, ch, style);
            }
        }

        if let Some(active) = board.active {
            let style = CellStyle::text(block_rgb(active.kind.color())).on(WELL_BG).bold();
            for (cx, cy) in active.cells() {
                self.fill_cell(fb, origin_x, y, cx, cy, '█', style);
            }
        }
    }

    fn draw_stats(
        &self,
        fb: &mut FrameBuffer,
        board: &BoardSnapshot,
        mode: MatchMode,
        idx: usize,
        x: u16,
        y: u16,
    ) {
        let mut cx = x;
        if mode == MatchMode::Dual {
            cx = fb.put_str(cx, y, if idx == 0 { "P1 " } else { "P2 " }, LABEL);
        }
        cx = fb.put_str(cx, y, "SCORE ", LABEL);
        cx = fb.put_u32(cx, y, board.score, VALUE);
        cx = fb.put_str(cx, y, " LV ", LABEL);
        cx = fb.put_u32(cx, y, board.level, VALUE);
        if board.pending_attack > 0 {
            cx = fb.put_str(cx, y, " +", HINT);
            fb.put_u32(cx, y, board.pending_attack, HINT);
        }
    }

    /// Paint board cell `(col, row)`; cells outside the well are skipped.
    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        top_y: u16,
        col: i8,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        if !(0..BOARD_WIDTH as i8).contains(&col) || !(0..BOARD_HEIGHT as i8).contains(&row) {
            return;
        }
        let px = origin_x + col as u16 * self.cell_w;
        let py = top_y + (BOARD_HEIGHT as u16 - 1 - row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
        let mid = y.saturating_add(h / 2);
        let len = text.chars().count() as u16;
        let tx = x.saturating_add(w.saturating_sub(len + 2) / 2);
        fb.fill_rect(tx, mid, len + 2, 1, ' ', OVERLAY);
        fb.put_str(tx + 1, mid, text, OVERLAY);
    }
}

/// Glyph and style of a grid cell (0 = empty).
fn cell_look(id: u8) -> (char, CellStyle) {
    match BlockColor::from_u8(id) {
        Some(color) => ('█', CellStyle::text(block_rgb(color)).on(WELL_BG)),
        None => ('·', CellStyle::text(Rgb::new(60, 60, 70)).on(WELL_BG).dim()),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
