//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Coord, GameSnapshot, Piece};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::Color;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const FIELD_BG: Rgb = Rgb::new(20, 20, 28);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';

/// Side of the square the next-piece preview is drawn in, in board cells.
const PREVIEW_CELLS: u16 = 4;

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen rectangle of the bordered play field.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::default().glyph(' '));

        let frame_w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = snap.height.saturating_mul(self.cell_h).saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        self.draw_border(fb, frame, Style::plain(Rgb::new(128, 128, 128), PANEL_BG));

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    Some(color) => self.draw_block(fb, frame, x, y, color),
                    None => self.fill_board_cell(
                        fb,
                        frame,
                        x,
                        y,
                        '·',
                        Style::plain(Rgb::new(70, 70, 80), FIELD_BG).dim(),
                    ),
                }
            }
        }

        // Still drawn after game over: it is the piece that could not spawn.
        self.draw_piece(fb, frame, snap, &snap.active);

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER!");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: Style) {
        if f.w < 2 || f.h < 2 {
            return;
        }

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(f.x + f.w - 1, f.y, '┐', style);
        fb.put_char(f.x, f.y + f.h - 1, '└', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '┘', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '─', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '─', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '│', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '│', style);
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot, piece: &Piece) {
        for Coord { x, y } in piece.cells() {
            if x >= 0 && y >= 0 && (x as u16) < snap.width && (y as u16) < snap.height {
                self.draw_block(fb, frame, x as u16, y as u16, piece.color);
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        let style = Style::plain(palette(color), FIELD_BG).bold();
        self.fill_board_cell(fb, frame, x, y, BLOCK, style);
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: u16,
        y: u16,
        ch: char,
        style: Style,
    ) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::plain(Rgb::new(160, 160, 160), PANEL_BG).bold();
        let value = Style::plain(Rgb::new(255, 255, 255), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, &snap.next);
        y = y.saturating_add(PREVIEW_CELLS * self.cell_h + 1);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        // Shown 1-based.
        fb.put_u32(panel_x, y, snap.level.saturating_add(1), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
    }

    /// Draw the next piece from its relative cells, origin at preview cell (1, 1).
    fn draw_preview(&self, fb: &mut FrameBuffer, x0: u16, y0: u16, piece: &Piece) {
        let style = Style::plain(palette(piece.color), PANEL_BG).bold();
        let origin = Coord::new(1, 1);
        let cells = [origin]
            .into_iter()
            .chain(piece.relative.iter().map(|r| origin + *r));
        for Coord { x, y } in cells {
            if x < 0 || y < 0 || x as u16 >= PREVIEW_CELLS || y as u16 >= PREVIEW_CELLS {
                continue;
            }
            fb.fill_rect(
                x0 + x as u16 * self.cell_w,
                y0 + y as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                BLOCK,
                style,
            );
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let mid_y = f.y.saturating_add(f.h / 2);
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        let style = Style::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Palette color for a cell: red, green, blue, yellow, magenta, cyan.
pub fn palette(color: Color) -> Rgb {
    match color.get() {
        1 => Rgb::new(220, 60, 60),
        2 => Rgb::new(80, 200, 90),
        3 => Rgb::new(70, 110, 230),
        4 => Rgb::new(235, 215, 70),
        5 => Rgb::new(210, 90, 210),
        _ => Rgb::new(70, 210, 220),
    }
}
