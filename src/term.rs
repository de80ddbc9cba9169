//! Braille terminal renderer for the liquidfill demo
//!
//! Rasterizes engine frames at 2x4 subpixels per terminal cell using
//! Unicode braille, with true-color escapes and a double-buffered diff
//! flush so only changed cells are rewritten each frame.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate},
};

use liquidfill::{Frame, POUR_STROKE_WIDTH, Point, Rgb, TICK_COLOR, TICK_STROKE_WIDTH};

/// Terminal background; everything is drawn over this.
pub const BG: Rgb = Rgb { r: 6, g: 7, b: 10 };
/// Status line text color.
pub const HUD: Rgb = Rgb { r: 150, g: 158, b: 176 };
/// Faint outline of the empty vessel.
const VESSEL: Rgb = Rgb { r: 64, g: 70, b: 82 };
/// Vessel radius the stroke-width constants were sized for.
const REFERENCE_RADIUS: f32 = 100.0;

// ============================================================
// Subpixel canvas
// ============================================================

// Dot layout of U+2800..=U+28FF: subcell (x, y) -> mask bit.
fn braille_bit(x: usize, y: usize) -> u8 {
    match (x, y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (0, 3) => 0x40,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// Braille-resolution drawing surface.
///
/// Each terminal cell keeps a dot bitmask plus the color of the last
/// primitive stamped onto it, so later stamps own shared cells and
/// primitives are drawn back to front.
pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    origin: (i32, i32),
    mask: Vec<u8>,
    fg: Vec<Rgb>,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let n = cols as usize * rows as usize;
        Self {
            cols: cols as usize,
            rows: rows as usize,
            origin: (0, 0),
            mask: vec![0; n],
            fg: vec![BG; n],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols as usize;
        self.rows = rows as usize;
        let n = self.cols * self.rows;
        self.mask.clear();
        self.mask.resize(n, 0);
        self.fg.clear();
        self.fg.resize(n, BG);
    }

    /// Subpixel offset applied to every stamp, for centering a stage
    /// narrower than the full terminal.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin = (x, y);
    }

    /// Full drawable width in subpixels.
    pub fn width(&self) -> f32 {
        (self.cols * 2) as f32
    }

    /// Full drawable height in subpixels.
    pub fn height(&self) -> f32 {
        (self.rows * 4) as f32
    }

    pub fn clear(&mut self) {
        self.mask.fill(0);
        self.fg.fill(BG);
    }

    fn stamp(&mut self, sx: i32, sy: i32, color: Rgb) {
        let sx = sx + self.origin.0;
        let sy = sy + self.origin.1;
        if sx < 0 || sy < 0 {
            return;
        }
        let (bx, by) = (sx as usize / 2, sy as usize / 4);
        if bx >= self.cols || by >= self.rows {
            return;
        }
        let i = by * self.cols + bx;
        self.mask[i] |= braille_bit(sx as usize % 2, sy as usize % 4);
        self.fg[i] = color;
    }

    /// Stamp a filled disc of subpixels.
    fn disc(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let x0 = (cx - r).floor() as i32;
        let x1 = (cx + r).ceil() as i32;
        let y0 = (cy - r).floor() as i32;
        let y1 = (cy + r).ceil() as i32;
        for sy in y0..=y1 {
            for sx in x0..=x1 {
                let dx = sx as f32 - cx;
                let dy = sy as f32 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.stamp(sx, sy, color);
                }
            }
        }
    }

    /// Stamp a thick stroke by sweeping a disc along the segment.
    fn thick_line(&mut self, a: Point, b: Point, width: f32, color: Rgb) {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len * 2.0).ceil().max(1.0) as usize;
        let r = (width / 2.0).max(0.5);
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            self.disc(a.x + dx * t, a.y + dy * t, r, color);
        }
    }

    /// Stamp a one-subpixel circle outline.
    fn ring(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let steps = (r * std::f32::consts::TAU).ceil().max(8.0) as usize;
        for s in 0..steps {
            let a = s as f32 / steps as f32 * std::f32::consts::TAU;
            self.stamp(
                (cx + r * a.cos()).round() as i32,
                (cy + r * a.sin()).round() as i32,
                color,
            );
        }
    }
}

/// Rasterize one engine frame onto the canvas.
///
/// Wave, pour, ball, tick, in that order, so the later primitives own
/// the cells they share with earlier ones.
pub fn render_frame(canvas: &mut BrailleCanvas, frame: &Frame) {
    let clip = frame.clip;
    let (cx, cy, r) = (clip.center.x, clip.center.y, clip.radius);
    let scale = r / REFERENCE_RADIUS;

    canvas.ring(cx, cy, r, VESSEL);

    if frame.draw.wave {
        // Drop the two closing points; the leading ones sample the
        // surface at one-pixel spacing from the left rim.
        let samples = &frame.wave[..frame.wave.len().saturating_sub(2)];
        if !samples.is_empty() {
            let left = samples[0].x;
            let x0 = (cx - r).floor() as i32;
            let x1 = (cx + r).ceil() as i32;
            for sx in x0..=x1 {
                let dx = sx as f32 - cx;
                let half_sq = r * r - dx * dx;
                if half_sq < 0.0 {
                    continue;
                }
                let half = half_sq.sqrt();
                let idx = ((sx as f32 - left).max(0.0) as usize).min(samples.len() - 1);
                let surface = samples[idx].y;
                let y_bot = cy + half;
                let mut sy = surface.max(cy - half).ceil() as i32;
                while sy as f32 <= y_bot {
                    // Dim with depth so the surface reads as the bright edge.
                    let depth = ((sy as f32 - surface) / (2.0 * r)).clamp(0.0, 1.0);
                    canvas.stamp(sx, sy, frame.color.mix(BG, 0.35 * depth));
                    sy += 1;
                }
            }
        }
    }

    if frame.draw.pour {
        let w = (POUR_STROKE_WIDTH * scale).max(1.0);
        let y0 = frame.pour.from.y.min(frame.pour.to.y).round() as i32;
        let y1 = frame.pour.from.y.max(frame.pour.to.y).round() as i32;
        let x0 = (frame.pour.from.x - w / 2.0).round() as i32;
        let x1 = (frame.pour.from.x + w / 2.0).round() as i32;
        for sy in y0..=y1 {
            for sx in x0..=x1 {
                canvas.stamp(sx, sy, frame.color);
            }
        }
    }

    if frame.draw.ball {
        canvas.disc(frame.ball.center.x, frame.ball.center.y, frame.ball.radius, frame.color);
    }

    if frame.draw.tick {
        let w = (TICK_STROKE_WIDTH * scale).max(1.0);
        if let Some(mid) = frame.tick.mid {
            canvas.thick_line(frame.tick.start, mid, w, TICK_COLOR);
            if let Some(end) = frame.tick.end {
                canvas.thick_line(mid, end, w, TICK_COLOR);
            }
        }
    }
}

// ============================================================
// Cell screen
// ============================================================

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
}

impl Cell {
    fn blank() -> Self {
        Self { ch: ' ', fg: BG, bg: BG }
    }
}

/// Double-buffered terminal screen; flush rewrites only changed cells.
pub struct Screen {
    cols: u16,
    rows: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let n = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            back: vec![Cell::blank(); n],
            // A front buffer that can never match forces a full first paint.
            front: vec![Cell { ch: '\0', fg: BG, bg: BG }; n],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Convert canvas subpixels into braille cells in the back buffer.
    pub fn compose(&mut self, canvas: &BrailleCanvas) {
        self.back.fill(Cell::blank());
        let cols = (self.cols as usize).min(canvas.cols);
        let rows = (self.rows as usize).min(canvas.rows);
        for by in 0..rows {
            for bx in 0..cols {
                let m = canvas.mask[by * canvas.cols + bx];
                if m == 0 {
                    continue;
                }
                self.back[by * self.cols as usize + bx] = Cell {
                    ch: char::from_u32(0x2800 + m as u32).unwrap_or(' '),
                    fg: canvas.fg[by * canvas.cols + bx],
                    bg: BG,
                };
            }
        }
    }

    /// Write a one-line label straight into the cell buffer.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        if y >= self.rows {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let cx = x as usize + i;
            if cx >= self.cols as usize {
                break;
            }
            self.back[y as usize * self.cols as usize + cx] = Cell { ch, fg, bg: BG };
        }
    }

    /// Diff the back buffer against what is on screen and write runs of
    /// changed cells.
    pub fn flush(&mut self, out: &mut io::Stdout) -> io::Result<()> {
        queue!(out, BeginSynchronizedUpdate)?;
        let cols = self.cols as usize;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        for y in 0..self.rows as usize {
            let mut x = 0usize;
            while x < cols {
                if self.back[y * cols + x] == self.front[y * cols + x] {
                    x += 1;
                    continue;
                }
                let mut run_end = x + 1;
                while run_end < cols && self.back[y * cols + run_end] != self.front[y * cols + run_end]
                {
                    run_end += 1;
                }

                queue!(out, cursor::MoveTo(x as u16, y as u16))?;
                for cx in x..run_end {
                    let cell = self.back[y * cols + cx];
                    if last_bg != Some(cell.bg) {
                        let Rgb { r, g, b } = cell.bg;
                        queue!(out, SetBackgroundColor(Color::Rgb { r, g, b }))?;
                        last_bg = Some(cell.bg);
                    }
                    if last_fg != Some(cell.fg) {
                        let Rgb { r, g, b } = cell.fg;
                        queue!(out, SetForegroundColor(Color::Rgb { r, g, b }))?;
                        last_fg = Some(cell.fg);
                    }
                    queue!(out, Print(cell.ch))?;
                }
                self.front[y * cols + x..y * cols + run_end]
                    .copy_from_slice(&self.back[y * cols + x..y * cols + run_end]);
                x = run_end;
            }
        }

        queue!(out, ResetColor, EndSynchronizedUpdate)?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn braille_bits_cover_all_eight_dots() {
        let mut seen = 0u8;
        for y in 0..4 {
            for x in 0..2 {
                let bit = braille_bit(x, y);
                assert_eq!(bit.count_ones(), 1, "({x},{y}) maps to one dot");
                assert_eq!(seen & bit, 0, "({x},{y}) does not collide");
                seen |= bit;
            }
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn stamps_land_in_the_right_cell() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.stamp(2, 4, VESSEL);
        assert_eq!(canvas.mask[1 * 2 + 1], braille_bit(0, 0));
        assert_eq!(canvas.fg[1 * 2 + 1], VESSEL);
        assert!(canvas.mask[0] == 0, "other cells untouched");
    }

    #[test]
    fn out_of_bounds_stamps_are_dropped() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.stamp(-1, 0, VESSEL);
        canvas.stamp(0, -3, VESSEL);
        canvas.stamp(4, 0, VESSEL);
        canvas.stamp(0, 8, VESSEL);
        assert!(canvas.mask.iter().all(|&m| m == 0));
    }

    #[test]
    fn origin_offsets_every_stamp() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.set_origin(2, 4);
        canvas.stamp(0, 0, VESSEL);
        assert_eq!(canvas.mask[1 * 2 + 1], braille_bit(0, 0));
    }
}
