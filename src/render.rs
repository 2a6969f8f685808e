//! Frame output
//!
//! Renderers only ever see a [`Frame`] captured after a tick completes.

use std::io::{self, Write};

use crate::consts::{BENEFICIAL_COLOR, BORDER_COLOR, HARMFUL_COLOR, SCORE_COLOR, SNAKE_COLOR};
use crate::sim::Frame;

const HEAD_GLYPH: char = '@';
const BODY_GLYPH: char = 'o';
const BENEFICIAL_GLYPH: char = '*';
const HARMFUL_GLYPH: char = 'x';
const EMPTY_GLYPH: char = '.';

/// Consumer of per-tick snapshots
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Discards frames
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
}

/// Collects frames in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// One JSON object per frame, newline separated
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Text board for terminals
pub struct AsciiRenderer<W: Write> {
    out: W,
    /// Truecolor ANSI escapes
    color: bool,
    /// Redraw in place instead of scrolling
    clear: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            clear: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }
}

impl<W: Write> FrameSink for AsciiRenderer<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        if self.clear {
            self.out.write_all(b"\x1b[H\x1b[2J")?;
        }
        let text = if self.color {
            render_ansi(frame)
        } else {
            render_ascii(frame)
        };
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

fn glyph_grid(frame: &Frame) -> Vec<Vec<char>> {
    let width = frame.width.max(0) as usize;
    let height = frame.height.max(0) as usize;
    let mut rows = vec![vec![EMPTY_GLYPH; width]; height];

    let mut put = |cell: glam::IVec2, glyph: char| {
        if cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < width && (cell.y as usize) < height {
            rows[cell.y as usize][cell.x as usize] = glyph;
        }
    };

    put(frame.beneficial, BENEFICIAL_GLYPH);
    put(frame.harmful, HARMFUL_GLYPH);
    // Tail to head so the head glyph wins on overlap
    for (i, &cell) in frame.body.iter().enumerate().rev() {
        put(cell, if i == 0 { HEAD_GLYPH } else { BODY_GLYPH });
    }
    rows
}

fn score_line(frame: &Frame) -> String {
    format!(
        "Your score: {} (best {}, length {})",
        frame.score,
        frame.best_score,
        frame.body.len()
    )
}

/// Plain text board followed by the score line
pub fn render_ascii(frame: &Frame) -> String {
    let mut out = String::new();
    for row in glyph_grid(frame) {
        out.extend(row);
        out.push('\n');
    }
    out.push_str(&score_line(frame));
    out.push('\n');
    out
}

fn paint(out: &mut String, [r, g, b]: [u8; 3], text: &str) {
    out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"));
}

/// Colored board with a border, using the game palette
pub fn render_ansi(frame: &Frame) -> String {
    let rows = glyph_grid(frame);
    let border = "-".repeat(rows.first().map_or(0, Vec::len) + 2);

    let mut out = String::new();
    paint(&mut out, BORDER_COLOR, &border);
    out.push('\n');
    for row in rows {
        paint(&mut out, BORDER_COLOR, "|");
        for glyph in row {
            let color = match glyph {
                HEAD_GLYPH | BODY_GLYPH => Some(SNAKE_COLOR),
                BENEFICIAL_GLYPH => Some(BENEFICIAL_COLOR),
                HARMFUL_GLYPH => Some(HARMFUL_COLOR),
                _ => None,
            };
            match color {
                Some(color) => paint(&mut out, color, &glyph.to_string()),
                None => out.push(' '),
            }
        }
        paint(&mut out, BORDER_COLOR, "|");
        out.push('\n');
    }
    paint(&mut out, BORDER_COLOR, &border);
    out.push('\n');
    paint(&mut out, SCORE_COLOR, &score_line(frame));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn frame() -> Frame {
        Frame {
            tick: 3,
            width: 5,
            height: 3,
            body: vec![IVec2::new(2, 1), IVec2::new(1, 1)],
            last_removed: Some(IVec2::new(0, 1)),
            trimmed: vec![IVec2::new(0, 1)],
            beneficial: IVec2::new(4, 0),
            harmful: IVec2::new(0, 2),
            score: 2,
            best_score: 5,
        }
    }

    #[test]
    fn test_render_ascii() {
        let text = render_ascii(&frame());
        assert_eq!(
            text,
            "....*\n.o@..\nx....\nYour score: 2 (best 5, length 2)\n"
        );
    }

    #[test]
    fn test_render_ansi_has_border_and_colors() {
        let text = render_ansi(&frame());
        assert!(text.contains("\x1b[38;2;0;255;0m@"));
        assert!(text.contains("\x1b[38;2;255;0;0m*"));
        assert!(text.contains("Your score: 2"));
        assert_eq!(text.lines().count(), 3 + 3);
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.present(&frame()).unwrap();
        sink.present(&frame()).unwrap();
        let text = String::from_utf8(sink.out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: Frame = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, frame());
    }

    #[test]
    fn test_ascii_renderer_writes_frame() {
        let mut renderer = AsciiRenderer::new(Vec::new()).with_clear(true);
        renderer.present(&frame()).unwrap();
        let text = String::from_utf8(renderer.out).unwrap();
        assert!(text.starts_with("\x1b[H\x1b[2J"));
        assert!(text.ends_with("length 2)\n"));
    }
}
