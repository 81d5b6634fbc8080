//! Off-screen rendering: draw one frame into a `TestBackend` and read the
//! cells back as plain text.

use anyhow::{Context, Result};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use unicode_width::UnicodeWidthStr;

use super::state::AppState;
use crate::ui;

/// Render `state` into a `width × height` buffer.
pub fn render_buffer(state: &AppState, width: u16, height: u16) -> Result<Buffer> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to build test backend")?;
    terminal
        .draw(|frame| ui::draw(frame, state))
        .context("failed to draw headless frame")?;
    Ok(terminal.backend().buffer().clone())
}

/// Plain-text rows of `buf`, trailing spaces trimmed.  A wide glyph fills
/// two cells but is emitted once.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut row = String::new();
        let mut skip = 0;
        for x in area.left()..area.right() {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = buf[(x, y)].symbol();
            row.push_str(symbol);
            skip = symbol.width().saturating_sub(1);
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Render and flatten in one go.
pub fn render_text(state: &AppState, width: u16, height: u16) -> Result<String> {
    let buf = render_buffer(state, width, height)?;
    tracing::debug!("headless render {width}x{height}");
    Ok(buffer_to_text(&buf))
}
