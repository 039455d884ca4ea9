//! Chart widgets

mod chart;
mod controls;

pub use chart::render_chart;
pub use controls::{render_controls, slider_index};

use ratatui::{buffer::Buffer, style::Style};
use unicode_width::UnicodeWidthChar;

/// Write `text` at (x, y), clipped at `max_x`. Returns the column after the text.
pub(crate) fn put_str(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_x: u16,
    text: &str,
    style: Style,
) -> u16 {
    let mut cx = x;
    for ch in text.chars() {
        let char_width = ch.width().unwrap_or(1) as u16;
        if cx + char_width > max_x {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
        cx += char_width;
    }
    cx
}
