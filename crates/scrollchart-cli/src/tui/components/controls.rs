//! Play/pause button and scrubber slider
//!
//! The slider covers start positions `0..=max_start`, like a range input.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

use super::put_str;
use crate::tui::theme::Theme;

const BUTTON_WIDTH: u16 = 12;
const MIN_SLIDER_WIDTH: u16 = 4;

/// Hit areas of the rendered controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlsRenderResult {
    pub button_area: Option<Rect>,
    pub slider_area: Option<Rect>,
}

/// Render the button and slider on the first line of `area`
///
/// `range_label` (first and last month of the window) goes right of the slider.
pub fn render_controls(
    buf: &mut Buffer,
    area: Rect,
    start: usize,
    max_start: usize,
    playing: bool,
    range_label: &str,
    theme: &Theme,
) -> ControlsRenderResult {
    if area.height == 0 || area.width < BUTTON_WIDTH {
        return ControlsRenderResult::default();
    }
    let y = area.y;

    let (text, color) = if playing {
        ("❚❚ Pause", theme.playing_color)
    } else {
        ("▶ Play", theme.accent_color)
    };
    let button = format!("[ {text:<8} ]");
    put_str(buf, area.x, y, area.right(), &button, Style::default().fg(color));
    let button_area = Rect::new(area.x, y, BUTTON_WIDTH, 1);

    let info = format!(" {range_label}  {start}/{max_start}");
    let slider_x = area.x + BUTTON_WIDTH + 1;
    let slider_width = area
        .right()
        .saturating_sub(slider_x)
        .saturating_sub(info.width() as u16 + 1);

    if slider_width < MIN_SLIDER_WIDTH {
        return ControlsRenderResult {
            button_area: Some(button_area),
            slider_area: None,
        };
    }

    let slider_area = Rect::new(slider_x, y, slider_width, 1);
    render_slider(buf, slider_area, start, max_start, theme);
    put_str(
        buf,
        slider_area.right() + 1,
        y,
        area.right(),
        &info,
        theme.dim(),
    );

    ControlsRenderResult {
        button_area: Some(button_area),
        slider_area: Some(slider_area),
    }
}

fn render_slider(buf: &mut Buffer, area: Rect, start: usize, max_start: usize, theme: &Theme) {
    let thumb = thumb_offset(area.width, start, max_start);
    for offset in 0..area.width {
        let (ch, color) = match offset.cmp(&thumb) {
            std::cmp::Ordering::Less => ('━', theme.accent_color),
            std::cmp::Ordering::Equal => ('●', theme.accent_color),
            std::cmp::Ordering::Greater => ('─', theme.track_color),
        };
        if let Some(cell) = buf.cell_mut((area.x + offset, area.y)) {
            cell.set_char(ch);
            cell.set_style(Style::default().fg(color));
        }
    }
}

fn thumb_offset(width: u16, start: usize, max_start: usize) -> u16 {
    if max_start == 0 || width <= 1 {
        return 0;
    }
    let ratio = start.min(max_start) as f32 / max_start as f32;
    (ratio * (width - 1) as f32).round() as u16
}

/// Map a click column on the slider to a window start, like dragging a range input
pub fn slider_index(click_x: u16, area: Rect, max_start: usize) -> usize {
    if area.width <= 1 {
        return 0;
    }
    let relative = click_x.saturating_sub(area.x).min(area.width - 1) as f32;
    let ratio = relative / (area.width - 1) as f32;
    ((ratio * max_start as f32).round() as usize).min(max_start)
}
