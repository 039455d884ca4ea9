//! Horizontal bar chart: month labels, bars, rate labels, and the x axis

use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect};
use unicode_width::UnicodeWidthStr;

use super::put_str;
use crate::tui::scale::{BandScale, LinearScale};
use crate::tui::scene::Scene;
use crate::tui::theme::Theme;

/// Columns reserved left of the bars for `YYYY-MM`
const LABEL_WIDTH: u16 = 9;
/// Columns reserved right of the longest bar for the rate label
const RATE_WIDTH: u16 = 8;
/// Axis line, tick labels, title
const AXIS_HEIGHT: u16 = 3;
/// Band padding between rows
const BAR_PADDING: f64 = 0.1;

/// Partial blocks for the fractional end of a bar, 1/8 to 7/8
const PARTIAL_BLOCKS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];
const FULL_BLOCK: char = '█';

/// Render the bars of `scene` and the x axis into `area`
pub fn render_chart(
    buf: &mut Buffer,
    area: Rect,
    scene: &Scene,
    visible_rows: usize,
    max_rate: f64,
    axis_title: &str,
    theme: &Theme,
    now: Instant,
) {
    if area.width < LABEL_WIDTH + RATE_WIDTH + 10 || area.height < AXIS_HEIGHT + 2 {
        let msg = "Terminal too small";
        let x = area.x + area.width.saturating_sub(msg.width() as u16) / 2;
        put_str(buf, x, area.y + area.height / 2, area.right(), msg, theme.dim());
        return;
    }

    let plot_top = area.y as f64;
    let plot_bottom = (area.bottom() - AXIS_HEIGHT) as f64;
    let x0 = area.x + LABEL_WIDTH;
    let x1 = area.right() - RATE_WIDTH;

    let x = LinearScale::new((0.0, max_rate), (x0 as f64, x1 as f64));
    let y = BandScale::new(visible_rows, (plot_top, plot_bottom), BAR_PADDING);
    let thickness = (y.bandwidth().round() as u16).max(1);
    let t = scene.progress(now);

    for bar in scene.bars() {
        let top = y.position(bar.row_at(t)).floor();
        if top < plot_top || top + thickness as f64 > plot_bottom {
            continue;
        }
        let top = top as u16;
        let mid = top + thickness / 2;

        let length = (x.map(bar.value_at(t)) - x0 as f64).max(0.0);
        let end = draw_bar(buf, x0, top, thickness, length, theme);

        let label = bar.observation.label();
        let label_x = x0.saturating_sub(1 + label.width() as u16).max(area.x);
        put_str(buf, label_x, mid, x0, &label, theme.month_label());

        let rate = format!("{}%", bar.observation.rate);
        put_str(buf, end + 1, mid, area.right(), &rate, theme.rate_label());
    }

    render_axis(buf, area, &x, axis_title, theme);
}

/// Draw a bar `length` columns long; returns the first column after it
fn draw_bar(
    buf: &mut Buffer,
    x0: u16,
    top: u16,
    thickness: u16,
    length: f64,
    theme: &Theme,
) -> u16 {
    let full = length.floor() as u16;
    let eighths = ((length - length.floor()) * 8.0).floor() as usize;
    let style = theme.bar();

    for line in top..top + thickness {
        for cx in x0..x0 + full {
            if let Some(cell) = buf.cell_mut((cx, line)) {
                cell.set_char(FULL_BLOCK);
                cell.set_style(style);
            }
        }
        if eighths > 0 {
            if let Some(cell) = buf.cell_mut((x0 + full, line)) {
                cell.set_char(PARTIAL_BLOCKS[eighths - 1]);
                cell.set_style(style);
            }
        }
    }

    if eighths > 0 {
        x0 + full + 1
    } else {
        x0 + full
    }
}

fn render_axis(buf: &mut Buffer, area: Rect, x: &LinearScale, title: &str, theme: &Theme) {
    let axis_y = area.bottom() - AXIS_HEIGHT;
    let label_y = axis_y + 1;
    let title_y = axis_y + 2;
    let (r0, r1) = x.range();
    let (r0, r1) = (r0 as u16, r1 as u16);

    for cx in r0..=r1 {
        if let Some(cell) = buf.cell_mut((cx, axis_y)) {
            cell.set_char('─');
            cell.set_style(theme.axis());
        }
    }

    let tick_count = ((r1 - r0) / 8).max(2) as usize;
    let decimals = x.tick_decimals(tick_count);
    let mut next_free = area.x;
    for tick in x.ticks(tick_count) {
        let tx = x.map(tick).round() as u16;
        if let Some(cell) = buf.cell_mut((tx, axis_y)) {
            cell.set_char('┬');
            cell.set_style(theme.axis());
        }

        let text = format!("{tick:.decimals$}");
        let start = tx.saturating_sub(text.width() as u16 / 2);
        if start < next_free {
            continue;
        }
        next_free = put_str(buf, start, label_y, area.right(), &text, theme.axis()) + 1;
    }

    let title_x = r0 + (r1 - r0).saturating_sub(title.width() as u16) / 2;
    put_str(buf, title_x, title_y, area.right(), title, theme.axis_title());
}
