//! Frame layout
//!
//! ```text
//! ┌ scrollchart ───────────────────────────┐
//! │ chart (bars, labels, axis)             │
//! │                                        │
//! │ [ ▶ Play   ] ━━━━●──────── range  n/m  │
//! │ help                                   │
//! └────────────────────────────────────────┘
//! ```

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Widget},
    Frame,
};

use super::app::App;
use super::components::{put_str, render_chart, render_controls};

const HELP: &str = "space play/pause  ←/→ step  PgUp/PgDn page  Home/End jump  q quit";

pub fn render(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();
    draw(frame.buffer_mut(), area, app, now);
}

/// Draw the whole view into `buf` and record hit areas for the mouse
pub fn draw(buf: &mut Buffer, area: Rect, app: &mut App, now: Instant) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" scrollchart ")
        .border_style(app.theme.axis())
        .style(Style::default().bg(app.theme.bg_color));
    let inner = block.inner(area);
    block.render(area, buf);

    let [chart_area, _, controls_area, help_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_chart(
        buf,
        chart_area,
        &app.scene,
        app.visible_rows,
        app.max_rate,
        &app.axis_title,
        &app.theme,
        now,
    );

    let range_label = app.range_label();
    let controls = render_controls(
        buf,
        controls_area,
        app.start,
        app.max_start,
        app.playing,
        &range_label,
        &app.theme,
    );
    app.layout.button_area = controls.button_area;
    app.layout.slider_area = controls.slider_area;

    put_str(
        buf,
        help_area.x,
        help_area.y,
        help_area.right(),
        HELP,
        app.theme.dim(),
    );
}
