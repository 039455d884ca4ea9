//! Colors for the chart

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_color: Color,
    pub bar_color: Color,
    pub text_color: Color,
    pub dim_color: Color,
    pub accent_color: Color,
    pub axis_color: Color,
    pub track_color: Color,
    pub playing_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_color: Color::Reset,
            // steelblue
            bar_color: Color::Rgb(70, 130, 180),
            text_color: Color::Rgb(220, 220, 220),
            dim_color: Color::Rgb(120, 120, 120),
            accent_color: Color::Rgb(137, 180, 250),
            axis_color: Color::Rgb(160, 160, 160),
            track_color: Color::Rgb(70, 70, 70),
            playing_color: Color::Rgb(166, 227, 161),
        }
    }
}

impl Theme {
    pub fn month_label(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn rate_label(&self) -> Style {
        Style::default().fg(self.text_color)
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(self.bar_color)
    }

    pub fn axis(&self) -> Style {
        Style::default().fg(self.axis_color)
    }

    pub fn axis_title(&self) -> Style {
        Style::default()
            .fg(self.text_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim_color)
    }
}
