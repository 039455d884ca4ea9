//! Mouse handling
//!
//! Clicking the button toggles playback. Clicking or dragging on the slider
//! scrubs, which stops playback. The wheel steps one row.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::tui::app::App;
use crate::tui::components::slider_index;

fn hit(area: Option<Rect>, x: u16, y: u16) -> Option<Rect> {
    area.filter(|a| a.contains(Position::new(x, y)))
}

impl App {
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if hit(self.layout.button_area, x, y).is_some() {
                    let result = self.playback.toggle_playback();
                    self.control(result);
                } else if let Some(slider) = hit(self.layout.slider_area, x, y) {
                    self.layout.dragging_slider = true;
                    self.scrub_slider(x, slider);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.layout.dragging_slider => {
                // Dragging keeps tracking outside the track, clamped by slider_index
                if let Some(slider) = self.layout.slider_area {
                    self.scrub_slider(x, slider);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.layout.dragging_slider = false;
            }
            MouseEventKind::ScrollUp => {
                let result = self.playback.step(-1);
                self.control(result);
            }
            MouseEventKind::ScrollDown => {
                let result = self.playback.step(1);
                self.control(result);
            }
            _ => {}
        }
    }

    fn scrub_slider(&mut self, x: u16, slider: Rect) {
        let index = slider_index(x, slider, self.max_start);
        if index == self.start && !self.playing {
            return;
        }
        let result = self.playback.scrub_to(index as i64);
        self.control(result);
    }
}
