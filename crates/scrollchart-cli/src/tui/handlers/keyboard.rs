//! Keyboard handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        let page = self.visible_rows as i64;
        let result = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => self.playback.toggle_playback(),
            KeyCode::Left | KeyCode::Char('h') => self.playback.step(-1),
            KeyCode::Right | KeyCode::Char('l') => self.playback.step(1),
            KeyCode::PageUp => self.playback.step(-page),
            KeyCode::PageDown => self.playback.step(page),
            KeyCode::Home | KeyCode::Char('g') => self.playback.jump_to_start(),
            KeyCode::End | KeyCode::Char('G') => self.playback.jump_to_end(),
            _ => return,
        };
        self.control(result);
    }
}
