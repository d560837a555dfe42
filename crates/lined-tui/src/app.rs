use std::io;

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use lined_core::Session;

use crate::input::{read_action, Action};
use crate::screen;

/// Application state for the full-screen frontend
pub struct App {
    session: Session,
    input_text: String,
    /// Preferred first visible line (1-based)
    scroll: usize,
    /// Rows in the file area, refreshed from the terminal size
    page_size: usize,
    /// Last line the session touched, to detect when to follow it
    followed_line: usize,
}

impl App {
    pub fn new(session: Session) -> Self {
        let followed_line = session.current_line();
        Self {
            session,
            input_text: String::new(),
            scroll: 1,
            page_size: 20,
            followed_line,
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run the main event loop
    pub fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.event_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            let size = terminal.size()?;
            self.page_size = size.height.saturating_sub(screen::CHROME_ROWS).max(1) as usize;
            self.follow_current_line();

            terminal.draw(|frame| {
                screen::render(frame, &self.session, &self.input_text, self.scroll);
            })?;

            if self.session.is_finished() {
                break;
            }

            let action = read_action()?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Keep the window on the last touched line after each edit, while
    /// leaving manual scrolling alone in between.
    fn follow_current_line(&mut self) {
        let count = self.session.document().line_count();
        let current = self.session.current_line();
        if current != self.followed_line {
            self.followed_line = current;
            self.scroll = screen::first_visible(count, current, self.scroll, self.page_size);
        } else {
            self.scroll = screen::first_visible(count, 0, self.scroll, self.page_size);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Char(c) => self.input_text.push(c),
            Action::Backspace => {
                self.input_text.pop();
            }
            Action::Submit => {
                let text = std::mem::take(&mut self.input_text);
                debug!(prompt = ?self.session.prompt(), "submit");
                self.session.submit(&text);
            }
            Action::Cancel => {
                self.input_text.clear();
                self.session.cancel();
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1).max(1),
            Action::ScrollDown => self.scroll += 1,
            Action::PageUp => self.scroll = self.scroll.saturating_sub(self.page_size).max(1),
            Action::PageDown => self.scroll += self.page_size,
            Action::Home => self.scroll = 1,
            Action::End => self.scroll = self.session.document().line_count().max(1),
            Action::ForceQuit => self.session.end_of_input(),
            Action::EndOfInput => {
                if self.input_text.is_empty() {
                    self.session.end_of_input();
                }
            }
            Action::None => {}
        }
    }
}
