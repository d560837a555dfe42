use std::mem;

use tracing::{debug, info};

use crate::command::{parse_command, MenuCommand};
use crate::document::Document;
use crate::error::{LinedError, Result};
use crate::input::parse_number;
use crate::transcoder;

/// Where the next piece of typed text will go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// New last line
    Append,
    /// New line at this 1-based position
    Insert(usize),
    /// Replacement for the line at this 1-based position
    Replace(usize),
}

/// What the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// A menu selection
    Menu,
    /// A line number for insert, delete or edit
    Position(MenuCommand),
    /// A line of text
    Text(TextTarget),
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Saved on exit
    Saved,
    /// Quit with unsaved changes
    Discarded,
    /// Quit with nothing to save
    Unchanged,
    /// Save on exit failed
    SaveFailed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::SaveFailed => 1,
            _ => 0,
        }
    }

    pub fn farewell(self) -> &'static str {
        match self {
            Outcome::Saved => "File saved.",
            Outcome::Discarded => "Changes discarded.",
            Outcome::Unchanged => "Bye!",
            Outcome::SaveFailed => "Error saving file.",
        }
    }
}

/// The menu-driven editing loop, independent of any terminal.
///
/// A frontend renders [`Session::document`] and [`Session::prompt_text`],
/// reads one token from the user and hands it to [`Session::submit`],
/// until [`Session::outcome`] is set.
#[derive(Debug)]
pub struct Session {
    document: Document,
    prompt: Prompt,
    message: Option<String>,
    current_line: usize,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(document: Document) -> Self {
        let current_line = document.line_count();
        Self {
            document,
            prompt: Prompt::Menu,
            message: None,
            current_line,
            outcome: None,
        }
    }

    // -- Accessors for frontends --

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// Text to show before the user's input
    pub fn prompt_text(&self) -> String {
        match self.prompt {
            Prompt::Menu => "Option: ".to_string(),
            Prompt::Position(cmd) => format!(
                "{} which line? (1-{}): ",
                cmd.verb(),
                self.document.line_count()
            ),
            Prompt::Text(TextTarget::Replace(_)) => "New line: ".to_string(),
            Prompt::Text(_) => "Enter new line: ".to_string(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Line most recently touched, 0 when there is none
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    // -- Input --

    /// Feed one token of user input to the current prompt.
    ///
    /// Failures are reported through [`Session::message`] and leave the
    /// document unchanged; the session returns to the menu.
    pub fn submit(&mut self, input: &str) {
        if self.is_finished() {
            return;
        }
        self.message = None;

        let prompt = mem::replace(&mut self.prompt, Prompt::Menu);
        let result = match prompt {
            Prompt::Menu => self.select(input),
            Prompt::Position(cmd) => self.choose_position(cmd, input),
            Prompt::Text(target) => self.enter_text(target, input),
        };

        if let Err(e) = result {
            debug!(error = %e, "command rejected");
            self.message = Some(e.to_string());
        }
    }

    /// Abandon the pending prompt and go back to the menu
    pub fn cancel(&mut self) {
        if self.prompt != Prompt::Menu {
            debug!(prompt = ?self.prompt, "prompt cancelled");
        }
        self.prompt = Prompt::Menu;
        self.message = None;
    }

    /// The input stream is exhausted; treated as quit
    pub fn end_of_input(&mut self) {
        if !self.is_finished() {
            self.prompt = Prompt::Menu;
            self.quit();
        }
    }

    fn select(&mut self, input: &str) -> Result<()> {
        let cmd = parse_command(input)?;
        debug!(?cmd, "menu selection");
        match cmd {
            MenuCommand::Append => self.prompt = Prompt::Text(TextTarget::Append),
            MenuCommand::Insert => {
                // Nothing to insert before: go straight to the text prompt
                self.prompt = if self.document.is_empty() {
                    Prompt::Text(TextTarget::Append)
                } else {
                    Prompt::Position(cmd)
                };
            }
            MenuCommand::Delete | MenuCommand::Edit => {
                if self.document.is_empty() {
                    return Err(LinedError::EmptyDocument);
                }
                self.prompt = Prompt::Position(cmd);
            }
            MenuCommand::Save => {
                transcoder::save(&mut self.document)?;
                self.message = Some("File saved.".to_string());
            }
            MenuCommand::Exit => {
                if let Err(e) = transcoder::save(&mut self.document) {
                    self.finish(Outcome::SaveFailed);
                    return Err(e);
                }
                self.finish(Outcome::Saved);
            }
            MenuCommand::Quit => self.quit(),
        }
        Ok(())
    }

    fn choose_position(&mut self, cmd: MenuCommand, input: &str) -> Result<()> {
        let position = parse_number(input)?;
        self.document.check_position(position)?;
        match cmd {
            MenuCommand::Insert => {
                self.prompt = Prompt::Text(TextTarget::Insert(position));
            }
            MenuCommand::Delete => {
                let removed = self.document.delete(position)?;
                self.current_line = position.min(self.document.line_count());
                self.message = Some(format!("Deleted: {}", removed.text()));
            }
            MenuCommand::Edit => {
                self.current_line = position;
                let current = String::from_utf8_lossy(self.document.line_at(position));
                self.message = Some(format!("Current: {}", current));
                self.prompt = Prompt::Text(TextTarget::Replace(position));
            }
            other => {
                return Err(LinedError::InvalidOption(other.name().to_string()));
            }
        }
        Ok(())
    }

    fn enter_text(&mut self, target: TextTarget, text: &str) -> Result<()> {
        match target {
            TextTarget::Append => {
                self.document.append(text)?;
                self.current_line = self.document.line_count();
            }
            TextTarget::Insert(position) => {
                self.document.insert(position, text)?;
                self.current_line = position;
            }
            TextTarget::Replace(position) => {
                self.document.edit(position, text)?;
                self.current_line = position;
            }
        }
        Ok(())
    }

    fn quit(&mut self) {
        let outcome = if self.document.is_changed() {
            Outcome::Discarded
        } else {
            Outcome::Unchanged
        };
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(?outcome, "session finished");
        self.outcome = Some(outcome);
    }
}
