use std::borrow::Cow;
use std::mem;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LinedError, Result};

/// A single line in the document, without its line terminator.
///
/// Content is kept as raw bytes so any file round-trips unchanged;
/// [`Line::text`] is a display view only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text, with invalid UTF-8 shown as U+FFFD
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// The in-memory copy of the file being edited.
///
/// Line numbers are 1-based everywhere in the public API. The document
/// owns every line; a deleted or replaced line is handed back to the
/// caller by value and dropped there.
#[derive(Debug)]
pub struct Document {
    lines: Vec<Line>,
    filename: Option<PathBuf>,
    changed: bool,
    is_new: bool,
}

impl Document {
    /// An empty document not yet associated with any file
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            filename: None,
            changed: false,
            is_new: true,
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            lines: lines.into_iter().map(Line::new).collect(),
            ..Self::new()
        }
    }

    /// An empty document bound to `path`; the loader fills it in.
    pub(crate) fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(path.into()),
            ..Self::new()
        }
    }

    /// Add a line read from disk. Does not mark the document changed.
    pub(crate) fn push_loaded(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.lines.try_reserve(1)?;
        self.lines.push(Line::new(bytes));
        Ok(())
    }

    pub(crate) fn finish_load(&mut self) {
        self.is_new = false;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.changed = false;
        self.is_new = false;
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// True when the content differs from the last load or save
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// True when the backing file did not exist at load time and has not
    /// been saved since
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get a line by 1-based line number
    pub fn get(&self, position: usize) -> Option<&Line> {
        if position == 0 || position > self.lines.len() {
            None
        } else {
            Some(&self.lines[position - 1])
        }
    }

    /// Content of line `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not in `1..=line_count()`. Use
    /// [`Document::get`] or [`Document::check_position`] for positions
    /// that come from the user.
    pub fn line_at(&self, position: usize) -> &[u8] {
        match self.get(position) {
            Some(line) => line.bytes(),
            None => panic!(
                "line {} out of range for document with {} lines",
                position,
                self.lines.len()
            ),
        }
    }

    /// Validate a user-supplied line number and return its 0-based index.
    ///
    /// An empty document is reported before the range, so the user is
    /// told to append rather than that their number is wrong.
    pub fn check_position(&self, position: usize) -> Result<usize> {
        let count = self.lines.len();
        if count == 0 {
            return Err(LinedError::EmptyDocument);
        }
        if position == 0 || position > count {
            return Err(LinedError::InvalidPosition { position, count });
        }
        Ok(position - 1)
    }

    /// Add a line after the last one
    pub fn append(&mut self, text: impl Into<Vec<u8>>) -> Result<()> {
        self.lines.try_reserve(1)?;
        self.lines.push(Line::new(text));
        self.changed = true;
        debug!(count = self.lines.len(), "appended line");
        Ok(())
    }

    /// Insert `text` so that it becomes line `position`.
    ///
    /// On an empty document there is nothing to insert before, so the
    /// line is appended and `position` is ignored.
    pub fn insert(&mut self, position: usize, text: impl Into<Vec<u8>>) -> Result<()> {
        if self.lines.is_empty() {
            return self.append(text);
        }
        let idx = self.check_position(position)?;
        self.lines.try_reserve(1)?;
        self.lines.insert(idx, Line::new(text));
        self.changed = true;
        debug!(position, count = self.lines.len(), "inserted line");
        Ok(())
    }

    /// Remove line `position` and return it
    pub fn delete(&mut self, position: usize) -> Result<Line> {
        let idx = self.check_position(position)?;
        let removed = self.lines.remove(idx);
        self.changed = true;
        debug!(position, count = self.lines.len(), "deleted line");
        Ok(removed)
    }

    /// Replace the text of line `position` and return the previous line
    pub fn edit(&mut self, position: usize, text: impl Into<Vec<u8>>) -> Result<Line> {
        let idx = self.check_position(position)?;
        let replacement = Line::new(text);
        let previous = mem::replace(&mut self.lines[idx], replacement);
        self.changed = true;
        debug!(position, "edited line");
        Ok(previous)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
