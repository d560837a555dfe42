//! Moving documents between disk and memory.
//!
//! The on-disk form is one record per line, each record terminated by
//! `\n`. Records are raw bytes and need not be UTF-8. Terminators never
//! appear in line content: they are stripped on load and written back
//! on save, so an unedited file round-trips byte for byte.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::document::{Document, Line};
use crate::error::{LinedError, Result};

const TERMINATOR: u8 = b'\n';

/// Load `path` into a new document.
///
/// A path that does not exist yet is not an error: the result is an
/// empty document flagged as new, which the first save will create.
/// Any other failure to open or read the file is returned as
/// [`LinedError::Load`], and nothing read so far is kept.
pub fn load(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let mut doc = Document::for_path(path);

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "new file");
            return Ok(doc);
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "open failed");
            return Err(LinedError::Load {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if let Err(e) = read_into(&mut doc, BufReader::new(file)) {
        let source = match e {
            LinedError::Io(source) => source,
            LinedError::AllocationFailure(reserve) => {
                io::Error::new(io::ErrorKind::OutOfMemory, reserve)
            }
            other => io::Error::other(other.to_string()),
        };
        warn!(path = %path.display(), error = %source, "read failed");
        return Err(LinedError::Load {
            path: path.to_path_buf(),
            source,
        });
    }

    doc.finish_load();
    info!(path = %path.display(), lines = doc.line_count(), "loaded");
    Ok(doc)
}

fn read_into<R: BufRead>(doc: &mut Document, mut reader: R) -> Result<()> {
    loop {
        let mut record = Vec::new();
        if reader.read_until(TERMINATOR, &mut record)? == 0 {
            return Ok(());
        }
        if record.last() == Some(&TERMINATOR) {
            record.pop();
        }
        doc.push_loaded(record)?;
    }
}

/// Write `lines` to `writer`, each followed by a terminator
pub fn write_lines<W: Write>(lines: &[Line], writer: &mut W) -> io::Result<()> {
    for line in lines {
        writer.write_all(line.bytes())?;
        writer.write_all(&[TERMINATOR])?;
    }
    Ok(())
}

/// Overwrite the document's file with its current lines.
///
/// On success the document is marked clean and no longer new. On
/// failure the flags are left as they were; the file may hold a
/// partial write.
pub fn save(doc: &mut Document) -> Result<()> {
    let path = doc.filename().ok_or(LinedError::NoFile)?.to_path_buf();

    let written = File::create(&path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_lines(doc.lines(), &mut writer)?;
        writer.flush()
    });

    match written {
        Ok(()) => {
            doc.mark_saved();
            info!(path = %path.display(), lines = doc.line_count(), "saved");
            Ok(())
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "save failed");
            Err(LinedError::Save { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn texts(doc: &Document) -> Vec<String> {
        doc.lines().iter().map(|l| l.text().into_owned()).collect()
    }

    #[test]
    fn load_missing_file_is_new() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("new.txt");

        let doc = load(&path).unwrap();
        assert_eq!(doc.line_count(), 0);
        assert!(doc.is_new());
        assert!(!doc.is_changed());
        assert_eq!(doc.filename(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn load_strips_terminators() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(texts(&doc), ["a", "b", "c"]);
        assert!(!doc.is_new());
        assert!(!doc.is_changed());
    }

    #[test]
    fn load_keeps_unterminated_last_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tail.txt");
        fs::write(&path, "a\nb").unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(texts(&doc), ["a", "b"]);
    }

    #[test]
    fn load_keeps_blank_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "a\n\n\nb\n").unwrap();

        let doc = load(&path).unwrap();
        assert_eq!(texts(&doc), ["a", "", "", "b"]);
    }

    #[test]
    fn load_empty_existing_file_is_not_new() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let doc = load(&path).unwrap();
        assert!(doc.is_empty());
        assert!(!doc.is_new());
    }

    #[test]
    fn load_directory_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, LinedError::Load { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn non_utf8_file_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin1.txt");
        let original = b"caf\xe9\nna\xefve\n";
        fs::write(&path, original).unwrap();

        let mut doc = load(&path).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_at(1), b"caf\xe9");
        assert_eq!(doc.get(2).unwrap().text(), "na\u{fffd}ve");

        doc.append("plain").unwrap();
        save(&mut doc).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\nna\xefve\nplain\n");
    }

    #[test]
    fn load_keeps_carriage_returns() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dos.txt");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        let mut doc = load(&path).unwrap();
        assert_eq!(doc.line_at(1), b"a\r");
        doc.append("c").unwrap();
        save(&mut doc).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\nc\n");
    }

    #[test]
    fn save_new_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("new.txt");

        let mut doc = load(&path).unwrap();
        doc.append("hello").unwrap();
        assert!(doc.is_changed());

        save(&mut doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!doc.is_changed());
        assert!(!doc.is_new());
    }

    #[test]
    fn save_truncates_existing_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        fs::write(&path, "one\ntwo\nthree\nfour\n").unwrap();

        let mut doc = load(&path).unwrap();
        doc.delete(4).unwrap();
        doc.delete(3).unwrap();
        save(&mut doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn save_empty_document_writes_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gone.txt");
        fs::write(&path, "x\n").unwrap();

        let mut doc = load(&path).unwrap();
        doc.delete(1).unwrap();
        save(&mut doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn save_failure_keeps_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("file.txt");

        let mut doc = load(&path).unwrap();
        doc.append("text").unwrap();

        let err = save(&mut doc).unwrap_err();
        assert!(matches!(err, LinedError::Save { .. }));
        assert!(!err.is_fatal());
        assert!(doc.is_changed());
        assert!(doc.is_new());
        assert_eq!(doc.line_at(1), b"text");
    }

    #[test]
    fn save_without_filename() {
        let mut doc = Document::from_lines(["a"]);
        assert!(matches!(save(&mut doc), Err(LinedError::NoFile)));
    }

    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_reported() {
        let lines = [Line::new("abcdef"), Line::new("ghijkl")];
        let mut writer = FailingWriter { budget: 8 };
        assert!(write_lines(&lines, &mut writer).is_err());
    }

    #[test]
    fn write_lines_appends_terminators() {
        let lines = [Line::new("a"), Line::new(""), Line::new("c")];
        let mut out = Vec::new();
        write_lines(&lines, &mut out).unwrap();
        assert_eq!(out, b"a\n\nc\n");
    }
}
