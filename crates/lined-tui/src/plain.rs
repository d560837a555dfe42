//! Line-by-line frontend for pipes, scripts and dumb terminals.

use std::io::{self, BufRead, Write};

use lined_core::input::read_text_line;
use lined_core::{Document, Prompt, Session};

use crate::screen::{menu_text, numbered_line, title_text};

/// Drive `session` from `reader` until it finishes or input runs out
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    reader: &mut R,
    out: &mut W,
) -> io::Result<()> {
    while !session.is_finished() {
        if let Some(msg) = session.message() {
            writeln!(out, "{}", msg)?;
        }
        if session.prompt() == Prompt::Menu {
            print_document(session.document(), out)?;
            writeln!(out, "\n{}", menu_text())?;
        }
        write!(out, "{}", session.prompt_text())?;
        out.flush()?;

        match read_text_line(reader)? {
            Some(token) => session.submit(&token),
            None => {
                writeln!(out)?;
                session.end_of_input();
            }
        }
    }
    Ok(())
}

fn print_document<W: Write>(doc: &Document, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n--- lined v{} ---\n", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{}\n", title_text(doc))?;
    if doc.is_empty() {
        writeln!(out, "{}", numbered_line(0, ""))?;
    }
    for (i, line) in doc.lines().iter().enumerate() {
        writeln!(out, "{}", numbered_line(i + 1, &line.text()))?;
    }
    Ok(())
}
