use crate::error::{LinedError, Result};

/// Menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Append,
    Insert,
    Delete,
    Edit,
    /// Save and keep editing
    Save,
    /// Save and end the session
    Exit,
    /// End the session without saving
    Quit,
}

// -- Command table --
// Each entry: (command, minimum_abbreviation_length), in menu order.
// A single character always selects by key; longer input is matched
// as an abbreviation of the full name.
const COMMAND_TABLE: &[(MenuCommand, usize)] = &[
    (MenuCommand::Append, 1),
    (MenuCommand::Insert, 1),
    (MenuCommand::Delete, 1),
    (MenuCommand::Edit, 2),
    (MenuCommand::Save, 1),
    (MenuCommand::Exit, 2),
    (MenuCommand::Quit, 1),
];

impl MenuCommand {
    /// All commands in menu order
    pub fn all() -> impl Iterator<Item = MenuCommand> {
        COMMAND_TABLE.iter().map(|&(cmd, _)| cmd)
    }

    pub fn name(self) -> &'static str {
        match self {
            MenuCommand::Append => "APPEND",
            MenuCommand::Insert => "INSERT",
            MenuCommand::Delete => "DELETE",
            MenuCommand::Edit => "EDIT",
            MenuCommand::Save => "SAVE",
            MenuCommand::Exit => "EXIT",
            MenuCommand::Quit => "QUIT",
        }
    }

    /// The single key that selects this command, lowercase
    pub fn key(self) -> char {
        match self {
            MenuCommand::Append => 'a',
            MenuCommand::Insert => 'i',
            MenuCommand::Delete => 'd',
            MenuCommand::Edit => 'e',
            MenuCommand::Save => 's',
            MenuCommand::Exit => 'x',
            MenuCommand::Quit => 'q',
        }
    }

    /// Verb used in the line-number prompt, e.g. "Delete which line?"
    pub fn verb(self) -> &'static str {
        match self {
            MenuCommand::Append => "Append",
            MenuCommand::Insert => "Insert at",
            MenuCommand::Delete => "Delete",
            MenuCommand::Edit => "Edit",
            MenuCommand::Save => "Save",
            MenuCommand::Exit => "Exit",
            MenuCommand::Quit => "Quit",
        }
    }
}

fn lookup_command(input: &str) -> Option<MenuCommand> {
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = c.to_ascii_lowercase();
        return MenuCommand::all().find(|cmd| cmd.key() == c);
    }
    let input_upper = input.to_uppercase();
    COMMAND_TABLE
        .iter()
        .find(|&&(cmd, min_abbrev)| {
            input_upper.len() >= min_abbrev && cmd.name().starts_with(&input_upper)
        })
        .map(|&(cmd, _)| cmd)
}

/// Parse a menu selection
pub fn parse_command(input: &str) -> Result<MenuCommand> {
    let input = input.trim();
    if input.is_empty() || input.contains(char::is_whitespace) {
        return Err(LinedError::InvalidOption(input.to_string()));
    }
    lookup_command(input).ok_or_else(|| LinedError::InvalidOption(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_keys() {
        assert_eq!(parse_command("a").unwrap(), MenuCommand::Append);
        assert_eq!(parse_command("i").unwrap(), MenuCommand::Insert);
        assert_eq!(parse_command("d").unwrap(), MenuCommand::Delete);
        assert_eq!(parse_command("e").unwrap(), MenuCommand::Edit);
        assert_eq!(parse_command("s").unwrap(), MenuCommand::Save);
        assert_eq!(parse_command("x").unwrap(), MenuCommand::Exit);
        assert_eq!(parse_command("q").unwrap(), MenuCommand::Quit);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(parse_command("A").unwrap(), MenuCommand::Append);
        assert_eq!(parse_command(" Q ").unwrap(), MenuCommand::Quit);
    }

    #[test]
    fn parse_abbreviations() {
        assert_eq!(parse_command("app").unwrap(), MenuCommand::Append);
        assert_eq!(parse_command("delete").unwrap(), MenuCommand::Delete);
        assert_eq!(parse_command("ed").unwrap(), MenuCommand::Edit);
        assert_eq!(parse_command("ex").unwrap(), MenuCommand::Exit);
        assert_eq!(parse_command("EXIT").unwrap(), MenuCommand::Exit);
    }

    #[test]
    fn parse_rejects_unknown() {
        for input in ["", "z", "ax", "e x", "appendix", "7"] {
            match parse_command(input) {
                Err(LinedError::InvalidOption(_)) => {}
                other => panic!("Expected InvalidOption for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn keys_are_unique() {
        let keys: Vec<char> = MenuCommand::all().map(|c| c.key()).collect();
        for (i, k) in keys.iter().enumerate() {
            assert!(!keys[i + 1..].contains(k), "duplicate key {}", k);
        }
        assert_eq!(MenuCommand::Exit.key(), 'x');
        assert_eq!(MenuCommand::Insert.name(), "INSERT");
    }

    #[test]
    fn every_command_has_name_and_key() {
        for cmd in MenuCommand::all() {
            assert!(!cmd.name().is_empty(), "{:?} has no name", cmd);
            assert!(cmd.key().is_ascii_lowercase(), "{:?} has no key", cmd);
            assert_eq!(parse_command(&cmd.key().to_string()).unwrap(), cmd);
            assert_eq!(parse_command(cmd.name()).unwrap(), cmd);
        }
        assert_eq!(MenuCommand::all().count(), 7);
    }
}
