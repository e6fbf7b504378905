use crate::{
    commands::COMMANDS,
    palette::{BLUE, MAUVE, RESET},
};
use rustyline::{Completer, Helper, Hinter, Validator, highlight::Highlighter};
use std::borrow::Cow;

/// Paints the leading command word of a line.
#[derive(Completer, Helper, Hinter, Validator)]
pub(crate) struct CommandHighlighter;

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let (word, rest) = trimmed.split_at(end);

        let colour = match word {
            _ if COMMANDS.contains(&word) => MAUVE,
            _ if word.starts_with('/') => BLUE,
            _ => return Cow::Borrowed(line),
        };

        Cow::Owned(format!("{indent}{colour}{word}{RESET}{rest}"))
    }

    fn highlight_char(
        &self,
        _line: &str,
        _pos: usize,
        _kind: rustyline::highlight::CmdKind,
    ) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_command_word() {
        let highlighter = CommandHighlighter;

        assert_eq!(
            highlighter.highlight("  get umbra", 0),
            format!("  {MAUVE}get{RESET} umbra")
        );
        assert_eq!(
            highlighter.highlight("/quit", 0),
            format!("{BLUE}/quit{RESET}")
        );
        assert_eq!(highlighter.highlight("umbra get", 0), "umbra get");
    }
}
