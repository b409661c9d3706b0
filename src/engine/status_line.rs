//! Parsing of gpg's `--status-fd` output.

use crate::core::{STATUS_PREFIX, StatusCode};

/// One line of engine output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine<'a> {
    /// A known status keyword and its argument (possibly empty).
    Status(StatusCode, &'a str),
    /// A status line with a keyword this crate does not know.
    UnknownStatus(&'a str),
    /// Anything else.
    Data(&'a str),
}

/// Classify one line, without its trailing newline.
///
/// A status line is `[GNUPG:] KEYWORD args`; the keyword must start with an
/// uppercase ASCII letter. A trailing carriage return is dropped.
pub fn parse_line(line: &str) -> OutputLine<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(rest) = line.strip_prefix(STATUS_PREFIX) else {
        return OutputLine::Data(line);
    };
    if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
        return OutputLine::Data(line);
    }

    let (keyword, args) = rest.split_once(' ').unwrap_or((rest, ""));
    match StatusCode::from_name(keyword) {
        Some(status) => OutputLine::Status(status, args),
        None => OutputLine::UnknownStatus(keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_line() {
        assert_eq!(
            parse_line("[GNUPG:] GET_LINE keyedit.prompt"),
            OutputLine::Status(StatusCode::GetLine, "keyedit.prompt")
        );
        assert_eq!(
            parse_line("[GNUPG:] GET_BOOL keyedit.save.okay\r"),
            OutputLine::Status(StatusCode::GetBool, "keyedit.save.okay")
        );
    }

    #[test]
    fn test_status_without_args() {
        assert_eq!(
            parse_line("[GNUPG:] GOT_IT"),
            OutputLine::Status(StatusCode::GotIt, "")
        );
    }

    #[test]
    fn test_args_keep_inner_spaces() {
        assert_eq!(
            parse_line("[GNUPG:] ERROR keyedit 67108881 extra"),
            OutputLine::Status(StatusCode::Error, "keyedit 67108881 extra")
        );
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(
            parse_line("[GNUPG:] FANCY_NEW_STATUS 1 2"),
            OutputLine::UnknownStatus("FANCY_NEW_STATUS")
        );
    }

    #[test]
    fn test_data_lines() {
        assert_eq!(parse_line("pub:u:255:22:ABCDEF:"), OutputLine::Data("pub:u:255:22:ABCDEF:"));
        assert_eq!(parse_line("[GNUPG:] lowercase"), OutputLine::Data("[GNUPG:] lowercase"));
        assert_eq!(parse_line("[GNUPG:]GET_LINE x"), OutputLine::Data("[GNUPG:]GET_LINE x"));
        assert_eq!(parse_line(""), OutputLine::Data(""));
    }
}
