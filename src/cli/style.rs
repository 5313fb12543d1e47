//! Terminal text styling

use console::style;
use std::fmt::Display;

pub fn bold(text: impl Display) -> String {
    style(text).bold().to_string()
}

pub fn green(text: impl Display) -> String {
    style(text).green().to_string()
}

pub fn red(text: impl Display) -> String {
    style(text).red().to_string()
}

pub fn faint(text: impl Display) -> String {
    style(text).dim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn test_styles_keep_text() {
        assert_eq!(strip_ansi_codes(&bold("library/redis")), "library/redis");
        assert_eq!(strip_ansi_codes(&green(42)), "42");
        assert_eq!(strip_ansi_codes(&red("boom")), "boom");
        assert_eq!(strip_ansi_codes(&faint("hint")), "hint");
    }
}
