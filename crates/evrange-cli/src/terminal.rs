//! Terminal styling and color detection.

/// ANSI escape codes used by the CLI renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for headline figures.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary text (assumptions, timing).
    pub const GRAY: &str = "\x1b[90m";
    /// Green when the trip fits in one charge.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) when charging stops are needed.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for errors.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is
/// disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            orange: "",
            red: "",
        }
    }

    /// `colored()` when the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (<https://no-color.org/>) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch NO_COLOR/TERM.
    static COLOR_ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn palettes_are_colored_or_empty() {
        let colored = ColorPalette::colored();
        assert_eq!(colored.green, colors::GREEN);
        assert_eq!(colored.orange, colors::ORANGE);

        let plain = ColorPalette::plain();
        for code in [
            plain.reset,
            plain.white_bold,
            plain.gray,
            plain.green,
            plain.orange,
            plain.red,
        ] {
            assert!(code.is_empty());
        }
    }

    #[test]
    fn color_detection_honors_no_color_and_dumb_terminals() {
        let _lock = COLOR_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved = (std::env::var_os("NO_COLOR"), std::env::var_os("TERM"));

        let cases: [(Option<&str>, Option<&str>, bool); 4] = [
            (Some("1"), None, false),
            (None, Some("dumb"), false),
            (None, Some("DUMB"), false),
            (None, Some("xterm-256color"), true),
        ];
        for (no_color, term, expected) in cases {
            match no_color {
                Some(value) => std::env::set_var("NO_COLOR", value),
                None => std::env::remove_var("NO_COLOR"),
            }
            match term {
                Some(value) => std::env::set_var("TERM", value),
                None => std::env::remove_var("TERM"),
            }
            assert_eq!(supports_color(), expected, "NO_COLOR={no_color:?} TERM={term:?}");
        }

        for (key, value) in [("NO_COLOR", saved.0), ("TERM", saved.1)] {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
